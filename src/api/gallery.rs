use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::models::gallery::{self, Entity as Gallery, GALLERY_CATEGORIES};
use crate::utils::validation;

use super::require_profile;

#[derive(Debug, Deserialize)]
pub struct ListGalleryQuery {
    pub category: Option<String>,
}

/// GET /api/gallery
pub async fn list_entries(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(params): Query<ListGalleryQuery>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let mut query = Gallery::find().filter(gallery::Column::ProfileId.eq(profile.id));
    if let Some(category) = params.category {
        query = query.filter(gallery::Column::Category.eq(category));
    }

    match query
        .order_by_desc(gallery::Column::CreatedAt)
        .all(&db)
        .await
    {
        Ok(entries) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "gallery": entries,
                "count": entries.len()
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateGalleryRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: String,
}

/// POST /api/gallery
pub async fn create_entry(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CreateGalleryRequest>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    if !validation::is_required(&payload.title) || !validation::is_required(&payload.image_url) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Título e imagen son requeridos" })),
        )
            .into_response();
    }
    if !GALLERY_CATEGORIES.contains(&payload.category.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": format!("Categoría desconocida: {}", payload.category) })),
        )
            .into_response();
    }

    let new_entry = gallery::ActiveModel {
        profile_id: Set(profile.id),
        title: Set(payload.title.trim().to_owned()),
        description: Set(payload.description),
        category: Set(payload.category),
        image_url: Set(payload.image_url),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };

    match new_entry.insert(&db).await {
        Ok(saved) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "entry": saved })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// DELETE /api/gallery/:id
pub async fn delete_entry(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let found = match Gallery::find_by_id(id)
        .filter(gallery::Column::ProfileId.eq(profile.id))
        .one(&db)
        .await
    {
        Ok(Some(entry)) => entry,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "error": "Entrada no encontrada" })),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response();
        }
    };

    match Gallery::delete_by_id(found.id).exec(&db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Entrada eliminada" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e.to_string() })),
        )
            .into_response(),
    }
}
