use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::models::material::MaterialDto;
use crate::services::material_service::{self, MaterialFilter};

use super::{error_response, require_profile};

#[derive(Debug, Deserialize)]
pub struct ListMaterialsQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub low_stock: bool,
}

/// GET /api/materials
pub async fn list_materials(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(params): Query<ListMaterialsQuery>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let filter = MaterialFilter {
        category: params.category,
        low_stock: params.low_stock,
    };

    match material_service::list_materials(&db, profile.id, filter).await {
        Ok(materials) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "materials": materials,
                "count": materials.len()
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/materials/:id
pub async fn get_material(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match material_service::get_material(&db, profile.id, id).await {
        Ok(material) => (
            StatusCode::OK,
            Json(json!({ "success": true, "material": material })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/materials
pub async fn create_material(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<MaterialDto>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match material_service::create_material(&db, profile.id, payload).await {
        Ok(material) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "material": material })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/materials/:id - Price changes never touch existing quotes
pub async fn update_material(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(payload): Json<MaterialDto>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match material_service::update_material(&db, profile.id, id, payload).await {
        Ok(material) => (
            StatusCode::OK,
            Json(json!({ "success": true, "material": material })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/materials/:id
pub async fn delete_material(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match material_service::delete_material(&db, profile.id, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Material eliminado" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
