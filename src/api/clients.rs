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
use crate::models::client::ClientDto;
use crate::services::client_service::{self, ClientFilter};

use super::{error_response, require_profile};

#[derive(Debug, Deserialize)]
pub struct ListClientsQuery {
    pub search: Option<String>,
}

/// GET /api/clients
pub async fn list_clients(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(params): Query<ListClientsQuery>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let filter = ClientFilter {
        search: params.search,
    };

    match client_service::list_clients(&db, profile.id, filter).await {
        Ok(clients) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "clients": clients,
                "count": clients.len()
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/clients/:id
pub async fn get_client(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match client_service::get_client(&db, profile.id, id).await {
        Ok(client) => (
            StatusCode::OK,
            Json(json!({ "success": true, "client": client })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/clients
pub async fn create_client(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<ClientDto>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match client_service::create_client(&db, profile.id, payload).await {
        Ok(client) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "client": client })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/clients/:id
pub async fn update_client(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(payload): Json<ClientDto>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match client_service::update_client(&db, profile.id, id, payload).await {
        Ok(client) => (
            StatusCode::OK,
            Json(json!({ "success": true, "client": client })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/clients/:id
pub async fn delete_client(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match client_service::delete_client(&db, profile.id, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Cliente eliminado" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
