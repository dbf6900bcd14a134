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
use crate::services::quote_service::{self, CreateQuoteInput, QuoteFilter};
use crate::services::ServiceError;

use super::{error_response, require_profile};

#[derive(Debug, Deserialize)]
pub struct ListQuotesQuery {
    pub status: Option<String>,
    pub client_id: Option<i32>,
}

/// POST /api/quotes - Create a quote; the monetary snapshot is
/// computed here and never again
pub async fn create_quote(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CreateQuoteInput>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match quote_service::create_quote(&db, profile.id, payload).await {
        Ok(quote) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "quote": quote })),
        )
            .into_response(),
        Err(ServiceError::Validation(msg)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": msg })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create quote: {}", e);
            error_response(e)
        }
    }
}

/// GET /api/quotes - List with client names and per-status counts
pub async fn list_quotes(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(params): Query<ListQuotesQuery>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let filter = QuoteFilter {
        status: params.status,
        client_id: params.client_id,
    };

    let quotes = match quote_service::list_quotes(&db, profile.id, filter).await {
        Ok(quotes) => quotes,
        Err(e) => return error_response(e),
    };

    match quote_service::status_counts(&db, profile.id).await {
        Ok(counts) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "quotes": quotes,
                "count": quotes.len(),
                "by_status": counts
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/quotes/:id - Quote with jobs and material lines
pub async fn get_quote(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match quote_service::get_quote(&db, profile.id, id).await {
        Ok(quote) => (
            StatusCode::OK,
            Json(json!({ "success": true, "quote": quote })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PUT /api/quotes/:id/status - Lifecycle transition, totals untouched
pub async fn update_status(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match quote_service::update_status(&db, profile.id, id, &payload.status).await {
        Ok(quote) => (
            StatusCode::OK,
            Json(json!({ "success": true, "quote": quote })),
        )
            .into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Cotización no encontrada" })),
        )
            .into_response(),
        Err(ServiceError::InvalidState(msg)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": msg })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/quotes/:id
pub async fn delete_quote(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match quote_service::delete_quote(&db, profile.id, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Cotización eliminada" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
