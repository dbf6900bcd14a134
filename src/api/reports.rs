use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::auth::Claims;
use crate::services::report_service;

use super::{error_response, require_profile};

/// GET /api/reports/summary - Dashboard aggregates for the workshop
pub async fn summary(State(db): State<DatabaseConnection>, claims: Claims) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match report_service::summary(&db, profile.id).await {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({ "success": true, "report": report })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
