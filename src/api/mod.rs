pub mod auth;
pub mod clients;
pub mod collaborators;
pub mod gallery;
pub mod health;
pub mod materials;
pub mod profile;
pub mod quotes;
pub mod reports;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::auth::Claims;
use crate::models::profile as profile_model;
use crate::services::{profile_service, ServiceError};

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/verify-email", post(auth::verify_email))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::get_me))
        // Profile (onboarding + business data)
        .route(
            "/profile",
            post(profile::create_profile)
                .get(profile::get_profile)
                .put(profile::update_profile),
        )
        // Clients
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        // Materials catalog
        .route(
            "/materials",
            get(materials::list_materials).post(materials::create_material),
        )
        .route(
            "/materials/:id",
            get(materials::get_material)
                .put(materials::update_material)
                .delete(materials::delete_material),
        )
        // Quotes
        .route(
            "/quotes",
            get(quotes::list_quotes).post(quotes::create_quote),
        )
        .route(
            "/quotes/:id",
            get(quotes::get_quote).delete(quotes::delete_quote),
        )
        .route("/quotes/:id/status", put(quotes::update_status))
        // Collaborators
        .route("/collaborators", get(collaborators::list_collaborators))
        .route("/collaborators/invite", post(collaborators::invite))
        .route("/collaborators/accept", post(collaborators::accept))
        .route(
            "/collaborators/:id",
            axum::routing::delete(collaborators::deactivate),
        )
        // Gallery
        .route(
            "/gallery",
            get(gallery::list_entries).post(gallery::create_entry),
        )
        .route("/gallery/:id", axum::routing::delete(gallery::delete_entry))
        // Reports
        .route("/reports/summary", get(reports::summary))
        .with_state(db)
}

/// Resolve the authenticated caller's profile, or the error response
/// to return as-is. A user that has not finished onboarding gets a 404
/// pointing them there.
pub(crate) async fn require_profile(
    db: &DatabaseConnection,
    claims: &Claims,
) -> Result<profile_model::Model, Response> {
    let user = match profile_service::find_user_by_email(db, &claims.sub).await {
        Ok(user) => user,
        Err(_) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "error": "Unknown user" })),
            )
                .into_response())
        }
    };

    match profile_service::get_by_user(db, user.id).await {
        Ok(profile) => Ok(profile),
        Err(ServiceError::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Completa el registro de tu negocio" })),
        )
            .into_response()),
        Err(e) => Err(error_response(e)),
    }
}

/// Map a service error to the HTTP envelope used across the API.
pub(crate) fn error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Not found" })),
        )
            .into_response(),
        ServiceError::Validation(msg) | ServiceError::InvalidState(msg) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": msg })),
        )
            .into_response(),
        ServiceError::Database(msg) => {
            tracing::error!("Database error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Internal error" })),
            )
                .into_response()
        }
    }
}
