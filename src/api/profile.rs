use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::auth::Claims;
use crate::models::profile::ProfileDto;
use crate::services::{profile_service, ServiceError};

use super::error_response;

/// POST /api/profile - Onboarding: create the business profile and
/// seed its region-adjusted material catalog
pub async fn create_profile(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<ProfileDto>,
) -> impl IntoResponse {
    let user = match profile_service::find_user_by_email(&db, &claims.sub).await {
        Ok(user) => user,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "error": "Unknown user" })),
            )
                .into_response();
        }
    };

    match profile_service::create_profile(&db, user.id, payload).await {
        Ok(profile) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "profile": ProfileDto::from(profile)
            })),
        )
            .into_response(),
        Err(ServiceError::InvalidState(msg)) => (
            StatusCode::CONFLICT,
            Json(json!({ "success": false, "error": msg })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/profile
pub async fn get_profile(State(db): State<DatabaseConnection>, claims: Claims) -> impl IntoResponse {
    match super::require_profile(&db, &claims).await {
        Ok(profile) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "profile": ProfileDto::from(profile)
            })),
        )
            .into_response(),
        Err(resp) => resp,
    }
}

/// PUT /api/profile - Update business data (state changes do not
/// reprice the catalog)
pub async fn update_profile(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<ProfileDto>,
) -> impl IntoResponse {
    let user = match profile_service::find_user_by_email(&db, &claims.sub).await {
        Ok(user) => user,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "error": "Unknown user" })),
            )
                .into_response();
        }
    };

    match profile_service::update_profile(&db, user.id, payload).await {
        Ok(profile) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "profile": ProfileDto::from(profile)
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
