use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::models::collaborator::{self, Entity as Collaborator};
use crate::services::profile_service;
use crate::utils::validation;

use super::require_profile;

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub email: String,
}

/// POST /api/collaborators/invite
pub async fn invite(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<InviteRequest>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    if !validation::is_valid_email(&payload.email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Email inválido" })),
        )
            .into_response();
    }

    let invite_token = uuid::Uuid::new_v4().to_string();

    let new_invite = collaborator::ActiveModel {
        profile_id: Set(profile.id),
        invited_email: Set(payload.email.trim().to_lowercase()),
        user_id: Set(None),
        status: Set("pending".to_owned()),
        invite_token: Set(invite_token.clone()),
        invited_at: Set(chrono::Utc::now().to_rfc3339()),
        joined_at: Set(None),
        ..Default::default()
    };

    match new_invite.insert(&db).await {
        Ok(saved) => {
            tracing::info!(
                "Collaborator {} invited to profile {}",
                saved.invited_email,
                profile.id
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "collaborator": saved,
                    "invite_token": invite_token
                })),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub token: String,
}

/// POST /api/collaborators/accept - The invited user joins the workshop
pub async fn accept(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<AcceptRequest>,
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

    let invite = match Collaborator::find()
        .filter(collaborator::Column::InviteToken.eq(&payload.token))
        .filter(collaborator::Column::Status.eq("pending"))
        .one(&db)
        .await
    {
        Ok(Some(invite)) => invite,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": "Invitación inválida o ya usada" })),
            )
                .into_response();
        }
    };

    let mut active: collaborator::ActiveModel = invite.into();
    active.user_id = Set(Some(user.id));
    active.status = Set("active".to_owned());
    active.joined_at = Set(Some(chrono::Utc::now().to_rfc3339()));

    match active.update(&db).await {
        Ok(saved) => (
            StatusCode::OK,
            Json(json!({ "success": true, "collaborator": saved })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// GET /api/collaborators
pub async fn list_collaborators(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match Collaborator::find()
        .filter(collaborator::Column::ProfileId.eq(profile.id))
        .order_by_desc(collaborator::Column::InvitedAt)
        .all(&db)
        .await
    {
        Ok(collaborators) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "collaborators": collaborators,
                "count": collaborators.len()
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

/// DELETE /api/collaborators/:id - Deactivate, keep the record
pub async fn deactivate(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let profile = match require_profile(&db, &claims).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let found = match Collaborator::find_by_id(id)
        .filter(collaborator::Column::ProfileId.eq(profile.id))
        .one(&db)
        .await
    {
        Ok(Some(c)) => c,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "error": "Colaborador no encontrado" })),
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

    let mut active: collaborator::ActiveModel = found.into();
    active.status = Set("inactive".to_owned());

    match active.update(&db).await {
        Ok(saved) => (
            StatusCode::OK,
            Json(json!({ "success": true, "collaborator": saved })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e.to_string() })),
        )
            .into_response(),
    }
}
