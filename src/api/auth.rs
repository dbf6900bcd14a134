use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{create_jwt, hash_password, verify_password, Claims};
use crate::models::profile::{self, ProfileDto};
use crate::models::user::{self, Entity as User};
use crate::utils::validation;

#[derive(Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

/// POST /api/auth/register - Create an account pending email verification
pub async fn register(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if !validation::is_valid_email(&payload.email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Email inválido" })),
        )
            .into_response();
    }
    if !validation::is_valid_password(&payload.password) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "La contraseña debe tener al menos 8 caracteres" })),
        )
            .into_response();
    }

    let existing = User::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(&db)
        .await;
    if let Ok(Some(_)) = existing {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "success": false, "error": "El email ya está registrado" })),
        )
            .into_response();
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Internal error" })),
            )
                .into_response();
        }
    };

    let verification_token = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let new_user = user::ActiveModel {
        email: Set(payload.email.trim().to_lowercase()),
        password_hash: Set(password_hash),
        role: Set("admin".to_owned()),
        email_verified: Set(false),
        verification_token: Set(Some(verification_token.clone())),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_user.insert(&db).await {
        Ok(saved) => {
            tracing::info!("User {} registered, verification pending", saved.email);
            // TODO: deliver the token by email once SMTP settings land;
            // returned in the response meanwhile so the flow is usable.
            (
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "Cuenta creada. Verifica tu correo.",
                    "verification_token": verification_token
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

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    token: String,
}

/// POST /api/auth/verify-email - Confirm the address with the emailed token
pub async fn verify_email(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<VerifyEmailRequest>,
) -> impl IntoResponse {
    let found = User::find()
        .filter(user::Column::VerificationToken.eq(&payload.token))
        .one(&db)
        .await;

    match found {
        Ok(Some(user_model)) => {
            let mut active: user::ActiveModel = user_model.into();
            active.email_verified = Set(true);
            active.verification_token = Set(None);
            active.updated_at = Set(chrono::Utc::now().to_rfc3339());

            match active.update(&db).await {
                Ok(_) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "message": "Correo verificado" })),
                )
                    .into_response(),
                Err(e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": e.to_string() })),
                )
                    .into_response(),
            }
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Token inválido o expirado" })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// POST /api/auth/login - Exchange credentials for a JWT
pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for {}", payload.email);

    let user = match User::find()
        .filter(user::Column::Email.eq(payload.email.trim().to_lowercase()))
        .one(&db)
        .await
    {
        Ok(Some(u)) => u,
        _ => {
            tracing::warn!("User not found: {}", payload.email);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response();
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {
            if !user.email_verified {
                return (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Verifica tu correo antes de iniciar sesión" })),
                )
                    .into_response();
            }

            match create_jwt(&user.email, &user.role) {
                Ok(token) => (StatusCode::OK, Json(json!({ "token": token }))).into_response(),
                Err(e) => {
                    tracing::error!("Failed to create JWT: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Internal error" })),
                    )
                        .into_response()
                }
            }
        }
        _ => {
            tracing::warn!("Password verification failed for {}", user.email);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
    }
}

/// GET /api/auth/me - The caller's account and business profile
pub async fn get_me(State(db): State<DatabaseConnection>, claims: Claims) -> impl IntoResponse {
    let user = match User::find()
        .filter(user::Column::Email.eq(&claims.sub))
        .one(&db)
        .await
    {
        Ok(Some(u)) => u,
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unknown user" })),
            )
                .into_response();
        }
    };

    let business = profile::Entity::find()
        .filter(profile::Column::UserId.eq(user.id))
        .one(&db)
        .await
        .unwrap_or(None)
        .map(ProfileDto::from);

    (
        StatusCode::OK,
        Json(json!({
            "user": user,
            "profile": business
        })),
    )
        .into_response()
}
