use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cotizador::auth::{create_jwt, decode_jwt, hash_password, verify_password};
use cotizador::{api, db};
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use serial_test::serial;
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_verified_user(db: &DatabaseConnection, email: &str, password: &str) {
    let hash = hash_password(password).unwrap();
    let user = cotizador::models::user::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(hash),
        role: Set("admin".to_string()),
        email_verified: Set(true),
        verification_token: Set(None),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        updated_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };
    cotizador::models::user::Entity::insert(user)
        .exec(db)
        .await
        .expect("Failed to create user");
}

#[tokio::test]
async fn test_password_hashing() {
    let password = "super_secret_password";
    let hash = hash_password(password).expect("Failed to hash password");

    assert_ne!(password, hash);
    assert!(verify_password(password, &hash).unwrap());
    assert!(!verify_password("wrong_password", &hash).unwrap());
}

#[tokio::test]
#[serial]
async fn test_jwt_creation_and_verification() {
    let email = "taller@herreria.mx";
    let role = "admin";

    let token = create_jwt(email, role).expect("Failed to create JWT");
    assert!(!token.is_empty());

    let claims = decode_jwt(&token).expect("Failed to verify JWT");
    assert_eq!(claims.sub, email);
    assert_eq!(claims.role, role);
}

#[tokio::test]
#[serial]
async fn test_jwt_respects_secret_env() {
    unsafe { std::env::set_var("JWT_SECRET", "another_secret"); }
    let token = create_jwt("taller@herreria.mx", "admin").unwrap();
    assert!(decode_jwt(&token).is_ok());

    // A token minted under a different secret must not verify
    unsafe { std::env::set_var("JWT_SECRET", "rotated_secret"); }
    assert!(decode_jwt(&token).is_err());

    unsafe { std::env::remove_var("JWT_SECRET"); }
}

#[tokio::test]
#[serial]
async fn test_login_flow() {
    let db = setup_test_db().await;
    create_verified_user(&db, "admin@taller.mx", "admin_password").await;

    // Setup Router (simulating main.rs)
    let app = Router::new()
        .route("/auth/login", axum::routing::post(api::auth::login))
        .with_state(db);

    // Success login
    let payload = serde_json::json!({
        "email": "admin@taller.mx",
        "password": "admin_password"
    });

    let req = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Invalid password
    let payload_bad = serde_json::json!({
        "email": "admin@taller.mx",
        "password": "wrong_password"
    });

    let req_bad = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&payload_bad).unwrap()))
        .unwrap();

    let response_bad = app.clone().oneshot(req_bad).await.unwrap();
    assert_eq!(response_bad.status(), StatusCode::UNAUTHORIZED);

    // Non-existent user
    let payload_none = serde_json::json!({
        "email": "nadie@taller.mx",
        "password": "password"
    });

    let req_none = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&payload_none).unwrap()))
        .unwrap();

    let response_none = app.oneshot(req_none).await.unwrap();
    assert_eq!(response_none.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_login_requires_verified_email() {
    let db = setup_test_db().await;

    let hash = hash_password("password123").unwrap();
    let user = cotizador::models::user::ActiveModel {
        email: Set("pendiente@taller.mx".to_string()),
        password_hash: Set(hash),
        role: Set("admin".to_string()),
        email_verified: Set(false),
        verification_token: Set(Some("tok-1".to_string())),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        updated_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };
    cotizador::models::user::Entity::insert(user)
        .exec(&db)
        .await
        .unwrap();

    let app = Router::new()
        .route("/auth/login", axum::routing::post(api::auth::login))
        .with_state(db);

    let payload = serde_json::json!({
        "email": "pendiente@taller.mx",
        "password": "password123"
    });

    let req = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn test_protected_route_rejects_missing_and_bad_tokens() {
    let db = setup_test_db().await;
    let app = api::api_router(db);

    // No Authorization header
    let req = Request::builder()
        .uri("/clients")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let req = Request::builder()
        .uri("/clients")
        .header("Authorization", "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
