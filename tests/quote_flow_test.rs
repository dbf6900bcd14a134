//! Full walkthrough: register, verify, log in, onboard, quote.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use cotizador::{api, db};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

async fn setup_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    api::api_router(db)
}

fn post_json(uri: &str, token: Option<&str>, payload: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_full_quote_flow() {
    let app = setup_app().await;

    // 1. Register
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            None,
            &serde_json::json!({
                "email": "herrero@taller.mx",
                "password": "contraseña123"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let verification_token = body["verification_token"].as_str().unwrap().to_string();

    // 2. Verify email
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/verify-email",
            None,
            &serde_json::json!({ "token": verification_token }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 3. Login
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            None,
            &serde_json::json!({
                "email": "herrero@taller.mx",
                "password": "contraseña123"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    // 4. Onboard the business (Sonora: 1.1 multiplier on the catalog)
    let response = app
        .clone()
        .oneshot(post_json(
            "/profile",
            Some(&token),
            &serde_json::json!({
                "business_name": "Herrería Los Nogales",
                "address": "Calle Niños Héroes 45, Hermosillo",
                "state": "Sonora",
                "rfc": "GODE561231GR8",
                "phone": "6621234567",
                "email": "contacto@losnogales.mx"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // 5. The seeded catalog shows up region-adjusted: 36 * 1.1 = 39.6 -> 40
    let response = app
        .clone()
        .oneshot(get("/materials", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let materials = body["materials"].as_array().unwrap();
    assert!(!materials.is_empty());
    let ptr = materials
        .iter()
        .find(|m| m["name"] == "PTR 1x1 calibre 14")
        .expect("PTR missing from seeded catalog");
    assert_eq!(ptr["price"].as_f64().unwrap(), 40.0);
    let ptr_id = ptr["id"].as_i64().unwrap();

    // 6. Create a client
    let response = app
        .clone()
        .oneshot(post_json(
            "/clients",
            Some(&token),
            &serde_json::json!({
                "name": "Constructora Díaz",
                "phone": "6629876543",
                "rfc": "CDI900101AB1"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let client_id = body_json(response).await["client"]["id"].as_i64().unwrap();

    // 7. Create a quote (explicit unit_price, as the selection form sends it)
    let response = app
        .clone()
        .oneshot(post_json(
            "/quotes",
            Some(&token),
            &serde_json::json!({
                "client_id": client_id,
                "valid_until": "2099-12-31",
                "discount_percentage": 0.0,
                "profit_percentage": 30.0,
                "advance_payment": 1000.0,
                "jobs": [{
                    "type": "Portón",
                    "description": "Portón de dos hojas",
                    "quantity": 1,
                    "labor_cost": 500.0,
                    "materials": [{
                        "material_id": ptr_id,
                        "quantity": 2.0,
                        "unit_price": 36.0
                    }]
                }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let quote = &body["quote"];

    assert_eq!(quote["subtotal"].as_f64().unwrap(), 572.0);
    assert!((quote["total"].as_f64().unwrap() - 862.576).abs() < 1e-9);
    // Overpaid advance leaves a negative balance, reported as-is
    assert!((quote["remaining_payment"].as_f64().unwrap() - (-137.424)).abs() < 1e-9);
    assert_eq!(quote["status"], "draft");
    let quote_id = quote["id"].as_i64().unwrap();

    // 8. Listing shows the quote with the client's name and counts
    let response = app.clone().oneshot(get("/quotes", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"].as_i64().unwrap(), 1);
    assert_eq!(body["quotes"][0]["client_name"], "Constructora Díaz");
    assert_eq!(body["by_status"]["draft"].as_i64().unwrap(), 1);

    // 9. Send it
    let req = Request::builder()
        .uri(format!("/quotes/{}/status", quote_id))
        .method("PUT")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&serde_json::json!({ "status": "sent" })).unwrap(),
        ))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["quote"]["status"], "sent");
    // The monetary snapshot survives the transition
    assert!((body["quote"]["total"].as_f64().unwrap() - 862.576).abs() < 1e-9);
}
