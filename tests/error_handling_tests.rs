//! HTTP-level error responses
//!
//! These tests exercise the request paths that fail before any store access,
//! so they run against a router whose MongoDB client never connects. No
//! Docker required.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use storefront::{AppConfig, AppState, build_router};

async fn test_server() -> TestServer {
    // The driver connects lazily; these tests never reach a query.
    let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
        .await
        .expect("client parses URI");
    let database = client.database("storefront_never_touched");
    let config = AppConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("test-secret".to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("config builds");
    TestServer::new(build_router(AppState::new(database, &config)))
}

#[tokio::test]
async fn test_root_greeting() {
    let server = test_server().await;
    let response = server.get("/").await;
    response.assert_status(StatusCode::OK);
    response.assert_text("Server Connected!");
}

#[tokio::test]
async fn test_validation_error_shape() {
    let server = test_server().await;
    let response = server
        .post("/auth/signup")
        .json(&json!({"username": "ab", "password": "secret123"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().starts_with("Validation failed"));
    let fields = body["details"]["fields"].as_array().unwrap();
    assert_eq!(fields[0]["field"], "username");
    assert_eq!(fields[0]["message"], "must be at least 3 characters");
}

#[tokio::test]
async fn test_signup_reports_all_missing_fields() {
    let server = test_server().await;
    let response = server.post("/auth/signup").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    let fields = body["details"]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
}

#[tokio::test]
async fn test_product_create_aggregates_violations() {
    let server = test_server().await;
    let response = server
        .post("/products")
        .json(&json!({
            "title": "",
            "author": "Frank Herbert",
            "binding": "Paperback",
            "rewardPoints": -5,
            "productCode": "BK-0042",
            "availability": "In Stock",
            "price": {"original": 25.0, "discounted": 18.75, "discountPercentage": 250},
            "review": [],
            "reviewsCount": 0,
            "description": "Science fiction epic.",
            "image": "not a url",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    let fields: Vec<&str> = body["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields.len(), 4);
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"rewardPoints"));
    assert!(fields.contains(&"price.discountPercentage"));
    assert!(fields.contains(&"image"));
}

#[tokio::test]
async fn test_malformed_path_id_is_validation_error_not_404() {
    let server = test_server().await;
    for path in ["/products/not-an-id", "/order/xyz", "/cart/123"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["fields"][0]["field"], "id");
    }
}

#[tokio::test]
async fn test_listing_filter_without_value_rejected() {
    let server = test_server().await;
    let response = server.get("/products?filter=title").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["details"]["fields"][0]["field"], "title");
}

#[tokio::test]
async fn test_listing_rejects_hostile_filter_field() {
    let server = test_server().await;
    let response = server.get("/products?filter=%24where&%24where=1").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["details"]["fields"][0]["field"], "filter");
}

#[tokio::test]
async fn test_listing_rejects_unknown_order() {
    let server = test_server().await;
    let response = server.get("/products?sort=title&order=sideways").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["details"]["fields"][0]["field"], "order");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = test_server().await;
    server
        .get("/warehouse")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_json_body_rejected() {
    let server = test_server().await;
    let response = server.post("/products").text("not json").await;
    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
