//! End-to-end tests against the in-process router.

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use receipt_api::{build_router, ApiConfig, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const TARGET: &str = include_str!("fixtures/target.json");
const MORNING: &str = include_str!("fixtures/morning.json");
const SIMPLE: &str = include_str!("fixtures/simple.json");
const GATORADE: &str = include_str!("fixtures/gatorade.json");

fn test_app() -> Router {
    let state = AppState::from_config(&ApiConfig::default()).unwrap();
    build_router(Arc::new(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn token_request(form: &str) -> Request<Body> {
    Request::post("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

async fn login(app: &Router) -> String {
    let (status, _, body) = send(
        app,
        token_request("username=testuser&password=fakehashedsecret"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

fn process_request(token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder =
        Request::post("/receipts/process").header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn points_request(token: Option<&str>, id: &str) -> Request<Body> {
    let mut builder = Request::get(format!("/receipts/{}/points", id));
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn process(app: &Router, token: &str, body: &str) -> Value {
    let (status, _, body) = send(app, process_request(Some(token), body)).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    body
}

// =============================================================================
// Token
// =============================================================================

#[tokio::test]
async fn test_token_issued_for_valid_credentials() {
    let app = test_app();
    let (status, _, body) = send(
        &app,
        token_request("username=testuser&password=fakehashedsecret"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_token_is_idempotent() {
    let app = test_app();
    assert_eq!(login(&app).await, login(&app).await);
}

#[tokio::test]
async fn test_token_rejects_wrong_password() {
    let app = test_app();
    let (status, headers, body) =
        send(&app, token_request("username=testuser&password=nope")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers[header::WWW_AUTHENTICATE], "Bearer");
    assert_eq!(body["code"], "UNAUTHENTICATED");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_token_rejects_unknown_user() {
    let app = test_app();
    let (status, _, _) = send(
        &app,
        token_request("username=mallory&password=fakehashedsecret"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_missing_field_is_unprocessable() {
    let app = test_app();
    let (status, _, body) = send(&app, token_request("username=testuser")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Process
// =============================================================================

#[tokio::test]
async fn test_process_target_receipt() {
    let app = test_app();
    let token = login(&app).await;
    let body = process(&app, &token, TARGET).await;

    assert_eq!(body["points"], 28);
    assert_eq!(body["breakdown"]["retailer_points"], 6);
    assert_eq!(body["breakdown"]["item_points"], 16);
    assert_eq!(body["breakdown"]["odd_date_points"], 6);
    assert_eq!(body["breakdown"]["round_dollar_points"], 0);
    assert_eq!(body["breakdown"]["multiple_of_0.25_points"], 0);
    assert_eq!(body["breakdown"]["time_points"], 0);
    assert!(!body["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_process_reference_receipts() {
    let app = test_app();
    let token = login(&app).await;

    assert_eq!(process(&app, &token, MORNING).await["points"], 15);
    assert_eq!(process(&app, &token, SIMPLE).await["points"], 31);
    assert_eq!(process(&app, &token, GATORADE).await["points"], 109);

    let supermart = json!({
        "retailer": "Supermart",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "10:00",
        "items": [
            { "shortDescription": "Bread", "price": "1.00" },
            { "shortDescription": "Milk", "price": "2.00" }
        ],
        "total": "3.00"
    });
    assert_eq!(
        process(&app, &token, &supermart.to_string()).await["points"],
        95
    );
}

#[tokio::test]
async fn test_process_readme_receipt() {
    let app = test_app();
    let token = login(&app).await;
    let receipt = json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [{ "shortDescription": "Mountain Dew 12PK", "price": "6.49" }],
        "total": "6.49"
    });

    let body = process(&app, &token, &receipt.to_string()).await;
    assert_eq!(body["points"], 20);
    assert_eq!(
        body["breakdown"],
        json!({
            "retailer_points": 14,
            "round_dollar_points": 0,
            "multiple_of_0.25_points": 0,
            "item_points": 0,
            "odd_date_points": 6,
            "time_points": 0
        })
    );
}

#[tokio::test]
async fn test_same_receipt_twice_gets_distinct_ids() {
    let app = test_app();
    let token = login(&app).await;

    let first = process(&app, &token, SIMPLE).await;
    let second = process(&app, &token, SIMPLE).await;

    assert_ne!(first["id"], second["id"]);
    assert_eq!(first["points"], second["points"]);
}

#[tokio::test]
async fn test_process_requires_token() {
    let app = test_app();
    let (status, headers, body) = send(&app, process_request(None, SIMPLE)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers[header::WWW_AUTHENTICATE], "Bearer");
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_process_rejects_forged_token() {
    let app = test_app();
    let (status, _, _) = send(&app, process_request(Some("not.a.token"), SIMPLE)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_process_rejects_invalid_total() {
    let app = test_app();
    let token = login(&app).await;
    let receipt = json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-02",
        "purchaseTime": "13:13",
        "items": [{ "shortDescription": "Pepsi - 12-oz", "price": "1.25" }],
        "total": "1.2"
    });

    let (status, _, body) = send(&app, process_request(Some(&token), &receipt.to_string())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"][0]["field"], "total");
}

#[tokio::test]
async fn test_process_reports_every_invalid_field() {
    let app = test_app();
    let token = login(&app).await;
    let receipt = json!({
        "retailer": "Target!",
        "purchaseDate": "2022-13-40",
        "purchaseTime": "25:00",
        "items": [
            { "shortDescription": "Pepsi - 12-oz", "price": "1.25" },
            { "shortDescription": "Dasani", "price": "abc" }
        ]
    });

    let (status, _, body) = send(&app, process_request(Some(&token), &receipt.to_string())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let fields: HashSet<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|detail| detail["field"].as_str().unwrap())
        .collect();
    let expected: HashSet<&str> = [
        "retailer",
        "purchaseDate",
        "purchaseTime",
        "items[1].price",
        "total",
    ]
    .into_iter()
    .collect();
    assert_eq!(fields, expected);
}

#[tokio::test]
async fn test_process_reports_numeric_price_at_its_path() {
    let app = test_app();
    let token = login(&app).await;
    let receipt = json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-02",
        "purchaseTime": "13:13",
        "items": [{ "shortDescription": "Pepsi - 12-oz", "price": 1.25 }],
        "total": "1.25"
    });

    let (status, _, body) = send(&app, process_request(Some(&token), &receipt.to_string())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["details"],
        json!([{
            "field": "items[0].price",
            "message": "items[0].price must be a string, found a number"
        }])
    );
}

#[tokio::test]
async fn test_process_rejects_empty_items() {
    let app = test_app();
    let token = login(&app).await;
    let receipt = json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-02",
        "purchaseTime": "13:13",
        "items": [],
        "total": "1.25"
    });

    let (status, _, body) = send(&app, process_request(Some(&token), &receipt.to_string())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "items");
}

#[tokio::test]
async fn test_process_rejects_malformed_json() {
    let app = test_app();
    let token = login(&app).await;

    let (status, _, body) = send(&app, process_request(Some(&token), "{not json")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Points
// =============================================================================

#[tokio::test]
async fn test_get_points_after_process() {
    let app = test_app();
    let token = login(&app).await;
    let processed = process(&app, &token, TARGET).await;
    let id = processed["id"].as_str().unwrap();

    let (status, _, body) = send(&app, points_request(Some(&token), id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "points": 28 }));
}

#[tokio::test]
async fn test_get_points_unknown_id() {
    let app = test_app();
    let token = login(&app).await;

    let (status, _, body) = send(&app, points_request(Some(&token), "invalid_id")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "No receipt found for that ID.");
}

#[tokio::test]
async fn test_returned_token_type_is_accepted_as_scheme() {
    let app = test_app();
    let (_, _, login) = send(
        &app,
        token_request("username=testuser&password=fakehashedsecret"),
    )
    .await;
    let authorization = format!(
        "{} {}",
        login["token_type"].as_str().unwrap(),
        login["access_token"].as_str().unwrap()
    );

    let request = Request::get("/receipts/unknown/points")
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_points_requires_token() {
    let app = test_app();
    let token = login(&app).await;
    let processed = process(&app, &token, SIMPLE).await;
    let id = processed["id"].as_str().unwrap();

    let (status, _, _) = send(&app, points_request(None, id)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Index and health
// =============================================================================

#[tokio::test]
async fn test_health_counts_receipts() {
    let app = test_app();
    let token = login(&app).await;

    let request = || Request::get("/health").body(Body::empty()).unwrap();
    let (status, _, body) = send(&app, request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "receipts": 0 }));

    process(&app, &token, SIMPLE).await;
    let (_, _, body) = send(&app, request()).await;
    assert_eq!(body["receipts"], 1);
}

#[tokio::test]
async fn test_index_serves_html() {
    let app = test_app();
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Receipt Points Service"));
}
