//! End-to-end tests for the HTTP surface shared by every area: health, the fallback,
//! authentication failures and the error envelope.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{error_paths, TestApp, PASSWORD};
use megahr_domain::roles::UserRole;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_reports_up() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_cross_origin_requests_are_allowed() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/auth/login")
        .header(header::ORIGIN, "https://careers.acme.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://careers.acme.test")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_unknown_route_names_method_and_path() {
    let app = TestApp::new();
    let (status, body) = app
        .call(Method::GET, "/api/v1/does-not-exist", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found - GET /api/v1/does-not-exist");
}

#[tokio::test]
async fn test_missing_and_invalid_tokens_are_rejected() {
    let app = TestApp::new();

    let (status, body) = app.call(Method::GET, "/api/v1/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, no token");

    let (status, body) = app.get("/api/v1/auth/me", "garbage.token.value").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, token failed");
}

#[tokio::test]
async fn test_register_login_and_me() {
    let app = TestApp::new();
    let session = app.register("Ada@Example.com").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["token"].is_string());
    assert!(body["data"]["user"]["passwordHash"].is_null());

    let (status, body) = app.get("/api/v1/auth/me", &session.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["role"], "STANDARD");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new();
    app.register("dup@example.com").await;
    let (status, _) = app
        .call(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": "dup@example.com",
                "password": PASSWORD,
                "firstName": "Again",
                "lastName": "User",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.register("grace@example.com").await;
    let (status, body) = app
        .call(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "grace@example.com", "password": "not-the-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials.");
}

#[tokio::test]
async fn test_validation_failures_list_field_paths() {
    let app = TestApp::new();
    let (status, body) = app
        .call(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": "not-an-email",
                "password": "short",
                "firstName": "",
                "lastName": "User",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let paths = error_paths(&body);
    assert!(paths.contains(&"email".to_string()), "{paths:?}");
    assert!(paths.contains(&"password".to_string()), "{paths:?}");
    assert!(paths.contains(&"firstName".to_string()), "{paths:?}");
}

#[tokio::test]
async fn test_malformed_bodies() {
    let app = TestApp::new();

    let (status, _) = app
        .call(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "email": 42, "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .expect("Failed to build request");
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_company_creation_requires_platform_admin() {
    let app = TestApp::new();
    let standard = app.register("standard@example.com").await;

    let (status, body) = app
        .post("/api/v1/companies", &standard.token, json!({ "name": "Nope Inc" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].is_string());

    app.promote(&standard, UserRole::Admin).await;
    let (status, body) = app
        .post("/api/v1/companies", &standard.token, json!({ "name": "Yes Inc" }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["name"], "Yes Inc");
}

#[tokio::test]
async fn test_user_listing_is_mega_admin_only() {
    let app = TestApp::new();
    let user = app.register("someone@example.com").await;

    let (status, _) = app.get("/api/v1/users", &user.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    app.promote(&user, UserRole::MegaAdmin).await;
    let (status, body) = app.get("/api/v1/users?page=1&limit=5", &user.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["limit"], 5);
    assert_eq!(body["pagination"]["totalItems"], 1);
}
