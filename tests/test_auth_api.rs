mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, assert_error, spawn_app, test_config};
use labkeeper::domain::Role;
use rstest::*;
use serde_json::{Value, json};

fn app() -> TestApp {
    spawn_app(test_config())
}

async fn login(app: &TestApp, body: Value) -> common::TestResponse {
    app.request(Method::POST, "/api/auth/login", None, Some(body))
        .await
}

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let app = app();
    let user = app.add_user("teacher@school.edu", "secret1", Role::Teacher).await;

    let response = login(
        &app,
        json!({ "email": "Teacher@School.edu", "password": "secret1" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["user"]["id"], user.id);
    assert_eq!(response.json["user"]["email"], "teacher@school.edu");
    assert_eq!(response.json["user"]["role"], "teacher");
    assert!(response.json["user"].get("password_hash").is_none());

    let token = response.json["token"].as_str().unwrap();
    let claims = app.jwt.verify_token(token).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.role, Role::Teacher);
}

#[rstest]
#[case(json!({ "password": "secret1" }), "email and password are required")]
#[case(json!({ "email": "a@school.edu" }), "email and password are required")]
#[case(json!({ "email": "not-an-email", "password": "secret1" }), "invalid email")]
#[case(json!({ "email": "a@school.edu", "password": "123" }), "password must be at least 6 characters")]
#[tokio::test]
async fn test_login_validation(#[case] body: Value, #[case] message: &str) {
    let app = app();
    let response = login(&app, body).await;
    assert_error(&response, StatusCode::BAD_REQUEST, message);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = app();
    let response = login(
        &app,
        json!({ "email": "ghost@school.edu", "password": "secret1" }),
    )
    .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "user not found");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = app();
    app.add_user("student@school.edu", "secret1", Role::Student).await;

    let response = login(
        &app,
        json!({ "email": "student@school.edu", "password": "secret2" }),
    )
    .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "incorrect password");
}

#[tokio::test]
async fn test_login_accepts_whitespace_password() {
    let app = app();
    app.add_user("lab@school.edu", "      ", Role::Teacher).await;

    let response = login(
        &app,
        json!({ "email": "lab@school.edu", "password": "      " }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["user"]["role"], "teacher");
}

#[tokio::test]
async fn test_login_malformed_json() {
    let app = app();
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json["status_code"], 400);
}

#[tokio::test]
async fn test_verify_valid_token() {
    let app = app();
    let token = app.token_for(7, Role::Admin);

    let response = app
        .request(Method::GET, "/api/auth/verify", Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["valid"], true);
    assert_eq!(response.json["user"]["sub"], "7");
    assert_eq!(response.json["user"]["role"], "admin");
}

#[tokio::test]
async fn test_verify_missing_token() {
    let app = app();
    let response = app
        .request(Method::GET, "/api/auth/verify", None, None)
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "token required");
}

#[tokio::test]
async fn test_verify_rejects_foreign_token() {
    let app = app();
    let foreign = labkeeper::services::jwt_service::JwtService::new("someone_else")
        .generate_token(1, "a@b.c", Role::Admin)
        .unwrap();

    let response = app
        .request(Method::GET, "/api/auth/verify", Some(&foreign), None)
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "invalid token");
}

#[tokio::test]
async fn test_me_returns_stored_account() {
    let app = app();
    let user = app.add_user("admin@school.edu", "secret1", Role::Admin).await;
    let token = app.token_for(user.id, Role::Admin);

    let response = app
        .request(Method::GET, "/api/auth/me", Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json,
        json!({ "id": user.id, "email": "admin@school.edu", "role": "admin" })
    );
}

#[tokio::test]
async fn test_me_for_removed_account() {
    let app = app();
    let token = app.token_for(404, Role::Student);

    let response = app
        .request(Method::GET, "/api/auth/me", Some(&token), None)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "user not found");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = app();
    let response = app.request(Method::GET, "/api/auth/me", None, None).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "token required");
}
