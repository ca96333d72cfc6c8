#[path = "support/mod.rs"]
mod support;

use anyhow::Result;
use axum::http::StatusCode;
use cinevote_core::testing::StaticCatalog;
use cinevote_model::api_routes;
use serde_json::{Value, json};

use support::{PASSWORD, bearer, build_test_app, register, register_and_login};

fn registration(email: &str, password: &str, confirm: &str) -> Value {
    json!({
        "username": "alice",
        "email": email,
        "password": password,
        "confirm_password": confirm,
    })
}

#[tokio::test]
async fn register_returns_account_without_password() -> Result<()> {
    let app = build_test_app(StaticCatalog::default())?;

    let body = register(&app.server, "alice@example.com").await;

    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["username"], "alice");
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("hashed_password").is_none());
    assert!(body.get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> Result<()> {
    let app = build_test_app(StaticCatalog::default())?;
    register(&app.server, "alice@example.com").await;

    let response = app
        .server
        .post(api_routes::users::REGISTER)
        .json(&registration("alice@example.com", PASSWORD, PASSWORD))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Email already registered");
    Ok(())
}

#[tokio::test]
async fn weak_or_mismatched_passwords_are_rejected() -> Result<()> {
    let app = build_test_app(StaticCatalog::default())?;

    let short = app
        .server
        .post(api_routes::users::REGISTER)
        .json(&registration("bob@example.com", "abc", "abc"))
        .await;
    short.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = short.json();
    assert_eq!(body["detail"], "Password must be at least 6 characters long");

    let mismatch = app
        .server
        .post(api_routes::users::REGISTER)
        .json(&registration("bob@example.com", "secret1", "secret2"))
        .await;
    mismatch.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = mismatch.json();
    assert_eq!(body["detail"], "Passwords do not match");

    let bad_email = app
        .server
        .post(api_routes::users::REGISTER)
        .json(&registration("not-an-email", PASSWORD, PASSWORD))
        .await;
    bad_email.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() -> Result<()> {
    let app = build_test_app(StaticCatalog::default())?;

    let response = app
        .server
        .post(api_routes::users::REGISTER)
        .json(&json!({ "email": "alice@example.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["detail"].is_string());
    Ok(())
}

#[tokio::test]
async fn login_issues_token_pair() -> Result<()> {
    let app = build_test_app(StaticCatalog::default())?;
    register(&app.server, "alice@example.com").await;

    let response = app
        .server
        .post(api_routes::users::TOKEN)
        .json(&json!({ "email": "alice@example.com", "password": PASSWORD }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["user"]["email"], "alice@example.com");
    let access = body["access_token"].as_str().expect("access token");
    let refresh = body["refresh_token"].as_str().expect("refresh token");
    assert_ne!(access, refresh);
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() -> Result<()> {
    let app = build_test_app(StaticCatalog::default())?;
    register(&app.server, "alice@example.com").await;

    let wrong_password = app
        .server
        .post(api_routes::users::TOKEN)
        .json(&json!({ "email": "alice@example.com", "password": "not-the-password" }))
        .await;
    let unknown_email = app
        .server
        .post(api_routes::users::TOKEN)
        .json(&json!({ "email": "nobody@example.com", "password": PASSWORD }))
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);

    let first: Value = wrong_password.json();
    let second: Value = unknown_email.json();
    assert_eq!(first, second);
    assert_eq!(first["detail"], "Incorrect username or password");
    assert_eq!(
        wrong_password
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    Ok(())
}

#[tokio::test]
async fn refresh_token_mints_new_access_token() -> Result<()> {
    let app = build_test_app(StaticCatalog::default())?;
    let (_, refresh) = register_and_login(&app.server, "alice@example.com").await;

    let response = app
        .server
        .post(api_routes::users::REFRESH)
        .add_header("Authorization", bearer(&refresh))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let access = body["access_token"].as_str().expect("access token");

    // The refreshed token is a working access token.
    let listing = app
        .server
        .get(api_routes::movies::LIST)
        .add_header("Authorization", bearer(access))
        .await;
    listing.assert_status_ok();
    Ok(())
}

#[tokio::test]
async fn refresh_rejects_access_tokens_and_missing_header() -> Result<()> {
    let app = build_test_app(StaticCatalog::default())?;
    let (access, _) = register_and_login(&app.server, "alice@example.com").await;

    let with_access = app
        .server
        .post(api_routes::users::REFRESH)
        .add_header("Authorization", bearer(&access))
        .await;
    with_access.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = with_access.json();
    assert_eq!(body["detail"], "Could not validate credentials");

    let without_header = app.server.post(api_routes::users::REFRESH).await;
    without_header.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn refresh_token_cannot_call_protected_routes() -> Result<()> {
    let app = build_test_app(StaticCatalog::default())?;
    let (_, refresh) = register_and_login(&app.server, "alice@example.com").await;

    let response = app
        .server
        .get(api_routes::movies::LIST)
        .add_header("Authorization", bearer(&refresh))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}
