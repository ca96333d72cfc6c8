#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum_test::TestServer;
use cinevote_config::{
    AuthConfig, CatalogConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig, ServerConfig,
};
use cinevote_core::testing::{InMemoryCredentialStore, InMemoryVoteStore, StaticCatalog};
use cinevote_model::{CatalogMovie, CatalogPage, api_routes};
use cinevote_server::{AppState, create_app};
use serde_json::{Value, json};

pub const PASSWORD: &str = "secret1";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub votes: Arc<InMemoryVoteStore>,
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/cinevote_test".into(),
            max_connections: 1,
        },
        auth: AuthConfig {
            secret_key: "integration-test-secret-key-0123456789".into(),
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(30 * 24 * 60 * 60),
        },
        catalog: CatalogConfig::default(),
        cors: CorsConfig::default(),
        metadata: ConfigMetadata::default(),
    }
}

/// Four items, "Inception" twice, each with fields the API passes through.
pub fn sample_page() -> CatalogPage {
    CatalogPage {
        total: 1234,
        items: vec![
            CatalogMovie::titled("Inception")
                .with_field("id", "tt1375666")
                .with_field("year", 2010),
            CatalogMovie::titled("Dune")
                .with_field("id", "tt1160419")
                .with_field("year", 2021),
            CatalogMovie::titled("Inception")
                .with_field("id", "tt-duplicate")
                .with_field("year", 1999),
            CatalogMovie::titled("Heat").with_field("id", "tt0113277"),
        ],
    }
}

pub fn build_test_app(catalog: StaticCatalog) -> Result<TestApp> {
    let votes = Arc::new(InMemoryVoteStore::new());
    let state = AppState::new(
        Arc::new(test_config()),
        Arc::new(InMemoryCredentialStore::new()),
        votes.clone(),
        Arc::new(catalog),
    );

    let router = create_app(state.clone());
    let make_service = router.into_make_service_with_connect_info::<SocketAddr>();
    let server = TestServer::builder()
        .http_transport()
        .build(make_service)
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok(TestApp {
        server,
        state,
        votes,
    })
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub async fn register(server: &TestServer, email: &str) -> Value {
    let response = server
        .post(api_routes::users::REGISTER)
        .json(&json!({
            "username": email.split('@').next().unwrap_or("user"),
            "email": email,
            "password": PASSWORD,
            "confirm_password": PASSWORD,
        }))
        .await;
    response.assert_status_ok();
    response.json()
}

/// Registers `email` and logs in, returning `(access_token, refresh_token)`.
pub async fn register_and_login(server: &TestServer, email: &str) -> (String, String) {
    register(server, email).await;

    let response = server
        .post(api_routes::users::TOKEN)
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let access = body["access_token"]
        .as_str()
        .expect("access token issued")
        .to_string();
    let refresh = body["refresh_token"]
        .as_str()
        .expect("refresh token issued")
        .to_string();
    (access, refresh)
}
