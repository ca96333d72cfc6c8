use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use cinevote_core::CoreError;
use cinevote_core::catalog::{
    CatalogGateway, CatalogQuery, CatalogSettings, HttpCatalogGateway, RetryPolicy,
};
use serde_json::json;
use tokio::net::TcpListener;

/// How the fake catalog answers the n-th request (1-based).
#[derive(Clone, Copy)]
enum Script {
    FailUntil(usize),
    AlwaysFail,
    Malformed,
    Echo,
}

#[derive(Clone)]
struct FakeCatalog {
    script: Script,
    hits: Arc<AtomicUsize>,
}

async fn movies(
    State(fake): State<FakeCatalog>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let hit = fake.hits.fetch_add(1, Ordering::SeqCst) + 1;
    match fake.script {
        Script::FailUntil(n) if hit < n => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        Script::AlwaysFail => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Script::Malformed => (StatusCode::OK, "<html>not json</html>").into_response(),
        Script::Echo => Json(json!({
            "total": 1,
            "items": [{"title": "Echo", "params": params}]
        }))
        .into_response(),
        Script::FailUntil(_) => Json(json!({
            "total": 120,
            "items": [
                {"title": "Dune", "id": "tt1160419", "year": 2021},
                {"title": "Heat", "id": "tt0113277"}
            ]
        }))
        .into_response(),
    }
}

async fn spawn_catalog(script: Script) -> Result<(HttpCatalogGateway, Arc<AtomicUsize>)> {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/movies/", get(movies))
        .with_state(FakeCatalog {
            script,
            hits: hits.clone(),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let gateway = HttpCatalogGateway::new(&CatalogSettings {
        url: format!("http://{addr}/movies/"),
        timeout: Duration::from_secs(5),
        retry: RetryPolicy::new(3, Duration::from_millis(10)),
    })?;
    Ok((gateway, hits))
}

fn first_page() -> CatalogQuery {
    CatalogQuery {
        skip: 0,
        limit: 10,
        query: None,
    }
}

#[tokio::test]
async fn succeeds_on_third_attempt() -> Result<()> {
    let (gateway, hits) = spawn_catalog(Script::FailUntil(3)).await?;

    let page = gateway.fetch_movies(&first_page()).await?;

    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(page.total, 120);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title, "Dune");
    assert_eq!(page.items[0].extra["year"], json!(2021));
    Ok(())
}

#[tokio::test]
async fn gives_up_after_three_failures() -> Result<()> {
    let (gateway, hits) = spawn_catalog(Script::AlwaysFail).await?;

    let err = gateway.fetch_movies(&first_page()).await.unwrap_err();

    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert!(matches!(err, CoreError::CatalogUnavailable { attempts: 3, .. }));
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_parse_error_without_retry() -> Result<()> {
    let (gateway, hits) = spawn_catalog(Script::Malformed).await?;

    let err = gateway.fetch_movies(&first_page()).await.unwrap_err();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(matches!(err, CoreError::CatalogParse(_)));
    Ok(())
}

#[tokio::test]
async fn forwards_paging_and_search_text() -> Result<()> {
    let (gateway, _) = spawn_catalog(Script::Echo).await?;

    let page = gateway
        .fetch_movies(&CatalogQuery {
            skip: 30,
            limit: 15,
            query: Some("blade runner".into()),
        })
        .await?;

    assert_eq!(
        page.items[0].extra["params"],
        json!({"skip": "30", "limit": "15", "query": "blade runner"})
    );
    Ok(())
}

#[tokio::test]
async fn unreachable_catalog_is_unavailable() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let gateway = HttpCatalogGateway::new(&CatalogSettings {
        url: format!("http://{addr}/movies/"),
        timeout: Duration::from_secs(1),
        retry: RetryPolicy::new(2, Duration::ZERO),
    })?;

    let err = gateway.fetch_movies(&first_page()).await.unwrap_err();
    assert!(matches!(err, CoreError::CatalogUnavailable { attempts: 2, .. }));
    Ok(())
}
