use std::time::Duration;

use async_trait::async_trait;
use cinevote_model::CatalogPage;
use tracing::debug;
use url::Url;

use super::retry::{AttemptError, RetryPolicy};
use super::{CatalogGateway, CatalogQuery};
use crate::error::{CoreError, Result};

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub url: String,
    /// Per attempt, not across retries.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

/// `CatalogGateway` over HTTP GET with `skip`, `limit` and `query` parameters.
#[derive(Debug, Clone)]
pub struct HttpCatalogGateway {
    client: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl HttpCatalogGateway {
    pub fn new(settings: &CatalogSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.url).map_err(|e| {
            CoreError::validation(format!("invalid catalog URL {}: {e}", settings.url))
        })?;
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| CoreError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            retry: settings.retry,
        })
    }

    fn request_url(&self, query: &CatalogQuery) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("skip", &query.skip.to_string())
                .append_pair("limit", &query.limit.to_string());
            if let Some(text) = &query.query {
                pairs.append_pair("query", text);
            }
        }
        url
    }

    async fn fetch_once(&self, url: &Url) -> std::result::Result<CatalogPage, AttemptError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(e.to_string()))?
            .error_for_status()
            .map_err(|e| AttemptError::Retryable(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| AttemptError::Retryable(format!("failed to read response body: {e}")))?;

        serde_json::from_slice(&body)
            .map_err(|e| AttemptError::Fatal(CoreError::CatalogParse(e.to_string())))
    }
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
    async fn fetch_movies(&self, query: &CatalogQuery) -> Result<CatalogPage> {
        let url = self.request_url(query);
        debug!(%url, "Fetching catalog page");
        self.retry
            .run("catalog fetch", || self.fetch_once(&url))
            .await
    }
}
