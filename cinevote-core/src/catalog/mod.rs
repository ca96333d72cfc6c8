//! Gateway to the external movie catalog.

mod http;
mod retry;

pub use http::{CatalogSettings, HttpCatalogGateway};
pub use retry::{AttemptError, RetryPolicy};

use async_trait::async_trait;
use cinevote_model::CatalogPage;

use crate::error::Result;

/// One page request against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    pub skip: u32,
    pub limit: u32,
    pub query: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetches one page live from the catalog; nothing is cached.
    ///
    /// Fails with `CatalogUnavailable` once every attempt has failed, or with
    /// `CatalogParse` when a response arrives but is not a catalog page.
    async fn fetch_movies(&self, query: &CatalogQuery) -> Result<CatalogPage>;
}
