use async_trait::async_trait;
use cinevote_model::CatalogPage;

use crate::catalog::{CatalogGateway, CatalogQuery};
use crate::error::{CoreError, Result};

/// Serves the same page for every query, or fails every query.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    page: CatalogPage,
    unavailable: bool,
}

impl StaticCatalog {
    pub fn new(page: CatalogPage) -> Self {
        Self {
            page,
            unavailable: false,
        }
    }

    /// A catalog that behaves as if every retry attempt had failed.
    pub fn unavailable() -> Self {
        Self {
            page: CatalogPage::default(),
            unavailable: true,
        }
    }
}

#[async_trait]
impl CatalogGateway for StaticCatalog {
    async fn fetch_movies(&self, _query: &CatalogQuery) -> Result<CatalogPage> {
        if self.unavailable {
            return Err(CoreError::CatalogUnavailable {
                attempts: 3,
                reason: "catalog unavailable".to_string(),
            });
        }
        Ok(self.page.clone())
    }
}
