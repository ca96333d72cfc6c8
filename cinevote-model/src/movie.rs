//! Catalog and listing types for `GET /movies/`.
//!
//! The external catalog owns its item schema, so a [`CatalogMovie`] only
//! pins down `title` and carries every other field through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 50;

/// Query string of `GET /movies/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub skip: u32,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for MovieListQuery {
    fn default() -> Self {
        Self {
            query: None,
            limit: DEFAULT_PAGE_SIZE,
            skip: 0,
        }
    }
}

/// One raw catalog entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogMovie {
    /// Titles key both de-duplication and vote lookup; absent means empty.
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogMovie {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

/// Response body of the external catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub items: Vec<CatalogMovie>,
}

/// A catalog entry annotated with the caller's vote: `-1`, `1`, or `0` when
/// the caller has not voted on that title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedMovie {
    #[serde(flatten)]
    pub movie: CatalogMovie,
    pub voted: i32,
}

impl AnnotatedMovie {
    pub fn new(mut movie: CatalogMovie, voted: i32) -> Self {
        // The annotation wins over any upstream field of the same name.
        movie.extra.remove("voted");
        Self { movie, voted }
    }

    pub fn title(&self) -> &str {
        &self.movie.title
    }
}

/// Response body of `GET /movies/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieListing {
    pub skip: u32,
    pub limit: u32,
    pub total: i64,
    pub items: Vec<AnnotatedMovie>,
}
