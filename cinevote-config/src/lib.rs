//! Configuration for the cinevote server.
//!
//! Values come from the process environment (after `.env` is loaded), then an
//! optional TOML file, then built-in defaults. [`ConfigLoader`] composes them
//! once at start-up into a typed [`Config`] plus any [`ConfigWarnings`].

pub mod loader;
pub mod models;
pub mod sources;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{
    AuthConfig, CatalogConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig, ServerConfig,
};
pub use sources::{EnvConfig, FileConfig};
pub use validation::{ConfigWarning, ConfigWarnings};
