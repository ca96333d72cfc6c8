use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::util::{non_empty_var, parse_csv};

/// Raw configuration as defined in a TOML file.
///
/// Durations are humantime strings such as `"15m"` or `"30days"`.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub auth: FileAuthConfig,
    #[serde(default)]
    pub catalog: FileCatalogConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileAuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_ttl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_ttl: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileCatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_delay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

/// Environment-derived configuration values, kept as raw strings so the
/// loader can report which variable failed to parse.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<String>,
    pub database_url: Option<String>,
    pub database_max_connections: Option<String>,
    pub secret_key: Option<String>,
    pub access_token_ttl: Option<String>,
    pub refresh_token_ttl: Option<String>,
    pub catalog_url: Option<String>,
    pub catalog_max_attempts: Option<String>,
    pub catalog_retry_delay: Option<String>,
    pub catalog_timeout: Option<String>,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(non_empty_var)
    }

    /// Builds the snapshot from explicit pairs instead of the process
    /// environment.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let vars: HashMap<&str, &str> = pairs.into_iter().collect();
        Self::from_lookup(|name| {
            vars.get(name)
                .filter(|value| !value.trim().is_empty())
                .map(|value| value.to_string())
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            config_path: lookup("CINEVOTE_CONFIG").map(PathBuf::from),
            server_host: lookup("SERVER_HOST"),
            server_port: lookup("SERVER_PORT"),
            database_url: lookup("DATABASE_URL"),
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS"),
            secret_key: lookup("SECRET_KEY"),
            access_token_ttl: lookup("ACCESS_TOKEN_TTL"),
            refresh_token_ttl: lookup("REFRESH_TOKEN_TTL"),
            catalog_url: lookup("CATALOG_URL"),
            catalog_max_attempts: lookup("CATALOG_MAX_ATTEMPTS"),
            catalog_retry_delay: lookup("CATALOG_RETRY_DELAY"),
            catalog_timeout: lookup("CATALOG_TIMEOUT"),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").map(|raw| parse_csv(&raw)),
        }
    }
}
