use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::models::{
    AuthConfig, CatalogConfig, Config, ConfigMetadata, CorsConfig, DEFAULT_ACCESS_TOKEN_TTL,
    DEFAULT_CATALOG_MAX_ATTEMPTS, DEFAULT_CATALOG_RETRY_DELAY, DEFAULT_CATALOG_TIMEOUT,
    DEFAULT_CATALOG_URL, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT,
    DEFAULT_REFRESH_TOKEN_TTL, DatabaseConfig, ServerConfig, default_cors_origins,
};
use crate::sources::{EnvConfig, FileConfig};
use crate::validation::{self, ConfigWarnings};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = ["cinevote.toml", "config/cinevote.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{key} is required")]
    Missing { key: &'static str },
    #[error("{key} has invalid value `{value}`: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{key} has invalid duration `{value}`")]
    InvalidDuration {
        key: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Loads `.env`, snapshots the process environment and composes the
    /// configuration.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(|err| match err {
                dotenvy::Error::Io(_) => Ok(false),
                _ => Err(err),
            })?,
            None => dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                dotenvy::Error::Io(_) => Ok(false),
                _ => Err(err),
            })?,
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Composes the configuration from an explicit environment snapshot.
    pub fn load_with_env(&self, env: EnvConfig) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        self.compose_config(file_config, env, config_path)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => return Err(ConfigLoadError::MissingConfig { path }),
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if file_config.is_none() {
            warnings.push_with_hint(
                "No cinevote.toml detected; using environment variables and defaults",
                "Set CINEVOTE_CONFIG or pass --config to load a configuration file",
            );
        }

        let FileConfig {
            server: file_server,
            database: file_database,
            auth: file_auth,
            catalog: file_catalog,
            cors: file_cors,
        } = file_config.unwrap_or_default();

        let server = ServerConfig {
            host: env
                .server_host
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: match env.server_port {
                Some(raw) => parse_number("SERVER_PORT", &raw)?,
                None => file_server.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let database_url = env
            .database_url
            .or(file_database.url.filter(|url| !url.trim().is_empty()))
            .ok_or(ConfigLoadError::Missing { key: "DATABASE_URL" })?;
        validate_database_url(&database_url)?;
        let max_connections = match env.database_max_connections {
            Some(raw) => parse_number("DATABASE_MAX_CONNECTIONS", &raw)?,
            None => file_database
                .max_connections
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };
        let database = DatabaseConfig {
            url: database_url,
            max_connections: at_least_one("DATABASE_MAX_CONNECTIONS", max_connections)?,
        };

        let auth = AuthConfig {
            secret_key: env
                .secret_key
                .or(file_auth.secret_key.filter(|key| !key.is_empty()))
                .ok_or(ConfigLoadError::Missing { key: "SECRET_KEY" })?,
            access_token_ttl: duration_or(
                "ACCESS_TOKEN_TTL",
                env.access_token_ttl.or(file_auth.access_token_ttl),
                DEFAULT_ACCESS_TOKEN_TTL,
            )?,
            refresh_token_ttl: duration_or(
                "REFRESH_TOKEN_TTL",
                env.refresh_token_ttl.or(file_auth.refresh_token_ttl),
                DEFAULT_REFRESH_TOKEN_TTL,
            )?,
        };

        let catalog_url = env
            .catalog_url
            .or(file_catalog.url)
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        validate_http_url("CATALOG_URL", &catalog_url)?;
        let max_attempts = match env.catalog_max_attempts {
            Some(raw) => parse_number("CATALOG_MAX_ATTEMPTS", &raw)?,
            None => file_catalog
                .max_attempts
                .unwrap_or(DEFAULT_CATALOG_MAX_ATTEMPTS),
        };
        let catalog = CatalogConfig {
            url: catalog_url,
            max_attempts: at_least_one("CATALOG_MAX_ATTEMPTS", max_attempts)?,
            retry_delay: duration_or(
                "CATALOG_RETRY_DELAY",
                env.catalog_retry_delay.or(file_catalog.retry_delay),
                DEFAULT_CATALOG_RETRY_DELAY,
            )?,
            timeout: duration_or(
                "CATALOG_TIMEOUT",
                env.catalog_timeout.or(file_catalog.timeout),
                DEFAULT_CATALOG_TIMEOUT,
            )?,
        };

        let cors = CorsConfig {
            allowed_origins: env
                .cors_allowed_origins
                .or(file_cors.allowed_origins)
                .unwrap_or_else(default_cors_origins),
        };

        let config = Config {
            server,
            database,
            auth,
            catalog,
            cors,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded: false,
            },
        };

        warnings.extend(validation::apply_guard_rails(&config));
        Ok(ConfigLoad { config, warnings })
    }
}

fn parse_number<T>(key: &'static str, raw: &str) -> Result<T, ConfigLoadError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err: T::Err| ConfigLoadError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: err.to_string(),
        })
}

fn at_least_one(key: &'static str, value: u32) -> Result<u32, ConfigLoadError> {
    if value == 0 {
        return Err(ConfigLoadError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(value)
}

fn duration_or(
    key: &'static str,
    raw: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigLoadError> {
    match raw {
        Some(raw) => {
            humantime::parse_duration(raw.trim()).map_err(|source| {
                ConfigLoadError::InvalidDuration {
                    key,
                    value: raw.clone(),
                    source,
                }
            })
        }
        None => Ok(default),
    }
}

fn validate_database_url(raw: &str) -> Result<(), ConfigLoadError> {
    let url = Url::parse(raw).map_err(|err| ConfigLoadError::InvalidValue {
        key: "DATABASE_URL",
        value: "<redacted>".into(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "postgres" | "postgresql" => Ok(()),
        other => Err(ConfigLoadError::InvalidValue {
            key: "DATABASE_URL",
            value: "<redacted>".into(),
            reason: format!("unsupported scheme `{other}`, expected postgres or postgresql"),
        }),
    }
}

fn validate_http_url(key: &'static str, raw: &str) -> Result<(), ConfigLoadError> {
    let url = Url::parse(raw).map_err(|err| ConfigLoadError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigLoadError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}
