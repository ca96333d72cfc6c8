use std::sync::Arc;

use anyhow::{Context, Result};
use cinevote_config::Config;
use cinevote_core::{
    MIGRATOR,
    catalog::{CatalogSettings, HttpCatalogGateway, RetryPolicy},
    database::{PostgresCredentialStore, PostgresVoteStore, connect},
};
use sqlx::PgPool;
use tracing::info;

use super::app_state::AppState;

pub async fn connect_database(config: &Config) -> Result<PgPool> {
    info!(url = %config.database.redacted_url(), "Connecting to PostgreSQL");
    connect(&config.database.url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("failed to apply database migrations")?;
    info!("Database migrations applied");
    Ok(())
}

pub fn catalog_settings(config: &Config) -> CatalogSettings {
    CatalogSettings {
        url: config.catalog.url.clone(),
        timeout: config.catalog.timeout,
        retry: RetryPolicy::new(config.catalog.max_attempts, config.catalog.retry_delay),
    }
}

/// Production wiring: PostgreSQL stores and the HTTP catalog.
pub fn build_app_state(config: Arc<Config>, pool: PgPool) -> Result<AppState> {
    let catalog = HttpCatalogGateway::new(&catalog_settings(&config))
        .context("failed to build catalog gateway")?;

    Ok(AppState::new(
        config,
        Arc::new(PostgresCredentialStore::new(pool.clone())),
        Arc::new(PostgresVoteStore::new(pool)),
        Arc::new(catalog),
    ))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cinevote_config::{
        AuthConfig, CatalogConfig, ConfigMetadata, CorsConfig, DatabaseConfig, ServerConfig,
    };
    use cinevote_core::auth::TokenType;
    use cinevote_core::testing::{InMemoryCredentialStore, InMemoryVoteStore, StaticCatalog};

    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/cinevote".into(),
                max_connections: 1,
            },
            auth: AuthConfig {
                secret_key: "startup-test-secret-0123456789abcdef".into(),
                access_token_ttl: Duration::from_secs(5 * 60),
                refresh_token_ttl: Duration::from_secs(2 * 60 * 60),
            },
            catalog: CatalogConfig {
                url: "http://catalog.internal/movies/".into(),
                max_attempts: 5,
                retry_delay: Duration::from_millis(250),
                timeout: Duration::from_secs(2),
            },
            cors: CorsConfig::default(),
            metadata: ConfigMetadata::default(),
        }
    }

    #[test]
    fn catalog_settings_follow_config() {
        let settings = catalog_settings(&config());

        assert_eq!(settings.url, "http://catalog.internal/movies/");
        assert_eq!(settings.timeout, Duration::from_secs(2));
        assert_eq!(
            settings.retry,
            RetryPolicy::new(5, Duration::from_millis(250))
        );
    }

    #[test]
    fn token_lifetimes_follow_config() {
        let state = AppState::new(
            Arc::new(config()),
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(InMemoryVoteStore::new()),
            Arc::new(StaticCatalog::default()),
        );
        let tokens = state.auth.tokens();

        let access = tokens.issue_access("alice@example.com", false).unwrap();
        let access = tokens.verify(&access, TokenType::Access).unwrap();
        let refresh = tokens.issue_refresh("alice@example.com").unwrap();
        let refresh = tokens.verify(&refresh, TokenType::Refresh).unwrap();

        assert_eq!(access.exp - access.iat, 5 * 60);
        assert_eq!(refresh.exp - refresh.iat, 2 * 60 * 60);
    }
}
