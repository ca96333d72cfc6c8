mod credentials;
mod votes;

pub use credentials::PostgresCredentialStore;
pub use votes::PostgresVoteStore;

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::error::Result;

/// Opens the connection pool shared by the PostgreSQL stores.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .test_before_acquire(true)
        .connect(database_url)
        .await?;

    info!(max_connections, "Connected to PostgreSQL");
    Ok(pool)
}
