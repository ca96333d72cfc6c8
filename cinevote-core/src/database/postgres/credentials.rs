use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cinevote_model::User;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::database::ports::credentials::{CredentialStore, NewUser, UserCredentials};
use crate::error::{CoreError, Result};

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    hashed_password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_credentials(self) -> UserCredentials {
        UserCredentials {
            user: User {
                id: self.id,
                username: self.username,
                email: self.email,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            password_hash: self.hashed_password,
        }
    }
}

/// PostgreSQL-backed implementation of the `CredentialStore` port.
#[derive(Clone, Debug)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, hashed_password, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(UserRow::into_credentials))
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        if self.find_by_email(&new_user.email).await?.is_some() {
            return Err(CoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, email, hashed_password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, username, email, hashed_password, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(now)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error()
                && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
            {
                return CoreError::DuplicateEmail;
            }
            CoreError::Database(e)
        })?;

        let user = row.into_credentials().user;
        info!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }
}
