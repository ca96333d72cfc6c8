use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cinevote_model::{Vote, VoteRecord};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::database::ports::votes::{Ballot, VoteStore};
use crate::error::{CoreError, Result};

#[derive(FromRow)]
struct RatingRow {
    id: i64,
    user_id: Uuid,
    movie_id: String,
    title: String,
    user_vote: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RatingRow> for VoteRecord {
    type Error = CoreError;

    fn try_from(row: RatingRow) -> Result<Self> {
        let vote = Vote::try_from(row.user_vote).map_err(|e| {
            CoreError::internal(format!("movie_ratings row {} holds {}", row.id, e))
        })?;

        Ok(VoteRecord {
            id: row.id,
            user_id: row.user_id,
            movie_id: row.movie_id,
            title: row.title,
            vote,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL-backed implementation of the `VoteStore` port.
#[derive(Clone, Debug)]
pub struct PostgresVoteStore {
    pool: PgPool,
}

impl PostgresVoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VoteStore for PostgresVoteStore {
    async fn find_by_user_and_title(
        &self,
        user_id: Uuid,
        title: &str,
    ) -> Result<Option<VoteRecord>> {
        let row = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, user_id, movie_id, title, user_vote, created_at, updated_at
            FROM movie_ratings
            WHERE user_id = $1 AND title = $2
            "#,
        )
        .bind(user_id)
        .bind(title)
        .fetch_optional(self.pool())
        .await?;

        row.map(VoteRecord::try_from).transpose()
    }

    async fn upsert_vote(&self, ballot: &Ballot) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO movie_ratings (user_id, movie_id, title, user_vote, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (user_id, title) DO UPDATE
            SET user_vote = EXCLUDED.user_vote,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(ballot.user_id)
        .bind(&ballot.movie_id)
        .bind(&ballot.title)
        .bind(ballot.vote.value())
        .bind(now)
        .execute(self.pool())
        .await?;

        debug!(
            user_id = %ballot.user_id,
            title = %ballot.title,
            vote = ballot.vote.value(),
            "Stored vote"
        );
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<VoteRecord>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, user_id, movie_id, title, user_vote, created_at, updated_at
            FROM movie_ratings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(VoteRecord::try_from).collect()
    }
}
