use async_trait::async_trait;
use cinevote_model::{Vote, VoteRecord};
use uuid::Uuid;

use crate::error::Result;

/// A validated vote ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    pub user_id: Uuid,
    pub movie_id: String,
    pub title: String,
    pub vote: Vote,
}

#[async_trait]
pub trait VoteStore: Send + Sync {
    async fn find_by_user_and_title(
        &self,
        user_id: Uuid,
        title: &str,
    ) -> Result<Option<VoteRecord>>;

    /// Inserts the ballot, or overwrites the vote of the existing record for
    /// the same `(user_id, title)`. The stored `movie_id` of an existing
    /// record is left unchanged.
    async fn upsert_vote(&self, ballot: &Ballot) -> Result<()>;

    /// Every vote cast by `user_id`, in no particular order.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<VoteRecord>>;
}
