use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use cinevote_model::{User, VoteRecord};
use dashmap::{DashMap, mapref::entry::Entry};
use uuid::Uuid;

use crate::database::{Ballot, CredentialStore, NewUser, UserCredentials, VoteStore};
use crate::error::{CoreError, Result};

/// Accounts keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: DashMap<String, UserCredentials>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        Ok(self.users.get(email).map(|entry| entry.value().clone()))
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        match self.users.entry(new_user.email.clone()) {
            Entry::Occupied(_) => Err(CoreError::DuplicateEmail),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let user = User {
                    id: Uuid::now_v7(),
                    username: new_user.username,
                    email: new_user.email,
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(UserCredentials {
                    user: user.clone(),
                    password_hash: new_user.password_hash,
                });
                Ok(user)
            }
        }
    }
}

/// Votes keyed by `(user_id, title)`.
#[derive(Debug, Default)]
pub struct InMemoryVoteStore {
    records: DashMap<(Uuid, String), VoteRecord>,
    next_id: AtomicI64,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    async fn find_by_user_and_title(
        &self,
        user_id: Uuid,
        title: &str,
    ) -> Result<Option<VoteRecord>> {
        Ok(self
            .records
            .get(&(user_id, title.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn upsert_vote(&self, ballot: &Ballot) -> Result<()> {
        let now = Utc::now();
        match self.records.entry((ballot.user_id, ballot.title.clone())) {
            Entry::Occupied(mut existing) => {
                let record = existing.get_mut();
                record.vote = ballot.vote;
                record.updated_at = now;
            }
            Entry::Vacant(slot) => {
                slot.insert(VoteRecord {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
                    user_id: ballot.user_id,
                    movie_id: ballot.movie_id.clone(),
                    title: ballot.title.clone(),
                    vote: ballot.vote,
                    created_at: now,
                    updated_at: now,
                });
            }
        }
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<VoteRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinevote_model::Vote;

    fn ballot(user_id: Uuid, movie_id: &str, title: &str, vote: Vote) -> Ballot {
        Ballot {
            user_id,
            movie_id: movie_id.into(),
            title: title.into(),
            vote,
        }
    }

    #[tokio::test]
    async fn credential_emails_are_unique() {
        let store = InMemoryCredentialStore::new();
        let new_user = || NewUser {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "hash".into(),
        };

        store.create(new_user()).await.unwrap();
        assert!(matches!(
            store.create(new_user()).await,
            Err(CoreError::DuplicateEmail)
        ));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn upsert_keeps_first_movie_id() {
        let store = InMemoryVoteStore::new();
        let user = Uuid::now_v7();

        store.upsert_vote(&ballot(user, "tt1", "Dune", Vote::Up)).await.unwrap();
        store.upsert_vote(&ballot(user, "tt2", "Dune", Vote::Down)).await.unwrap();

        let record = store.find_by_user_and_title(user, "Dune").await.unwrap().unwrap();
        assert_eq!(record.movie_id, "tt1");
        assert_eq!(record.vote, Vote::Down);
        assert_eq!(store.len(), 1);
    }
}
