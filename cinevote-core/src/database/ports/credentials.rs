use async_trait::async_trait;
use cinevote_model::User;

use crate::error::Result;

/// An account together with its stored password hash.
///
/// Only the auth service handles this pairing; everything outward-facing
/// carries a plain [`User`].
#[derive(Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Input to [`CredentialStore::create`]. The password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;

    /// Persists a new account.
    ///
    /// Fails with [`CoreError::DuplicateEmail`](crate::CoreError::DuplicateEmail)
    /// when the email is already taken, including when a concurrent insert
    /// wins the race.
    async fn create(&self, new_user: NewUser) -> Result<User>;
}
