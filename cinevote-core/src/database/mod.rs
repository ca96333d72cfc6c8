//! Persistence for accounts and votes.
//!
//! Services depend on the [`ports`] traits only; [`postgres`] holds the
//! production adapters.

pub mod ports;
pub mod postgres;

pub use ports::credentials::{CredentialStore, NewUser, UserCredentials};
pub use ports::votes::{Ballot, VoteStore};
pub use postgres::{PostgresCredentialStore, PostgresVoteStore, connect};
