//! In-process doubles for the store and catalog ports.
//!
//! They honour the same contracts as the PostgreSQL and HTTP adapters
//! (unique emails, one vote per user and title) so services and routers can
//! be exercised without a database or network.

mod catalog;
mod memory;

pub use catalog::StaticCatalog;
pub use memory::{InMemoryCredentialStore, InMemoryVoteStore};
