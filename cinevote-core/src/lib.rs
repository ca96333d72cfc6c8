//! # Cinevote Core
//!
//! Domain logic behind the cinevote API:
//!
//! - [`database`]: credential and vote store ports with PostgreSQL adapters
//! - [`auth`]: password hashing, JWT issuing and the [`auth::AuthService`]
//! - [`catalog`]: the external movie catalog gateway and its retry policy
//! - [`movies`]: vote recording and vote-annotated catalog listings
//!
//! ## Feature Flags
//!
//! - `test-util`: in-memory stores and a static catalog for tests that run
//!   without PostgreSQL or network access
//! - `postgres-tests`: enables the store integration tests that need a live
//!   database

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod auth;
pub mod catalog;
pub mod database;
pub mod error;
pub mod movies;

#[cfg(any(test, feature = "test-util"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
pub mod testing;

pub use error::{CoreError, Result};

/// Migrations for the `users` and `movie_ratings` tables.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
