//! HTTP surface of cinevote.
//!
//! [`routes::create_app`] builds the axum router over an [`AppState`];
//! `main.rs` wires the PostgreSQL stores and the HTTP catalog into it.

pub mod auth;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use infra::errors::{AppError, AppResult};
pub use routes::create_app;
