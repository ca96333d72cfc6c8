//! Data model definitions shared between the cinevote server and its clients.
//!
//! Everything here is a plain serde type: request bodies, response bodies and
//! the catalog shapes that flow through the movie listing endpoint. Nothing in
//! this crate touches storage, so password hashes never appear in it.

pub mod api_routes;
pub mod movie;
pub mod user;
pub mod vote;

pub use movie::{
    AnnotatedMovie, CatalogMovie, CatalogPage, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MovieListQuery,
    MovieListing,
};
pub use user::{LoginRequest, LoginResponse, RefreshResponse, RegisterRequest, User};
pub use vote::{InvalidVoteValue, Vote, VoteRecord, VoteRequest, VoteResponse};
