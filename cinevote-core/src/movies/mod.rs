//! Vote recording and the vote-annotated catalog listing.

mod annotate;
mod service;

pub use annotate::annotate_movies;
pub use service::{MovieQueryService, VOTE_RECORDED_MESSAGE};
