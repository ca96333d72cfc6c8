pub mod middleware;

pub use middleware::{auth_middleware, extract_bearer_token};
