//! Registration, login and bearer-token handling.

pub mod password;
pub mod service;
pub mod tokens;
pub mod validation;

pub use password::PasswordHasher;
pub use service::AuthService;
pub use tokens::{Claims, TokenIssuer, TokenSettings, TokenType};
