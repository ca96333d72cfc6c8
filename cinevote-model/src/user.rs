//! User account types and the authentication payloads.
//!
//! ## Authentication Flow
//!
//! 1. **Registration**: `POST /users/register` with a [`RegisterRequest`]
//!    returns the created [`User`]
//! 2. **Login**: `POST /users/token` with a [`LoginRequest`] returns a
//!    [`LoginResponse`] carrying an access token and a refresh token
//! 3. **Refresh**: `POST /users/refresh` with the refresh token as bearer
//!    credential returns a fresh access token in a [`RefreshResponse`]
//!
//! Both tokens are signed JWTs whose subject is the user's email. There is
//! no server-side logout; clients discard their tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account as exposed over the API.
///
/// The password hash is stored next to the account but is deliberately not a
/// field of this type, so it cannot be serialized by accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Unique across all accounts; also the subject of issued tokens.
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration request payload
///
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "secret1",
///   "confirm_password": "secret1"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    /// Plain text password, at least six characters
    pub password: String,
    /// Must repeat `password` exactly
    pub confirm_password: String,
}

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: the account plus a token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}
