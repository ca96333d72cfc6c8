use thiserror::Error;

/// Domain error taxonomy shared by the stores and services.
///
/// The HTTP layer maps every variant onto a status code; only `Database` and
/// `Internal` are server faults.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Email already registered")]
    DuplicateEmail,

    /// Login failed. Unknown email and wrong password are indistinguishable.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Missing, malformed, expired or wrong-type token, or a token whose
    /// subject no longer resolves to an account.
    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Invalid user vote {0}, must be -1 or 1")]
    InvalidVote(i32),

    #[error("External API request failed after {attempts} attempts: {reason}")]
    CatalogUnavailable { attempts: u32, reason: String },

    #[error("Error parsing external API response: {0}")]
    CatalogParse(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<cinevote_model::InvalidVoteValue> for CoreError {
    fn from(err: cinevote_model::InvalidVoteValue) -> Self {
        Self::InvalidVote(err.0)
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
