use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, Result};

pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(CoreError::validation("value is not a valid email address"))
    }
}

/// Length is counted in characters, not bytes.
pub fn validate_password(password: &str, confirm_password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    if password != confirm_password {
        return Err(CoreError::validation("Passwords do not match"));
    }
    Ok(())
}
