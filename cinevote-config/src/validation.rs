use crate::models::Config;

pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

/// Checks that are worth surfacing but do not stop start-up.
pub fn apply_guard_rails(config: &Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    if config.auth.secret_key.len() < MIN_SECRET_LENGTH {
        warnings.push_with_hint(
            format!("SECRET_KEY is shorter than {MIN_SECRET_LENGTH} bytes"),
            "Use a long random value, e.g. `openssl rand -hex 32`",
        );
    }

    if config.auth.access_token_ttl >= config.auth.refresh_token_ttl {
        warnings.push(
            "ACCESS_TOKEN_TTL is not shorter than REFRESH_TOKEN_TTL; refreshing gains nothing",
        );
    }

    if config.cors.allowed_origins.iter().any(|origin| origin == "*") {
        warnings.push("CORS credentials are allowed; the `*` origin is ignored");
    }

    warnings
}
