use std::sync::Arc;

use cinevote_model::{LoginRequest, LoginResponse, RegisterRequest, User};
use tracing::{debug, info};

use crate::auth::password::PasswordHasher;
use crate::auth::tokens::{TokenIssuer, TokenType};
use crate::auth::validation::{validate_email, validate_password};
use crate::database::{CredentialStore, NewUser};
use crate::error::{CoreError, Result};

/// Registration, password login and token refresh over a [`CredentialStore`].
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    tokens: TokenIssuer,
    hasher: PasswordHasher,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialStore>, tokens: TokenIssuer) -> Self {
        Self {
            credentials,
            tokens,
            hasher: PasswordHasher::new(),
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        validate_email(&request.email)?;
        validate_password(&request.password, &request.confirm_password)?;

        if self.credentials.find_by_email(&request.email).await?.is_some() {
            return Err(CoreError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(&request.password).await?;
        let user = self
            .credentials
            .create(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Verifies a password login and issues a fresh access token plus a
    /// refresh token. Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, request: LoginRequest) -> Result<LoginResponse> {
        let Some(credentials) = self.credentials.find_by_email(&request.email).await? else {
            debug!("Login attempt for unknown email");
            return Err(CoreError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(&request.password, &credentials.password_hash)
            .await?
        {
            debug!(user_id = %credentials.user.id, "Login attempt with wrong password");
            return Err(CoreError::InvalidCredentials);
        }

        let subject = &credentials.user.email;
        let access_token = self.tokens.issue_access(subject, true)?;
        let refresh_token = self.tokens.issue_refresh(subject)?;

        Ok(LoginResponse {
            user: credentials.user,
            access_token,
            refresh_token,
        })
    }

    /// Exchanges a refresh token for a new, non-fresh access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String> {
        let claims = self.tokens.verify(refresh_token, TokenType::Refresh)?;
        self.tokens.issue_access(&claims.sub, false)
    }

    /// Resolves an access token to the account it was issued to.
    pub async fn authorize(&self, access_token: &str) -> Result<User> {
        let claims = self.tokens.verify(access_token, TokenType::Access)?;
        match self.credentials.find_by_email(&claims.sub).await? {
            Some(credentials) => Ok(credentials.user),
            None => {
                debug!("Token subject does not resolve to an account");
                Err(CoreError::Unauthorized)
            }
        }
    }
}
