use std::{fmt, sync::Arc};

use cinevote_config::Config;
use cinevote_core::{
    auth::{AuthService, TokenIssuer, TokenSettings},
    catalog::CatalogGateway,
    database::{CredentialStore, VoteStore},
    movies::MovieQueryService,
};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthService>,
    pub movies: Arc<MovieQueryService>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the services over the given store and catalog adapters.
    pub fn new(
        config: Arc<Config>,
        credentials: Arc<dyn CredentialStore>,
        votes: Arc<dyn VoteStore>,
        catalog: Arc<dyn CatalogGateway>,
    ) -> Self {
        let tokens = TokenIssuer::new(&TokenSettings {
            secret: config.auth.secret_key.clone(),
            access_ttl: config.auth.access_token_ttl,
            refresh_ttl: config.auth.refresh_token_ttl,
        });

        Self {
            auth: Arc::new(AuthService::new(credentials, tokens)),
            movies: Arc::new(MovieQueryService::new(catalog, votes)),
            config,
        }
    }
}
