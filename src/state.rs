use std::sync::Arc;

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::error::AppError;
use crate::routes::tasks::store::TaskStore;
use crate::token::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<TaskStore>,
    pub users: Arc<CredentialStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Fresh stores holding the seed data; nothing is shared between two states.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            tasks: Arc::new(TaskStore::seeded()),
            users: Arc::new(CredentialStore::seeded()?),
            tokens: Arc::new(TokenService::new(&config.jwt_secret, config.token_ttl_secs)),
        })
    }
}
