use std::sync::Arc;

use crate::db::DbPool;
use crate::services::tokens::TokenService;

/// Shared by every handler; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub tokens: Arc<TokenService>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(pool: DbPool, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            tokens: Arc::new(tokens),
            bcrypt_cost,
        }
    }
}
