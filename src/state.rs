use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{Argon2Hasher, PasswordHasher, PasswordPolicy, PasswordRules};
use crate::config::Config;
use crate::store::{PgRequestStore, PgUserStore, RequestStore, UserStore};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub requests: Arc<dyn RequestStore>,
    pub users: Arc<dyn UserStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub policy: Arc<dyn PasswordPolicy>,
}

impl AppState {
    /// Postgres-backed stores plus the configured argon2 hasher and password rules.
    pub fn postgres(pool: PgPool, config: Config) -> Result<Self, String> {
        let hasher = Argon2Hasher::from_config(&config.password)?;
        Ok(AppState {
            requests: Arc::new(PgRequestStore::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool)),
            hasher: Arc::new(hasher),
            policy: Arc::new(PasswordRules::from_config(&config.password)),
            config,
        })
    }
}
