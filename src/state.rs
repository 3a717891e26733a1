use crate::auth::{CookieSettings, PasswordHasher, SessionService};
use crate::config::Config;
use crate::db::Database;

/// Everything a handler needs, shared through `web::Data<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub hasher: PasswordHasher,
    pub sessions: SessionService,
    pub cookies: CookieSettings,
}

impl AppState {
    pub fn new(db: Database, config: &Config) -> Self {
        let ttl = config.session_ttl();
        Self {
            sessions: SessionService::new(db.clone(), ttl),
            hasher: PasswordHasher::new(config.password_secret.clone()),
            cookies: CookieSettings {
                secure: config.cookie_secure,
                max_age: ttl,
            },
            db,
        }
    }
}
