use actix_web::cookie::{time, Cookie, SameSite};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::db::Database;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "auth_token";

/// Issues, resolves and revokes opaque session tokens.
///
/// Sessions have a fixed lifetime from issuance; resolving one never extends it.
#[derive(Debug, Clone)]
pub struct SessionService {
    db: Database,
    ttl: Duration,
}

impl SessionService {
    pub fn new(db: Database, ttl: Duration) -> Self {
        Self { db, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Persists a fresh token for `user_id` and returns it.
    pub async fn issue(&self, user_id: i64) -> Result<String, sqlx::Error> {
        let token = generate_token();
        let expires_at = Utc::now() + self.ttl;
        self.db.insert_session(user_id, &token, expires_at).await?;
        log::debug!("issued session for user {} expiring at {}", user_id, expires_at);
        Ok(token)
    }

    /// The owning user of `token`, if the session exists and has not expired.
    pub async fn resolve(&self, token: &str) -> Result<Option<i64>, sqlx::Error> {
        let now = Utc::now();
        Ok(self
            .db
            .find_session(token)
            .await?
            .filter(|session| session.is_active_at(now))
            .map(|session| session.user_id))
    }

    /// Deletes the session. Unknown tokens are ignored.
    pub async fn revoke(&self, token: &str) -> Result<(), sqlx::Error> {
        self.db.delete_session(token).await?;
        Ok(())
    }
}

/// `<uuid v4>-<unix millis in base 36>`.
pub fn generate_token() -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    format!("{}-{}", Uuid::new_v4(), to_base36(millis))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Attributes of the session cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub secure: bool,
    pub max_age: Duration,
}

impl CookieSettings {
    /// `HttpOnly`, `SameSite=Strict`, scoped to the whole site.
    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token.to_owned())
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(time::Duration::seconds(self.max_age.num_seconds()))
            .finish()
    }

    /// A cookie that makes the browser drop the session cookie.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .finish();
        cookie.make_removal();
        cookie
    }
}
