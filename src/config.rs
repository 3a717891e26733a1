use std::env;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://tasktrack.db";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 7 * 24;
pub const DEFAULT_PASSWORD_SECRET: &str = "salt_secret_key";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    /// Lifetime of a session row and of the cookie carrying it.
    pub session_ttl_hours: i64,
    /// Disable only for plain-HTTP local development.
    pub cookie_secure: bool,
    pub password_secret: String,
    /// `None` means permissive CORS.
    pub cors_allowed_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_port: 8080,
            server_host: "127.0.0.1".to_string(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            cookie_secure: true,
            password_secret: DEFAULT_PASSWORD_SECRET.to_string(),
            cors_allowed_origin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            session_ttl_hours: parse_var("SESSION_TTL_HOURS", defaults.session_ttl_hours),
            cookie_secure: parse_var("COOKIE_SECURE", defaults.cookie_secure),
            password_secret: env::var("PASSWORD_SECRET").unwrap_or(defaults.password_secret),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }
}

fn parse_var<T: FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} has invalid value {:?}, using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
