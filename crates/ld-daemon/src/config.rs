use std::env;

/// Default HTTP listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Runtime configuration, read from the environment.
///
/// A missing `DATABASE_URL` is deliberately not fatal here: the original
/// system surfaces it per-request as a generic configuration error, and the
/// daemon does the same.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            database_url: env::var("DATABASE_URL").ok(),
            production: env::var("APP_ENV").is_ok_and(|v| v == "production"),
        }
    }
}
