use crate::slugs::DEFAULT_SLUG_LENGTH;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string, e.g. "sqlite:./shorty.db"
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub db_max_connections: u32,

    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public base URL shown in front of slugs, e.g. "https://go.example.com"
    /// Must NOT have a trailing slash.
    pub base_url: String,

    /// Length of slugs generated when the visitor doesn't request one
    pub slug_length: usize,

    /// Prefer X-Forwarded-For / X-Real-IP over the socket address.
    /// Only enable behind a proxy that sets these headers.
    pub trust_proxy_headers: bool,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = get("PORT")
            .unwrap_or_else(|| "8080".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let db_max_connections = get("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".into())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;

        let slug_length = match get("SLUG_LENGTH") {
            Some(v) => v.parse::<usize>().context("SLUG_LENGTH must be an integer")?,
            None => DEFAULT_SLUG_LENGTH,
        };
        if !(1..=32).contains(&slug_length) {
            anyhow::bail!("SLUG_LENGTH must be between 1 and 32");
        }

        let trust_proxy_headers = get("TRUST_PROXY_HEADERS")
            .unwrap_or_else(|| "false".into())
            .parse::<bool>()
            .context("TRUST_PROXY_HEADERS must be 'true' or 'false'")?;

        let base_url = get("BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| "sqlite:./shorty.db".into()),
            db_max_connections,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            base_url,
            slug_length,
            trust_proxy_headers,
        })
    }
}
