use dotenvy::dotenv;
use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("JWT_SECRET missing, refusing to start without a signing secret")]
    MissingSecret,
    #[error("PORT must be a valid u16 number, got {0:?}")]
    InvalidPort(String),
    #[error("TOKEN_TTL_SECS must be a positive integer, got {0:?}")]
    InvalidTokenTtl(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv().is_ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let token_ttl_secs = match lookup("TOKEN_TTL_SECS") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTokenTtl(raw)),
            },
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_ttl_secs,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
