//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET_KEY` - Signing key for access tokens
//! - `JWT_REFRESH_KEY` - Signing key for refresh tokens
//!
//! ## Optional
//! - `DATABASE_URL` - SQLite database path (default: database.db)
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `DB_POOL_SIZE` - Maximum pooled connections (default: 10)
//! - `ACCESS_TOKEN_TTL_MINUTES` - Access token lifetime (default: 15)
//! - `REFRESH_TOKEN_TTL_DAYS` - Refresh token lifetime (default: 7)
//! - `BCRYPT_COST` - bcrypt work factor (default: `bcrypt::DEFAULT_COST`)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub pool_size: u32,
    pub bcrypt_cost: u32,
    pub tokens: TokenSettings,
}

/// Signing keys and lifetimes for the JWT pair.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub access_secret: SecretString,
    pub refresh_secret: SecretString,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

impl AppConfig {
    /// Load configuration from the process environment, reading `.env` first
    /// if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tokens = TokenSettings {
            access_secret: required(&lookup, "JWT_SECRET_KEY")?.into(),
            refresh_secret: required(&lookup, "JWT_REFRESH_KEY")?.into(),
            access_ttl_minutes: parsed_or(&lookup, "ACCESS_TOKEN_TTL_MINUTES", 15)?,
            refresh_ttl_days: parsed_or(&lookup, "REFRESH_TOKEN_TTL_DAYS", 7)?,
        };
        if tokens.access_ttl_minutes <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ACCESS_TOKEN_TTL_MINUTES".to_string(),
                "must be positive".to_string(),
            ));
        }
        if tokens.refresh_ttl_days <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "REFRESH_TOKEN_TTL_DAYS".to_string(),
                "must be positive".to_string(),
            ));
        }

        let bcrypt_cost = parsed_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidEnvVar(
                "BCRYPT_COST".to_string(),
                "must be between 4 and 31".to_string(),
            ));
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "database.db".to_string()),
            host: parsed_or(&lookup, "HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parsed_or(&lookup, "PORT", 3000)?,
            pool_size: parsed_or(&lookup, "DB_POOL_SIZE", 10)?,
            bcrypt_cost,
            tokens,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET_KEY", "access"),
            ("JWT_REFRESH_KEY", "refresh"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "database.db");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.tokens.access_ttl_minutes, 15);
        assert_eq!(config.tokens.refresh_ttl_days, 7);
        assert_eq!(config.tokens.access_secret.expose_secret(), "access");
    }

    #[test]
    fn test_missing_secret() {
        let err = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET_KEY", "access")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "JWT_REFRESH_KEY"));
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET_KEY", "a"),
            ("JWT_REFRESH_KEY", "r"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PORT"));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET_KEY", "a"),
            ("JWT_REFRESH_KEY", "r"),
            ("BCRYPT_COST", "2"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "BCRYPT_COST"));
    }
}
