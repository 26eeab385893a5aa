//! JWT access/refresh token pairs.
//!
//! Access and refresh tokens are signed with different keys and carry a
//! `token_type` claim, so neither can stand in for the other. Every token gets
//! a random `jti`, which is what the revocation store keys on.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::TokenSettings;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token generation failed: {0}")]
    Encode(jsonwebtoken::errors::Error),
    #[error("Token is invalid or expired")]
    Invalid(#[from] jsonwebtoken::errors::Error),
    #[error("Expected a {expected} token")]
    WrongType { expected: TokenType },
    #[error("Token is blacklisted")]
    Revoked,
}

impl TokenError {
    /// Whether this is a server-side failure rather than a bad token.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Encode(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub jti: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn expires_at(&self) -> NaiveDateTime {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .naive_utc()
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(settings: &TokenSettings) -> Self {
        let access = settings.access_secret.expose_secret().as_bytes();
        let refresh = settings.refresh_secret.expose_secret().as_bytes();
        Self {
            access_encoding: EncodingKey::from_secret(access),
            access_decoding: DecodingKey::from_secret(access),
            refresh_encoding: EncodingKey::from_secret(refresh),
            refresh_decoding: DecodingKey::from_secret(refresh),
            access_ttl: Duration::minutes(settings.access_ttl_minutes),
            refresh_ttl: Duration::days(settings.refresh_ttl_days),
        }
    }

    pub fn issue_pair(&self, user_id: i32) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenType::Access)?,
            refresh_token: self.issue(user_id, TokenType::Refresh)?,
        })
    }

    pub fn issue(&self, user_id: i32, token_type: TokenType) -> Result<String, TokenError> {
        let now = Utc::now();
        let (key, ttl) = match token_type {
            TokenType::Access => (&self.access_encoding, self.access_ttl),
            TokenType::Refresh => (&self.refresh_encoding, self.refresh_ttl),
        };
        let claims = Claims {
            sub: user_id,
            jti: Uuid::new_v4().simple().to_string(),
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, key).map_err(TokenError::Encode)
    }

    /// Verify signature and expiry of `token` and check it is of `expected`
    /// type. Does not consult the revocation store.
    pub fn decode(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let key = match expected {
            TokenType::Access => &self.access_decoding,
            TokenType::Refresh => &self.refresh_decoding,
        };
        let claims = decode::<Claims>(token, key, &Validation::new(Algorithm::HS256))?.claims;
        if claims.token_type != expected {
            return Err(TokenError::WrongType { expected });
        }
        Ok(claims)
    }
}
