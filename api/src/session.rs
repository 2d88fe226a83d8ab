use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::SessionConfig, models::user::User};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token lifetime of {0}s is out of range")]
    Lifetime(i64),
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iat: i64,
    pub uid: i64,
    pub device_id: String,
    pub expiry: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
    pub role: String,
    pub version: String,
    pub category: String,
    pub tenant: String,
    pub platform: String,
}

#[derive(Clone)]
pub struct SessionIssuer {
    config: SessionConfig,
    encoding_key: EncodingKey,
}

impl SessionIssuer {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
        }
    }

    pub fn claims(&self, user_id: i64, now: DateTime<Utc>) -> Result<Claims, SessionError> {
        let ttl = self.config.ttl_secs;
        let expiry = Duration::try_seconds(ttl)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(SessionError::Lifetime(ttl))?
            .timestamp();
        let iat = now.timestamp();
        Ok(Claims {
            iat,
            uid: user_id,
            device_id: self.config.device_id.clone(),
            expiry,
            exp: expiry,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            role: self.config.role.clone(),
            version: self.config.version.clone(),
            category: self.config.category.clone(),
            tenant: self.config.tenant.clone(),
            platform: self.config.platform.clone(),
        })
    }

    pub fn issue(&self, user: &User) -> Result<String, SessionError> {
        let claims = self.claims(user.id, Utc::now())?;
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }
}
