use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub session: SessionConfig,
}

/// Inputs of the session issuer. The descriptive fields are copied verbatim
/// into every token.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_secs: i64,
    pub device_id: String,
    pub role: String,
    pub version: String,
    pub category: String,
    pub tenant: String,
    pub platform: String,
}

impl SessionConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: "iam-auth".to_string(),
            audience: "iam-auth".to_string(),
            ttl_secs: 300,
            device_id: "test-device-id".to_string(),
            role: "Listner".to_string(),
            version: "v2".to_string(),
            category: "access".to_string(),
            tenant: "pocket_fm".to_string(),
            platform: "android".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://iam_auth.db".to_string());
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5u32)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }
        let bind_addr = parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;

        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let mut session = SessionConfig::new(secret);
        if let Some(issuer) = lookup("JWT_ISSUER") {
            session.issuer = issuer;
        }
        if let Some(audience) = lookup("JWT_AUDIENCE") {
            session.audience = audience;
        }
        session.ttl_secs = parse_or(&lookup, "JWT_TTL_SECS", session.ttl_secs)?;
        let ttl_in_range = chrono::Duration::try_seconds(session.ttl_secs)
            .and_then(|ttl| chrono::Utc::now().checked_add_signed(ttl))
            .is_some();
        if session.ttl_secs <= 0 || !ttl_in_range {
            return Err(ConfigError::Invalid {
                name: "JWT_TTL_SECS",
                value: session.ttl_secs.to_string(),
            });
        }

        Ok(Config {
            database_url,
            max_connections,
            bind_addr,
            session,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
