use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserDetailResponse {
    pub id: i64,
    pub email: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub platform: String,
    pub app_name: String,
}

impl UserDetailResponse {
    pub fn new(user: User, headers: RequestHeaders) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
            platform: headers.platform,
            app_name: headers.app_name,
        }
    }
}

pub const HEADER_UID: &str = "x-auth-uid";
pub const HEADER_DEVICE_ID: &str = "x-auth-deviceid";
pub const HEADER_PLATFORM: &str = "platform";
pub const HEADER_APP_NAME: &str = "app-name";

/// Caller-asserted identity headers. Nothing here is verified.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestHeaders {
    pub uid: String,
    pub device_id: String,
    pub platform: String,
    pub app_name: String,
}

impl RequestHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let uid = header_str(headers, HEADER_UID)?.ok_or_else(|| {
            tracing::info!("missing required header {}", HEADER_UID);
            AppError::BadRequest(format!("missing required header {HEADER_UID}"))
        })?;

        Ok(Self {
            uid,
            device_id: header_str(headers, HEADER_DEVICE_ID)?.unwrap_or_default(),
            platform: header_str(headers, HEADER_PLATFORM)?.unwrap_or_default(),
            app_name: header_str(headers, HEADER_APP_NAME)?.unwrap_or_default(),
        })
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Result<Option<String>, AppError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => std::str::from_utf8(value.as_bytes())
            .map(|s| Some(s.to_string()))
            .map_err(|_| {
                tracing::info!(header = %name, "header is not valid UTF-8");
                AppError::BadRequest(format!("header {name} is not valid UTF-8"))
            }),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}
