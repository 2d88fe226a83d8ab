use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{session::SessionError, store::StoreError};

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(inner: StoreError) -> Self {
        match inner {
            StoreError::NotFound => {
                tracing::info!("User not found");
                AppError::NotFound("User not found".to_string())
            }
            StoreError::Database(e) => {
                tracing::error!("Database error: {}", e);
                AppError::Internal
            }
        }
    }
}

impl From<SessionError> for AppError {
    fn from(inner: SessionError) -> Self {
        tracing::error!("Error creating JWT token: {}", inner);
        AppError::Internal
    }
}

impl From<JsonRejection> for AppError {
    fn from(inner: JsonRejection) -> Self {
        let message = inner.body_text();
        tracing::info!(%message, "invalid request body");
        AppError::BadRequest(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::BadRequest(msg) | AppError::Unauthorized(msg) | AppError::NotFound(msg) => {
                msg
            }
            AppError::Internal => "Internal server error".to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
