use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{auth::jwt::AuthError, db::StoreError};

/// A request body that failed the validation boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("`{0}` is required")]
    Missing(&'static str),
    #[error("{0}")]
    Body(String),
}

impl From<JsonRejection> for ValidationError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection.body_text())
    }
}

/// Every way a handler can end a request other than success.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No token provided.")]
    MissingToken,
    #[error("Failed to authenticate token.")]
    Token(#[source] AuthError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid password")]
    InvalidPassword,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingToken => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidPassword => StatusCode::UNAUTHORIZED,
            // Token failures keep the 500 existing clients already handle.
            ApiError::Token(_)
            | ApiError::Validation(_)
            | ApiError::Store(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::MissingToken
            | ApiError::Token(_)
            | ApiError::NotFound(_)
            | ApiError::InvalidPassword => (status, self.to_string()).into_response(),
            ApiError::Validation(_) | ApiError::Store(_) | ApiError::Internal(_) => {
                (status, Json(json!({ "message": self.to_string() }))).into_response()
            }
        }
    }
}
