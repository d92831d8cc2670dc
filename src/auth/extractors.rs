use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Header carrying the session token on protected routes.
pub const TOKEN_HEADER: &str = "x-access-token";

/// Gate for protected routes: verifies the session token and yields the user ID.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .filter(|v| !v.is_empty())
            .ok_or(ApiError::MissingToken)?;

        // A header that is not valid visible ASCII cannot be a JWT.
        let token = token.to_str().unwrap_or_default();

        let keys = JwtKeys::from_ref(state);
        match keys.verify(token) {
            Ok(user_id) => Ok(AuthUser(user_id)),
            Err(e) => {
                warn!(error = %e, "token rejected");
                Err(ApiError::Token(e))
            }
        }
    }
}
