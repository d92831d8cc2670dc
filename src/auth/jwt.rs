use axum::extract::FromRef;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::claims::Claims;
use crate::{config::JwtConfig, state::AppState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    Expired,
}

/// Signing and verification keys for session tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::seconds(cfg.ttl_seconds),
        }
    }

    /// Issues a token for `user_id` that expires one TTL from now.
    pub fn issue(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.issue_at(user_id, OffsetDateTime::now_utc())
    }

    pub(crate) fn issue_at(
        &self,
        user_id: Uuid,
        issued_at: OffsetDateTime,
    ) -> anyhow::Result<String> {
        let exp = issued_at + self.ttl;
        let claims = Claims {
            sub: user_id,
            iat: issued_at.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    /// Returns the user id embedded in a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            }
        })?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            ttl_seconds: 86_400,
        })
    }

    #[test]
    fn issue_and_verify_returns_user_id() {
        let keys = make_keys("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id).expect("issue");
        assert_eq!(keys.verify(&token), Ok(user_id));
    }

    #[test]
    fn token_expires_after_one_day() {
        let keys = make_keys("dev-secret");
        let now = OffsetDateTime::now_utc();
        let token = keys.issue_at(Uuid::new_v4(), now).expect("issue");
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"dev-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .expect("decode")
        .claims;
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn past_expiration_is_rejected_as_expired() {
        let keys = make_keys("dev-secret");
        let two_days_ago = OffsetDateTime::now_utc() - Duration::days(2);
        let token = keys.issue_at(Uuid::new_v4(), two_days_ago).expect("issue");
        assert_eq!(keys.verify(&token), Err(AuthError::Expired));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let token = make_keys("other-secret").issue(Uuid::new_v4()).expect("issue");
        assert_eq!(make_keys("dev-secret").verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let keys = make_keys("dev-secret");
        assert_eq!(keys.verify("not.a.jwt"), Err(AuthError::InvalidToken));
        assert_eq!(keys.verify(""), Err(AuthError::InvalidToken));
    }
}
