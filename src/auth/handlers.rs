use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{Credentials, CredentialsRequest, LoginResponse, MessageResponse},
        jwt::JwtKeys,
        password,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(payload) = payload?;
    let Credentials { username, password: plain } = Credentials::try_from(payload)?;

    let hash = password::hash(plain).await?;

    let user = match state.users.create(&username, &hash).await {
        Ok(u) => u,
        Err(e) => {
            warn!(error = %e, %username, "create user failed");
            return Err(e.into());
        }
    };

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully!",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload?;
    let creds = Credentials::try_from(payload)?;

    let user = match state.users.find_by_username(&creds.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(username = %creds.username, "login unknown username");
            return Err(ApiError::NotFound("User"));
        }
        Err(e) => {
            error!(error = %e, "find_by_username failed");
            return Err(e.into());
        }
    };

    if !password::verify(creds.password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidPassword);
    }

    let token = JwtKeys::from_ref(&state).issue(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse { auth: true, token }))
}
