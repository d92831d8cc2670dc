use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument};

use super::{
    dto::CreateWebtoonRequest,
    repo::{NewWebtoon, Webtoon},
};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn webtoon_routes() -> Router<AppState> {
    Router::new()
        .route("/webtoons", get(list_webtoons).post(create_webtoon))
        .route("/webtoons/:id", get(get_webtoon).delete(delete_webtoon))
}

#[instrument(skip(state))]
pub async fn list_webtoons(State(state): State<AppState>) -> Result<Json<Vec<Webtoon>>, ApiError> {
    let webtoons = state.webtoons.list().await.map_err(|e| {
        error!(error = %e, "list webtoons failed");
        ApiError::from(e)
    })?;
    Ok(Json(webtoons))
}

#[instrument(skip(state, payload))]
pub async fn create_webtoon(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreateWebtoonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Webtoon>), ApiError> {
    let Json(payload) = payload?;
    let new = NewWebtoon::try_from(payload)?;

    let webtoon = state.webtoons.create(new).await.map_err(|e| {
        error!(error = %e, %user_id, "create webtoon failed");
        ApiError::from(e)
    })?;

    info!(webtoon_id = %webtoon.id, %user_id, "webtoon created");
    Ok((StatusCode::CREATED, Json(webtoon)))
}

#[instrument(skip(state))]
pub async fn get_webtoon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Webtoon>, ApiError> {
    match state.webtoons.find_by_id(&id).await {
        Ok(Some(w)) => Ok(Json(w)),
        Ok(None) => Err(ApiError::NotFound("Webtoon")),
        Err(e) => {
            error!(error = %e, %id, "get webtoon failed");
            Err(e.into())
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_webtoon(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    match state.webtoons.delete_by_id(&id).await {
        Ok(Some(w)) => {
            info!(webtoon_id = %w.id, %user_id, "webtoon deleted");
            Ok("Webtoon deleted")
        }
        Ok(None) => Err(ApiError::NotFound("Webtoon")),
        Err(e) => {
            error!(error = %e, %id, "delete webtoon failed");
            Err(e.into())
        }
    }
}
