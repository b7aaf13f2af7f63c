use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use super::dto::{Achievement, Profile, UserStats};
use super::repo;
use crate::{auth::AuthUser, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/stats", get(get_stats))
        .route("/achievements", get(get_achievements))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, (StatusCode, String)> {
    match repo::find_profile(&state.db, user_id).await {
        Ok(Some(profile)) => Ok(Json(profile)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Profile not found".into())),
        Err(e) => {
            error!(error = %e, %user_id, "fetch profile failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserStats>, (StatusCode, String)> {
    match repo::find_stats(&state.db, user_id).await {
        Ok(Some(stats)) => Ok(Json(stats)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Stats not found".into())),
        Err(e) => {
            error!(error = %e, %user_id, "fetch stats failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_achievements(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Achievement>>, (StatusCode, String)> {
    let achievements = repo::list_achievements(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "list achievements failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    Ok(Json(achievements))
}
