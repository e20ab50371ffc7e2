//! Profile handlers

use axum::{extract::{State, Path, Query}, Json};
use validator::Validate;

use crate::{AppState, AppResult, AppError};
use crate::models::{Profile, ProfileSearch};
use crate::middleware::auth::UserContext;

/// Get single profile
pub async fn get(
    State(state): State<AppState>,
    _user: UserContext,
    Path(entity_id): Path<String>,
) -> AppResult<Json<Profile>> {
    let profile = Profile::find_by_entity_id(&state.pool, &entity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile))
}

/// Search profiles by name, email, student/staff id or card id
pub async fn search(
    State(state): State<AppState>,
    _user: UserContext,
    Query(query): Query<ProfileSearch>,
) -> AppResult<Json<Vec<Profile>>> {
    query.validate()?;

    let profiles = Profile::search(&state.pool, query.q.trim()).await?;
    Ok(Json(profiles))
}
