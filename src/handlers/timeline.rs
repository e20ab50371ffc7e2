//! Entity timeline handlers

use axum::{extract::{State, Path, Query}, Json};
use serde::Serialize;
use validator::Validate;

use crate::{AppState, AppResult, AppError};
use crate::timeline::{TimelineEntry, TimelineQuery, TimelineSource};
use crate::middleware::auth::UserContext;

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub entity_id: String,
    pub entries: Vec<TimelineEntry>,
    pub unavailable_sources: Vec<TimelineSource>,
}

/// Unified activity feed for one entity, newest first
pub async fn get(
    State(state): State<AppState>,
    _user: UserContext,
    Path(entity_id): Path<String>,
    Query(query): Query<TimelineQuery>,
) -> AppResult<Json<TimelineResponse>> {
    query.validate()?;
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(AppError::ValidationError("`from` must not be after `to`".to_string()));
        }
    }

    let timeline = state.timeline().build_timeline(&entity_id, &query).await;

    Ok(Json(TimelineResponse {
        entity_id,
        entries: timeline.entries,
        unavailable_sources: timeline.unavailable_sources,
    }))
}
