//! Alerts handlers

use axum::{extract::{State, Query}, Json};
use chrono::Utc;
use validator::Validate;

use crate::{AppState, AppResult};
use crate::models::{Alert, AlertFilter};
use crate::middleware::auth::UserContext;

/// List recent alerts, optionally for one entity
pub async fn list(
    State(state): State<AppState>,
    _user: UserContext,
    Query(filter): Query<AlertFilter>,
) -> AppResult<Json<Vec<Alert>>> {
    filter.validate()?;

    let since = filter.window_start(Utc::now());
    let entity_id = filter.entity_id.as_deref().filter(|id| !id.is_empty());

    let alerts = Alert::list_since(&state.pool, entity_id, since).await?;
    Ok(Json(alerts))
}
