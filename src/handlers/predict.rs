//! Prediction handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppState, AppResult, AppError};
use crate::models::Profile;
use crate::predictor::{EntityType, PredictionInput, PredictionOutput};
use crate::timeline::{TimelineEntry, TimelineQuery};
use crate::middleware::auth::UserContext;

/// History window fed to the predictor
const HISTORY_LIMIT: usize = 500;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub entity_id: String,
    /// Predict as of this instant; defaults to now
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub entity_id: String,
    pub entity_type: EntityType,
    pub observations_used: usize,
    pub prediction: PredictionOutput,
}

/// Predict an entity's next location from its own timeline
pub async fn predict_entity(
    State(state): State<AppState>,
    _user: UserContext,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    let entity_id = req.entity_id.trim();
    if entity_id.is_empty() {
        return Err(AppError::ValidationError("entity_id is required".to_string()));
    }

    let profile = Profile::find_by_entity_id(&state.pool, entity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    let as_of = req.timestamp.unwrap_or_else(Utc::now);
    let query = TimelineQuery {
        limit: HISTORY_LIMIT,
        from: None,
        to: Some(as_of),
    };
    let timeline = state.timeline().build_timeline(entity_id, &query).await;

    let input = PredictionInput {
        entity_id: profile.entity_id.clone(),
        entity_type: EntityType::from_role(profile.role.as_deref()),
        current_time: as_of,
        historical_activities: timeline.entries.iter().filter_map(TimelineEntry::to_observation).collect(),
    };

    let prediction = state.predictor.predict_activity(&input);

    tracing::info!(
        "Prediction for {}: {} ({:.2})",
        input.entity_id, prediction.predicted_location, prediction.confidence
    );

    Ok(Json(PredictResponse {
        entity_id: input.entity_id,
        entity_type: input.entity_type,
        observations_used: input.historical_activities.len(),
        prediction,
    }))
}

/// Run the predictor over caller-supplied history
pub async fn predict_activity(
    State(state): State<AppState>,
    _user: UserContext,
    Json(input): Json<PredictionInput>,
) -> AppResult<Json<PredictionOutput>> {
    Ok(Json(state.predictor.predict_activity(&input)))
}
