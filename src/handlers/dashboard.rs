//! Dashboard metric-card handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;

use crate::{AppState, AppResult};
use crate::models::{Alert, Booking, CardSwipe, Profile, WifiAssociation};
use crate::middleware::auth::UserContext;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_entities: i64,
    pub card_swipes_24h: i64,
    pub wifi_associations_24h: i64,
    pub bookings_today: i64,
    pub alerts_24h: i64,
    pub critical_alerts_24h: i64,
    pub high_alerts_24h: i64,
    pub medium_alerts_24h: i64,
    pub low_alerts_24h: i64,
    pub generated_at: DateTime<Utc>,
}

/// Counts behind the dashboard's metric cards
pub async fn summary(
    State(state): State<AppState>,
    _user: UserContext,
) -> AppResult<Json<DashboardSummary>> {
    let now = Utc::now();
    let day_ago = now - Duration::hours(24);

    let offset = state.config.campus_offset();
    let local_midnight = now
        .with_timezone(&offset)
        .with_time(NaiveTime::MIN)
        .single()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(day_ago);

    let total_entities = Profile::count(&state.pool).await?;
    let card_swipes_24h = CardSwipe::count_since(&state.pool, day_ago).await?;
    let wifi_associations_24h = WifiAssociation::count_since(&state.pool, day_ago).await?;
    let bookings_today = Booking::count_starting_between(
        &state.pool,
        local_midnight,
        local_midnight + Duration::days(1),
    ).await?;

    let alert_counts = Alert::count_by_severity_since(&state.pool, day_ago).await?;

    let mut summary = DashboardSummary {
        total_entities,
        card_swipes_24h,
        wifi_associations_24h,
        bookings_today,
        alerts_24h: 0,
        critical_alerts_24h: 0,
        high_alerts_24h: 0,
        medium_alerts_24h: 0,
        low_alerts_24h: 0,
        generated_at: now,
    };

    for (severity, count) in &alert_counts {
        summary.alerts_24h += count;
        match severity.to_ascii_lowercase().as_str() {
            "critical" => summary.critical_alerts_24h += count,
            "high" => summary.high_alerts_24h += count,
            "medium" => summary.medium_alerts_24h += count,
            "low" => summary.low_alerts_24h += count,
            _ => {}
        }
    }

    Ok(Json(summary))
}
