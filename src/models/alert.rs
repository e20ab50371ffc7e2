//! Alert model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Row};
use chrono::{DateTime, Duration, Utc};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    pub id: i64,
    pub entity_id: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub alert_type: Option<String>,
    pub severity: Option<String>,
    pub message: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, Default)]
pub struct AlertFilter {
    pub entity_id: Option<String>,
    #[validate(range(min = 1, max = 168))]
    pub hours: Option<i64>,
}

impl AlertFilter {
    pub const DEFAULT_HOURS: i64 = 12;

    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::hours(self.hours.unwrap_or(Self::DEFAULT_HOURS))
    }
}

impl Alert {
    pub const MAX_ROWS: i64 = 500;

    /// Alerts raised since `since`, optionally for one entity, newest first
    pub async fn list_since(
        pool: &PgPool,
        entity_id: Option<&str>,
        since: DateTime<Utc>
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Alert>(
            r#"
            SELECT * FROM alerts
            WHERE timestamp >= $1
              AND ($2::VARCHAR IS NULL OR entity_id = $2)
            ORDER BY timestamp DESC
            LIMIT $3
            "#
        )
        .bind(since)
        .bind(entity_id)
        .bind(Self::MAX_ROWS)
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_severity_since(
        pool: &PgPool,
        since: DateTime<Utc>
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT COALESCE(severity, 'unknown') AS severity, COUNT(*) AS count
            FROM alerts
            WHERE timestamp >= $1
            GROUP BY 1
            "#
        )
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|r| {
            (r.get::<String, _>("severity"), r.get::<i64, _>("count"))
        }).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_bounds() {
        let filter = |hours| AlertFilter { entity_id: None, hours: Some(hours) };
        assert!(filter(0).validate().is_err());
        assert!(filter(169).validate().is_err());
        assert!(filter(1).validate().is_ok());
        assert!(filter(168).validate().is_ok());
        assert!(AlertFilter::default().validate().is_ok());
    }

    #[test]
    fn test_window_defaults_to_twelve_hours() {
        let now = Utc::now();
        assert_eq!(AlertFilter::default().window_start(now), now - Duration::hours(12));
    }
}
