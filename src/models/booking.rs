//! Room booking model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub booking_id: String,
    pub room_id: String,
    pub entity_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub attended: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Bookings made by an entity whose start falls inside the optional
    /// bounds, latest start first
    pub async fn list_by_entity_id(
        pool: &PgPool,
        entity_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE entity_id = $1
              AND ($2::timestamptz IS NULL OR start_time >= $2)
              AND ($3::timestamptz IS NULL OR start_time <= $3)
            ORDER BY start_time DESC
            "#
        )
        .bind(entity_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }

    /// Bookings starting inside `[from, to)`
    pub async fn count_starting_between(
        pool: &PgPool,
        from: DateTime<Utc>,
        to: DateTime<Utc>
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE start_time >= $1 AND start_time < $2")
            .bind(from)
            .bind(to)
            .fetch_one(pool)
            .await
    }
}
