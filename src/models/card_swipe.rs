//! Campus card swipe model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CardSwipe {
    pub swipe_id: i64,
    pub card_id: Option<String>,
    pub location_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl CardSwipe {
    /// Most recent swipes for one card inside the optional inclusive
    /// `[from, to]` bounds, newest first
    pub async fn list_by_card_id(
        pool: &PgPool,
        card_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: i64
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, CardSwipe>(
            r#"
            SELECT * FROM campus_card_swipes
            WHERE card_id = $1
              AND ($2::timestamptz IS NULL OR timestamp >= $2)
              AND ($3::timestamptz IS NULL OR timestamp <= $3)
            ORDER BY timestamp DESC NULLS LAST
            LIMIT $4
            "#
        )
        .bind(card_id)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn count_since(pool: &PgPool, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM campus_card_swipes WHERE timestamp >= $1")
            .bind(since)
            .fetch_one(pool)
            .await
    }
}
