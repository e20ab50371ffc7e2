//! Wi-Fi association log model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WifiAssociation {
    pub id: i64,
    pub device_hash: Option<String>,
    pub ap_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl WifiAssociation {
    /// Most recent associations for one device, newest first
    pub async fn list_by_device_hash(
        pool: &PgPool,
        device_hash: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: i64
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, WifiAssociation>(
            r#"
            SELECT * FROM wifi_associations_logs
            WHERE device_hash = $1
              AND ($2::timestamptz IS NULL OR timestamp >= $2)
              AND ($3::timestamptz IS NULL OR timestamp <= $3)
            ORDER BY timestamp DESC NULLS LAST
            LIMIT $4
            "#
        )
        .bind(device_hash)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn count_since(pool: &PgPool, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM wifi_associations_logs WHERE timestamp >= $1")
            .bind(since)
            .fetch_one(pool)
            .await
    }
}
