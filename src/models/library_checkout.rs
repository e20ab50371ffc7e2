//! Library checkout model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LibraryCheckout {
    pub checkout_id: String,
    pub entity_id: Option<String>,
    pub book_id: String,
    pub timestamp: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

impl LibraryCheckout {
    pub async fn list_by_entity_id(
        pool: &PgPool,
        entity_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, LibraryCheckout>(
            r#"
            SELECT * FROM library_checkouts
            WHERE entity_id = $1
              AND ($2::timestamptz IS NULL OR timestamp >= $2)
              AND ($3::timestamptz IS NULL OR timestamp <= $3)
            ORDER BY timestamp DESC
            "#
        )
        .bind(entity_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }
}
