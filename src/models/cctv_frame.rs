//! CCTV frame model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CctvFrame {
    pub frame_id: String,
    pub location_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub face_id: Option<String>,
}

impl CctvFrame {
    /// Most recent frames matched to one face, newest first
    pub async fn list_by_face_id(
        pool: &PgPool,
        face_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: i64
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, CctvFrame>(
            r#"
            SELECT * FROM cctv_frames
            WHERE face_id = $1
              AND ($2::timestamptz IS NULL OR timestamp >= $2)
              AND ($3::timestamptz IS NULL OR timestamp <= $3)
            ORDER BY timestamp DESC NULLS LAST
            LIMIT $4
            "#
        )
        .bind(face_id)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
