//! Database module - PostgreSQL connection and migrations

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create tables if not exist
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await?;

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Pool that never connects until a query runs. Router tests use it for
/// paths that are rejected before touching the database.
#[cfg(test)]
pub fn lazy_pool(database_url: &str) -> PgPool {
    PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(database_url)
        .expect("test database url parses")
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
-- Resolved campus entities
CREATE TABLE IF NOT EXISTS profiles (
    entity_id VARCHAR(64) PRIMARY KEY,
    name VARCHAR(255),
    role VARCHAR(50),
    email VARCHAR(255),
    department VARCHAR(255),
    student_id VARCHAR(64),
    staff_id VARCHAR(64),
    card_id VARCHAR(64),
    device_hash VARCHAR(128),
    face_id VARCHAR(64),
    created_at TIMESTAMPTZ DEFAULT NOW()
);

-- Access card swipes
CREATE TABLE IF NOT EXISTS campus_card_swipes (
    swipe_id BIGSERIAL PRIMARY KEY,
    card_id VARCHAR(64),
    location_id VARCHAR(255),
    timestamp TIMESTAMPTZ
);

-- Wi-Fi access point associations
CREATE TABLE IF NOT EXISTS wifi_associations_logs (
    id BIGSERIAL PRIMARY KEY,
    device_hash VARCHAR(128),
    ap_id VARCHAR(255),
    timestamp TIMESTAMPTZ
);

-- Room bookings
CREATE TABLE IF NOT EXISTS bookings (
    booking_id VARCHAR(64) PRIMARY KEY,
    room_id VARCHAR(255) NOT NULL,
    entity_id VARCHAR(64),
    start_time TIMESTAMPTZ NOT NULL,
    end_time TIMESTAMPTZ NOT NULL,
    attended BOOLEAN,
    created_at TIMESTAMPTZ DEFAULT NOW()
);

-- Library checkouts
CREATE TABLE IF NOT EXISTS library_checkouts (
    checkout_id VARCHAR(64) PRIMARY KEY,
    entity_id VARCHAR(64),
    book_id VARCHAR(64) NOT NULL,
    timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_at TIMESTAMPTZ DEFAULT NOW()
);

-- CCTV frames with a matched face
CREATE TABLE IF NOT EXISTS cctv_frames (
    frame_id VARCHAR(64) PRIMARY KEY,
    location_id VARCHAR(255),
    timestamp TIMESTAMPTZ,
    face_id VARCHAR(64)
);

-- Security alerts
CREATE TABLE IF NOT EXISTS alerts (
    id BIGSERIAL PRIMARY KEY,
    entity_id VARCHAR(64),
    type VARCHAR(100),
    severity VARCHAR(20),
    message TEXT,
    timestamp TIMESTAMPTZ DEFAULT NOW()
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_profiles_card ON profiles(card_id);
CREATE INDEX IF NOT EXISTS idx_swipes_card_time ON campus_card_swipes(card_id, timestamp DESC);
CREATE INDEX IF NOT EXISTS idx_wifi_device_time ON wifi_associations_logs(device_hash, timestamp DESC);
CREATE INDEX IF NOT EXISTS idx_bookings_entity ON bookings(entity_id, start_time DESC);
CREATE INDEX IF NOT EXISTS idx_library_entity ON library_checkouts(entity_id, timestamp DESC);
CREATE INDEX IF NOT EXISTS idx_cctv_face_time ON cctv_frames(face_id, timestamp DESC);
CREATE INDEX IF NOT EXISTS idx_alerts_entity_time ON alerts(entity_id, timestamp DESC);
CREATE INDEX IF NOT EXISTS idx_alerts_time ON alerts(timestamp);
"#;
