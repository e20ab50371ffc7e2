//! Record sources behind the timeline

use async_trait::async_trait;

use super::types::TimeWindow;
use crate::models::{Booking, CardSwipe, CctvFrame, LibraryCheckout, Profile, WifiAssociation};

/// Failure reading one source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read access to the campus record store.
///
/// Every list query returns rows newest first and applies `window` before
/// `limit`, so a capped source still returns the newest rows inside the
/// window. `profile` returns `Ok(None)` for an unknown entity and reserves
/// `Err` for transport or query failures.
#[async_trait]
pub trait CampusRecords: Send + Sync {
    async fn profile(&self, entity_id: &str) -> Result<Option<Profile>, SourceError>;

    async fn card_swipes(&self, card_id: &str, window: TimeWindow, limit: i64) -> Result<Vec<CardSwipe>, SourceError>;

    async fn wifi_associations(
        &self,
        device_hash: &str,
        window: TimeWindow,
        limit: i64,
    ) -> Result<Vec<WifiAssociation>, SourceError>;

    async fn bookings(&self, entity_id: &str, window: TimeWindow) -> Result<Vec<Booking>, SourceError>;

    async fn library_checkouts(&self, entity_id: &str, window: TimeWindow) -> Result<Vec<LibraryCheckout>, SourceError>;

    async fn cctv_frames(&self, face_id: &str, window: TimeWindow, limit: i64) -> Result<Vec<CctvFrame>, SourceError>;
}
