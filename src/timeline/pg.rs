//! PostgreSQL-backed record source

use async_trait::async_trait;
use sqlx::PgPool;

use super::source::{CampusRecords, SourceError};
use super::types::TimeWindow;
use crate::models::{Booking, CardSwipe, CctvFrame, LibraryCheckout, Profile, WifiAssociation};

#[derive(Debug, Clone)]
pub struct PgCampusRecords {
    pool: PgPool,
}

impl PgCampusRecords {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampusRecords for PgCampusRecords {
    async fn profile(&self, entity_id: &str) -> Result<Option<Profile>, SourceError> {
        Ok(Profile::find_by_entity_id(&self.pool, entity_id).await?)
    }

    async fn card_swipes(&self, card_id: &str, window: TimeWindow, limit: i64) -> Result<Vec<CardSwipe>, SourceError> {
        Ok(CardSwipe::list_by_card_id(&self.pool, card_id, window.from, window.to, limit).await?)
    }

    async fn wifi_associations(
        &self,
        device_hash: &str,
        window: TimeWindow,
        limit: i64,
    ) -> Result<Vec<WifiAssociation>, SourceError> {
        Ok(WifiAssociation::list_by_device_hash(&self.pool, device_hash, window.from, window.to, limit).await?)
    }

    async fn bookings(&self, entity_id: &str, window: TimeWindow) -> Result<Vec<Booking>, SourceError> {
        Ok(Booking::list_by_entity_id(&self.pool, entity_id, window.from, window.to).await?)
    }

    async fn library_checkouts(&self, entity_id: &str, window: TimeWindow) -> Result<Vec<LibraryCheckout>, SourceError> {
        Ok(LibraryCheckout::list_by_entity_id(&self.pool, entity_id, window.from, window.to).await?)
    }

    async fn cctv_frames(&self, face_id: &str, window: TimeWindow, limit: i64) -> Result<Vec<CctvFrame>, SourceError> {
        Ok(CctvFrame::list_by_face_id(&self.pool, face_id, window.from, window.to, limit).await?)
    }
}
