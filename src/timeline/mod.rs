//! Entity timeline
//!
//! ```text
//!              ┌─ card_id ─────► campus_card_swipes (≤ 50) ─┐
//!              ├─ device_hash ─► wifi_associations_logs (≤ 50)
//! profile ─────┼─ entity_id ───► bookings                    ├─► merge ─► sort desc ─► limit
//!              ├─ entity_id ───► library_checkouts           │
//!              └─ face_id ─────► cctv_frames (≤ 50) ─────────┘
//! ```

pub mod aggregator;
pub mod pg;
pub mod source;
pub mod types;


pub use aggregator::{TimelineAggregator, SOURCE_FETCH_LIMIT};
pub use pg::PgCampusRecords;
pub use source::{CampusRecords, SourceError};
pub use types::{SourceRecord, TimeWindow, Timeline, TimelineEntry, TimelineQuery, TimelineSource};
