//! Timeline value objects

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Booking, CardSwipe, CctvFrame, LibraryCheckout, WifiAssociation};
use crate::predictor::{ActivityObservation, ActivityType};

/// Record source a timeline entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineSource {
    CardSwipe,
    Wifi,
    Booking,
    Library,
    Cctv,
}

impl TimelineSource {
    pub const ALL: [TimelineSource; 5] = [
        Self::CardSwipe,
        Self::Wifi,
        Self::Booking,
        Self::Library,
        Self::Cctv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CardSwipe => "card_swipe",
            Self::Wifi => "wifi",
            Self::Booking => "booking",
            Self::Library => "library",
            Self::Cctv => "cctv",
        }
    }
}

impl fmt::Display for TimelineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw row from one of the five activity sources
#[derive(Debug, Clone)]
pub enum SourceRecord {
    CardSwipe(CardSwipe),
    Wifi(WifiAssociation),
    Booking(Booking),
    Library(LibraryCheckout),
    Cctv(CctvFrame),
}

/// Normalized timeline row. Only the identifiers that apply to `source` are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub source: TimelineSource,
    pub timestamp: DateTime<Utc>,
    pub entity_id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ap_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<String>,
}

impl TimelineEntry {
    fn bare(source: TimelineSource, timestamp: DateTime<Utc>, entity_id: &str, description: String) -> Self {
        Self {
            source,
            timestamp,
            entity_id: entity_id.to_string(),
            description,
            location_id: None,
            card_id: None,
            ap_id: None,
            device_hash: None,
            room_id: None,
            book_id: None,
        }
    }

    /// Normalize a source row. Rows without a timestamp yield `None`.
    pub fn from_record(entity_id: &str, record: SourceRecord) -> Option<Self> {
        let entry = match record {
            SourceRecord::CardSwipe(s) => {
                let mut e = Self::bare(
                    TimelineSource::CardSwipe,
                    s.timestamp?,
                    entity_id,
                    format!("Card swipe at {}", s.location_id.as_deref().unwrap_or("unknown location")),
                );
                e.location_id = s.location_id;
                e.card_id = s.card_id;
                e
            }
            SourceRecord::Wifi(w) => {
                let mut e = Self::bare(
                    TimelineSource::Wifi,
                    w.timestamp?,
                    entity_id,
                    format!("WiFi connection to {}", w.ap_id.as_deref().unwrap_or("unknown AP")),
                );
                e.ap_id = w.ap_id;
                e.device_hash = w.device_hash;
                e
            }
            SourceRecord::Booking(b) => {
                let attended = if b.attended.unwrap_or(false) { "attended" } else { "not attended" };
                let mut e = Self::bare(
                    TimelineSource::Booking,
                    b.start_time,
                    entity_id,
                    format!("Room booking: {} ({})", b.room_id, attended),
                );
                e.room_id = Some(b.room_id);
                e
            }
            SourceRecord::Library(c) => {
                let mut e = Self::bare(
                    TimelineSource::Library,
                    c.timestamp,
                    entity_id,
                    format!("Library checkout: {}", c.book_id),
                );
                e.book_id = Some(c.book_id);
                e
            }
            SourceRecord::Cctv(f) => {
                let mut e = Self::bare(
                    TimelineSource::Cctv,
                    f.timestamp?,
                    entity_id,
                    format!("CCTV detection at {}", f.location_id.as_deref().unwrap_or("unknown location")),
                );
                e.location_id = f.location_id;
                e
            }
        };

        Some(entry)
    }

    /// Convert into a predictor observation. Library checkouts and entries
    /// without a place carry no location and are skipped.
    pub fn to_observation(&self) -> Option<ActivityObservation> {
        let (location, activity_type) = match self.source {
            TimelineSource::CardSwipe => (self.location_id.as_ref()?, ActivityType::Swipe),
            TimelineSource::Wifi => (self.ap_id.as_ref()?, ActivityType::Wifi),
            TimelineSource::Booking => (self.room_id.as_ref()?, ActivityType::Booking),
            TimelineSource::Cctv => (self.location_id.as_ref()?, ActivityType::Cctv),
            TimelineSource::Library => return None,
        };

        let mut obs = ActivityObservation::new(self.timestamp, location.clone(), activity_type);
        obs.card_id = self.card_id.clone();
        obs.ap_id = self.ap_id.clone();
        obs.device_hash = self.device_hash.clone();
        obs.room_id = self.room_id.clone();
        obs.book_id = self.book_id.clone();
        Some(obs)
    }
}

/// Timeline request parameters
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TimelineQuery {
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "TimelineQuery::default_limit")]
    pub limit: usize,
    /// Inclusive lower bound
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound
    pub to: Option<DateTime<Utc>>,
}

impl TimelineQuery {
    pub const DEFAULT_LIMIT: usize = 100;

    fn default_limit() -> usize {
        Self::DEFAULT_LIMIT
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { limit, from: None, to: None }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow { from: self.from, to: self.to }
    }
}

/// Inclusive time bounds pushed down to every source query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| timestamp >= from) && self.to.map_or(true, |to| timestamp <= to)
    }
}

impl Default for TimelineQuery {
    fn default() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }
}

/// Merged feed plus the sources that could not be read
#[derive(Debug, Clone, Default, Serialize)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    pub unavailable_sources: Vec<TimelineSource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_card_swipe_entry() {
        let swipe = CardSwipe {
            swipe_id: 1,
            card_id: Some("C1".to_string()),
            location_id: Some("Lib".to_string()),
            timestamp: Some(ts()),
        };

        let entry = TimelineEntry::from_record("e1", SourceRecord::CardSwipe(swipe)).unwrap();
        assert_eq!(entry.source, TimelineSource::CardSwipe);
        assert_eq!(entry.description, "Card swipe at Lib");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["source"], "card_swipe");
        assert_eq!(json["timestamp"], "2024-01-02T10:00:00Z");
        assert_eq!(json["location_id"], "Lib");
        assert!(json.get("ap_id").is_none());
    }

    #[test]
    fn test_missing_timestamp_is_dropped() {
        let frame = CctvFrame {
            frame_id: "f1".to_string(),
            location_id: None,
            timestamp: None,
            face_id: Some("F1".to_string()),
        };
        assert!(TimelineEntry::from_record("e1", SourceRecord::Cctv(frame)).is_none());
    }

    #[test]
    fn test_descriptions_for_missing_fields() {
        let wifi = WifiAssociation { id: 1, device_hash: None, ap_id: None, timestamp: Some(ts()) };
        let entry = TimelineEntry::from_record("e1", SourceRecord::Wifi(wifi)).unwrap();
        assert_eq!(entry.description, "WiFi connection to unknown AP");

        let booking = Booking {
            booking_id: "b1".to_string(),
            room_id: "R-204".to_string(),
            entity_id: Some("e1".to_string()),
            start_time: ts(),
            end_time: ts(),
            attended: None,
            created_at: None,
        };
        let entry = TimelineEntry::from_record("e1", SourceRecord::Booking(booking)).unwrap();
        assert_eq!(entry.description, "Room booking: R-204 (not attended)");
        assert_eq!(entry.room_id.as_deref(), Some("R-204"));
    }

    #[test]
    fn test_observation_mapping() {
        let checkout = LibraryCheckout {
            checkout_id: "c1".to_string(),
            entity_id: Some("e1".to_string()),
            book_id: "B9".to_string(),
            timestamp: ts(),
            created_at: None,
        };
        let entry = TimelineEntry::from_record("e1", SourceRecord::Library(checkout)).unwrap();
        assert!(entry.to_observation().is_none());

        let wifi = WifiAssociation {
            id: 2,
            device_hash: Some("d1".to_string()),
            ap_id: Some("AP-3".to_string()),
            timestamp: Some(ts()),
        };
        let obs = TimelineEntry::from_record("e1", SourceRecord::Wifi(wifi))
            .and_then(|e| e.to_observation())
            .unwrap();
        assert_eq!(obs.location, "AP-3");
        assert_eq!(obs.activity_type, ActivityType::Wifi);
        assert_eq!(obs.device_hash.as_deref(), Some("d1"));
    }

    #[test]
    fn test_query_window_is_inclusive() {
        let window = TimelineQuery { limit: 10, from: Some(ts()), to: Some(ts()) }.window();
        assert!(window.contains(ts()));
        assert!(!window.contains(ts() + chrono::Duration::seconds(1)));
        assert!(!window.contains(ts() - chrono::Duration::seconds(1)));
        assert!(TimelineQuery::default().window().contains(ts()));
    }

    #[test]
    fn test_query_limit_bounds() {
        assert!(TimelineQuery::with_limit(0).validate().is_err());
        assert!(TimelineQuery::with_limit(1001).validate().is_err());
        assert!(TimelineQuery::with_limit(100).validate().is_ok());
    }
}
