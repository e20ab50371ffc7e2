//! Entity timeline aggregation
//!
//! Fans out to the five activity sources using whichever foreign keys the
//! entity's profile carries, then merges everything into one feed, newest
//! first. A failing source is logged and skipped; it never takes the rest
//! of the timeline down with it.

use super::source::{CampusRecords, SourceError};
use super::types::{SourceRecord, Timeline, TimelineEntry, TimelineQuery, TimelineSource};

/// Row cap for the keyed high-volume sources (card swipes, Wi-Fi, CCTV)
pub const SOURCE_FETCH_LIMIT: i64 = 50;

/// `None` when the source was skipped for lack of a key
type SourceFetch = Option<Result<Vec<SourceRecord>, SourceError>>;

pub struct TimelineAggregator<R> {
    records: R,
}

impl<R: CampusRecords> TimelineAggregator<R> {
    pub fn new(records: R) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    /// Merged feed for an entity, newest first, at most `limit` entries.
    ///
    /// Unknown entities and profile lookup failures both yield an empty feed.
    pub async fn get_entity_timeline(&self, entity_id: &str, limit: usize) -> Vec<TimelineEntry> {
        self.build_timeline(entity_id, &TimelineQuery::with_limit(limit))
            .await
            .entries
    }

    /// Like [`get_entity_timeline`](Self::get_entity_timeline), with an
    /// optional time window and a report of the sources that failed.
    pub async fn build_timeline(&self, entity_id: &str, query: &TimelineQuery) -> Timeline {
        let profile = match self.records.profile(entity_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                tracing::debug!(entity_id, "No profile, empty timeline");
                return Timeline::default();
            }
            Err(e) => {
                tracing::error!(entity_id, error = %e, "Profile lookup failed, empty timeline");
                return Timeline::default();
            }
        };

        let records = &self.records;
        let window = query.window();

        let card_swipes = async {
            match profile.card_key() {
                Some(card_id) => Some(
                    records
                        .card_swipes(card_id, window, SOURCE_FETCH_LIMIT)
                        .await
                        .map(|rows| rows.into_iter().map(SourceRecord::CardSwipe).collect::<Vec<_>>()),
                ),
                None => None,
            }
        };

        let wifi = async {
            match profile.device_key() {
                Some(device_hash) => Some(
                    records
                        .wifi_associations(device_hash, window, SOURCE_FETCH_LIMIT)
                        .await
                        .map(|rows| rows.into_iter().map(SourceRecord::Wifi).collect::<Vec<_>>()),
                ),
                None => None,
            }
        };

        let bookings = async {
            Some(
                records
                    .bookings(entity_id, window)
                    .await
                    .map(|rows| rows.into_iter().map(SourceRecord::Booking).collect::<Vec<_>>()),
            )
        };

        let library = async {
            Some(
                records
                    .library_checkouts(entity_id, window)
                    .await
                    .map(|rows| rows.into_iter().map(SourceRecord::Library).collect::<Vec<_>>()),
            )
        };

        let cctv = async {
            match profile.face_key() {
                Some(face_id) => Some(
                    records
                        .cctv_frames(face_id, window, SOURCE_FETCH_LIMIT)
                        .await
                        .map(|rows| rows.into_iter().map(SourceRecord::Cctv).collect::<Vec<_>>()),
                ),
                None => None,
            }
        };

        let (card_swipes, wifi, bookings, library, cctv): (
            SourceFetch,
            SourceFetch,
            SourceFetch,
            SourceFetch,
            SourceFetch,
        ) = tokio::join!(card_swipes, wifi, bookings, library, cctv);

        let outcomes = [
            (TimelineSource::CardSwipe, card_swipes),
            (TimelineSource::Wifi, wifi),
            (TimelineSource::Booking, bookings),
            (TimelineSource::Library, library),
            (TimelineSource::Cctv, cctv),
        ];

        let mut timeline = Timeline::default();

        for (source, outcome) in outcomes {
            match outcome {
                None => {}
                Some(Ok(rows)) => {
                    let before = timeline.entries.len();
                    timeline.entries.extend(
                        rows.into_iter()
                            .filter_map(|row| TimelineEntry::from_record(entity_id, row))
                            .filter(|entry| window.contains(entry.timestamp)),
                    );
                    tracing::trace!(entity_id, %source, entries = timeline.entries.len() - before, "Source merged");
                }
                Some(Err(e)) => {
                    tracing::warn!(entity_id, %source, error = %e, "Timeline source failed, skipping");
                    timeline.unavailable_sources.push(source);
                }
            }
        }

        // Stable: equal timestamps keep source order
        timeline.entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        timeline.entries.truncate(query.limit);

        if !timeline.unavailable_sources.is_empty() {
            tracing::info!(
                entity_id,
                unavailable = timeline.unavailable_sources.len(),
                of = TimelineSource::ALL.len(),
                "Partial timeline returned"
            );
        }

        timeline
    }
}
