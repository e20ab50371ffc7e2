//! Activity predictor
//!
//! Blends an entity's observed frequencies with static priors to guess its
//! next location and activity. Deterministic and explainable: every output
//! carries the reasoning and evidence that produced it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, FixedOffset, Offset, Timelike, Utc};

use super::priors::PriorTables;
use super::rules::*;
use super::types::{ActivityObservation, PredictionInput, PredictionOutput};

/// Heuristic next-activity predictor. Immutable after construction.
#[derive(Debug, Clone)]
pub struct CampusPredictor {
    priors: PriorTables,
    campus_offset: FixedOffset,
}

impl Default for CampusPredictor {
    fn default() -> Self {
        Self::new(PriorTables::campus_default())
    }
}

/// Empirical frequency tables derived from one entity's history
#[derive(Debug, Default)]
struct Frequencies {
    locations: BTreeMap<String, f64>,
    hours: BTreeMap<u32, f64>,
    activities: BTreeMap<String, f64>,
}

impl CampusPredictor {
    pub fn new(priors: PriorTables) -> Self {
        Self {
            priors,
            campus_offset: Utc.fix(),
        }
    }

    /// Evaluate hours of day in the campus timezone instead of UTC
    pub fn with_campus_offset(mut self, offset: FixedOffset) -> Self {
        self.campus_offset = offset;
        self
    }

    /// Predict where the entity will be and what it will be doing.
    ///
    /// Never fails: sparse or empty history only lowers the confidence and
    /// leans the choice towards the prior.
    pub fn predict_activity(&self, input: &PredictionInput) -> PredictionOutput {
        let history = &input.historical_activities;
        let freq = self.frequencies(history);

        let location_prior = self.priors.locations_for(input.entity_type);
        let predicted_location = combine(&freq.locations, location_prior)
            .unwrap_or_else(|| FALLBACK_LOCATION.to_string());
        let predicted_activity = combine(&freq.activities, self.priors.activities())
            .unwrap_or_else(|| FALLBACK_ACTIVITY.to_string());

        let confidence = confidence(history.len(), &freq);

        let current_hour = input.current_time.with_timezone(&self.campus_offset).hour();
        let type_name = input.entity_type.as_str();

        let mut reasons = Vec::with_capacity(3);

        let visits = history.iter().filter(|a| a.location == predicted_location).count();
        if visits > 0 {
            reasons.push(format!(
                "Historical data shows {} previous visits to {}",
                visits, predicted_location
            ));
        } else {
            reasons.push(format!(
                "Pattern analysis suggests {} based on {} behavior",
                predicted_location, type_name
            ));
        }

        if ACTIVE_HOURS.contains(&current_hour) {
            reasons.push(format!(
                "Current time ({}:00) aligns with typical {} activity patterns",
                current_hour, type_name
            ));
        }

        if history.iter().any(|a| a.activity_type.as_str() == predicted_activity) {
            reasons.push(format!("Previous {} activities support this prediction", predicted_activity));
        }

        let reasoning = format!("{}.", reasons.join(". "));

        let mut evidence = Vec::with_capacity(3);

        if visits > 0 {
            evidence.push(format!("{} historical activities at {}", visits, predicted_location));
        }

        let recent_cutoff = Duration::hours(RECENT_WINDOW_HOURS);
        let recent = history
            .iter()
            .filter(|a| input.current_time - a.timestamp < recent_cutoff)
            .count();
        if recent > 0 {
            evidence.push(format!("{} activities in the last {} hours", recent, RECENT_WINDOW_HOURS));
        }

        let distinct = history.iter().map(|a| a.location.as_str()).collect::<BTreeSet<_>>().len();
        if distinct > 1 {
            evidence.push(format!("Activity across {} different locations", distinct));
        }

        tracing::debug!(
            entity_id = %input.entity_id,
            entity_type = %input.entity_type,
            observations = history.len(),
            location = %predicted_location,
            activity = %predicted_activity,
            confidence,
            hour = current_hour,
            hour_prior = self.priors.hour_weight(current_hour),
            "Prediction computed"
        );

        PredictionOutput {
            predicted_location,
            predicted_activity,
            confidence,
            reasoning,
            evidence,
        }
    }

    fn frequencies(&self, history: &[ActivityObservation]) -> Frequencies {
        if history.is_empty() {
            return Frequencies::default();
        }

        let mut freq = Frequencies::default();
        for activity in history {
            *freq.locations.entry(activity.location.clone()).or_default() += 1.0;
            let hour = activity.timestamp.with_timezone(&self.campus_offset).hour();
            *freq.hours.entry(hour).or_default() += 1.0;
            *freq.activities.entry(activity.activity_type.as_str().to_string()).or_default() += 1.0;
        }

        let total = history.len() as f64;
        freq.locations.values_mut().for_each(|v| *v /= total);
        freq.hours.values_mut().for_each(|v| *v /= total);
        freq.activities.values_mut().for_each(|v| *v /= total);
        freq
    }
}

/// Pick the best-scoring key from history blended with the prior.
///
/// Keys in the prior score `0.7 * history + 0.3 * prior`; keys only seen in
/// history score `0.5 * history`. Equal scores go to the lexically smallest
/// key. Returns `None` when nothing scores above zero.
fn combine(history: &BTreeMap<String, f64>, prior: &BTreeMap<String, f64>) -> Option<String> {
    let mut combined: BTreeMap<&str, f64> = prior
        .iter()
        .map(|(key, &base)| {
            let seen = history.get(key).copied().unwrap_or(0.0);
            (key.as_str(), seen * HISTORY_WEIGHT + base * PRIOR_WEIGHT)
        })
        .collect();

    for (key, &seen) in history {
        if !prior.contains_key(key) {
            combined.insert(key.as_str(), seen * UNSEEN_KEY_WEIGHT);
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (key, score) in combined {
        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((key, score));
        }
    }

    best.map(|(key, _)| key.to_string())
}

fn confidence(observations: usize, freq: &Frequencies) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    if observations > RICH_HISTORY.0 {
        confidence += RICH_HISTORY.1;
    } else if observations > SOME_HISTORY.0 {
        confidence += SOME_HISTORY.1;
    }

    let top_location = max_value(freq.locations.values());
    if top_location > STRONG_LOCATION.0 {
        confidence += STRONG_LOCATION.1;
    } else if top_location > MODERATE_LOCATION.0 {
        confidence += MODERATE_LOCATION.1;
    }

    if max_value(freq.hours.values()) > STRONG_HOUR.0 {
        confidence += STRONG_HOUR.1;
    }

    confidence.min(MAX_CONFIDENCE)
}

fn max_value<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    values.copied().fold(0.0, f64::max)
}
