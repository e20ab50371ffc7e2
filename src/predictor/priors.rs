//! Static behavioural priors
//!
//! Hand-tuned base rates that keep predictions sensible for entities with
//! little or no history. Tables are ordered maps so iteration, and with it
//! tie-breaking, is lexical.

use std::collections::{BTreeMap, HashMap};

use super::types::{ActivityType, EntityType};

/// Prior distributions consulted by the predictor. Built once, read-only.
#[derive(Debug, Clone, Default)]
pub struct PriorTables {
    locations: HashMap<EntityType, BTreeMap<String, f64>>,
    hours: BTreeMap<u32, f64>,
    activities: BTreeMap<String, f64>,
}

impl PriorTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base rates for a typical campus
    pub fn campus_default() -> Self {
        Self::new()
            .with_locations(EntityType::Student, [
                ("Main Library", 0.3),
                ("Computer Lab A", 0.25),
                ("Cafeteria", 0.2),
                ("Lecture Hall 101", 0.15),
                ("Student Center", 0.1),
            ])
            .with_locations(EntityType::Staff, [
                ("Office Building", 0.4),
                ("Administration Building", 0.3),
                ("Cafeteria", 0.15),
                ("Main Library", 0.1),
                ("Research Lab", 0.05),
            ])
            .with_locations(EntityType::Asset, [
                ("Research Lab", 0.3),
                ("Computer Lab A", 0.25),
                ("Office Building", 0.2),
                ("Main Library", 0.15),
                ("Administration Building", 0.1),
            ])
            .with_hours([
                (9, 0.15),
                (10, 0.2),
                (11, 0.18),
                (12, 0.12),
                (13, 0.1),
                (14, 0.15),
                (15, 0.1),
                (16, 0.05),
                (17, 0.03),
                (18, 0.02),
            ])
            .with_activities([
                (ActivityType::Swipe, 0.4),
                (ActivityType::Wifi, 0.3),
                (ActivityType::Booking, 0.15),
                (ActivityType::Cctv, 0.1),
                (ActivityType::Helpdesk, 0.05),
            ])
    }

    pub fn with_locations<I, S>(mut self, entity_type: EntityType, table: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let table = table.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.locations.insert(entity_type, table);
        self
    }

    pub fn with_hours<I>(mut self, table: I) -> Self
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        self.hours = table.into_iter().filter(|(h, _)| *h < 24).collect();
        self
    }

    pub fn with_activities<I>(mut self, table: I) -> Self
    where
        I: IntoIterator<Item = (ActivityType, f64)>,
    {
        self.activities = table
            .into_iter()
            .map(|(k, v)| (k.as_str().to_string(), v))
            .collect();
        self
    }

    /// Location prior for an entity type. Types without their own table use
    /// the student table.
    pub fn locations_for(&self, entity_type: EntityType) -> &BTreeMap<String, f64> {
        static EMPTY: BTreeMap<String, f64> = BTreeMap::new();

        self.locations
            .get(&entity_type)
            .or_else(|| self.locations.get(&EntityType::Student))
            .unwrap_or(&EMPTY)
    }

    pub fn activities(&self) -> &BTreeMap<String, f64> {
        &self.activities
    }

    /// Prior probability of activity at an hour of day (0 when unlisted)
    pub fn hour_weight(&self, hour: u32) -> f64 {
        self.hours.get(&hour).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_falls_back_to_student() {
        let priors = PriorTables::campus_default();
        assert_eq!(
            priors.locations_for(EntityType::Visitor),
            priors.locations_for(EntityType::Student)
        );
        assert_ne!(
            priors.locations_for(EntityType::Staff),
            priors.locations_for(EntityType::Student)
        );
    }

    #[test]
    fn test_hour_prior_peaks_mid_morning() {
        let priors = PriorTables::campus_default();
        assert!(priors.hour_weight(10) > priors.hour_weight(9));
        assert!(priors.hour_weight(10) > priors.hour_weight(11));
        assert_eq!(priors.hour_weight(3), 0.0);
        assert!((priors.hour_weight(11) - 0.18).abs() < 1e-12);
    }

    #[test]
    fn test_empty_tables() {
        let priors = PriorTables::new();
        assert!(priors.locations_for(EntityType::Asset).is_empty());
        assert!(priors.activities().is_empty());
        assert_eq!(priors.hour_weight(10), 0.0);
    }
}
