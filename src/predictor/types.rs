//! Predictor value objects

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of campus entity being tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Student,
    Staff,
    Visitor,
    Asset,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "staff",
            Self::Visitor => "visitor",
            Self::Asset => "asset",
        }
    }

    /// Map a profile role onto an entity type. Unknown or missing roles are
    /// treated as students.
    pub fn from_role(role: Option<&str>) -> Self {
        match role.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
            Some("staff") => Self::Staff,
            Some("visitor") => Self::Visitor,
            Some("asset") => Self::Asset,
            _ => Self::Student,
        }
    }
}

/// Lenient: unrecognized type names fall back to student, same as roles
impl<'de> Deserialize<'de> for EntityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_role(Some(&raw)))
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observation kinds; `Predicted` marks synthesized observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Swipe,
    Wifi,
    Booking,
    Cctv,
    Helpdesk,
    Predicted,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swipe => "swipe",
            Self::Wifi => "wifi",
            Self::Booking => "booking",
            Self::Cctv => "cctv",
            Self::Helpdesk => "helpdesk",
            Self::Predicted => "predicted",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One real or predicted sighting of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityObservation {
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub activity_type: ActivityType,
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

impl ActivityObservation {
    pub fn new(timestamp: DateTime<Utc>, location: impl Into<String>, activity_type: ActivityType) -> Self {
        Self {
            timestamp,
            location: location.into(),
            activity_type,
            card_id: None,
            ap_id: None,
            device_hash: None,
            room_id: None,
            book_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionInput {
    pub entity_id: String,
    pub entity_type: EntityType,
    #[serde(default = "Utc::now")]
    pub current_time: DateTime<Utc>,
    #[serde(default)]
    pub historical_activities: Vec<ActivityObservation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub predicted_location: String,
    pub predicted_activity: String,
    /// Always within `[0.5, 0.95]`
    pub confidence: f64,
    pub reasoning: String,
    pub evidence: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(EntityType::from_role(Some("Staff")), EntityType::Staff);
        assert_eq!(EntityType::from_role(Some("asset")), EntityType::Asset);
        assert_eq!(EntityType::from_role(Some("visitor")), EntityType::Visitor);
        assert_eq!(EntityType::from_role(Some("alumni")), EntityType::Student);
        assert_eq!(EntityType::from_role(None), EntityType::Student);
    }

    #[test]
    fn test_entity_type_wire_format() {
        assert_eq!(serde_json::from_str::<EntityType>(r#""staff""#).unwrap(), EntityType::Staff);
        assert_eq!(serde_json::from_str::<EntityType>(r#""Asset""#).unwrap(), EntityType::Asset);
        assert_eq!(serde_json::from_str::<EntityType>(r#""alumni""#).unwrap(), EntityType::Student);
        assert_eq!(serde_json::to_string(&EntityType::Visitor).unwrap(), r#""visitor""#);
    }

    #[test]
    fn test_observation_wire_format() {
        let json = r#"{"timestamp":"2024-01-02T10:00:00Z","location":"Cafeteria","activity_type":"wifi","ap_id":"AP-7"}"#;
        let obs: ActivityObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.activity_type, ActivityType::Wifi);
        assert_eq!(obs.ap_id.as_deref(), Some("AP-7"));
        assert_eq!(obs.card_id, None);
    }
}
