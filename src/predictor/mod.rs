//! Activity prediction
//!
//! ```text
//! history ──► frequency tables ──┐
//!                                ├─► 70/30 blend ─► best location / activity
//! priors (per entity type) ──────┘          │
//!                                           └─► confidence + reasoning + evidence
//! ```

pub mod engine;
pub mod priors;
pub mod rules;
pub mod types;


pub use engine::CampusPredictor;
pub use priors::PriorTables;
pub use types::{ActivityObservation, ActivityType, EntityType, PredictionInput, PredictionOutput};
