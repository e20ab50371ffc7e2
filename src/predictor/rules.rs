//! Prediction weights & confidence thresholds
//!
//! Constants only. The blending and scoring logic lives in `engine.rs`.

// ============================================================================
// BLEND WEIGHTS
// ============================================================================

/// Weight of the entity's own history for keys the prior knows about (70%)
pub const HISTORY_WEIGHT: f64 = 0.7;

/// Weight of the static prior (30%)
pub const PRIOR_WEIGHT: f64 = 0.3;

/// Weight of history for keys the prior has never heard of
pub const UNSEEN_KEY_WEIGHT: f64 = 0.5;

// ============================================================================
// FALLBACKS
// ============================================================================

/// Used when no candidate location scores above zero
pub const FALLBACK_LOCATION: &str = "Main Library";

/// Used when no candidate activity scores above zero
pub const FALLBACK_ACTIVITY: &str = "swipe";

// ============================================================================
// CONFIDENCE
// ============================================================================

pub const BASE_CONFIDENCE: f64 = 0.5;
pub const MAX_CONFIDENCE: f64 = 0.95;

/// History volume bonuses: (more than N observations, bonus)
pub const RICH_HISTORY: (usize, f64) = (10, 0.2);
pub const SOME_HISTORY: (usize, f64) = (5, 0.1);

/// Dominant location bonuses: (frequency above, bonus)
pub const STRONG_LOCATION: (f64, f64) = (0.5, 0.2);
pub const MODERATE_LOCATION: (f64, f64) = (0.3, 0.1);

/// Dominant hour bonus: (frequency above, bonus)
pub const STRONG_HOUR: (f64, f64) = (0.4, 0.1);

// ============================================================================
// REASONING
// ============================================================================

/// Inclusive hour range treated as normal campus activity
pub const ACTIVE_HOURS: std::ops::RangeInclusive<u32> = 9..=17;

/// Window for the "recent activity" evidence line
pub const RECENT_WINDOW_HOURS: i64 = 24;
