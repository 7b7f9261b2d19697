//! Traffic model: per-route congestion levels and the delivery-time and
//! fuel effects they carry.
//!
//! Traffic is a property of a route, not of the time of day. The level scales
//! the route's base delivery time and, for heavy traffic, adds a per-kilometer
//! fuel surcharge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Traffic level
// ---------------------------------------------------------------------------

/// Congestion level of a route.
///
/// Deserializing from text is lenient: any label other than `Medium` or
/// `High` becomes [`TrafficLevel::Low`]. Use [`str::parse`] when an unknown
/// label should be rejected instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum TrafficLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl TrafficLevel {
    /// All levels, in the order they appear in reports.
    pub const ALL: [TrafficLevel; 3] = [TrafficLevel::Low, TrafficLevel::Medium, TrafficLevel::High];

    /// Parse a label, treating anything other than exactly `Medium` or
    /// `High` as `Low`. No trimming or case folding.
    pub fn from_label_lenient(label: &str) -> Self {
        match label {
            "High" => TrafficLevel::High,
            "Medium" => TrafficLevel::Medium,
            "Low" => TrafficLevel::Low,
            other => {
                tracing::warn!(label = other, "unrecognized traffic level, treating as Low");
                TrafficLevel::Low
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrafficLevel::Low => "Low",
            TrafficLevel::Medium => "Medium",
            TrafficLevel::High => "High",
        }
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A traffic label that is not one of `Low`, `Medium`, `High`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown traffic level `{0}` (expected Low, Medium or High)")]
pub struct UnknownTrafficLevel(pub String);

impl FromStr for TrafficLevel {
    type Err = UnknownTrafficLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Low" => Ok(TrafficLevel::Low),
            "Medium" => Ok(TrafficLevel::Medium),
            "High" => Ok(TrafficLevel::High),
            other => Err(UnknownTrafficLevel(other.to_string())),
        }
    }
}

impl From<String> for TrafficLevel {
    fn from(label: String) -> Self {
        TrafficLevel::from_label_lenient(&label)
    }
}

impl From<&str> for TrafficLevel {
    fn from(label: &str) -> Self {
        TrafficLevel::from_label_lenient(label)
    }
}

// ---------------------------------------------------------------------------
// Time and fuel effects
// ---------------------------------------------------------------------------

/// Fractional increase of delivery time caused by traffic.
///
/// - `Low`: 0.0 (no slowdown)
/// - `Medium`: 0.10 (+10%)
/// - `High`: 0.25 (+25%)
pub fn time_multiplier(level: TrafficLevel) -> f64 {
    match level {
        TrafficLevel::High => 0.25,
        TrafficLevel::Medium => 0.10,
        TrafficLevel::Low => 0.0,
    }
}

/// Per-kilometer fuel surcharge for a traffic level. Only heavy traffic pays it.
pub fn fuel_surcharge_per_km(level: TrafficLevel, high_traffic_surcharge: f64) -> f64 {
    match level {
        TrafficLevel::High => high_traffic_surcharge,
        TrafficLevel::Medium | TrafficLevel::Low => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
