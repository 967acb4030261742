// ABOUTME: Canonical glucose reading and raw cloud measurement types
// ABOUTME: Reading carries value, instant, trend and source label for downstream consumers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Trend;
use crate::constants::units::MG_DL_PER_MMOL_L;

/// Measurement fields exactly as extracted from a cloud payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMeasurement {
    /// Concentration in mg/dL
    pub value_mg_dl: i64,
    /// Timestamp text in the provider's fixed format
    pub timestamp: String,
    /// Provider trend code
    pub trend_code: i64,
}

/// Normalized glucose reading accepted by a follower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Concentration in mg/dL
    pub value: u16,
    /// Instant the measurement was taken
    pub timestamp: DateTime<Utc>,
    /// Decoded trend direction
    pub trend: Trend,
    /// Trend code as reported by the provider
    pub trend_code: i64,
    /// Short tag of the originating cloud service
    pub source: String,
    /// Instant the reading was received locally
    pub received_at: DateTime<Utc>,
}

impl Reading {
    /// Concentration in mmol/L
    #[must_use]
    pub fn mmol_l(&self) -> f64 {
        f64::from(self.value) / MG_DL_PER_MMOL_L
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mg/dL ({:.1} mmol/L) {} at {} [{}]",
            self.value,
            self.mmol_l(),
            self.trend.arrow(),
            self.timestamp.to_rfc3339(),
            self.source
        )
    }
}
