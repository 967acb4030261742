// ABOUTME: Glucose trend enumeration decoded from cloud trend codes
// ABOUTME: Unrecognized codes map to Unknown instead of failing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Short-term direction of the glucose value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Falling quickly
    Falling,
    /// Falling slowly
    FallingSlow,
    /// Stable
    Flat,
    /// Rising slowly
    RisingSlow,
    /// Rising quickly
    Rising,
    /// No usable trend information
    #[default]
    Unknown,
}

impl Trend {
    /// Decode a 1-based trend arrow code (1 = falling ... 5 = rising)
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Falling,
            2 => Self::FallingSlow,
            3 => Self::Flat,
            4 => Self::RisingSlow,
            5 => Self::Rising,
            _ => Self::Unknown,
        }
    }

    /// Arrow glyph for compact display
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Falling => "↓",
            Self::FallingSlow => "↘",
            Self::Flat => "→",
            Self::RisingSlow => "↗",
            Self::Rising => "↑",
            Self::Unknown => "?",
        }
    }

    /// Snake-case name, matching the serialized form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Falling => "falling",
            Self::FallingSlow => "falling_slow",
            Self::Flat => "flat",
            Self::RisingSlow => "rising_slow",
            Self::Rising => "rising",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
