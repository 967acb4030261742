// ABOUTME: Converts raw cloud measurements into canonical readings
// ABOUTME: Parses provider timestamps, decodes trends and drops stale readings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Reading Normalizer
//!
//! Owns the "last accepted" timestamp. A reading is only accepted when it is
//! strictly newer than the previous accepted one; there is no tolerance for
//! clock skew. Before the first acceptance every reading is new.
//!
//! Provider timestamps are wall-clock text in the device's local zone. When
//! that text cannot be parsed the reading is still accepted, stamped with the
//! current time.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use tracing::{debug, warn};

use crate::models::{RawMeasurement, Reading, Trend};

/// Stateful raw-to-canonical reading converter
#[derive(Debug, Clone)]
pub struct ReadingNormalizer {
    source: &'static str,
    timestamp_format: &'static str,
    last_accepted: Option<DateTime<Utc>>,
}

impl ReadingNormalizer {
    /// Create a normalizer for one source
    ///
    /// `timestamp_format` is a `chrono` strftime pattern for the provider's
    /// timestamp text.
    #[must_use]
    pub const fn new(source: &'static str, timestamp_format: &'static str) -> Self {
        Self {
            source,
            timestamp_format,
            last_accepted: None,
        }
    }

    /// Forget the last accepted timestamp
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }

    /// Timestamp of the last accepted reading
    #[must_use]
    pub const fn last_accepted(&self) -> Option<DateTime<Utc>> {
        self.last_accepted
    }

    /// Normalize a measurement using the current time as the receive time
    pub fn accept(&mut self, raw: RawMeasurement) -> Option<Reading> {
        self.accept_at(raw, Utc::now())
    }

    /// Normalize a measurement received at `now`
    ///
    /// Returns `None` when the measurement is not strictly newer than the last
    /// accepted one; state is left untouched in that case.
    pub fn accept_at(&mut self, raw: RawMeasurement, now: DateTime<Utc>) -> Option<Reading> {
        let timestamp = match self.parse_timestamp(&raw.timestamp) {
            Some(parsed) => {
                if let Some(previous) = self.last_accepted {
                    if parsed <= previous {
                        debug!(
                            source = self.source,
                            previous = %previous,
                            current = %parsed,
                            "Timestamp same or older than previous, skipping"
                        );
                        return None;
                    }
                }
                parsed
            }
            None => {
                warn!(
                    source = self.source,
                    timestamp = %raw.timestamp,
                    "Failed to parse timestamp, using receive time"
                );
                now
            }
        };

        let trend = Trend::from_code(raw.trend_code);
        let value = raw.value_mg_dl.clamp(0, i64::from(u16::MAX)) as u16;
        self.last_accepted = Some(timestamp);

        Some(Reading {
            value,
            timestamp,
            trend,
            trend_code: raw.trend_code,
            source: self.source.to_owned(),
            received_at: now,
        })
    }

    /// Parse provider timestamp text as a local wall-clock time
    #[must_use]
    pub fn parse_timestamp(&self, text: &str) -> Option<DateTime<Utc>> {
        parse_local_timestamp(text, self.timestamp_format)
    }
}

/// Parse `text` with `format` and interpret it in the local time zone
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant;
/// non-existent local times (DST spring-forward) fail.
#[must_use]
pub fn parse_local_timestamp(text: &str, format: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), format).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
