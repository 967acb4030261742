// ABOUTME: Unit tests for raw measurement normalization and de-duplication
// ABOUTME: Tests timestamp parsing, trend decoding, strict ordering and unit conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use chrono::{Duration, Utc};
use glucose_follower::models::{RawMeasurement, Trend};
use glucose_follower::providers::librelinkup::constants::TIMESTAMP_FORMAT;
use glucose_follower::providers::normalizer::parse_local_timestamp;
use glucose_follower::providers::ReadingNormalizer;
use helpers::fixtures::local_instant;

fn normalizer() -> ReadingNormalizer {
    ReadingNormalizer::new("LLU", TIMESTAMP_FORMAT)
}

fn raw(value: i64, timestamp: &str, trend: i64) -> RawMeasurement {
    RawMeasurement {
        value_mg_dl: value,
        timestamp: timestamp.to_owned(),
        trend_code: trend,
    }
}

// ============================================================================
// Timestamp parsing
// ============================================================================

#[test]
fn test_parse_morning_timestamp() {
    assert_eq!(
        parse_local_timestamp("1/2/2024 8:30:00 AM", TIMESTAMP_FORMAT),
        Some(local_instant(2024, 1, 2, 8, 30, 0))
    );
}

#[test]
fn test_parse_afternoon_and_midnight_timestamps() {
    assert_eq!(
        parse_local_timestamp("12/31/2023 11:59:59 PM", TIMESTAMP_FORMAT),
        Some(local_instant(2023, 12, 31, 23, 59, 59))
    );
    assert_eq!(
        parse_local_timestamp("3/15/2024 12:05:00 AM", TIMESTAMP_FORMAT),
        Some(local_instant(2024, 3, 15, 0, 5, 0))
    );
    assert_eq!(
        parse_local_timestamp("03/15/2024 12:05:00 PM", TIMESTAMP_FORMAT),
        Some(local_instant(2024, 3, 15, 12, 5, 0))
    );
}

#[test]
fn test_unparsable_timestamps() {
    for text in ["", "2024-01-02T08:30:00Z", "13/40/2024 8:30:00 AM", "1/2/2024 8:30 AM"] {
        assert_eq!(
            parse_local_timestamp(text, TIMESTAMP_FORMAT),
            None,
            "{text:?} should not parse"
        );
    }
}

// ============================================================================
// Acceptance and de-duplication
// ============================================================================

#[test]
fn test_first_reading_is_always_accepted() {
    let mut normalizer = normalizer();
    let now = Utc::now();

    let reading = normalizer
        .accept_at(raw(120, "1/2/2024 8:30:00 AM", 3), now)
        .unwrap();

    assert_eq!(reading.value, 120);
    assert_eq!(reading.trend, Trend::Flat);
    assert_eq!(reading.timestamp, local_instant(2024, 1, 2, 8, 30, 0));
    assert_eq!(reading.received_at, now);
    assert_eq!(reading.source, "LLU");
    assert_eq!(normalizer.last_accepted(), Some(reading.timestamp));
}

#[test]
fn test_equal_timestamp_is_rejected() {
    let mut normalizer = normalizer();
    let now = Utc::now();

    assert!(normalizer
        .accept_at(raw(120, "1/2/2024 8:30:00 AM", 3), now)
        .is_some());
    assert!(normalizer
        .accept_at(raw(150, "1/2/2024 8:30:00 AM", 5), now)
        .is_none());
}

#[test]
fn test_older_timestamp_is_rejected_without_state_change() {
    let mut normalizer = normalizer();
    let now = Utc::now();

    normalizer
        .accept_at(raw(120, "1/2/2024 8:30:00 AM", 3), now)
        .unwrap();
    assert!(normalizer
        .accept_at(raw(118, "1/2/2024 8:29:00 AM", 3), now)
        .is_none());

    assert_eq!(
        normalizer.last_accepted(),
        Some(local_instant(2024, 1, 2, 8, 30, 0))
    );
}

#[test]
fn test_one_second_newer_is_accepted() {
    let mut normalizer = normalizer();
    let now = Utc::now();

    normalizer
        .accept_at(raw(120, "1/2/2024 8:30:00 AM", 3), now)
        .unwrap();
    let reading = normalizer
        .accept_at(raw(121, "1/2/2024 8:30:01 AM", 3), now)
        .unwrap();

    assert_eq!(reading.value, 121);
    assert_eq!(normalizer.last_accepted(), Some(reading.timestamp));
}

#[test]
fn test_unparsable_timestamp_falls_back_to_now() {
    let mut normalizer = normalizer();
    let now = Utc::now();

    normalizer
        .accept_at(raw(120, "1/2/2024 8:30:00 AM", 3), now)
        .unwrap();
    let reading = normalizer.accept_at(raw(99, "garbage", 2), now).unwrap();

    assert_eq!(reading.timestamp, now);
    assert_eq!(reading.trend, Trend::FallingSlow);
    assert_eq!(normalizer.last_accepted(), Some(now));
}

#[test]
fn test_reset_forgets_last_accepted() {
    let mut normalizer = normalizer();
    let now = Utc::now();

    normalizer
        .accept_at(raw(120, "1/2/2024 8:30:00 AM", 3), now)
        .unwrap();
    normalizer.reset();

    assert_eq!(normalizer.last_accepted(), None);
    assert!(normalizer
        .accept_at(raw(120, "1/2/2024 8:30:00 AM", 3), now + Duration::seconds(5))
        .is_some());
}

#[test]
fn test_value_is_clamped_to_u16() {
    let mut normalizer = normalizer();
    let reading = normalizer
        .accept_at(raw(100_000, "1/2/2024 8:30:00 AM", 3), Utc::now())
        .unwrap();
    assert_eq!(reading.value, u16::MAX);
}

// ============================================================================
// Trend decoding and units
// ============================================================================

#[test]
fn test_trend_code_table() {
    assert_eq!(Trend::from_code(1), Trend::Falling);
    assert_eq!(Trend::from_code(2), Trend::FallingSlow);
    assert_eq!(Trend::from_code(3), Trend::Flat);
    assert_eq!(Trend::from_code(4), Trend::RisingSlow);
    assert_eq!(Trend::from_code(5), Trend::Rising);
    for code in [0, 6, 7, -1, 99] {
        assert_eq!(Trend::from_code(code), Trend::Unknown, "code {code}");
    }
}

#[test]
fn test_raw_trend_code_is_preserved() {
    let mut normalizer = normalizer();
    let reading = normalizer
        .accept_at(raw(90, "1/2/2024 8:30:00 AM", 7), Utc::now())
        .unwrap();

    assert_eq!(reading.trend, Trend::Unknown);
    assert_eq!(reading.trend_code, 7);
}

#[test]
fn test_mmol_conversion() {
    let mut normalizer = normalizer();
    let reading = normalizer
        .accept_at(raw(180, "1/2/2024 8:30:00 AM", 3), Utc::now())
        .unwrap();

    assert!((reading.mmol_l() - 9.99).abs() < 0.01);
    assert!(reading.to_string().starts_with("180 mg/dL (10.0 mmol/L)"));
}

#[test]
fn test_reading_serializes_trend_in_snake_case() {
    let mut normalizer = normalizer();
    let reading = normalizer
        .accept_at(raw(150, "1/2/2024 8:30:00 AM", 4), Utc::now())
        .unwrap();

    let json = serde_json::to_value(&reading).unwrap();
    assert_eq!(json["trend"], "rising_slow");
    assert_eq!(json["value"], 150);
}
