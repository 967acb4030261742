// ABOUTME: Core data models for followed glucose readings
// ABOUTME: Re-exports Reading, Trend and RawMeasurement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `RawMeasurement`: values exactly as the cloud reported them
//! - `Reading`: canonical, de-duplicated reading handed downstream
//! - `Trend`: short-term rate-of-change classification

mod reading;
mod trend;

pub use reading::{RawMeasurement, Reading};
pub use trend::Trend;
