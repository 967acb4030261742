// ABOUTME: Core types and constants for the glucose cloud follower
// ABOUTME: Foundation crate with error handling, reading models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Follower Core
//!
//! Foundation crate providing shared types and constants for the cloud
//! follower. Nothing in here performs I/O; the provider crate builds on these
//! types to talk to the remote glucose services.
//!
//! ## Modules
//!
//! - **errors**: `FollowerError` taxonomy and `ParseError` for payload decoding
//! - **models**: `Reading`, `Trend`, and the raw `RawMeasurement` shape
//! - **constants**: unit conversion factors, sampling defaults, env keys

/// Error taxonomy shared by all follower components
pub mod errors;

/// Glucose reading models and trend decoding
pub mod models;

/// Application constants organized by domain
pub mod constants;
