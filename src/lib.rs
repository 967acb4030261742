// ABOUTME: Main library entry point for the glucose cloud follower
// ABOUTME: Wires configuration, logging and the poll scheduler around the follower crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Glucose Follower
//!
//! Follows a patient's continuous glucose monitor readings as shared through
//! the `LibreLinkUp` cloud. The follower logs in, locates the shared patient
//! connection, and fetches the latest measurement once per sensor sample.
//!
//! ## Architecture
//!
//! - **`follower-core`**: error types, reading models and constants
//! - **`follower-providers`**: the `CloudFollower` trait, HTTP transport seam,
//!   reading normalizer and the `LibreLinkUp` follower
//! - **Config**: environment-only configuration
//! - **Scheduler**: sequential poll loop aligned with the sampling cadence
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use glucose_follower::config::FollowerConfig;
//! use glucose_follower::providers::{LibreLinkUpFollower, ReqwestTransport};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = FollowerConfig::from_env()?;
//! let mut follower =
//!     LibreLinkUpFollower::new(config.librelinkup, Arc::new(ReqwestTransport::shared()));
//! # let _ = &mut follower;
//! # Ok(())
//! # }
//! ```

/// Environment configuration
pub mod config;

/// Logging setup
pub mod logging;

/// Poll scheduling
pub mod scheduler;

/// Core types re-exported from `follower-core`
pub use follower_core::{constants, errors, models};

/// Follower implementations re-exported from `follower-providers`
pub use follower_providers as providers;
