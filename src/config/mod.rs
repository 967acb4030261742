// ABOUTME: Configuration module for the glucose follower process
// ABOUTME: Environment-only configuration loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable configuration
pub mod environment;

pub use environment::{FollowerConfig, HttpClientConfig};
