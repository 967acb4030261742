// ABOUTME: Cloud glucose follower implementations and shared follower infrastructure
// ABOUTME: Follower trait, HTTP transport seam, reading normalization, LibreLinkUp follower
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Cloud follower implementations and core abstractions.
//!
//! A follower polls a remote glucose cloud on behalf of a scheduler and hands
//! back at most one new reading per cycle. Followers share the
//! [`core::CloudFollower`] trait, the [`http_client::HttpTransport`] seam and
//! the [`normalizer::ReadingNormalizer`].

// Re-export follower-core modules so provider code can use `crate::errors::*` etc.
pub use follower_core::constants;
pub use follower_core::errors;
pub use follower_core::models;

/// Follower trait, poll outcomes, credentials and status reporting
pub mod core;
/// HTTP transport abstraction and shared reqwest client
pub mod http_client;
/// Raw measurement normalization and de-duplication
pub mod normalizer;

/// `LibreLinkUp` cloud follower
#[cfg(feature = "provider-librelinkup")]
pub mod librelinkup;

pub use crate::core::{
    CloudFollower, Credentials, FollowerStatus, PollOutcome, StatusReporter,
    TracingStatusReporter,
};
pub use http_client::{
    initialize_shared_client, shared_client, HttpMethod, HttpRequest, HttpResponse,
    HttpTransport, ReqwestTransport, TransportError,
};
#[cfg(feature = "provider-librelinkup")]
pub use librelinkup::{LibreLinkUpFollower, LibreLinkUpSettings};
pub use normalizer::ReadingNormalizer;
