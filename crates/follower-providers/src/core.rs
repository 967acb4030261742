// ABOUTME: Core follower trait and shared request/response types
// ABOUTME: Defines CloudFollower, PollOutcome, Credentials and status reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Follower Architecture
//!
//! Every cloud follower implements [`CloudFollower`]. The scheduler owns the
//! follower and drives it with `&mut self`; cycles on one follower never
//! overlap and session state is not locked.
//!
//! A cycle never returns an `Err`. All failures are folded into a
//! [`PollOutcome`]; [`PollOutcome::RateLimited`] asks the scheduler to back
//! off.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::errors::{FollowerError, FollowerResult};
use crate::models::Reading;

/// Result of one poll cycle
#[derive(Debug)]
pub enum PollOutcome {
    /// A reading strictly newer than the previous one
    NewReading(Reading),
    /// Fetch succeeded but carried no newer reading
    NoNewData,
    /// Service returned HTTP 429; the session was kept
    RateLimited {
        /// Minimum delay before the next cycle
        retry_after_secs: u64,
    },
    /// Cycle failed and the session was reset
    RecoverableFailure(FollowerError),
    /// Cycle could not start (configuration problem)
    FatalFailure(FollowerError),
}

impl PollOutcome {
    /// Reading carried by this outcome, if any
    #[must_use]
    pub const fn reading(&self) -> Option<&Reading> {
        match self {
            Self::NewReading(reading) => Some(reading),
            _ => None,
        }
    }

    /// Consume the outcome and return its reading, if any
    #[must_use]
    pub fn into_reading(self) -> Option<Reading> {
        match self {
            Self::NewReading(reading) => Some(reading),
            _ => None,
        }
    }

    /// Whether the cycle completed without failure
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::NewReading(_) | Self::NoNewData)
    }

    /// Error carried by a failed outcome
    #[must_use]
    pub const fn error(&self) -> Option<&FollowerError> {
        match self {
            Self::RecoverableFailure(err) | Self::FatalFailure(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewReading(reading) => write!(f, "new reading: {reading}"),
            Self::NoNewData => f.write_str("no new data"),
            Self::RateLimited { retry_after_secs } => {
                write!(f, "rate limited, retry after {retry_after_secs}s")
            }
            Self::RecoverableFailure(err) => write!(f, "failed: {err}"),
            Self::FatalFailure(err) => write!(f, "misconfigured: {err}"),
        }
    }
}

/// Account credentials for a cloud follower
///
/// Values are trimmed on construction; the password is zeroed on drop.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Create credentials from user supplied values
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_owned(),
            password: Zeroizing::new(password.trim().to_owned()),
        }
    }

    /// Account user name (e-mail)
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Account password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Reject blank credentials before any network call
    ///
    /// # Errors
    ///
    /// Returns `FollowerError::Configuration` when the user name or password is empty.
    pub fn validate(&self, provider: &'static str) -> FollowerResult<()> {
        if self.username.is_empty() {
            return Err(FollowerError::Configuration {
                provider,
                reason: "invalid username",
            });
        }
        if self.password.is_empty() {
            return Err(FollowerError::Configuration {
                provider,
                reason: "invalid password",
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User-facing status signal emitted during a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowerStatus {
    /// Authentication request is being sent
    AuthRequest(&'static str),
    /// Connection (session) lookup is being sent
    SessionRequest(&'static str),
    /// Data request is being sent
    DataRequest(&'static str),
    /// Last step succeeded
    Ok,
    /// Last step failed without further detail
    Failed,
    /// Last step failed with a message
    Error(String),
}

impl fmt::Display for FollowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthRequest(label) => write!(f, "{label}: authenticating..."),
            Self::SessionRequest(label) => write!(f, "{label}: requesting session..."),
            Self::DataRequest(label) => write!(f, "{label}: requesting data..."),
            Self::Ok => f.write_str("ok"),
            Self::Failed => f.write_str("failed"),
            Self::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

/// Receiver of user-facing status signals (toast, notification, log)
pub trait StatusReporter: Send + Sync {
    /// Publish a status update
    fn report(&self, status: FollowerStatus);
}

/// Status reporter that writes status updates to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatusReporter;

impl StatusReporter for TracingStatusReporter {
    fn report(&self, status: FollowerStatus) {
        match status {
            FollowerStatus::Failed | FollowerStatus::Error(_) => {
                warn!(status = %status, "Follower status");
            }
            _ => info!(status = %status, "Follower status"),
        }
    }
}

/// Contract shared by every cloud follower
#[async_trait]
pub trait CloudFollower: Send {
    /// Follower name for logging
    fn name(&self) -> &'static str;

    /// Whether the user enabled this follower
    fn is_enabled(&self) -> bool;

    /// Forget the last accepted sample so the next reading is always accepted
    fn init_last_sample_time(&mut self);

    /// Timestamp of the last accepted reading
    fn last_sample_time(&self) -> Option<DateTime<Utc>>;

    /// Period between samples published by the cloud
    fn sample_interval_ms(&self) -> u64;

    /// Delay after an expected sample before requesting it
    fn sample_to_request_delay_ms(&self) -> u64;

    /// Run one poll cycle
    async fn fetch_latest(&mut self) -> PollOutcome;
}
