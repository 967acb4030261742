// ABOUTME: Poll scheduler driving a cloud follower on the sensor sampling cadence
// ABOUTME: Forwards new readings over a channel and backs off when rate limited
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Follower Scheduler
//!
//! Owns one follower and runs its cycles strictly one after another. The
//! next poll is aligned with the next expected sample: the cloud publishes a
//! sample every `sample_interval_ms`, and it becomes fetchable roughly
//! `sample_to_request_delay_ms` later.

use chrono::{DateTime, Utc};
use follower_core::constants::units::MS_PER_SECOND;
use follower_core::models::Reading;
use follower_providers::{CloudFollower, PollOutcome};
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Milliseconds until the next expected sample is fetchable
///
/// With no previous sample the wait is one full period plus latency. A
/// previous sample in the future counts as "just received".
#[must_use]
pub fn next_poll_delay_ms(
    last_sample: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    period_ms: u64,
    latency_ms: u64,
) -> u64 {
    let Some(last) = last_sample else {
        return period_ms.saturating_add(latency_ms);
    };
    if period_ms == 0 {
        return latency_ms;
    }

    let elapsed_ms = u64::try_from((now - last).num_milliseconds()).unwrap_or(0);
    let periods = elapsed_ms.saturating_sub(latency_ms) / period_ms + 1;
    periods
        .saturating_mul(period_ms)
        .saturating_add(latency_ms)
        .saturating_sub(elapsed_ms)
}

/// [`next_poll_delay_ms`] as a `Duration`
#[must_use]
pub fn next_poll_delay(
    last_sample: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    period_ms: u64,
    latency_ms: u64,
) -> Duration {
    Duration::from_millis(next_poll_delay_ms(last_sample, now, period_ms, latency_ms))
}

/// Run a single cycle, or `None` when the follower is disabled
pub async fn poll_once<F: CloudFollower>(follower: &mut F) -> Option<PollOutcome> {
    if !follower.is_enabled() {
        warn!(follower = follower.name(), "Follower disabled, not polling");
        return None;
    }
    Some(follower.fetch_latest().await)
}

/// Sequential poll loop for one follower
pub struct FollowerScheduler<F> {
    follower: F,
    readings: mpsc::Sender<Reading>,
}

impl<F: CloudFollower> FollowerScheduler<F> {
    /// Create a scheduler forwarding new readings to `readings`
    #[must_use]
    pub const fn new(follower: F, readings: mpsc::Sender<Reading>) -> Self {
        Self { follower, readings }
    }

    /// The scheduled follower
    #[must_use]
    pub const fn follower(&self) -> &F {
        &self.follower
    }

    /// Run one cycle and forward its reading, if any
    pub async fn run_once(&mut self) -> PollOutcome {
        let outcome = self.follower.fetch_latest().await;
        if let Some(reading) = outcome.reading() {
            if self.readings.send(reading.clone()).await.is_err() {
                warn!(
                    follower = self.follower.name(),
                    "Reading receiver dropped, reading discarded"
                );
            }
        }
        outcome
    }

    /// Wait before the cycle following `outcome`
    ///
    /// A rate-limited outcome waits at least the server's retry delay.
    #[must_use]
    pub fn delay_after(&self, outcome: &PollOutcome, now: DateTime<Utc>) -> Duration {
        let mut delay_ms = next_poll_delay_ms(
            self.follower.last_sample_time(),
            now,
            self.follower.sample_interval_ms(),
            self.follower.sample_to_request_delay_ms(),
        );
        if let PollOutcome::RateLimited { retry_after_secs } = outcome {
            delay_ms = delay_ms.max(retry_after_secs.saturating_mul(MS_PER_SECOND));
        }
        Duration::from_millis(delay_ms)
    }

    /// Poll until `shutdown` resolves or the reading receiver is dropped
    ///
    /// A disabled follower is never polled. The follower is handed back so
    /// callers can inspect its final state.
    pub async fn run_until<S>(mut self, shutdown: S) -> F
    where
        S: Future<Output = ()>,
    {
        let name = self.follower.name();
        if !self.follower.is_enabled() {
            info!(follower = name, "Follower disabled, not polling");
            return self.follower;
        }

        self.follower.init_last_sample_time();
        info!(follower = name, "Follower scheduler started");
        tokio::pin!(shutdown);

        loop {
            let outcome = self.run_once().await;
            if self.readings.is_closed() {
                info!(follower = name, "Reading receiver closed, stopping");
                break;
            }

            let delay = self.delay_after(&outcome, Utc::now());
            debug!(
                follower = name,
                outcome = %outcome,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Next poll scheduled"
            );

            tokio::select! {
                () = &mut shutdown => {
                    info!(follower = name, "Shutdown requested, stopping scheduler");
                    break;
                }
                () = sleep(delay) => {}
            }
        }

        self.follower
    }
}
