// ABOUTME: LibreLinkUp follower running the authenticate, connect, fetch poll cycle
// ABOUTME: Classifies failures into poll outcomes and resets the session when required
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::client::LibreLinkUpClient;
use super::constants::{PROVIDER_NAME, SRC_LABEL, SRC_LABEL_SHORT, TIMESTAMP_FORMAT};
use super::parser;
use super::session::Session;
use crate::constants::sampling::{DEFAULT_SAMPLE_LATENCY_MS, DEFAULT_SAMPLE_PERIOD_MS};
use crate::core::{
    CloudFollower, Credentials, FollowerStatus, PollOutcome, StatusReporter,
    TracingStatusReporter,
};
use crate::errors::{FailureKind, FollowerError, FollowerResult};
use crate::http_client::HttpTransport;
use crate::models::Reading;
use crate::normalizer::ReadingNormalizer;

/// User settings for the `LibreLinkUp` follower
#[derive(Debug, Clone)]
pub struct LibreLinkUpSettings {
    /// Whether the follower should be scheduled
    pub enabled: bool,
    /// Account credentials
    pub credentials: Credentials,
    /// Delay after an expected sample before polling, in milliseconds
    pub request_latency_ms: u64,
}

impl LibreLinkUpSettings {
    /// Enabled settings with the default request latency
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            enabled: true,
            credentials: Credentials::new(username, password),
            request_latency_ms: DEFAULT_SAMPLE_LATENCY_MS,
        }
    }

    /// Override the request latency
    #[must_use]
    pub const fn with_request_latency_ms(mut self, latency_ms: u64) -> Self {
        self.request_latency_ms = latency_ms;
        self
    }

    /// Enable or disable the follower
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Steps of one poll cycle; completion and failure leave the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleState {
    NeedAuth,
    NeedConnection,
    Fetching,
}

/// `LibreLinkUp` cloud follower
///
/// Owns the session and the normalizer. Each [`CloudFollower::fetch_latest`]
/// call resumes from whatever the session already holds: a held token skips
/// login, a held connection id skips the connection lookup.
pub struct LibreLinkUpFollower {
    settings: LibreLinkUpSettings,
    client: LibreLinkUpClient,
    session: Session,
    normalizer: ReadingNormalizer,
    reporter: Arc<dyn StatusReporter>,
}

impl LibreLinkUpFollower {
    /// Create a follower that reports status to the log
    #[must_use]
    pub fn new(settings: LibreLinkUpSettings, transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_reporter(settings, transport, Arc::new(TracingStatusReporter))
    }

    /// Create a follower with a custom status reporter
    #[must_use]
    pub fn with_reporter(
        settings: LibreLinkUpSettings,
        transport: Arc<dyn HttpTransport>,
        reporter: Arc<dyn StatusReporter>,
    ) -> Self {
        Self {
            settings,
            client: LibreLinkUpClient::new(transport),
            session: Session::new(),
            normalizer: ReadingNormalizer::new(SRC_LABEL_SHORT, TIMESTAMP_FORMAT),
            reporter,
        }
    }

    /// Current session state
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Follower settings
    #[must_use]
    pub const fn settings(&self) -> &LibreLinkUpSettings {
        &self.settings
    }

    async fn run_cycle(&mut self) -> FollowerResult<Option<Reading>> {
        let mut state = CycleState::NeedAuth;
        loop {
            debug!(provider = PROVIDER_NAME, state = ?state, "Poll cycle step");
            state = match state {
                CycleState::NeedAuth => {
                    if !self.session.is_authenticated() {
                        self.reporter.report(FollowerStatus::AuthRequest(SRC_LABEL));
                        self.session
                            .ensure_authenticated(&self.client, &self.settings.credentials)
                            .await?;
                        self.reporter.report(FollowerStatus::Ok);
                    }
                    CycleState::NeedConnection
                }
                CycleState::NeedConnection => {
                    if !self.session.has_connection() {
                        self.reporter.report(FollowerStatus::SessionRequest(SRC_LABEL));
                        self.session.ensure_connection(&self.client).await?;
                        self.reporter.report(FollowerStatus::Ok);
                    }
                    CycleState::Fetching
                }
                CycleState::Fetching => return self.fetch().await,
            };
        }
    }

    async fn fetch(&mut self) -> FollowerResult<Option<Reading>> {
        self.reporter.report(FollowerStatus::DataRequest(SRC_LABEL));
        let (auth, connection_id) =
            self.session
                .active()
                .ok_or_else(|| FollowerError::Communication {
                    provider: PROVIDER_NAME,
                    api_call: "graph",
                    status: None,
                    message: "no active session".to_owned(),
                })?;
        let body = self
            .client
            .graph(self.session.base_url(), auth, connection_id)
            .await?;
        let raw = parser::parse_measurement(&body).map_err(|source| FollowerError::Parse {
            provider: PROVIDER_NAME,
            api_call: "graph",
            source,
        })?;
        self.reporter.report(FollowerStatus::Ok);

        Ok(self.normalizer.accept(raw))
    }

    fn fail(&mut self, err: FollowerError) -> PollOutcome {
        if let Some(retry_after_secs) = err.retry_after_secs() {
            warn!(
                provider = PROVIDER_NAME,
                retry_after_secs, "Rate limited, keeping session"
            );
            self.reporter.report(FollowerStatus::Error(err.to_string()));
            return PollOutcome::RateLimited { retry_after_secs };
        }

        match err.kind() {
            FailureKind::Parse | FailureKind::NotPaired | FailureKind::RedirectUnresolved => {
                warn!(
                    provider = PROVIDER_NAME,
                    error.kind = %err.kind(),
                    error = %err,
                    "Poll cycle failed"
                );
            }
            _ => {
                error!(
                    provider = PROVIDER_NAME,
                    error.kind = %err.kind(),
                    error = %err,
                    "Poll cycle failed"
                );
            }
        }
        self.session.invalidate();
        self.reporter.report(FollowerStatus::Failed);
        PollOutcome::RecoverableFailure(err)
    }
}

#[async_trait]
impl CloudFollower for LibreLinkUpFollower {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    fn init_last_sample_time(&mut self) {
        self.normalizer.reset();
    }

    fn last_sample_time(&self) -> Option<DateTime<Utc>> {
        self.normalizer.last_accepted()
    }

    fn sample_interval_ms(&self) -> u64 {
        DEFAULT_SAMPLE_PERIOD_MS
    }

    fn sample_to_request_delay_ms(&self) -> u64 {
        self.settings.request_latency_ms
    }

    #[instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn fetch_latest(&mut self) -> PollOutcome {
        if let Err(err) = self.settings.credentials.validate(PROVIDER_NAME) {
            error!(provider = PROVIDER_NAME, error = %err, "Follower is misconfigured");
            self.reporter.report(FollowerStatus::Error(err.to_string()));
            return PollOutcome::FatalFailure(err);
        }

        match self.run_cycle().await {
            Ok(Some(reading)) => {
                info!(
                    provider = PROVIDER_NAME,
                    value = reading.value,
                    trend = %reading.trend,
                    timestamp = %reading.timestamp,
                    "New reading"
                );
                PollOutcome::NewReading(reading)
            }
            Ok(None) => PollOutcome::NoNewData,
            Err(err) => self.fail(err),
        }
    }
}
