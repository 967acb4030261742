// ABOUTME: Environment configuration for the glucose follower process
// ABOUTME: Reads follower enablement, credentials, latency and HTTP timeouts from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Configuration is environment only. Blank credentials are accepted here and
//! rejected by the follower on its first cycle, so a misconfigured process
//! still starts and reports the problem through the normal outcome path.

use anyhow::{Context, Result};
use follower_core::constants::env_config::{
    LLU_ENABLED, LLU_HTTP_CONNECT_TIMEOUT_SECS, LLU_HTTP_TIMEOUT_SECS, LLU_PASSWORD,
    LLU_REQUEST_LATENCY_MS, LLU_USERNAME,
};
use follower_core::constants::http::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use follower_core::constants::sampling::DEFAULT_SAMPLE_LATENCY_MS;
use follower_providers::LibreLinkUpSettings;
use std::env;
use zeroize::Zeroizing;

/// Timeouts for the shared HTTP client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct FollowerConfig {
    /// `LibreLinkUp` follower settings
    pub librelinkup: LibreLinkUpSettings,
    /// Shared HTTP client timeouts
    pub http_client: HttpClientConfig,
}

impl FollowerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a flag or number is not parseable.
    pub fn from_env() -> Result<Self> {
        let enabled = parse_flag(&env_var_or(LLU_ENABLED, "false"))
            .with_context(|| format!("Invalid {LLU_ENABLED} value"))?;
        let username = env_var_or(LLU_USERNAME, "");
        let password = Zeroizing::new(env_var_or(LLU_PASSWORD, ""));
        let request_latency_ms: u64 =
            env_var_or(LLU_REQUEST_LATENCY_MS, &DEFAULT_SAMPLE_LATENCY_MS.to_string())
                .trim()
                .parse()
                .with_context(|| format!("Invalid {LLU_REQUEST_LATENCY_MS} value"))?;

        let http_client = HttpClientConfig {
            timeout_secs: env_var_or(LLU_HTTP_TIMEOUT_SECS, &DEFAULT_TIMEOUT_SECS.to_string())
                .trim()
                .parse()
                .with_context(|| format!("Invalid {LLU_HTTP_TIMEOUT_SECS} value"))?,
            connect_timeout_secs: env_var_or(
                LLU_HTTP_CONNECT_TIMEOUT_SECS,
                &DEFAULT_CONNECT_TIMEOUT_SECS.to_string(),
            )
            .trim()
            .parse()
            .with_context(|| format!("Invalid {LLU_HTTP_CONNECT_TIMEOUT_SECS} value"))?,
        };

        Ok(Self {
            librelinkup: LibreLinkUpSettings::new(&username, &password)
                .with_enabled(enabled)
                .with_request_latency_ms(request_latency_ms),
            http_client,
        })
    }

    /// One-line summary safe for logging
    #[must_use]
    pub fn summary(&self) -> String {
        let llu = &self.librelinkup;
        format!(
            "LibreLinkUp: enabled={}, user={}, latency={}ms; HTTP: timeout={}s, connect_timeout={}s",
            llu.enabled,
            if llu.credentials.username().is_empty() {
                "<unset>"
            } else {
                llu.credentials.username()
            },
            llu.request_latency_ms,
            self.http_client.timeout_secs,
            self.http_client.connect_timeout_secs,
        )
    }
}

/// Parse an enablement flag (`true/1/yes/on`, `false/0/no/off`)
///
/// # Errors
///
/// Returns an error for any other value.
pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow::anyhow!("expected a boolean flag, got '{other}'")),
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
