// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Unit conversion, sampling defaults and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Unit conversion constants
pub mod units;

/// Sampling cadence defaults
pub mod sampling {
    /// Interval between sensor samples published to the cloud
    pub const DEFAULT_SAMPLE_PERIOD_MS: u64 = 60_000;

    /// Delay after an expected sample before polling for it
    pub const DEFAULT_SAMPLE_LATENCY_MS: u64 = 15;

    /// Fallback back-off when a 429 carries no usable `Retry-After`
    pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;
}

/// HTTP transport defaults
pub mod http {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Enables the `LibreLinkUp` follower
    pub const LLU_ENABLED: &str = "LLU_ENABLED";
    /// `LibreLinkUp` account e-mail
    pub const LLU_USERNAME: &str = "LLU_USERNAME";
    /// `LibreLinkUp` account password
    pub const LLU_PASSWORD: &str = "LLU_PASSWORD";
    /// Latency override in milliseconds
    pub const LLU_REQUEST_LATENCY_MS: &str = "LLU_REQUEST_LATENCY_MS";
    /// Request timeout in seconds
    pub const LLU_HTTP_TIMEOUT_SECS: &str = "LLU_HTTP_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const LLU_HTTP_CONNECT_TIMEOUT_SECS: &str = "LLU_HTTP_CONNECT_TIMEOUT_SECS";
}

/// Service names used in structured logs
pub mod service_names {
    /// Binary / service name
    pub const GLUCOSE_FOLLOWER: &str = "glucose-follower";
}
