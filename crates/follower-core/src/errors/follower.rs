// ABOUTME: FollowerError enum covering every classified poll cycle failure
// ABOUTME: Provides failure kinds for logging and outcome classification

use std::fmt;

use super::ParseError;

/// Result alias for follower operations
pub type FollowerResult<T> = Result<T, FollowerError>;

/// Coarse classification of a [`FollowerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Missing or blank credentials
    Configuration,
    /// Unexpected payload shape from the cloud service
    Parse,
    /// Redirect instruction that could not be followed
    RedirectUnresolved,
    /// HTTP 429 from the cloud service
    RateLimited,
    /// Non-success HTTP status or transport failure
    Communication,
    /// Account has no connected patient
    NotPaired,
}

impl FailureKind {
    /// Stable label used in structured log fields
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Parse => "parse",
            Self::RedirectUnresolved => "redirect_unresolved",
            Self::RateLimited => "rate_limited",
            Self::Communication => "communication",
            Self::NotPaired => "not_paired",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while running a follower poll cycle
#[derive(Debug, thiserror::Error)]
pub enum FollowerError {
    /// Credentials or other required settings are missing
    #[error("{provider} configuration error: {reason}")]
    Configuration {
        /// Follower that reported the error
        provider: &'static str,
        /// What is missing or invalid
        reason: &'static str,
    },

    /// Response body could not be decoded
    #[error("{provider} returned an unexpected {api_call} response")]
    Parse {
        /// Follower that reported the error
        provider: &'static str,
        /// API call whose response failed to parse
        api_call: &'static str,
        /// Underlying decoding failure
        #[source]
        source: ParseError,
    },

    /// Regional redirect could not be resolved
    #[error("{provider} redirect to region '{region}' unresolved: {reason}")]
    RedirectUnresolved {
        /// Follower that reported the error
        provider: &'static str,
        /// Region code supplied by the server
        region: String,
        /// Why the redirect was not followed
        reason: &'static str,
    },

    /// Service asked the client to slow down
    #[error("{provider} rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited {
        /// Follower that reported the error
        provider: &'static str,
        /// Minimum delay before the next attempt
        retry_after_secs: u64,
    },

    /// Non-success HTTP status or transport-level failure
    #[error("{provider} {api_call} failed: {message}")]
    Communication {
        /// Follower that reported the error
        provider: &'static str,
        /// API call that failed
        api_call: &'static str,
        /// HTTP status, `None` when the request never completed
        status: Option<u16>,
        /// Human readable detail
        message: String,
    },

    /// Account is valid but has no connection to follow yet
    #[error("{provider} account has no connected patient")]
    NotPaired {
        /// Follower that reported the error
        provider: &'static str,
    },
}

impl FollowerError {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Configuration { .. } => FailureKind::Configuration,
            Self::Parse { .. } => FailureKind::Parse,
            Self::RedirectUnresolved { .. } => FailureKind::RedirectUnresolved,
            Self::RateLimited { .. } => FailureKind::RateLimited,
            Self::Communication { .. } => FailureKind::Communication,
            Self::NotPaired { .. } => FailureKind::NotPaired,
        }
    }

    /// Retry delay carried by a rate-limit error
    #[must_use]
    pub const fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// Whether the failure ends the cycle before any network call
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// HTTP status attached to a communication failure
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Communication { status, .. } => *status,
            _ => None,
        }
    }
}
