// ABOUTME: Parse error types for cloud payload decoding
// ABOUTME: Distinguishes malformed JSON from structurally incomplete responses

/// Failure to decode a response body into a typed result
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Body is not valid JSON or does not match the expected shape
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A required object or field is absent
    #[error("missing '{0}' in response")]
    MissingField(&'static str),

    /// Login response carried neither an auth ticket nor a redirect flag
    #[error("login response has neither auth ticket nor redirect (status {status:?})")]
    NoTicketOrRedirect {
        /// Numeric `status` reported by the service, when present
        status: Option<i64>,
    },

    /// A field is present but its value cannot be used
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Path of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },
}
