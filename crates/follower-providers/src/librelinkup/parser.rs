// ABOUTME: Pure decoders for LibreLinkUp response bodies
// ABOUTME: Login, redirect, connection list and glucose measurement payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Response parsing without I/O or state.
//!
//! Every decoder returns a [`ParseError`] for malformed JSON or a missing
//! object along the expected path. Partial data is never returned.

use serde::Deserialize;
use std::fmt;
use zeroize::Zeroizing;

use crate::errors::ParseError;
use crate::models::RawMeasurement;

// =============================================================================
// Wire shapes
// =============================================================================

#[derive(Debug, Deserialize)]
struct LoginResponse {
    status: Option<i64>,
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    auth_ticket: Option<AuthTicketDto>,
    user: Option<UserDto>,
    redirect: Option<bool>,
    region: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthTicketDto {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConnectionsResponse {
    data: Option<Vec<ConnectionDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionDto {
    patient_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphResponse {
    data: Option<GraphData>,
}

#[derive(Debug, Deserialize)]
struct GraphData {
    connection: Option<GraphConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphConnection {
    glucose_measurement: Option<MeasurementDto>,
}

#[derive(Debug, Deserialize)]
struct MeasurementDto {
    #[serde(rename = "ValueInMgPerDl")]
    value_in_mg_per_dl: Option<f64>,
    #[serde(rename = "Timestamp")]
    timestamp: Option<String>,
    #[serde(rename = "TrendArrow")]
    trend_arrow: Option<i64>,
}

// =============================================================================
// Decoded results
// =============================================================================

/// Successful login: bearer token and the raw account id
///
/// The raw id is zeroed on drop; it only lives until the session hashes it.
pub struct LoginGrant {
    /// Bearer token
    pub token: String,
    /// Server-issued account id, not yet hashed
    pub account_id: Zeroizing<String>,
}

impl fmt::Debug for LoginGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginGrant")
            .field("token", &"[REDACTED]")
            .field("account_id", &"[REDACTED]")
            .finish()
    }
}

/// Server instruction to log in against a regional endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectInstruction {
    /// Region code as sent by the server (not validated here)
    pub region: String,
}

/// Decoded login response
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials accepted
    Authenticated(LoginGrant),
    /// Account lives in another region
    Redirect(RedirectInstruction),
}

// =============================================================================
// Decoders
// =============================================================================

/// Decode a login response
///
/// # Errors
///
/// Returns `ParseError` for malformed JSON, or when the body carries neither
/// a complete auth ticket nor a redirect flag.
pub fn parse_login(body: &str) -> Result<LoginOutcome, ParseError> {
    let response: LoginResponse = serde_json::from_str(body)?;
    let Some(data) = response.data else {
        return Err(ParseError::NoTicketOrRedirect {
            status: response.status,
        });
    };

    if let (Some(ticket), Some(user)) = (data.auth_ticket.as_ref(), data.user.as_ref()) {
        let token = ticket
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ParseError::MissingField("data.authTicket.token"))?;
        let account_id = user
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ParseError::MissingField("data.user.id"))?;
        return Ok(LoginOutcome::Authenticated(LoginGrant {
            token: token.to_owned(),
            account_id: Zeroizing::new(account_id.to_owned()),
        }));
    }

    redirect_from(&data)
        .map(LoginOutcome::Redirect)
        .ok_or(ParseError::NoTicketOrRedirect {
            status: response.status,
        })
}

/// Check a response body for a redirect instruction
///
/// Returns `Ok(None)` when the body is well formed but not a redirect.
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON.
pub fn parse_redirect(body: &str) -> Result<Option<RedirectInstruction>, ParseError> {
    let response: LoginResponse = serde_json::from_str(body)?;
    Ok(response.data.as_ref().and_then(redirect_from))
}

fn redirect_from(data: &LoginData) -> Option<RedirectInstruction> {
    if data.redirect != Some(true) {
        return None;
    }
    Some(RedirectInstruction {
        region: data.region.clone().unwrap_or_default(),
    })
}

/// Decode the connection list and return the first patient id
///
/// Returns `Ok(None)` when the list is present but empty (account not yet
/// paired with a patient).
///
/// # Errors
///
/// Returns `ParseError` for malformed JSON, a missing `data` list, or a
/// first entry without `patientId`.
pub fn parse_connection_list(body: &str) -> Result<Option<String>, ParseError> {
    let response: ConnectionsResponse = serde_json::from_str(body)?;
    let connections = response.data.ok_or(ParseError::MissingField("data"))?;
    let Some(first) = connections.into_iter().next() else {
        return Ok(None);
    };
    first
        .patient_id
        .filter(|id| !id.is_empty())
        .map(Some)
        .ok_or(ParseError::MissingField("data[0].patientId"))
}

/// Decode the latest measurement from a graph response
///
/// A missing `Timestamp` yields an empty timestamp string and a missing
/// `TrendArrow` yields code 0; the normalizer handles both.
///
/// # Errors
///
/// Returns `ParseError` for malformed JSON, any missing object along
/// `data.connection.glucoseMeasurement`, or a missing concentration.
pub fn parse_measurement(body: &str) -> Result<RawMeasurement, ParseError> {
    let response: GraphResponse = serde_json::from_str(body)?;
    let measurement = response
        .data
        .ok_or(ParseError::MissingField("data"))?
        .connection
        .ok_or(ParseError::MissingField("data.connection"))?
        .glucose_measurement
        .ok_or(ParseError::MissingField(
            "data.connection.glucoseMeasurement",
        ))?;

    let value = measurement
        .value_in_mg_per_dl
        .ok_or(ParseError::MissingField(
            "data.connection.glucoseMeasurement.ValueInMgPerDl",
        ))?;
    if value < 0.0 {
        return Err(ParseError::InvalidValue {
            field: "ValueInMgPerDl",
            reason: "negative concentration",
        });
    }

    Ok(RawMeasurement {
        value_mg_dl: value.round() as i64,
        timestamp: measurement.timestamp.unwrap_or_default(),
        trend_code: measurement.trend_arrow.unwrap_or_default(),
    })
}
