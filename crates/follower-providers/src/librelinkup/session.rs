// ABOUTME: LibreLinkUp session state and its acquisition (login, redirect, connection)
// ABOUTME: Holds token, hashed account id, connection id and the sticky regional base URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Manager
//!
//! A [`Session`] is created empty and filled lazily: a login produces the
//! [`AuthTicket`], the connection list produces the connection id. The
//! regional base URL learned from a redirect is routing information, not
//! session state, so [`Session::invalidate`] keeps it.

use sha2::{Digest, Sha256};
use std::fmt;
use tracing::info;

use super::client::LibreLinkUpClient;
use super::constants::{
    LLU_REGIONAL_URL_PREFIX, LLU_REGIONAL_URL_SUFFIX, LLU_SERVER_URL, MAX_REGION_LEN,
    MIN_REGION_LEN, PROVIDER_NAME,
};
use super::parser::{self, LoginGrant, LoginOutcome};
use crate::core::Credentials;
use crate::errors::{FollowerError, FollowerResult, ParseError};

/// Bearer token plus the hashed account id sent as `Account-Id`
#[derive(Clone, PartialEq, Eq)]
pub struct AuthTicket {
    token: String,
    account_id_hash: String,
}

impl AuthTicket {
    /// Build a ticket from a login grant, hashing and dropping the raw id
    #[must_use]
    pub fn from_grant(grant: LoginGrant) -> Self {
        let account_id_hash = hash_account_id(&grant.account_id);
        Self {
            token: grant.token,
            account_id_hash,
        }
    }

    /// Bearer token
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Lowercase hex SHA-256 of the account id
    #[must_use]
    pub fn account_id_hash(&self) -> &str {
        &self.account_id_hash
    }
}

impl fmt::Debug for AuthTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTicket")
            .field("token", &"[REDACTED]")
            .field("account_id_hash", &self.account_id_hash)
            .finish()
    }
}

/// Lowercase hex SHA-256 digest of a raw account id
#[must_use]
pub fn hash_account_id(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Build the regional endpoint for a redirect region code
///
/// The region is spliced into a host name, so it must stay a valid DNS label
/// fragment: ASCII letters, digits and `-`, not ending in `-`.
///
/// # Errors
///
/// Returns `RedirectUnresolved` when the region is not 2–4 characters long
/// or contains characters that are not valid in a host label.
pub fn resolve_regional_url(region: &str) -> FollowerResult<String> {
    let len = region.chars().count();
    if !(MIN_REGION_LEN..=MAX_REGION_LEN).contains(&len) {
        return Err(FollowerError::RedirectUnresolved {
            provider: PROVIDER_NAME,
            region: region.to_owned(),
            reason: "region code must be 2-4 characters",
        });
    }
    if !region.chars().all(is_host_label_char) || region.ends_with('-') {
        return Err(FollowerError::RedirectUnresolved {
            provider: PROVIDER_NAME,
            region: region.to_owned(),
            reason: "region code is not a valid host label",
        });
    }
    Ok(format!(
        "{LLU_REGIONAL_URL_PREFIX}{region}{LLU_REGIONAL_URL_SUFFIX}"
    ))
}

const fn is_host_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

const fn parse_failure(api_call: &'static str, source: ParseError) -> FollowerError {
    FollowerError::Parse {
        provider: PROVIDER_NAME,
        api_call,
        source,
    }
}

/// Session with the `LibreLinkUp` cloud
#[derive(Debug, Default, Clone)]
pub struct Session {
    auth: Option<AuthTicket>,
    connection_id: Option<String>,
    server_base_url: Option<String>,
}

impl Session {
    /// Empty session pointing at the global endpoint
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base URL for requests: regional endpoint if learned, otherwise global
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.server_base_url.as_deref().unwrap_or(LLU_SERVER_URL)
    }

    /// Current auth ticket
    #[must_use]
    pub const fn auth(&self) -> Option<&AuthTicket> {
        self.auth.as_ref()
    }

    /// Current connection (patient) id
    #[must_use]
    pub fn connection_id(&self) -> Option<&str> {
        self.connection_id.as_deref()
    }

    /// Whether a token is held
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Whether a connection id is held
    #[must_use]
    pub const fn has_connection(&self) -> bool {
        self.connection_id.is_some()
    }

    /// Token and connection id, when both are held
    #[must_use]
    pub fn active(&self) -> Option<(&AuthTicket, &str)> {
        Some((self.auth.as_ref()?, self.connection_id.as_deref()?))
    }

    /// Drop token and connection id; the regional base URL stays
    pub fn invalidate(&mut self) {
        self.auth = None;
        self.connection_id = None;
    }

    /// Log in unless a token is already held
    ///
    /// Follows at most one regional redirect; the learned base URL is kept
    /// even if the retried login fails.
    ///
    /// # Errors
    ///
    /// Returns `RateLimited`/`Communication` from the transport, `Parse` for
    /// an undecodable login body, and `RedirectUnresolved` for an invalid
    /// region or a second redirect.
    pub async fn ensure_authenticated(
        &mut self,
        client: &LibreLinkUpClient,
        credentials: &Credentials,
    ) -> FollowerResult<&AuthTicket> {
        let ticket = match self.auth.take() {
            Some(ticket) => ticket,
            None => self.login(client, credentials).await?,
        };
        Ok(self.auth.insert(ticket))
    }

    async fn login(
        &mut self,
        client: &LibreLinkUpClient,
        credentials: &Credentials,
    ) -> FollowerResult<AuthTicket> {
        let mut redirected = false;
        loop {
            let body = client.login(self.base_url(), credentials).await?;
            match parser::parse_login(&body).map_err(|e| parse_failure("login", e))? {
                LoginOutcome::Authenticated(grant) => {
                    info!(
                        provider = PROVIDER_NAME,
                        server_url = %self.base_url(),
                        "Authentication token received"
                    );
                    return Ok(AuthTicket::from_grant(grant));
                }
                LoginOutcome::Redirect(instruction) => {
                    if redirected {
                        return Err(FollowerError::RedirectUnresolved {
                            provider: PROVIDER_NAME,
                            region: instruction.region,
                            reason: "repeated redirect",
                        });
                    }
                    let url = resolve_regional_url(&instruction.region)?;
                    info!(
                        provider = PROVIDER_NAME,
                        region = %instruction.region,
                        server_url = %url,
                        "Following regional redirect"
                    );
                    self.server_base_url = Some(url);
                    redirected = true;
                }
            }
        }
    }

    /// Look up the connection id unless one is already held
    ///
    /// # Errors
    ///
    /// Returns `RateLimited`/`Communication` from the transport, `Parse` for
    /// an undecodable list, and `NotPaired` for an empty list. Calling this
    /// without a token is a `Communication` error.
    pub async fn ensure_connection(&mut self, client: &LibreLinkUpClient) -> FollowerResult<&str> {
        let connection_id = match self.connection_id.take() {
            Some(id) => id,
            None => {
                let auth = self.auth.as_ref().ok_or_else(|| FollowerError::Communication {
                    provider: PROVIDER_NAME,
                    api_call: "connections",
                    status: None,
                    message: "no active session".to_owned(),
                })?;
                let body = client.connections(self.base_url(), auth).await?;
                let id = parser::parse_connection_list(&body)
                    .map_err(|e| parse_failure("connections", e))?
                    .ok_or(FollowerError::NotPaired {
                        provider: PROVIDER_NAME,
                    })?;
                info!(provider = PROVIDER_NAME, "Connection id received");
                id
            }
        };
        Ok(self.connection_id.insert(connection_id).as_str())
    }
}
