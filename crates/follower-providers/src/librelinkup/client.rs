// ABOUTME: LibreLinkUp HTTP client building protocol requests over an HttpTransport
// ABOUTME: Classifies HTTP 429 as rate limiting and other non-2xx as communication errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::constants::{
    ACCOUNT_ID_HEADER, CONNECTIONS_PATH, GRAPH_SUFFIX, LOGIN_PATH, PRODUCT, PROVIDER_NAME,
    USER_AGENT, VERSION,
};
use super::session::AuthTicket;
use crate::constants::sampling::DEFAULT_RETRY_AFTER_SECS;
use crate::core::Credentials;
use crate::errors::{FollowerError, FollowerResult};
use crate::http_client::{HttpRequest, HttpResponse, HttpTransport};

const HTTP_TOO_MANY_REQUESTS: u16 = 429;

/// Request builder and response classifier for the `LibreLinkUp` API
#[derive(Clone)]
pub struct LibreLinkUpClient {
    transport: Arc<dyn HttpTransport>,
}

impl LibreLinkUpClient {
    /// Create a client over a transport
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// POST `/auth/login` and return the response body
    ///
    /// # Errors
    ///
    /// Returns `RateLimited` on HTTP 429 and `Communication` on any other
    /// non-success status or transport failure.
    #[instrument(skip(self, credentials), fields(provider = PROVIDER_NAME, api_call = "login"))]
    pub async fn login(&self, base_url: &str, credentials: &Credentials) -> FollowerResult<String> {
        let body = json!({
            "email": credentials.username(),
            "password": credentials.password(),
        })
        .to_string();

        let request = with_client_headers(HttpRequest::post(format!("{base_url}{LOGIN_PATH}"), body))
            .with_header("Content-Type", "application/json");
        self.execute(request, "login").await
    }

    /// GET `/llu/connections` and return the response body
    ///
    /// # Errors
    ///
    /// Same classification as [`Self::login`].
    #[instrument(skip(self, auth), fields(provider = PROVIDER_NAME, api_call = "connections"))]
    pub async fn connections(&self, base_url: &str, auth: &AuthTicket) -> FollowerResult<String> {
        let request = authorized(
            HttpRequest::get(format!("{base_url}{CONNECTIONS_PATH}")),
            auth,
        );
        self.execute(request, "connections").await
    }

    /// GET `/llu/connections/<id>/graph` and return the response body
    ///
    /// # Errors
    ///
    /// Same classification as [`Self::login`].
    #[instrument(skip(self, auth), fields(provider = PROVIDER_NAME, api_call = "graph"))]
    pub async fn graph(
        &self,
        base_url: &str,
        auth: &AuthTicket,
        connection_id: &str,
    ) -> FollowerResult<String> {
        let request = authorized(
            HttpRequest::get(format!(
                "{base_url}{CONNECTIONS_PATH}/{connection_id}{GRAPH_SUFFIX}"
            )),
            auth,
        );
        self.execute(request, "graph").await
    }

    async fn execute(&self, request: HttpRequest, api_call: &'static str) -> FollowerResult<String> {
        let response = self.transport.execute(request).await.map_err(|e| {
            FollowerError::Communication {
                provider: PROVIDER_NAME,
                api_call,
                status: None,
                message: e.to_string(),
            }
        })?;
        classify(response, api_call)
    }
}

/// Map an HTTP response to its body or a classified error
fn classify(response: HttpResponse, api_call: &'static str) -> FollowerResult<String> {
    if response.is_success() {
        // Bodies carry tokens and patient data; only their size is logged
        debug!(
            api_call,
            body_len = response.body.len(),
            "LibreLinkUp data received"
        );
        return Ok(response.body);
    }

    if response.status == HTTP_TOO_MANY_REQUESTS {
        return Err(FollowerError::RateLimited {
            provider: PROVIDER_NAME,
            retry_after_secs: parse_retry_after(response.header("Retry-After")),
        });
    }

    let reason = response.reason.as_deref().unwrap_or("unexpected status");
    Err(FollowerError::Communication {
        provider: PROVIDER_NAME,
        api_call,
        status: Some(response.status),
        message: format!("HTTP {} - {reason}", response.status),
    })
}

/// Read `Retry-After` as whole seconds, falling back to the default delay
#[must_use]
pub fn parse_retry_after(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn with_client_headers(request: HttpRequest) -> HttpRequest {
    request
        .with_header("User-Agent", USER_AGENT)
        .with_header("product", PRODUCT)
        .with_header("version", VERSION)
        .with_header("Accept", "application/json")
        .with_header("Pragma", "no-cache")
}

fn authorized(request: HttpRequest, auth: &AuthTicket) -> HttpRequest {
    with_client_headers(request)
        .with_header("Authorization", format!("Bearer {}", auth.token()))
        .with_header(ACCOUNT_ID_HEADER, auth.account_id_hash())
}
