// ABOUTME: Constants for the LibreLinkUp cloud protocol
// ABOUTME: Endpoints, fixed client headers, timestamp format and labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `LibreLinkUp` API constants
//!
//! Protocol description: <https://github.com/timoschlueter/nightscout-librelink-up>

// =============================================================================
// Labels
// =============================================================================

/// Provider name used in errors and logs
pub const PROVIDER_NAME: &str = "librelinkup";

/// Human readable label for status messages
pub const SRC_LABEL: &str = "LibreLinkUp";

/// Short source tag attached to readings
pub const SRC_LABEL_SHORT: &str = "LLU";

// =============================================================================
// API URLs
// =============================================================================

/// Global endpoint used until a regional redirect is received
pub const LLU_SERVER_URL: &str = "https://api.libreview.io";

/// Regional endpoint prefix; the region code follows it
pub const LLU_REGIONAL_URL_PREFIX: &str = "https://api-";

/// Regional endpoint domain suffix
pub const LLU_REGIONAL_URL_SUFFIX: &str = ".libreview.io";

/// Shortest accepted region code
pub const MIN_REGION_LEN: usize = 2;

/// Longest accepted region code
pub const MAX_REGION_LEN: usize = 4;

/// Login endpoint path
pub const LOGIN_PATH: &str = "/auth/login";

/// Connection list endpoint path
pub const CONNECTIONS_PATH: &str = "/llu/connections";

/// Graph endpoint suffix appended after the connection id
pub const GRAPH_SUFFIX: &str = "/graph";

// =============================================================================
// Client identification headers
// =============================================================================

/// User agent expected by the service
pub const USER_AGENT: &str = "LibreLinkUp/4.7.0 CFNetwork/711.2.23 Darwin/14.0.0";

/// Value of the `product` header
pub const PRODUCT: &str = "llu.ios";

/// Value of the `version` header
pub const VERSION: &str = "4.7.0";

/// Header carrying the hashed account id
pub const ACCOUNT_ID_HEADER: &str = "Account-Id";

// =============================================================================
// Payload formats
// =============================================================================

/// `Timestamp` format, e.g. `1/2/2024 8:30:00 AM`
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";
