// ABOUTME: LibreLinkUp follower module: constants, client, parser, session and poll cycle
// ABOUTME: Follows a patient's CGM readings shared through the LibreLinkUp cloud
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP request construction and status classification
pub mod client;
/// Protocol constants
pub mod constants;
/// Pure response decoders
pub mod parser;
/// Poll cycle controller
pub mod provider;
/// Session state and acquisition
pub mod session;

pub use client::{parse_retry_after, LibreLinkUpClient};
pub use provider::{LibreLinkUpFollower, LibreLinkUpSettings};
pub use session::{hash_account_id, resolve_regional_url, AuthTicket, Session};
