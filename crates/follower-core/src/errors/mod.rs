// ABOUTME: Error taxonomy for cloud follower operations
// ABOUTME: Separates configuration, parse, redirect, rate-limit and communication failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Follower Errors
//!
//! Every failure a poll cycle can hit is expressed as a [`FollowerError`].
//! The poll cycle controller converts these into classified outcomes, so none
//! of them ever escapes as a panic. Payload decoding problems are kept in a
//! separate [`ParseError`] type because a malformed response usually means the
//! cloud API contract changed, which is diagnosed differently from an outage.

mod follower;
mod parse;

pub use follower::{FailureKind, FollowerError, FollowerResult};
pub use parse::ParseError;
