// ABOUTME: Unit tests for environment configuration loading
// ABOUTME: Validates defaults, overrides, flag parsing and invalid numeric values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use glucose_follower::config::environment::parse_flag;
use glucose_follower::config::{FollowerConfig, HttpClientConfig};
use glucose_follower::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const ALL_VARS: [&str; 6] = [
    "LLU_ENABLED",
    "LLU_USERNAME",
    "LLU_PASSWORD",
    "LLU_REQUEST_LATENCY_MS",
    "LLU_HTTP_TIMEOUT_SECS",
    "LLU_HTTP_CONNECT_TIMEOUT_SECS",
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_flag_parsing() {
    for value in ["true", "TRUE", "1", "yes", "on", " On "] {
        assert!(parse_flag(value).unwrap(), "{value:?} should enable");
    }
    for value in ["false", "0", "no", "off", ""] {
        assert!(!parse_flag(value).unwrap(), "{value:?} should disable");
    }
    assert!(parse_flag("maybe").is_err());
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str_or_default("json"), LogFormat::Json);
    assert_eq!(LogFormat::from_str_or_default("COMPACT"), LogFormat::Compact);
    assert_eq!(LogFormat::from_str_or_default("pretty"), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str_or_default("invalid"), LogFormat::Pretty); // Default fallback
}

#[test]
fn test_http_client_defaults() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.connect_timeout_secs, 10);
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_env();

    let config = FollowerConfig::from_env().unwrap();

    assert!(!config.librelinkup.enabled);
    assert_eq!(config.librelinkup.credentials.username(), "");
    assert_eq!(config.librelinkup.credentials.password(), "");
    assert_eq!(config.librelinkup.request_latency_ms, 15);
    assert_eq!(config.http_client, HttpClientConfig::default());
}

#[test]
#[serial]
fn test_values_from_environment() {
    clear_env();
    env::set_var("LLU_ENABLED", "yes");
    env::set_var("LLU_USERNAME", "  follower@example.com ");
    env::set_var("LLU_PASSWORD", "s3cret");
    env::set_var("LLU_REQUEST_LATENCY_MS", "5000");
    env::set_var("LLU_HTTP_TIMEOUT_SECS", "45");
    env::set_var("LLU_HTTP_CONNECT_TIMEOUT_SECS", "5");

    let config = FollowerConfig::from_env().unwrap();
    clear_env();

    assert!(config.librelinkup.enabled);
    assert_eq!(
        config.librelinkup.credentials.username(),
        "follower@example.com"
    );
    assert_eq!(config.librelinkup.credentials.password(), "s3cret");
    assert_eq!(config.librelinkup.request_latency_ms, 5000);
    assert_eq!(config.http_client.timeout_secs, 45);
    assert_eq!(config.http_client.connect_timeout_secs, 5);
}

#[test]
#[serial]
fn test_invalid_latency_fails_with_context() {
    clear_env();
    env::set_var("LLU_REQUEST_LATENCY_MS", "soon");

    let err = FollowerConfig::from_env().unwrap_err();
    clear_env();

    assert!(err.to_string().contains("LLU_REQUEST_LATENCY_MS"));
}

#[test]
#[serial]
fn test_invalid_enabled_flag_fails() {
    clear_env();
    env::set_var("LLU_ENABLED", "sometimes");

    let err = FollowerConfig::from_env().unwrap_err();
    clear_env();

    assert!(err.to_string().contains("LLU_ENABLED"));
}

#[test]
#[serial]
fn test_blank_credentials_load_and_fail_validation() {
    clear_env();
    env::set_var("LLU_ENABLED", "true");
    env::set_var("LLU_USERNAME", "   ");

    let config = FollowerConfig::from_env().unwrap();
    clear_env();

    assert!(config.librelinkup.enabled);
    assert!(config
        .librelinkup
        .credentials
        .validate("librelinkup")
        .is_err());
}

#[test]
#[serial]
fn test_summary_does_not_leak_password() {
    clear_env();
    env::set_var("LLU_USERNAME", "follower@example.com");
    env::set_var("LLU_PASSWORD", "hunter2-secret");

    let config = FollowerConfig::from_env().unwrap();
    clear_env();

    let summary = config.summary();
    assert!(summary.contains("follower@example.com"));
    assert!(!summary.contains("hunter2-secret"));
    assert!(!format!("{config:?}").contains("hunter2-secret"));
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "debug");

    let config = LoggingConfig::from_env();
    env::remove_var("LOG_FORMAT");
    env::remove_var("RUST_LOG");

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, "debug");
    assert_eq!(config.service_name, "glucose-follower");
}
