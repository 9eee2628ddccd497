// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
fn defaults_match_documented_values() {
    let cfg = SupervisorConfig::default();
    assert_eq!(cfg.default_timeout, Duration::from_secs(60));
    assert_eq!(cfg.server_port, 8080);
    assert_eq!(cfg.min_consecutive_failures, 3);
    assert_eq!(cfg.max_consecutive_failures, 6);
    assert_eq!(cfg.lightweight_retry_delays.len(), 3);
}

#[test]
#[serial]
fn from_env_overrides_parsed_values() {
    std::env::set_var("SV_SERVER_PORT", "9090");
    std::env::set_var("SV_MAX_WATCHES", "42");
    let cfg = SupervisorConfig::from_env().expect("valid env");
    assert_eq!(cfg.server_port, 9090);
    assert_eq!(cfg.max_watches, 42);
    std::env::remove_var("SV_SERVER_PORT");
    std::env::remove_var("SV_MAX_WATCHES");
}

#[test]
#[serial]
fn from_env_rejects_unparseable_value() {
    std::env::set_var("SV_SERVER_PORT", "not-a-port");
    let result = SupervisorConfig::from_env();
    assert!(result.is_err());
    std::env::remove_var("SV_SERVER_PORT");
}

#[test]
#[serial]
fn from_env_falls_back_to_default_when_unset() {
    std::env::remove_var("SV_MAX_LOG_ENTRIES");
    let cfg = SupervisorConfig::from_env().expect("valid env");
    assert_eq!(cfg.max_log_entries, SupervisorConfig::default().max_log_entries);
}
