// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor configuration, loaded once from the environment at
//! construction time. No hot-reload: a fresh process is the only way to
//! pick up a changed value.

use crate::error::SupervisorError;
use std::time::Duration;

/// Effective configuration for a supervisor instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisorConfig {
    pub default_timeout: Duration,
    pub server_port: u16,
    pub max_log_entries: usize,
    pub max_watches: usize,
    pub max_memo_entries: usize,
    pub signal_chan_capacity: usize,
    pub min_consecutive_failures: u32,
    pub max_consecutive_failures: u32,
    pub base_retry_delay: Duration,
    pub max_retry_delay: Duration,
    pub lightweight_retry_delays: Vec<Duration>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(60),
            server_port: 8080,
            max_log_entries: 50_000,
            max_watches: 1_000,
            max_memo_entries: 1_000,
            signal_chan_capacity: 50_000,
            min_consecutive_failures: 3,
            max_consecutive_failures: 6,
            base_retry_delay: Duration::from_secs(5),
            max_retry_delay: Duration::from_secs(5 * 60),
            lightweight_retry_delays: vec![
                Duration::from_secs(15),
                Duration::from_secs(30),
                Duration::from_secs(60),
            ],
        }
    }
}

impl SupervisorConfig {
    /// Load from environment variables, falling back to defaults for any
    /// variable that is unset. An unparseable value is a construction-time
    /// error rather than a silently ignored default.
    pub fn from_env() -> Result<Self, SupervisorError> {
        let defaults = Self::default();
        Ok(Self {
            default_timeout: duration_ms_var("SV_DEFAULT_TIMEOUT_MS", defaults.default_timeout)?,
            server_port: parsed_var("SV_SERVER_PORT", defaults.server_port)?,
            max_log_entries: parsed_var("SV_MAX_LOG_ENTRIES", defaults.max_log_entries)?,
            max_watches: parsed_var("SV_MAX_WATCHES", defaults.max_watches)?,
            max_memo_entries: parsed_var("SV_MAX_MEMO_ENTRIES", defaults.max_memo_entries)?,
            signal_chan_capacity: parsed_var(
                "SV_SIGNAL_CHAN_CAPACITY",
                defaults.signal_chan_capacity,
            )?,
            min_consecutive_failures: parsed_var(
                "SV_MIN_CONSECUTIVE_FAILURES",
                defaults.min_consecutive_failures,
            )?,
            max_consecutive_failures: parsed_var(
                "SV_MAX_CONSECUTIVE_FAILURES",
                defaults.max_consecutive_failures,
            )?,
            base_retry_delay: duration_ms_var("SV_BASE_RETRY_DELAY_MS", defaults.base_retry_delay)?,
            max_retry_delay: duration_ms_var("SV_MAX_RETRY_DELAY_MS", defaults.max_retry_delay)?,
            lightweight_retry_delays: defaults.lightweight_retry_delays,
        })
    }
}

fn parsed_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, SupervisorError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw.parse().map_err(|_| SupervisorError::InvalidConfig {
            var: name,
            reason: format!("could not parse {raw:?}"),
        }),
    }
}

fn duration_ms_var(name: &'static str, default: Duration) -> Result<Duration, SupervisorError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => {
            let ms: u64 = raw.parse().map_err(|_| SupervisorError::InvalidConfig {
                var: name,
                reason: format!("could not parse {raw:?} as milliseconds"),
            })?;
            Ok(Duration::from_millis(ms))
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
