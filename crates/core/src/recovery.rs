// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure recovery/backoff policy. Takes no clock: callers pass
//! `consecutive_failures` in, get a `RetryDecision` out, and are
//! responsible for actually scheduling the delay.

use crate::config::SupervisorConfig;
use crate::signal::{RetryMode, RetrySchedule};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetryDecision {
    /// Stay below `min_consecutive_failures`: retry on a short, fixed
    /// schedule and return to `Ready`.
    Retry(RetrySchedule),
    /// At or above `max_consecutive_failures`: no further retries.
    PermanentCrash,
}

/// Compute the next retry decision for a given failure count, per the
/// policy: lightweight retries below `min`, exponential backoff clamped to
/// `max_retry_delay` between `min` and `max`, permanent crash at or above
/// `max`.
pub fn next_decision(consecutive_failures: u32, config: &SupervisorConfig) -> RetryDecision {
    if consecutive_failures >= config.max_consecutive_failures {
        return RetryDecision::PermanentCrash;
    }

    if consecutive_failures < config.min_consecutive_failures {
        if let Some(&delay) = config.lightweight_retry_delays.get(consecutive_failures as usize) {
            return RetryDecision::Retry(RetrySchedule { delay, mode: RetryMode::Lightweight });
        }
        if let Some(&delay) = config.lightweight_retry_delays.last() {
            return RetryDecision::Retry(RetrySchedule { delay, mode: RetryMode::Lightweight });
        }
        // No lightweight delays configured: fall through to backoff.
    }

    let exponent = consecutive_failures.saturating_sub(config.min_consecutive_failures);
    let scaled = config.base_retry_delay.saturating_mul(1u32.checked_shl(exponent).unwrap_or(u32::MAX));
    let delay = scaled.min(config.max_retry_delay);
    RetryDecision::Retry(RetrySchedule { delay, mode: RetryMode::Backoff })
}

#[cfg(test)]
#[path = "recovery_tests.rs"]
mod tests;
