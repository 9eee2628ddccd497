// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The supervisor's own state: the part the reducer reads and writes.
//! Everything here is plain data; no I/O handles live on this struct.

use std::time::{Duration, Instant};

/// The supervisor's lifecycle. Stopped/Killed/Crashed (when
/// `consecutive_failures` has reached the max) are terminal: no signal
/// moves a terminal state anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    NotRun,
    InitRun,
    Ready,
    Running,
    Stopped,
    Killed,
    Crashed,
    WaitRecover,
}

crate::simple_display! {
    Lifecycle {
        NotRun => "not_run",
        InitRun => "init_run",
        Ready => "ready",
        Running => "running",
        Stopped => "stopped",
        Killed => "killed",
        Crashed => "crashed",
        WaitRecover => "wait_recover",
    }
}

impl Lifecycle {
    pub fn is_terminal(self) -> bool {
        matches!(self, Lifecycle::Stopped | Lifecycle::Killed | Lifecycle::Crashed)
    }
}

/// Pure, in-memory supervisor state. Mutated only by `reduce`, and only
/// from within the single-threaded supervisor loop.
#[derive(Debug, Clone)]
pub struct SupervisorState {
    pub lifecycle: Lifecycle,
    pub consecutive_failures: u32,
    pub execution_count: u64,
    pub error_count: u64,
    pub start_time: Instant,
    pub current_message: Option<String>,
}

impl SupervisorState {
    pub fn new(start_time: Instant) -> Self {
        Self {
            lifecycle: Lifecycle::NotRun,
            consecutive_failures: 0,
            execution_count: 0,
            error_count: 0,
            start_time,
            current_message: None,
        }
    }

    pub fn uptime(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start_time)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
