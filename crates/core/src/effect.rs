// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects are the reducer's only way to request I/O. `Effect::name` and
//! `Effect::fields` drive the structured tracing the effect handler emits
//! around each one; `Effect::verbose` marks high-frequency effects down to
//! `debug` so default-level logs stay readable under load.

use crate::signal::RetrySchedule;
use std::time::Duration;

/// A unit of work requested by the reducer, executed by the effect handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Invoke the managed function. `first` marks the bootstrap invocation
    /// triggered by `InitRun`, which has no triggering message. `watcher`
    /// carries the triggering watcher's name when this run was woken by a
    /// reactive signal, so the invocation can answer `WatcherID()`.
    RunManaged { message: Option<String>, watcher: Option<String>, first: bool },
    /// Run the user-registered cleanup function. Emitted once on Stop or
    /// Crash, never on Kill.
    RunCleanup,
    /// After `schedule.delay`, enqueue a `Lifecycle::RecoveryTimeout`.
    ScheduleRetry(RetrySchedule),
    /// Start any watchers registered but not yet running (only emitted on
    /// the Ready transition after the first successful return).
    StartWatchers,
    /// Signal all watcher tasks to stop; emitted on any terminal
    /// transition.
    CloseWatchers,
    /// Re-enqueue a synthetic reactive signal so the next Ready state picks
    /// up a pending retry without waiting on a real watcher tick.
    EmitRetryTrigger,
    /// Append an entry to the reduce log.
    LogReduce { from: &'static str, to: &'static str, signal: &'static str },
    /// Append an entry to the state-transition fault log: a signal arrived
    /// in a state that has no transition for it.
    LogStateFault { state: &'static str, signal: &'static str },
    /// Append an entry to the effect log recording a completed invocation.
    LogEffect { outcome: &'static str, duration: Duration },
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::RunManaged { .. } => "run_managed",
            Effect::RunCleanup => "run_cleanup",
            Effect::ScheduleRetry(_) => "schedule_retry",
            Effect::StartWatchers => "start_watchers",
            Effect::CloseWatchers => "close_watchers",
            Effect::EmitRetryTrigger => "emit_retry_trigger",
            Effect::LogReduce { .. } => "log_reduce",
            Effect::LogStateFault { .. } => "log_state_fault",
            Effect::LogEffect { .. } => "log_effect",
        }
    }

    /// Key=value pairs for structured tracing, mirroring how the fields are
    /// logged around each executed effect.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::RunManaged { message, watcher, first } => vec![
                ("first", first.to_string()),
                ("has_message", message.is_some().to_string()),
                ("watcher", watcher.clone().unwrap_or_default()),
            ],
            Effect::RunCleanup => vec![],
            Effect::ScheduleRetry(schedule) => vec![
                ("delay_ms", schedule.delay.as_millis().to_string()),
                ("mode", format!("{:?}", schedule.mode)),
            ],
            Effect::StartWatchers | Effect::CloseWatchers | Effect::EmitRetryTrigger => vec![],
            Effect::LogReduce { from, to, signal } => {
                vec![("from", from.to_string()), ("to", to.to_string()), ("signal", signal.to_string())]
            }
            Effect::LogStateFault { state, signal } => {
                vec![("state", state.to_string()), ("signal", signal.to_string())]
            }
            Effect::LogEffect { outcome, duration } => {
                vec![("outcome", outcome.to_string()), ("duration_ms", duration.as_millis().to_string())]
            }
        }
    }

    /// High-frequency, low-information effects are logged at `debug`
    /// instead of `info`.
    pub fn verbose(&self) -> bool {
        matches!(self, Effect::ScheduleRetry(_) | Effect::EmitRetryTrigger)
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
