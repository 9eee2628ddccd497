// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pure state transition function. No I/O, no clock reads, no random:
//! given the same `(state, signal, config)` it always returns the same
//! `(state', effects)`. Time-dependent decisions (the next retry delay)
//! come from `sv_core::recovery::next_decision`, which is itself pure.

use sv_core::error::Outcome;
use sv_core::signal::Lifecycle as LifecycleSignal;
use sv_core::{next_decision, Effect, Lifecycle, RetryDecision, Signal, SupervisorConfig, SupervisorState};

/// `reduce(state, signal) -> (state', effects[])`, per the transition table.
/// Any signal arriving in a state with no defined transition (including any
/// terminal state) falls through to the `LogStateFault` catch-all and
/// leaves state unchanged.
pub fn reduce(state: &SupervisorState, signal: &Signal, config: &SupervisorConfig) -> (SupervisorState, Vec<Effect>) {
    let mut next = state.clone();
    let from = state.lifecycle;
    let signal_name = signal.kind_name();

    let effects = match (from, signal) {
        (Lifecycle::NotRun, Signal::Lifecycle(LifecycleSignal::InitRun)) => {
            next.lifecycle = Lifecycle::InitRun;
            vec![Effect::RunManaged { message: None, watcher: None, first: true }]
        }

        (Lifecycle::InitRun, Signal::Lifecycle(LifecycleSignal::ManagedDone(outcome))) => {
            on_managed_done(&mut next, *outcome, config, true)
        }

        (Lifecycle::Ready, Signal::User { content }) => {
            next.lifecycle = Lifecycle::Running;
            next.current_message = Some(content.clone());
            vec![Effect::RunManaged { message: Some(content.clone()), watcher: None, first: false }]
        }

        (Lifecycle::Ready, Signal::Reactive { watcher }) => {
            next.lifecycle = Lifecycle::Running;
            next.current_message = None;
            vec![Effect::RunManaged { message: None, watcher: Some(watcher.clone()), first: false }]
        }

        (Lifecycle::Running, Signal::Lifecycle(LifecycleSignal::ManagedDone(outcome))) => {
            on_managed_done(&mut next, *outcome, config, false)
        }

        (Lifecycle::WaitRecover, Signal::Lifecycle(LifecycleSignal::RecoveryTimeout)) => {
            next.lifecycle = Lifecycle::Ready;
            vec![Effect::EmitRetryTrigger]
        }

        (_, Signal::Lifecycle(LifecycleSignal::Stop)) if !from.is_terminal() => {
            next.lifecycle = Lifecycle::Stopped;
            vec![Effect::RunCleanup, Effect::CloseWatchers]
        }

        (_, Signal::Lifecycle(LifecycleSignal::Kill)) if !from.is_terminal() => {
            next.lifecycle = Lifecycle::Killed;
            vec![Effect::CloseWatchers]
        }

        _ => {
            return (
                next,
                vec![Effect::LogStateFault { state: lifecycle_name(from), signal: signal_name }],
            )
        }
    };

    let mut effects = effects;
    effects.insert(0, Effect::LogReduce { from: lifecycle_name(from), to: lifecycle_name(next.lifecycle), signal: signal_name });
    (next, effects)
}

fn on_managed_done(
    state: &mut SupervisorState,
    outcome: Outcome,
    config: &SupervisorConfig,
    is_first_run: bool,
) -> Vec<Effect> {
    match outcome {
        Outcome::Ok => {
            state.execution_count += 1;
            state.consecutive_failures = 0;
            state.lifecycle = Lifecycle::Ready;
            state.current_message = None;
            if is_first_run {
                vec![Effect::StartWatchers]
            } else {
                vec![]
            }
        }
        Outcome::Stop => {
            state.lifecycle = Lifecycle::Stopped;
            vec![Effect::RunCleanup, Effect::CloseWatchers]
        }
        Outcome::Kill => {
            state.lifecycle = Lifecycle::Killed;
            vec![Effect::CloseWatchers]
        }
        Outcome::Crash => {
            state.error_count += 1;
            let decision = next_decision(state.consecutive_failures, config);
            state.consecutive_failures += 1;
            match decision {
                RetryDecision::Retry(schedule) => {
                    state.lifecycle = Lifecycle::WaitRecover;
                    vec![Effect::RunCleanup, Effect::ScheduleRetry(schedule)]
                }
                RetryDecision::PermanentCrash => {
                    state.lifecycle = Lifecycle::Crashed;
                    vec![Effect::RunCleanup, Effect::CloseWatchers]
                }
            }
        }
        Outcome::Other => {
            state.error_count += 1;
            state.lifecycle = Lifecycle::Ready;
            state.current_message = None;
            vec![]
        }
    }
}

fn lifecycle_name(lifecycle: Lifecycle) -> &'static str {
    match lifecycle {
        Lifecycle::NotRun => "not_run",
        Lifecycle::InitRun => "init_run",
        Lifecycle::Ready => "ready",
        Lifecycle::Running => "running",
        Lifecycle::Stopped => "stopped",
        Lifecycle::Killed => "killed",
        Lifecycle::Crashed => "crashed",
        Lifecycle::WaitRecover => "wait_recover",
    }
}

#[cfg(test)]
#[path = "reducer_tests.rs"]
mod tests;
