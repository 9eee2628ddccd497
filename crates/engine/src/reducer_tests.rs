// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sv_core::test_support::{managed_done, reactive_signal, ready_state, running_state, user_signal};
use sv_core::{Lifecycle, Outcome, Signal, SupervisorConfig, SupervisorState};
use std::time::Instant;

fn config() -> SupervisorConfig {
    SupervisorConfig::default()
}

fn not_run_state() -> SupervisorState {
    SupervisorState::new(Instant::now())
}

// P1: reduce is pure — repeated calls on the same inputs give identical output.
#[test]
fn reduce_is_deterministic_across_repeated_calls() {
    let state = ready_state();
    let signal = user_signal("hi");
    let config = config();
    let (s1, e1) = reduce(&state, &signal, &config);
    let (s2, e2) = reduce(&state, &signal, &config);
    assert_eq!(s1.lifecycle, s2.lifecycle);
    assert_eq!(e1, e2);
}

// S1: NotRun --InitRun--> InitRun, RunManaged(first=true) effect emitted.
#[test]
fn init_run_transitions_to_init_run_with_first_run_effect() {
    let (state, effects) = reduce(&not_run_state(), &Signal::Lifecycle(sv_core::LifecycleSignal::InitRun), &config());
    assert_eq!(state.lifecycle, Lifecycle::InitRun);
    assert!(effects.iter().any(|e| matches!(e, Effect::RunManaged { first: true, .. })));
}

#[test]
fn init_run_success_moves_to_ready_and_starts_watchers() {
    let mut s = not_run_state();
    s.lifecycle = Lifecycle::InitRun;
    let (state, effects) = reduce(&s, &managed_done(Outcome::Ok), &config());
    assert_eq!(state.lifecycle, Lifecycle::Ready);
    assert!(effects.contains(&Effect::StartWatchers));
}

// S2: Ready --User(msg)--> Running, RunManaged(msg) effect carries content.
#[test]
fn user_message_from_ready_runs_managed_with_content() {
    let (state, effects) = reduce(&ready_state(), &user_signal("hello"), &config());
    assert_eq!(state.lifecycle, Lifecycle::Running);
    assert_eq!(state.current_message.as_deref(), Some("hello"));
    assert!(effects.iter().any(|e| matches!(e, Effect::RunManaged { message: Some(m), .. } if m == "hello")));
}

#[test]
fn reactive_signal_from_ready_runs_managed_without_message() {
    let (state, _) = reduce(&ready_state(), &reactive_signal("w"), &config());
    assert_eq!(state.lifecycle, Lifecycle::Running);
    assert_eq!(state.current_message, None);
}

#[test]
fn successful_completion_resets_failures_and_returns_to_ready() {
    let mut s = running_state();
    s.consecutive_failures = 2;
    let (state, _) = reduce(&s, &managed_done(Outcome::Ok), &config());
    assert_eq!(state.lifecycle, Lifecycle::Ready);
    assert_eq!(state.consecutive_failures, 0);
    assert_eq!(state.execution_count, 1);
}

// S5: StopErr -> Stopped, cleanup runs, CloseWatchers emitted.
#[test]
fn stop_error_terminates_with_cleanup() {
    let (state, effects) = reduce(&running_state(), &managed_done(Outcome::Stop), &config());
    assert_eq!(state.lifecycle, Lifecycle::Stopped);
    assert!(effects.contains(&Effect::RunCleanup));
    assert!(effects.contains(&Effect::CloseWatchers));
}

#[test]
fn kill_error_terminates_without_cleanup() {
    let (state, effects) = reduce(&running_state(), &managed_done(Outcome::Kill), &config());
    assert_eq!(state.lifecycle, Lifecycle::Killed);
    assert!(!effects.contains(&Effect::RunCleanup));
    assert!(effects.contains(&Effect::CloseWatchers));
}

#[test]
fn other_error_is_non_fatal_and_returns_to_ready() {
    let (state, effects) = reduce(&running_state(), &managed_done(Outcome::Other), &config());
    assert_eq!(state.lifecycle, Lifecycle::Ready);
    assert_eq!(state.error_count, 1);
    assert!(!effects.iter().any(|e| matches!(e, Effect::RunCleanup)));
}

// S4: five crashes with Min=3,Max=6 all retry (lightweight then backoff);
// a sixth crash would be the permanent one.
#[test]
fn crash_below_max_schedules_retry_and_keeps_cleanup_exactly_once() {
    let mut s = running_state();
    s.consecutive_failures = 4;
    let (state, effects) = reduce(&s, &managed_done(Outcome::Crash), &config());
    assert_eq!(state.lifecycle, Lifecycle::WaitRecover);
    assert_eq!(effects.iter().filter(|e| matches!(e, Effect::RunCleanup)).count(), 1);
    assert!(effects.iter().any(|e| matches!(e, Effect::ScheduleRetry(_))));
}

#[test]
fn crash_at_max_consecutive_failures_is_permanent() {
    let mut s = running_state();
    s.consecutive_failures = 6; // already at default max: this crash is the 7th and is permanent.
    let (state, effects) = reduce(&s, &managed_done(Outcome::Crash), &config());
    assert_eq!(state.lifecycle, Lifecycle::Crashed);
    assert!(effects.contains(&Effect::CloseWatchers));
}

// P8: the decision for a crash must be computed from the failure count
// *before* this crash is counted, so the schedule actually lines up as
// [lw0, lw1, lw2, 1s, 2s, 4s] and permanent crash is the 7th crash, not
// the 6th.
#[test]
fn successive_crashes_follow_the_documented_retry_schedule() {
    let policy = SupervisorConfig {
        min_consecutive_failures: 3,
        max_consecutive_failures: 6,
        base_retry_delay: std::time::Duration::from_secs(1),
        max_retry_delay: std::time::Duration::from_secs(10),
        lightweight_retry_delays: vec![
            std::time::Duration::from_millis(100),
            std::time::Duration::from_millis(200),
            std::time::Duration::from_millis(400),
        ],
        ..SupervisorConfig::default()
    };
    let expected = [
        std::time::Duration::from_millis(100),
        std::time::Duration::from_millis(200),
        std::time::Duration::from_millis(400),
        std::time::Duration::from_secs(1),
        std::time::Duration::from_secs(2),
        std::time::Duration::from_secs(4),
    ];

    let mut s = running_state();
    s.consecutive_failures = 0;
    for (i, want) in expected.into_iter().enumerate() {
        let (state, effects) = reduce(&s, &managed_done(Outcome::Crash), &policy);
        assert_eq!(state.lifecycle, Lifecycle::WaitRecover, "crash {i}");
        let delay = effects.iter().find_map(|e| match e {
            Effect::ScheduleRetry(schedule) => Some(schedule.delay),
            _ => None,
        });
        assert_eq!(delay, Some(want), "crash {i}");
        assert_eq!(state.consecutive_failures, i as u32 + 1);
        s = state;
    }

    let (state, _) = reduce(&s, &managed_done(Outcome::Crash), &policy);
    assert_eq!(state.lifecycle, Lifecycle::Crashed, "7th crash is permanent");
}

#[test]
fn recovery_timeout_returns_to_ready_and_retriggers() {
    let mut s = ready_state();
    s.lifecycle = Lifecycle::WaitRecover;
    let (state, effects) = reduce(&s, &Signal::Lifecycle(sv_core::LifecycleSignal::RecoveryTimeout), &config());
    assert_eq!(state.lifecycle, Lifecycle::Ready);
    assert!(effects.contains(&Effect::EmitRetryTrigger));
}

// P9: terminal states are sticky; any further signal is a state fault.
#[yare::parameterized(
    stopped = { Lifecycle::Stopped },
    killed = { Lifecycle::Killed },
    crashed = { Lifecycle::Crashed },
)]
fn terminal_states_reject_further_signals(terminal: Lifecycle) {
    let mut s = ready_state();
    s.lifecycle = terminal;
    let (state, effects) = reduce(&s, &user_signal("too late"), &config());
    assert_eq!(state.lifecycle, terminal);
    assert!(effects.iter().any(|e| matches!(e, Effect::LogStateFault { .. })));
}

#[test]
fn impossible_transition_logs_fault_without_changing_state() {
    let (state, effects) = reduce(&not_run_state(), &user_signal("too early"), &config());
    assert_eq!(state.lifecycle, Lifecycle::NotRun);
    assert!(matches!(effects[0], Effect::LogStateFault { .. }));
}

#[test]
fn every_transition_logs_a_reduce_entry_first() {
    let (_, effects) = reduce(&ready_state(), &user_signal("hi"), &config());
    assert!(matches!(effects[0], Effect::LogReduce { .. }));
}
