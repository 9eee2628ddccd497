// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    stopped = { Lifecycle::Stopped, true },
    killed = { Lifecycle::Killed, true },
    crashed = { Lifecycle::Crashed, true },
    ready = { Lifecycle::Ready, false },
    running = { Lifecycle::Running, false },
    wait_recover = { Lifecycle::WaitRecover, false },
)]
fn terminal_classification(lifecycle: Lifecycle, expected: bool) {
    assert_eq!(lifecycle.is_terminal(), expected);
}

#[test]
fn fresh_state_starts_not_run_with_zeroed_counters() {
    let state = SupervisorState::new(Instant::now());
    assert_eq!(state.lifecycle, Lifecycle::NotRun);
    assert_eq!(state.consecutive_failures, 0);
    assert_eq!(state.execution_count, 0);
    assert_eq!(state.error_count, 0);
}
