// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::error::Outcome;
use crate::signal::{Lifecycle as LifecycleSignal, Signal};
use crate::state::{Lifecycle, SupervisorState};
use std::time::Instant;

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::state::Lifecycle;
    use proptest::prelude::*;

    pub fn arb_lifecycle() -> impl Strategy<Value = Lifecycle> {
        prop_oneof![
            Just(Lifecycle::NotRun),
            Just(Lifecycle::InitRun),
            Just(Lifecycle::Ready),
            Just(Lifecycle::Running),
            Just(Lifecycle::Stopped),
            Just(Lifecycle::Killed),
            Just(Lifecycle::Crashed),
            Just(Lifecycle::WaitRecover),
        ]
    }

    pub fn arb_consecutive_failures() -> impl Strategy<Value = u32> {
        0u32..12
    }
}

pub fn ready_state() -> SupervisorState {
    let mut state = SupervisorState::new(Instant::now());
    state.lifecycle = Lifecycle::Ready;
    state
}

pub fn running_state() -> SupervisorState {
    let mut state = ready_state();
    state.lifecycle = Lifecycle::Running;
    state
}

pub fn user_signal(content: &str) -> Signal {
    Signal::User { content: content.to_string() }
}

pub fn reactive_signal(watcher: &str) -> Signal {
    Signal::Reactive { watcher: watcher.to_string() }
}

pub fn managed_done(outcome: Outcome) -> Signal {
    Signal::Lifecycle(LifecycleSignal::ManagedDone(outcome))
}
