// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::error::Outcome;

#[test]
fn lifecycle_outranks_user_and_reactive() {
    assert!(Priority::Lifecycle < Priority::User);
    assert!(Priority::User < Priority::Reactive);
}

#[yare::parameterized(
    init_run = { Signal::Lifecycle(Lifecycle::InitRun), Priority::Lifecycle },
    stop = { Signal::Lifecycle(Lifecycle::Stop), Priority::Lifecycle },
    managed_done = { Signal::Lifecycle(Lifecycle::ManagedDone(Outcome::Ok)), Priority::Lifecycle },
    user = { Signal::User { content: "hi".into() }, Priority::User },
    reactive = { Signal::Reactive { watcher: "w".into() }, Priority::Reactive },
)]
fn signal_priority_matches_class(signal: Signal, expected: Priority) {
    assert_eq!(signal.priority(), expected);
}
