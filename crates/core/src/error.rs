// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tagged error kinds returned by the managed function.
//!
//! The supervisor classifies errors by *kind*, never by message text. A
//! managed function signals intent by which constructor it returns, not by
//! what string it puts in the reason.

use std::fmt;

/// An error returned from a managed function invocation.
///
/// Any error type the caller returns through `anyhow`/`Box<dyn Error>` is
/// classified into one of these four kinds before the reducer ever sees it;
/// see `ErrorClass::classify`.
#[derive(Debug, thiserror::Error)]
pub enum ManagedError {
    /// Graceful stop was requested. Cleanup runs; lifecycle becomes `Stopped`.
    #[error("stop requested: {0}")]
    Stop(String),

    /// Abort was requested. Cleanup is skipped; lifecycle becomes `Killed`.
    #[error("kill requested: {0}")]
    Kill(String),

    /// A crash was reported; recovery policy decides the next state.
    #[error("crash: {0}")]
    Crash(String),

    /// An error not recognized as a lifecycle event. Logged, counted,
    /// non-fatal: the supervisor returns to `Ready`.
    #[error("{0}")]
    Other(String),
}

impl ManagedError {
    pub fn stop(reason: impl Into<String>) -> Self {
        Self::Stop(reason.into())
    }

    pub fn kill(reason: impl Into<String>) -> Self {
        Self::Kill(reason.into())
    }

    pub fn crash(reason: impl Into<String>) -> Self {
        Self::Crash(reason.into())
    }

    pub fn other(reason: impl Into<String>) -> Self {
        Self::Other(reason.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Stop(_) => ErrorClass::Stop,
            Self::Kill(_) => ErrorClass::Kill,
            Self::Crash(_) => ErrorClass::Crash,
            Self::Other(_) => ErrorClass::Other,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::Stop(r) | Self::Kill(r) | Self::Crash(r) | Self::Other(r) => r,
        }
    }
}

crate::simple_display! {
    ErrorClass {
        Stop => "stop",
        Kill => "kill",
        Crash => "crash",
        Other => "other",
    }
}

/// The classification the reducer actually branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Stop,
    Kill,
    Crash,
    Other,
}

/// Outcome of a managed-function invocation as seen by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Stop,
    Kill,
    Crash,
    Other,
}

impl Outcome {
    pub fn from_result<T>(result: &Result<T, ManagedError>) -> Self {
        match result {
            Ok(_) => Outcome::Ok,
            Err(e) => match e.class() {
                ErrorClass::Stop => Outcome::Stop,
                ErrorClass::Kill => Outcome::Kill,
                ErrorClass::Crash => Outcome::Crash,
                ErrorClass::Other => Outcome::Other,
            },
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Ok => "ok",
            Outcome::Stop => "stop",
            Outcome::Kill => "kill",
            Outcome::Crash => "crash",
            Outcome::Other => "other",
        };
        f.write_str(s)
    }
}

/// Errors surfaced by the supervisor's own infrastructure (queue, config,
/// memo, context), distinct from `ManagedError` which comes from user code.
#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("signal queue is closed")]
    QueueClosed,

    #[error("signal queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("supervisor is in a terminal state ({state}); rejecting new signals")]
    Terminal { state: &'static str },

    #[error("memo capacity exceeded ({max} entries); rejecting insert for {name:?}")]
    MemoFull { name: String, max: usize },

    #[error("opaque value for key {key:?} has no registered clone function")]
    UnclonableOpaque { key: String },

    #[error("invalid configuration for {var}: {reason}")]
    InvalidConfig { var: &'static str, reason: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
