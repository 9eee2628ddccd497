// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The managed function's view of the world: `SupervisorCtx` is the
//! programmatic surface handed to every invocation, and `ManagedFunction`
//! is the single user-supplied entry point the supervisor drives.

use crate::context::Context;
use crate::memo::MemoStore;
use crate::queue::QueueHandle;
use crate::reactive::{FlowSource, PollSource, WatcherRegistry};
use async_trait::async_trait;
use std::time::Duration;
use sv_core::{ManagedError, SupervisorError, Value};

/// Everything a managed-function invocation can reach: the triggering
/// message, context, memo, and reactive registration. Cheap to clone —
/// every field is itself a handle over shared state.
#[derive(Clone)]
pub struct SupervisorCtx {
    message: Option<String>,
    watcher: Option<String>,
    context: Context,
    memo: MemoStore,
    watchers: WatcherRegistry,
    queue: QueueHandle,
}

impl SupervisorCtx {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        message: Option<String>,
        watcher: Option<String>,
        context: Context,
        memo: MemoStore,
        watchers: WatcherRegistry,
        queue: QueueHandle,
    ) -> Self {
        Self { message, watcher, context, memo, watchers, queue }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The name of the watcher whose reactive signal triggered this
    /// invocation, or absent when triggered by `InitRun` or a user message.
    pub fn watcher_id(&self) -> Option<&str> {
        self.watcher.as_deref()
    }

    pub fn get_env(&self, key: &str) -> Option<String> {
        self.context.get_env(key).map(str::to_string)
    }

    pub fn get_value(&self, key: &str) -> Option<Value> {
        self.context.get(key)
    }

    pub fn set_value(&self, key: &str, value: Value) {
        self.context.set(key, value);
    }

    pub fn update_value<F>(&self, key: &str, f: F)
    where
        F: FnOnce(Option<Value>) -> Value,
    {
        self.context.update(key, f);
    }

    pub async fn memo<F, Fut>(&self, name: &str, compute: F) -> Result<Value, SupervisorError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Value>,
    {
        self.memo.memo(name, compute).await
    }

    pub fn clear_memo(&self, name: &str) {
        self.memo.clear(name)
    }

    pub fn watch_call(
        &self,
        name: &str,
        tick: Duration,
        source: Box<dyn PollSource>,
    ) -> Result<Option<Value>, SupervisorError> {
        self.watchers.watch_call(name, tick, source, self.queue.clone())
    }

    pub fn watch_flow(&self, name: &str, source: Box<dyn FlowSource>) -> Result<Option<Value>, SupervisorError> {
        self.watchers.watch_flow(name, source, self.queue.clone())
    }

    pub fn stop_err(reason: impl Into<String>) -> ManagedError {
        ManagedError::stop(reason)
    }

    pub fn kill_err(reason: impl Into<String>) -> ManagedError {
        ManagedError::kill(reason)
    }

    pub fn crash_err(reason: impl Into<String>) -> ManagedError {
        ManagedError::crash(reason)
    }
}

/// The single user-supplied entry point invoked by the supervisor on
/// `InitRun`, on every user message, and on every gated reactive change.
#[async_trait]
pub trait ManagedFunction: Send + Sync {
    async fn run(&self, ctx: SupervisorCtx) -> Result<(), ManagedError>;

    /// Invoked exactly once on `Stop` or `Crash`, never on `Kill`. Cleanup
    /// errors are logged but never change supervisor state.
    async fn cleanup(&self, _ctx: SupervisorCtx) -> Result<(), ManagedError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "managed_tests.rs"]
mod tests;
