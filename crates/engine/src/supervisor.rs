// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level wiring: owns the signal queue, the pure state, and every
//! shared handle the effect handler needs. The run loop is the single
//! writer of `SupervisorState` — that serialization is what keeps
//! `reduce` pure and the whole state machine reasoning sound.

use crate::context::Context;
use crate::executor::Executor;
use crate::logger::Logger;
use crate::managed::ManagedFunction;
use crate::memo::MemoStore;
use crate::queue::{QueueHandle, SignalQueue};
use crate::reactive::WatcherRegistry;
use crate::reducer::reduce;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use sv_core::signal::Lifecycle as LifecycleSignal;
use sv_core::{Signal, SupervisorConfig, SupervisorId, SupervisorState};

/// A live supervisor instance: the run loop plus every handle a caller
/// (the HTTP surface, a test harness) needs to interact with it from
/// outside the loop.
pub struct Supervisor<F: ManagedFunction + 'static> {
    id: SupervisorId,
    config: SupervisorConfig,
    state: Arc<RwLock<SupervisorState>>,
    queue: SignalQueue,
    queue_handle: QueueHandle,
    logger: Arc<Logger>,
    context: Context,
    memo: MemoStore,
    watchers: WatcherRegistry,
    executor: Executor<F>,
}

impl<F: ManagedFunction + 'static> Supervisor<F> {
    pub fn new(managed: Arc<F>, config: SupervisorConfig, env: HashMap<String, String>) -> Self {
        let logger = Arc::new(Logger::new(config.max_log_entries));
        let context = Context::new(env);
        let memo = MemoStore::new(config.max_memo_entries);
        let watchers = WatcherRegistry::new(config.max_watches, logger.clone());
        let queue = SignalQueue::new(config.signal_chan_capacity);
        let queue_handle = queue.handle();
        let executor =
            Executor::new(managed, context.clone(), memo.clone(), watchers.clone(), logger.clone(), queue_handle.clone(), config.clone());

        Self {
            id: SupervisorId::new(),
            config,
            state: Arc::new(RwLock::new(SupervisorState::new(Instant::now()))),
            queue,
            queue_handle,
            logger,
            context,
            memo,
            watchers,
            executor,
        }
    }

    pub fn id(&self) -> SupervisorId {
        self.id
    }

    pub fn queue_handle(&self) -> QueueHandle {
        self.queue_handle.clone()
    }

    pub fn logger(&self) -> Arc<Logger> {
        self.logger.clone()
    }

    /// A shared, read-only handle onto the live state, for callers (the
    /// HTTP surface) that live outside the run loop.
    pub fn state_handle(&self) -> Arc<RwLock<SupervisorState>> {
        self.state.clone()
    }

    pub fn context(&self) -> Context {
        self.context.clone()
    }

    pub fn memo(&self) -> MemoStore {
        self.memo.clone()
    }

    pub fn watchers(&self) -> WatcherRegistry {
        self.watchers.clone()
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    pub fn snapshot_state(&self) -> SupervisorState {
        self.state.read().clone()
    }

    /// Enqueue the bootstrap signal that starts the first invocation.
    pub async fn start(&self) {
        let _ = self.queue_handle.enqueue(Signal::Lifecycle(LifecycleSignal::InitRun)).await;
    }

    /// The supervisor loop: dequeue, reduce, execute effects, repeat until
    /// a terminal state has been entered and its effects have drained.
    pub async fn run(mut self) {
        let span = tracing::info_span!("supervisor", id = %self.id);
        let _enter = span.enter();

        while let Some(signal) = self.queue.dequeue().await {
            let (next_state, effects) = {
                let current = self.state.read().clone();
                reduce(&current, &signal, &self.config)
            };
            let became_terminal = next_state.lifecycle.is_terminal();
            *self.state.write() = next_state;

            self.executor.execute_all(effects).await;

            if became_terminal {
                self.queue.close();
            }
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
