// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executes the effects the reducer returns. Every effect is wrapped in a
//! structured tracing span built from `effect.name()`/`effect.fields()`,
//! at `info` unless `effect.verbose()` says `debug` — the same shape the
//! reducer's own transition log uses, so the two are easy to correlate by
//! eye in a log stream.

use crate::context::Context;
use crate::logger::Logger;
use crate::managed::{ManagedFunction, SupervisorCtx};
use crate::memo::MemoStore;
use crate::queue::QueueHandle;
use crate::reactive::WatcherRegistry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use sv_core::error::Outcome;
use sv_core::signal::Lifecycle as LifecycleSignal;
use sv_core::{Effect, ManagedError, Signal, SupervisorConfig};
use futures::FutureExt;
use tracing::Instrument;

#[derive(Clone)]
pub struct Executor<F: ManagedFunction + 'static> {
    managed: Arc<F>,
    context: Context,
    memo: MemoStore,
    watchers: WatcherRegistry,
    logger: Arc<Logger>,
    queue: QueueHandle,
    config: SupervisorConfig,
}

impl<F: ManagedFunction + 'static> Executor<F> {
    pub fn new(
        managed: Arc<F>,
        context: Context,
        memo: MemoStore,
        watchers: WatcherRegistry,
        logger: Arc<Logger>,
        queue: QueueHandle,
        config: SupervisorConfig,
    ) -> Self {
        Self { managed, context, memo, watchers, logger, queue, config }
    }

    fn ctx(&self, message: Option<String>, watcher: Option<String>) -> SupervisorCtx {
        SupervisorCtx::new(message, watcher, self.context.clone(), self.memo.clone(), self.watchers.clone(), self.queue.clone())
    }

    /// Execute one effect with tracing, timing, and field annotation.
    pub async fn execute(&self, effect: Effect) {
        let fields: Vec<String> = effect.fields().into_iter().map(|(k, v)| format!("{k}={v}")).collect();
        let started = Instant::now();
        let span = tracing::info_span!("effect", name = effect.name(), fields = %fields.join(" "));
        self.execute_inner(effect).instrument(span).await;
        tracing::trace!(duration_ms = started.elapsed().as_millis() as u64, "effect complete");
    }

    pub async fn execute_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.execute(effect).await;
        }
    }

    async fn execute_inner(&self, effect: Effect) {
        match effect {
            Effect::RunManaged { message, watcher, first } => self.run_managed(message, watcher, first).await,
            Effect::RunCleanup => self.run_cleanup().await,
            Effect::ScheduleRetry(schedule) => self.schedule_retry(schedule.delay).await,
            Effect::StartWatchers => {
                tracing::debug!("watchers eligible to start");
            }
            Effect::CloseWatchers => {
                self.watchers.close_all();
            }
            Effect::EmitRetryTrigger => {
                let _ = self.queue.enqueue(Signal::Reactive { watcher: "__retry__".to_string() }).await;
            }
            Effect::LogReduce { from, to, signal } => {
                self.logger.log_reduce(from, to, signal);
                tracing::info!(from, to, signal, "transition");
            }
            Effect::LogStateFault { state, signal } => {
                self.logger.log_state_fault(state, signal);
                tracing::warn!(state, signal, "rejected transition");
            }
            Effect::LogEffect { outcome, duration } => {
                self.logger.log_effect(outcome, duration, None);
            }
        }
    }

    async fn run_managed(&self, message: Option<String>, watcher: Option<String>, first: bool) {
        let ctx = self.ctx(message.clone(), watcher);
        let managed = self.managed.clone();
        let queue = self.queue.clone();
        let timeout = self.config.default_timeout;
        let logger = self.logger.clone();

        tokio::spawn(async move {
            let started = Instant::now();
            let result = run_with_timeout(timeout, managed.run(ctx)).await;
            let outcome = Outcome::from_result(&result);
            logger.log_effect(&outcome.to_string(), started.elapsed(), message);
            if first {
                tracing::debug!(outcome = %outcome, "initial run complete");
            }
            let _ = queue.enqueue(Signal::Lifecycle(LifecycleSignal::ManagedDone(outcome))).await;
        });
    }

    async fn run_cleanup(&self) {
        let ctx = self.ctx(None, None);
        let managed = self.managed.clone();
        tokio::spawn(async move {
            if let Err(err) = managed.cleanup(ctx).await {
                tracing::warn!(error = %err, "cleanup returned an error; state is already terminal");
            }
        });
    }

    async fn schedule_retry(&self, delay: Duration) {
        let queue = self.queue.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = queue.enqueue(Signal::Lifecycle(LifecycleSignal::RecoveryTimeout)).await;
        });
    }
}

/// A managed-function invocation that exceeds `timeout` is classified as a
/// crash, same as an uncaught panic inside it.
async fn run_with_timeout<Fut>(timeout: Duration, fut: Fut) -> Result<(), ManagedError>
where
    Fut: std::future::Future<Output = Result<(), ManagedError>>,
{
    match tokio::time::timeout(timeout, std::panic::AssertUnwindSafe(fut).catch_unwind()).await {
        Ok(Ok(result)) => result,
        Ok(Err(_panic)) => Err(ManagedError::crash("managed function panicked")),
        Err(_elapsed) => Err(ManagedError::crash("managed function timed out")),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
