// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reactive variable subsystem: poll watchers and flow watchers. Both kinds
//! of registration are idempotent — calling `watch_call`/`watch_flow`
//! again for a name already in the registry just returns its current
//! `last_value` instead of spawning a second task.
//!
//! Registration itself is simplified from a two-phase "I/O factory +
//! deterministic comparator" split into one async call per tick that
//! returns the freshly computed value; change-gating is then structural
//! equality against the previous value (`sv_core::Value::changed_from`),
//! the default comparator the data model already specifies. See DESIGN.md.

use crate::logger::Logger;
use crate::queue::QueueHandle;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use sv_core::{Signal, SupervisorError, Value, WatcherKind, WatcherSnapshot};
use tokio_util::sync::CancellationToken;

/// A poll source: on each tick, asked to compute the next value given the
/// previous one (absent on the bootstrap tick). May perform I/O.
#[async_trait]
pub trait PollSource: Send + Sync {
    async fn poll(&mut self, prev: Option<&Value>) -> Result<Value, String>;
}

/// A flow source: an externally driven stream of values. Every received
/// value triggers, with no change comparison.
#[async_trait]
pub trait FlowSource: Send + Sync {
    async fn recv(&mut self) -> Option<Value>;
}

struct WatcherState {
    kind: WatcherKind,
    last_value: Arc<RwLock<Option<Value>>>,
    active: Arc<std::sync::atomic::AtomicBool>,
}

/// Owns every watcher for one session. Watcher tasks hold only a
/// `QueueHandle` clone and the session's `CancellationToken`; they never
/// reach back into the registry itself.
#[derive(Clone)]
pub struct WatcherRegistry {
    watchers: Arc<RwLock<HashMap<String, WatcherState>>>,
    max_watches: usize,
    cancel: CancellationToken,
    logger: Arc<Logger>,
}

impl WatcherRegistry {
    pub fn new(max_watches: usize, logger: Arc<Logger>) -> Self {
        Self { watchers: Arc::new(RwLock::new(HashMap::new())), max_watches, cancel: CancellationToken::new(), logger }
    }

    /// Idempotent registration of a poll watcher. Returns the watcher's
    /// current `last_value` (absent until the first tick completes).
    pub fn watch_call(
        &self,
        name: &str,
        tick: Duration,
        mut source: Box<dyn PollSource>,
        queue: QueueHandle,
    ) -> Result<Option<Value>, SupervisorError> {
        if let Some(existing) = self.watchers.read().get(name) {
            return Ok(existing.last_value.read().clone());
        }

        let mut guard = self.watchers.write();
        if let Some(existing) = guard.get(name) {
            return Ok(existing.last_value.read().clone());
        }
        if guard.len() >= self.max_watches {
            return Err(SupervisorError::InvalidConfig {
                var: "SV_MAX_WATCHES",
                reason: format!("watcher limit of {} reached", self.max_watches),
            });
        }

        let last_value = Arc::new(RwLock::new(None));
        let active = Arc::new(std::sync::atomic::AtomicBool::new(true));
        guard.insert(
            name.to_string(),
            WatcherState { kind: WatcherKind::Poll, last_value: last_value.clone(), active: active.clone() },
        );
        drop(guard);

        let name = name.to_string();
        let cancel = self.cancel.clone();
        let logger = self.logger.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {}
                }
                let prev = last_value.read().clone();
                match source.poll(prev.as_ref()).await {
                    Ok(next) => {
                        let changed = prev.as_ref().is_none_or(|p| next.changed_from(p));
                        if changed {
                            *last_value.write() = Some(next);
                            if queue.enqueue(Signal::Reactive { watcher: name.clone() }).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(err) => {
                        logger.log_watch_error(&name, &err);
                    }
                }
            }
            active.store(false, std::sync::atomic::Ordering::SeqCst);
        });

        Ok(None)
    }

    /// Idempotent registration of a flow watcher. Every received value
    /// triggers a reactive signal; no change comparison.
    pub fn watch_flow(
        &self,
        name: &str,
        mut source: Box<dyn FlowSource>,
        queue: QueueHandle,
    ) -> Result<Option<Value>, SupervisorError> {
        if let Some(existing) = self.watchers.read().get(name) {
            return Ok(existing.last_value.read().clone());
        }

        let mut guard = self.watchers.write();
        if let Some(existing) = guard.get(name) {
            return Ok(existing.last_value.read().clone());
        }
        if guard.len() >= self.max_watches {
            return Err(SupervisorError::InvalidConfig {
                var: "SV_MAX_WATCHES",
                reason: format!("watcher limit of {} reached", self.max_watches),
            });
        }

        let last_value = Arc::new(RwLock::new(None));
        let active = Arc::new(std::sync::atomic::AtomicBool::new(true));
        guard.insert(
            name.to_string(),
            WatcherState { kind: WatcherKind::Flow, last_value: last_value.clone(), active: active.clone() },
        );
        drop(guard);

        let name = name.to_string();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            loop {
                let next = tokio::select! {
                    _ = cancel.cancelled() => None,
                    v = source.recv() => v,
                };
                let Some(next) = next else { break };
                *last_value.write() = Some(next);
                if queue.enqueue(Signal::Reactive { watcher: name.clone() }).await.is_err() {
                    break;
                }
            }
            active.store(false, std::sync::atomic::Ordering::SeqCst);
        });

        Ok(None)
    }

    /// Cooperative shutdown: every watcher task observes this on its next
    /// poll/select iteration and exits.
    pub fn close_all(&self) {
        self.cancel.cancel();
    }

    pub fn snapshot(&self) -> Vec<WatcherSnapshot> {
        self.watchers
            .read()
            .iter()
            .map(|(name, state)| WatcherSnapshot {
                name: name.clone(),
                kind: state.kind,
                last_value: state.last_value.read().clone(),
                active: state.active.load(std::sync::atomic::Ordering::SeqCst),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "reactive_tests.rs"]
mod tests;
