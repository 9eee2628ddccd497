// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Five independent bounded ring buffers, one per log kind. Each entry
//! carries a `log_id` monotonically increasing within its own buffer;
//! overflow drops the oldest entry. Distinct from the process's own
//! `tracing` output (see `crate::executor`): these buffers exist so a
//! caller can page through bounded history over HTTP.

use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize)]
pub struct ReduceEntry {
    pub log_id: u64,
    pub from: String,
    pub to: String,
    pub signal: String,
    pub at_epoch_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectEntry {
    pub log_id: u64,
    pub outcome: String,
    pub duration_ms: u64,
    pub message: Option<String>,
    pub at_epoch_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchErrorEntry {
    pub log_id: u64,
    pub watcher: String,
    pub error: String,
    pub at_epoch_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextChangeEntry {
    pub log_id: u64,
    pub key: String,
    pub kind: String,
    pub at_epoch_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateFaultEntry {
    pub log_id: u64,
    pub state: String,
    pub signal: String,
    pub at_epoch_ms: u64,
}

struct RingBuffer<T> {
    entries: VecDeque<T>,
    capacity: usize,
    next_id: u64,
}

impl<T> RingBuffer<T> {
    fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity.min(1024)), capacity, next_id: 0 }
    }

    fn push(&mut self, build: impl FnOnce(u64) -> T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(build(id));
        id
    }

    fn page(&self, offset: usize, limit: usize) -> Vec<&T> {
        self.entries.iter().skip(offset).take(limit).collect()
    }
}

/// Aggregates the five log kinds behind one mutex each (per-buffer
/// locking, since a reduce-log write never needs to block a watch-error
/// read).
pub struct Logger {
    reduce: parking_lot::Mutex<RingBuffer<ReduceEntry>>,
    effect: parking_lot::Mutex<RingBuffer<EffectEntry>>,
    watch_error: parking_lot::Mutex<RingBuffer<WatchErrorEntry>>,
    context_change: parking_lot::Mutex<RingBuffer<ContextChangeEntry>>,
    state_fault: parking_lot::Mutex<RingBuffer<StateFaultEntry>>,
}

fn now_epoch_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

impl Logger {
    pub fn new(max_entries: usize) -> Self {
        Self {
            reduce: parking_lot::Mutex::new(RingBuffer::new(max_entries)),
            effect: parking_lot::Mutex::new(RingBuffer::new(max_entries)),
            watch_error: parking_lot::Mutex::new(RingBuffer::new(max_entries)),
            context_change: parking_lot::Mutex::new(RingBuffer::new(max_entries)),
            state_fault: parking_lot::Mutex::new(RingBuffer::new(max_entries)),
        }
    }

    pub fn log_reduce(&self, from: &str, to: &str, signal: &str) {
        let (from, to, signal) = (from.to_string(), to.to_string(), signal.to_string());
        self.reduce.lock().push(|log_id| ReduceEntry { log_id, from, to, signal, at_epoch_ms: now_epoch_ms() });
    }

    pub fn log_effect(&self, outcome: &str, duration: Duration, message: Option<String>) {
        let outcome = outcome.to_string();
        let duration_ms = duration.as_millis() as u64;
        self.effect.lock().push(|log_id| EffectEntry { log_id, outcome, duration_ms, message, at_epoch_ms: now_epoch_ms() });
    }

    pub fn log_watch_error(&self, watcher: &str, error: &str) {
        let (watcher, error) = (watcher.to_string(), error.to_string());
        self.watch_error.lock().push(|log_id| WatchErrorEntry { log_id, watcher, error, at_epoch_ms: now_epoch_ms() });
    }

    pub fn log_context_change(&self, key: &str, kind: &str) {
        let (key, kind) = (key.to_string(), kind.to_string());
        self.context_change.lock().push(|log_id| ContextChangeEntry { log_id, key, kind, at_epoch_ms: now_epoch_ms() });
    }

    pub fn log_state_fault(&self, state: &str, signal: &str) {
        let (state, signal) = (state.to_string(), signal.to_string());
        self.state_fault.lock().push(|log_id| StateFaultEntry { log_id, state, signal, at_epoch_ms: now_epoch_ms() });
    }

    pub fn reduce_page(&self, offset: usize, limit: usize) -> Vec<ReduceEntry> {
        self.reduce.lock().page(offset, limit).into_iter().cloned().collect()
    }

    pub fn effect_page(&self, offset: usize, limit: usize) -> Vec<EffectEntry> {
        self.effect.lock().page(offset, limit).into_iter().cloned().collect()
    }

    pub fn watch_error_page(&self, offset: usize, limit: usize) -> Vec<WatchErrorEntry> {
        self.watch_error.lock().page(offset, limit).into_iter().cloned().collect()
    }

    pub fn context_change_page(&self, offset: usize, limit: usize) -> Vec<ContextChangeEntry> {
        self.context_change.lock().page(offset, limit).into_iter().cloned().collect()
    }

    pub fn state_fault_page(&self, offset: usize, limit: usize) -> Vec<StateFaultEntry> {
        self.state_fault.lock().page(offset, limit).into_iter().cloned().collect()
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
