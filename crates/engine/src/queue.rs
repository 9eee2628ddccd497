// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Three-lane priority signal queue: Lifecycle > User > Reactive, strict
//! priority across lanes, FIFO within a lane. Built on `tokio::mpsc`
//! bounded channels with a biased `select!`, so a lane never starves
//! itself and a higher lane always wins a race against a lower one.

use sv_core::{Priority, Signal, SupervisorError};
use tokio::sync::mpsc;

pub struct SignalQueue {
    lifecycle_tx: mpsc::Sender<Signal>,
    user_tx: mpsc::Sender<Signal>,
    reactive_tx: mpsc::Sender<Signal>,
    lifecycle_rx: mpsc::Receiver<Signal>,
    user_rx: mpsc::Receiver<Signal>,
    reactive_rx: mpsc::Receiver<Signal>,
}

/// A cloneable sender half, handed to watcher tasks, the HTTP surface, and
/// the effect handler — anything that needs to push signals in without
/// owning the queue.
#[derive(Clone)]
pub struct QueueHandle {
    lifecycle_tx: mpsc::Sender<Signal>,
    user_tx: mpsc::Sender<Signal>,
    reactive_tx: mpsc::Sender<Signal>,
}

impl SignalQueue {
    pub fn new(capacity: usize) -> Self {
        let (lifecycle_tx, lifecycle_rx) = mpsc::channel(capacity);
        let (user_tx, user_rx) = mpsc::channel(capacity);
        let (reactive_tx, reactive_rx) = mpsc::channel(capacity);
        Self { lifecycle_tx, user_tx, reactive_tx, lifecycle_rx, user_rx, reactive_rx }
    }

    pub fn handle(&self) -> QueueHandle {
        QueueHandle {
            lifecycle_tx: self.lifecycle_tx.clone(),
            user_tx: self.user_tx.clone(),
            reactive_tx: self.reactive_tx.clone(),
        }
    }

    /// Dequeue the next signal, honoring strict priority across lanes.
    /// `biased` disables round-robin fairness so an always-ready
    /// `lifecycle_rx` is checked first on every poll, and `reactive_rx`
    /// is only ever polled once both higher lanes are empty.
    pub async fn dequeue(&mut self) -> Option<Signal> {
        tokio::select! {
            biased;
            sig = self.lifecycle_rx.recv() => sig,
            sig = self.user_rx.recv() => sig,
            sig = self.reactive_rx.recv() => sig,
        }
    }

    pub fn close(&mut self) {
        self.lifecycle_rx.close();
        self.user_rx.close();
        self.reactive_rx.close();
    }
}

impl QueueHandle {
    pub async fn enqueue(&self, signal: Signal) -> Result<(), SupervisorError> {
        let tx = match signal.priority() {
            Priority::Lifecycle => &self.lifecycle_tx,
            Priority::User => &self.user_tx,
            Priority::Reactive => &self.reactive_tx,
        };
        tx.send(signal).await.map_err(|_| SupervisorError::QueueClosed)
    }

    /// Non-blocking enqueue used by code that cannot await, e.g. a
    /// `Drop` impl or a synchronous HTTP handler path.
    pub fn try_enqueue(&self, signal: Signal) -> Result<(), SupervisorError> {
        let tx = match signal.priority() {
            Priority::Lifecycle => &self.lifecycle_tx,
            Priority::User => &self.user_tx,
            Priority::Reactive => &self.reactive_tx,
        };
        tx.try_send(signal).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                SupervisorError::QueueFull { capacity: tx.max_capacity() }
            }
            mpsc::error::TrySendError::Closed(_) => SupervisorError::QueueClosed,
        })
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
