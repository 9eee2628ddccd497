// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session-scoped memoization. `Memo` is a classic load-or-store: the first
//! caller for a given name computes the value and every concurrent caller
//! for that name sees the same result, computed exactly once.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use sv_core::{SupervisorError, Value};

enum Slot {
    /// Another caller is computing this entry; late arrivals wait on the
    /// notifier rather than racing a second compute.
    Pending(Arc<tokio::sync::Notify>),
    Ready(Value),
}

#[derive(Clone)]
pub struct MemoStore {
    inner: Arc<Mutex<HashMap<String, Slot>>>,
    max_entries: usize,
}

impl MemoStore {
    pub fn new(max_entries: usize) -> Self {
        Self { inner: Arc::new(Mutex::new(HashMap::new())), max_entries }
    }

    /// Compute-or-fetch `name`. `compute` runs at most once per name until
    /// `clear` is called; concurrent callers for the same uncomputed name
    /// wait for the first caller's result instead of recomputing.
    pub async fn memo<F, Fut>(&self, name: &str, compute: F) -> Result<Value, SupervisorError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Value>,
    {
        let notify = {
            let mut guard = self.inner.lock();
            match guard.get(name) {
                Some(Slot::Ready(v)) => return Ok(v.clone()),
                Some(Slot::Pending(n)) => Some(n.clone()),
                None => {
                    if guard.len() >= self.max_entries {
                        return Err(SupervisorError::MemoFull { name: name.to_string(), max: self.max_entries });
                    }
                    let notify = Arc::new(tokio::sync::Notify::new());
                    guard.insert(name.to_string(), Slot::Pending(notify));
                    None
                }
            }
        };

        if let Some(notify) = notify {
            let notified = notify.notified();
            tokio::pin!(notified);
            // Register as a waiter before re-checking the slot, so a
            // `notify_waiters()` that lands between our first read and
            // this point can never be missed.
            notified.as_mut().enable();
            match self.inner.lock().get(name) {
                Some(Slot::Ready(v)) => return Ok(v.clone()),
                _ => {}
            }
            notified.await;
            // The computing caller installed `Ready` before notifying.
            let guard = self.inner.lock();
            return match guard.get(name) {
                Some(Slot::Ready(v)) => Ok(v.clone()),
                _ => unreachable!("memo slot resolved to Ready before notify"),
            };
        }

        let value = compute().await;
        let notify = {
            let mut guard = self.inner.lock();
            let prior = guard.insert(name.to_string(), Slot::Ready(value.clone()));
            match prior {
                Some(Slot::Pending(n)) => n,
                _ => unreachable!("this caller's own pending slot must still be present"),
            }
        };
        notify.notify_waiters();
        Ok(value)
    }

    pub fn clear(&self, name: &str) {
        self.inner.lock().remove(name);
    }

    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.inner
            .lock()
            .iter()
            .filter_map(|(k, v)| match v {
                Slot::Ready(value) => Some((k.clone(), value.clone())),
                Slot::Pending(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "memo_tests.rs"]
mod tests;
