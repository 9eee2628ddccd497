// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent, session-scoped key-value context. `update` deep-copies the
//! current value before handing it to the caller's function, isolating the
//! update from whatever any concurrent reader observes mid-update.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use sv_core::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextChangeKind {
    Set,
    Update,
}

#[derive(Debug, Clone)]
pub struct ContextChange {
    pub key: String,
    pub kind: ContextChangeKind,
}

#[derive(Clone)]
pub struct Context {
    store: Arc<RwLock<HashMap<String, Value>>>,
    env: Arc<HashMap<String, String>>,
}

impl Context {
    pub fn new(env: HashMap<String, String>) -> Self {
        Self { store: Arc::new(RwLock::new(HashMap::new())), env: Arc::new(env) }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.store.read().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: Value) -> ContextChange {
        self.store.write().insert(key.to_string(), value);
        ContextChange { key: key.to_string(), kind: ContextChangeKind::Set }
    }

    /// Atomic read-modify-write. `f` receives a deep copy of the current
    /// value (or `None` if absent) and its return value replaces the
    /// entry, all under a single write-lock acquisition.
    pub fn update<F>(&self, key: &str, f: F) -> ContextChange
    where
        F: FnOnce(Option<Value>) -> Value,
    {
        let mut guard = self.store.write();
        let isolated = guard.get(key).map(Value::deep_clone);
        let next = f(isolated);
        guard.insert(key.to_string(), next);
        ContextChange { key: key.to_string(), kind: ContextChangeKind::Update }
    }

    pub fn get_env(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    pub fn env_snapshot(&self) -> HashMap<String, String> {
        self.env.as_ref().clone()
    }

    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.store.read().clone()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
