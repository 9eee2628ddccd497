// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dynamic value representation flowing through context, memo, and watchers.
//!
//! Values are a closed sum type rather than `Box<dyn Any>` so equality
//! (change-detection) and deep-copy (the `UpdateValue` isolation contract)
//! are total functions instead of runtime-downcast guesses.

use std::collections::BTreeMap;
use std::sync::Arc;

/// A registered handle for a value type the supervisor cannot otherwise
/// clone or compare structurally.
pub trait OpaqueHandle: std::any::Any + Send + Sync + std::fmt::Debug {
    fn clone_box(&self) -> Box<dyn OpaqueHandle>;

    fn as_any(&self) -> &dyn std::any::Any;

    /// Registered equality. `None` means "always changed" — we never
    /// silently treat an unregistered opaque as unchanged.
    fn eq_box(&self, _other: &dyn OpaqueHandle) -> Option<bool> {
        None
    }
}

/// A closed sum type for values crossing the context / memo / watcher
/// boundary. `Opaque` values must register a clone function at construction
/// or insertion is rejected (see `Value::opaque`).
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Bytes(Arc<[u8]>),
    Map(BTreeMap<String, Value>),
    List(Vec<Value>),
    Opaque(Arc<dyn OpaqueHandle>),
}

impl Value {
    pub fn opaque<T: OpaqueHandle + 'static>(handle: T) -> Self {
        Self::Opaque(Arc::new(handle))
    }

    /// Structural deep copy. `Opaque` clones via its registered `clone_box`.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Int(v) => Value::Int(*v),
            Value::Float(v) => Value::Float(*v),
            Value::String(v) => Value::String(v.clone()),
            Value::Bool(v) => Value::Bool(*v),
            Value::Bytes(v) => Value::Bytes(v.clone()),
            Value::Map(m) => Value::Map(m.iter().map(|(k, v)| (k.clone(), v.deep_clone())).collect()),
            Value::List(l) => Value::List(l.iter().map(Value::deep_clone).collect()),
            Value::Opaque(h) => Value::Opaque(Arc::from(h.clone_box())),
        }
    }

    /// Structural deep-equal, the default change-detection comparator.
    /// `Opaque` without a registered comparator is always "changed".
    pub fn changed_from(&self, prev: &Value) -> bool {
        !self.structurally_eq(prev)
    }

    fn structurally_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| b.get(k).is_some_and(|bv| v.structurally_eq(bv)))
            }
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structurally_eq(y))
            }
            (Value::Opaque(a), Value::Opaque(b)) => a.eq_box(b.as_ref()).unwrap_or(false),
            _ => false,
        }
    }
}

/// Renders for the HTTP observability surface. `Opaque` values have no
/// general JSON form, so they serialize as a type-tagged placeholder
/// rather than silently dropping data.
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        match self {
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Bytes(v) => serializer.serialize_str(&hex_encode(v)),
            Value::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::List(l) => l.serialize(serializer),
            Value::Opaque(h) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("opaque", &format!("{h:?}"))?;
                map.end()
            }
        }
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
