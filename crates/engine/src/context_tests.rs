// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

fn ctx() -> Context {
    Context::new(HashMap::from([("REGION".to_string(), "us-east".to_string())]))
}

#[test]
fn get_env_reads_immutable_construction_values() {
    let c = ctx();
    assert_eq!(c.get_env("REGION"), Some("us-east"));
    assert_eq!(c.get_env("MISSING"), None);
}

#[test]
fn set_then_get_round_trips() {
    let c = ctx();
    c.set("k", Value::Int(5));
    assert!(matches!(c.get("k"), Some(Value::Int(5))));
}

// P7: K concurrent increments via update converge to exactly K.
#[tokio::test]
async fn concurrent_updates_are_linearizable() {
    let c = ctx();
    c.set("counter", Value::Int(0));

    let mut handles = Vec::new();
    for _ in 0..50 {
        let c = c.clone();
        handles.push(tokio::spawn(async move {
            c.update("counter", |prev| match prev {
                Some(Value::Int(n)) => Value::Int(n + 1),
                _ => Value::Int(1),
            });
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    assert!(matches!(c.get("counter"), Some(Value::Int(50))));
}

#[test]
fn update_sees_a_deep_copy_not_the_live_value() {
    let c = ctx();
    let mut map = std::collections::BTreeMap::new();
    map.insert("x".to_string(), Value::Int(1));
    c.set("m", Value::Map(map));

    c.update("m", |prev| {
        // Mutating this copy must not be visible to any other observer
        // until `update` installs the result.
        let Some(Value::Map(mut m)) = prev else { panic!("expected map") };
        m.insert("x".to_string(), Value::Int(2));
        Value::Map(m)
    });

    let Some(Value::Map(m)) = c.get("m") else { panic!("expected map") };
    assert!(matches!(m.get("x"), Some(Value::Int(2))));
}

#[test]
fn update_on_absent_key_starts_from_none() {
    let c = ctx();
    c.update("fresh", |prev| {
        assert!(prev.is_none());
        Value::Int(1)
    });
    assert!(matches!(c.get("fresh"), Some(Value::Int(1))));
}
