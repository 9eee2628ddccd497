// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A minimal managed function, wired up purely so `sv` has something to
//! supervise out of the box. Real deployments bring their own.

use async_trait::async_trait;
use std::time::Duration;
use sv_core::{ManagedError, Value};
use sv_engine::managed::SupervisorCtx;
use sv_engine::{ManagedFunction, PollSource};

/// Echoes the triggering message into context under `last_message`, and
/// registers a poll watcher that ticks the process uptime every five
/// seconds — enough to exercise the reactive subsystem end to end.
pub struct EchoDemo;

struct UptimeSource {
    started: std::time::Instant,
}

#[async_trait]
impl PollSource for UptimeSource {
    async fn poll(&mut self, _prev: Option<&Value>) -> Result<Value, String> {
        Ok(Value::Int(self.started.elapsed().as_secs() as i64))
    }
}

#[async_trait]
impl ManagedFunction for EchoDemo {
    async fn run(&self, ctx: SupervisorCtx) -> Result<(), ManagedError> {
        if let Some(msg) = ctx.message() {
            ctx.set_value("last_message", Value::String(msg.to_string()));
            tracing::info!(message = msg, "echo demo received a message");
        }
        if let Some(watcher) = ctx.watcher_id() {
            tracing::debug!(watcher, "woken by a reactive signal");
        }
        let _ = ctx.watch_call(
            "uptime_seconds",
            Duration::from_secs(5),
            Box::new(UptimeSource { started: std::time::Instant::now() }),
        );
        Ok(())
    }

    async fn cleanup(&self, _ctx: SupervisorCtx) -> Result<(), ManagedError> {
        tracing::info!("echo demo cleanup");
        Ok(())
    }
}
