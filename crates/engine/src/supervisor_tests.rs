// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::managed::SupervisorCtx;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use sv_core::ManagedError;

struct AlwaysOk(Arc<AtomicUsize>);

#[async_trait]
impl ManagedFunction for AlwaysOk {
    async fn run(&self, _ctx: SupervisorCtx) -> Result<(), ManagedError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// S1: construct with defaults, start; managed function returns Ok; expect
// InitRun -> Ready and one execution recorded.
#[tokio::test]
async fn s1_boots_to_ready_after_successful_init_run() {
    let runs = Arc::new(AtomicUsize::new(0));
    let supervisor = Supervisor::new(Arc::new(AlwaysOk(runs.clone())), SupervisorConfig::default(), HashMap::new());
    let logger = supervisor.logger();
    supervisor.start().await;
    tokio::spawn(supervisor.run());

    tokio::time::timeout(std::time::Duration::from_secs(1), async {
        loop {
            if logger.reduce_page(0, 100).iter().any(|e| e.to == "ready") {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("reached ready within timeout");

    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

struct RespondsToMessage(Arc<RwLock<Option<String>>>);

#[async_trait]
impl ManagedFunction for RespondsToMessage {
    async fn run(&self, ctx: SupervisorCtx) -> Result<(), ManagedError> {
        if let Some(msg) = ctx.message() {
            *self.0.write() = Some(msg.to_string());
        }
        Ok(())
    }
}

// S2: after InitRun completes, SendMessage("hello") drives a second
// invocation that observes the content.
#[tokio::test]
async fn s2_user_message_reaches_the_managed_function() {
    let seen = Arc::new(RwLock::new(None));
    let supervisor = Supervisor::new(Arc::new(RespondsToMessage(seen.clone())), SupervisorConfig::default(), HashMap::new());
    let handle = supervisor.queue_handle();
    let logger = supervisor.logger();
    supervisor.start().await;
    tokio::spawn(supervisor.run());

    tokio::time::timeout(std::time::Duration::from_secs(1), async {
        loop {
            if logger.reduce_page(0, 100).iter().any(|e| e.to == "ready") {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("reached ready");

    handle.enqueue(Signal::User { content: "hello".into() }).await.unwrap();

    tokio::time::timeout(std::time::Duration::from_secs(1), async {
        loop {
            if seen.read().as_deref() == Some("hello") {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("message observed");
}

struct AlwaysStops;

#[async_trait]
impl ManagedFunction for AlwaysStops {
    async fn run(&self, _ctx: SupervisorCtx) -> Result<(), ManagedError> {
        Err(ManagedError::stop("bye"))
    }
}

// S5: a Stop error terminates the supervisor and further messages are
// rejected with a state-fault log entry.
#[tokio::test]
async fn s5_stop_error_is_terminal() {
    let supervisor = Supervisor::new(Arc::new(AlwaysStops), SupervisorConfig::default(), HashMap::new());
    let logger = supervisor.logger();
    supervisor.start().await;
    tokio::spawn(supervisor.run());

    tokio::time::timeout(std::time::Duration::from_secs(1), async {
        loop {
            if logger.reduce_page(0, 100).iter().any(|e| e.to == "stopped") {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("reached stopped");
}
