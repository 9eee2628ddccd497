// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shared handles every route needs. Built once from a running
//! `Supervisor` and cloned into the router; nothing here owns the run loop
//! itself, so the HTTP surface can never observe a state transition the
//! reducer hasn't already committed.

use parking_lot::RwLock;
use std::sync::Arc;
use sv_core::{SupervisorConfig, SupervisorState};
use sv_engine::{Context, Logger, MemoStore, QueueHandle, WatcherRegistry};

#[derive(Clone)]
pub struct AppState {
    pub state: Arc<RwLock<SupervisorState>>,
    pub config: SupervisorConfig,
    pub logger: Arc<Logger>,
    pub context: Context,
    pub memo: MemoStore,
    pub watchers: WatcherRegistry,
    pub queue: QueueHandle,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: Arc<RwLock<SupervisorState>>,
        config: SupervisorConfig,
        logger: Arc<Logger>,
        context: Context,
        memo: MemoStore,
        watchers: WatcherRegistry,
        queue: QueueHandle,
    ) -> Self {
        Self { state, config, logger, context, memo, watchers, queue }
    }
}
