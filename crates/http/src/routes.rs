// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only observability endpoints plus the single write path
//! (`POST /watcher/message`). Every handler reads straight through the
//! shared handles in `AppState`; none of them touch the run loop directly.

use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use sv_core::Signal;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/watcher/status", axum::routing::get(status))
        .route("/watcher/state", axum::routing::get(state_snapshot))
        .route("/watcher/config", axum::routing::get(config))
        .route("/watcher/vars", axum::routing::get(vars))
        .route("/watcher/watching", axum::routing::get(watching))
        .route("/watcher/memoCache", axum::routing::get(memo_cache))
        .route("/watcher/varState", axum::routing::get(var_state))
        .route("/watcher/message", axum::routing::post(post_message))
        .route("/watcher/logs/{kind}", axum::routing::get(logs))
        .with_state(state)
}

#[derive(Serialize)]
struct StatusResponse {
    lifecycle: String,
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse { lifecycle: state.state.read().lifecycle.to_string() })
}

#[derive(Serialize)]
struct StateResponse {
    lifecycle: String,
    execution_count: u64,
    error_count: u64,
    consecutive_failures: u32,
    uptime_ms: u64,
}

async fn state_snapshot(State(state): State<AppState>) -> Json<StateResponse> {
    let snapshot = state.state.read().clone();
    Json(StateResponse {
        lifecycle: snapshot.lifecycle.to_string(),
        execution_count: snapshot.execution_count,
        error_count: snapshot.error_count,
        consecutive_failures: snapshot.consecutive_failures,
        uptime_ms: snapshot.uptime(Instant::now()).as_millis() as u64,
    })
}

#[derive(Serialize)]
struct ConfigResponse {
    default_timeout_ms: u64,
    server_port: u16,
    max_log_entries: usize,
    max_watches: usize,
    max_memo_entries: usize,
    signal_chan_capacity: usize,
    min_consecutive_failures: u32,
    max_consecutive_failures: u32,
    base_retry_delay_ms: u64,
    max_retry_delay_ms: u64,
    lightweight_retry_delays_ms: Vec<u64>,
}

async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let cfg = &state.config;
    Json(ConfigResponse {
        default_timeout_ms: cfg.default_timeout.as_millis() as u64,
        server_port: cfg.server_port,
        max_log_entries: cfg.max_log_entries,
        max_watches: cfg.max_watches,
        max_memo_entries: cfg.max_memo_entries,
        signal_chan_capacity: cfg.signal_chan_capacity,
        min_consecutive_failures: cfg.min_consecutive_failures,
        max_consecutive_failures: cfg.max_consecutive_failures,
        base_retry_delay_ms: cfg.base_retry_delay.as_millis() as u64,
        max_retry_delay_ms: cfg.max_retry_delay.as_millis() as u64,
        lightweight_retry_delays_ms: cfg.lightweight_retry_delays.iter().map(|d| d.as_millis() as u64).collect(),
    })
}

async fn vars(State(state): State<AppState>) -> Json<HashMap<String, String>> {
    Json(state.context.env_snapshot())
}

#[derive(Serialize)]
struct WatcherEntry {
    kind: String,
    last_value: Option<sv_core::Value>,
    active: bool,
}

async fn watching(State(state): State<AppState>) -> Json<HashMap<String, WatcherEntry>> {
    let out = state
        .watchers
        .snapshot()
        .into_iter()
        .map(|w| (w.name, WatcherEntry { kind: w.kind.to_string(), last_value: w.last_value, active: w.active }))
        .collect();
    Json(out)
}

async fn memo_cache(State(state): State<AppState>) -> Json<HashMap<String, sv_core::Value>> {
    Json(state.memo.snapshot())
}

async fn var_state(State(state): State<AppState>) -> Json<HashMap<String, sv_core::Value>> {
    Json(state.context.snapshot())
}

#[derive(Deserialize)]
struct MessageRequest {
    content: String,
}

async fn post_message(State(state): State<AppState>, Json(req): Json<MessageRequest>) -> Response {
    if state.state.read().lifecycle.is_terminal() {
        return StatusCode::CONFLICT.into_response();
    }
    match state.queue.enqueue(Signal::User { content: req.content }).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(_) => StatusCode::CONFLICT.into_response(),
    }
}

#[derive(Deserialize)]
struct PageParams {
    #[serde(default)]
    offset: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    100
}

async fn logs(State(state): State<AppState>, Path(kind): Path<String>, Query(page): Query<PageParams>) -> Response {
    let logger = &state.logger;
    match kind.as_str() {
        "reduce" => Json(logger.reduce_page(page.offset, page.limit)).into_response(),
        "effect" => Json(logger.effect_page(page.offset, page.limit)).into_response(),
        "watch-error" => Json(logger.watch_error_page(page.offset, page.limit)).into_response(),
        "context" => Json(logger.context_change_page(page.offset, page.limit)).into_response(),
        "state-fault" => Json(logger.state_fault_page(page.offset, page.limit)).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
