// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sv-http: the read-mostly control surface described in the programmatic
//! interface section — a thin axum layer over the same handles the
//! supervisor loop already exposes, with no state of its own.

pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full router, with CORS and request tracing layered on —
/// mirrors how a managed web surface is assembled elsewhere in this
/// codebase's sibling projects.
pub fn build_router(state: AppState) -> axum::Router {
    router(state).layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive())
}
