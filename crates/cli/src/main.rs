// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sv`: boots one supervisor instance with a demo managed function and
//! serves the HTTP control surface alongside it. A real integration
//! brings its own `ManagedFunction` and calls `sv_engine`/`sv_http`
//! directly instead of going through this binary.

mod demo;

use std::collections::HashMap;
use std::sync::Arc;
use sv_core::SupervisorConfig;
use sv_engine::Supervisor;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        if matches!(arg.as_str(), "--version" | "-V") {
            println!("sv {}", concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")));
            return Ok(());
        }
    }

    init_tracing();

    let config = SupervisorConfig::from_env()?;
    let env: HashMap<String, String> = std::env::vars().collect();
    let server_port = config.server_port;

    let supervisor = Supervisor::new(Arc::new(demo::EchoDemo), config, env);
    let app_state = sv_http::AppState::new(
        supervisor.state_handle(),
        supervisor.config().clone(),
        supervisor.logger(),
        supervisor.context(),
        supervisor.memo(),
        supervisor.watchers(),
        supervisor.queue_handle(),
    );

    supervisor.start().await;
    let run_handle = tokio::spawn(supervisor.run());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", server_port)).await?;
    tracing::info!(port = server_port, "serving watcher control surface");
    let router = sv_http::build_router(app_state);

    tokio::select! {
        result = axum::serve(listener, router) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down on ctrl-c"),
    }

    run_handle.abort();
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
}
