// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Standalone stub Data Lake Analytics job server for testing and development
//!
//! Run with:
//! ```bash
//! cargo run -p datalake-analytics-stub-server
//! ```
//!
//! Then point the CLI at it:
//! ```bash
//! DLA_ENDPOINT=http://localhost:9091 cargo run -p dla-cli -- --account demo job list
//! ```
//!
//! `STUB_BIND_ADDRESS` overrides the listen address and `STUB_PAGE_SIZE` the
//! number of jobs per list page.

use anyhow::{Context, Result};
use dropshot::{ConfigDropshot, ConfigLogging, ConfigLoggingLevel, HttpServerStarter};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use datalake_analytics_stub_server::{DEFAULT_PAGE_SIZE, StubContext, api_description};

/// Filter used when `RUST_LOG` is unset or invalid
const DEFAULT_LOG_FILTER: &str = "datalake_analytics_stub_server=info,dropshot=info";

fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .init();

    // Dropshot request logging
    let log_config = ConfigLogging::StderrTerminal {
        level: ConfigLoggingLevel::Info,
    };
    let log = log_config.to_logger("datalake-analytics-stub-server")?;

    let bind_address = match std::env::var("STUB_BIND_ADDRESS") {
        Ok(addr) => addr
            .parse()
            .with_context(|| format!("Invalid STUB_BIND_ADDRESS: {}", addr))?,
        Err(_) => SocketAddr::from((Ipv4Addr::LOCALHOST, 9091)),
    };
    let page_size = match std::env::var("STUB_PAGE_SIZE") {
        Ok(size) => size
            .parse()
            .with_context(|| format!("Invalid STUB_PAGE_SIZE: {}", size))?,
        Err(_) => DEFAULT_PAGE_SIZE,
    };

    // Load fixture data
    let fixtures_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    let context = Arc::new(StubContext::from_fixtures(&fixtures_dir)?.with_page_size(page_size));

    tracing::info!("Loaded {} jobs from fixtures", context.job_count().await);

    let config = ConfigDropshot {
        bind_address,
        default_request_body_max_bytes: 1024 * 1024,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };

    let api = api_description().map_err(|e| anyhow::anyhow!(e))?;
    let server = HttpServerStarter::new(&config, api, context, &log)
        .map_err(|e| anyhow::anyhow!("Failed to create server: {}", e))?
        .start();

    tracing::info!("Stub job server listening on http://{}", server.local_addr());
    tracing::info!("Available endpoints:");
    tracing::info!("  GET  /Jobs");
    tracing::info!("  GET  /Jobs/{{jobIdentity}}");
    tracing::info!("  PUT  /Jobs/{{jobIdentity}}");
    tracing::info!("  POST /Jobs/{{jobIdentity}}/CancelJob");
    tracing::info!("  GET  /Jobs/{{jobIdentity}}/GetStatistics");
    tracing::info!("  GET  /Jobs/{{jobIdentity}}/GetDebugDataPath");
    tracing::info!("  POST /BuildJob");

    server
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
