// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Test helpers for dla-cli integration tests

// Allow unused code - not every test file uses every helper
// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(dead_code, deprecated)]

use assert_cmd::Command;
use datalake_analytics_stub_server::{StubContext, api_description};
use std::path::Path;
use std::sync::Arc;

/// Variables that would leak the caller's settings into a test run
const DLA_ENV: &[&str] = &[
    "DLA_PROFILE",
    "DLA_ACCOUNT",
    "DLA_ENDPOINT",
    "DLA_DNS_SUFFIX",
    "DLA_API_VERSION",
    "DLA_TOKEN",
];

/// Get a Command for the dla binary with an isolated config directory
pub fn dla_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dla").expect("Failed to find dla binary");
    for var in DLA_ENV {
        cmd.env_remove(var);
    }
    cmd.env("DLA_CONFIG_DIR", config_dir);
    cmd
}

/// Stub job service running on an ephemeral port
pub struct Stub {
    pub server: dropshot::HttpServer<Arc<StubContext>>,
    pub context: Arc<StubContext>,
}

impl Stub {
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.server.local_addr())
    }
}

/// Start the stub job service with the bundled fixtures
///
/// Must be called from a multi-threaded runtime: the CLI runs as a blocking
/// child process while the server keeps answering on the other workers.
pub fn start_stub(page_size: usize) -> Stub {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../services/datalake-analytics-stub-server/fixtures");
    let context = Arc::new(
        StubContext::from_fixtures(&fixtures_dir)
            .expect("load fixtures")
            .with_page_size(page_size),
    );

    let config = dropshot::ConfigDropshot {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        ..Default::default()
    };
    let log = dropshot::ConfigLogging::StderrTerminal {
        level: dropshot::ConfigLoggingLevel::Warn,
    }
    .to_logger("dla-cli-test")
    .expect("logger");

    let server = dropshot::HttpServerStarter::new(
        &config,
        api_description().expect("api description"),
        context.clone(),
        &log,
    )
    .expect("start stub server")
    .start();

    Stub { server, context }
}
