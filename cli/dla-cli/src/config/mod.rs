// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration management

pub mod paths;
pub mod profile;

pub use profile::{Config, Profile};

use anyhow::Result;
use datalake_analytics_client::{API_VERSION, ClientConfig, DEFAULT_JOB_DNS_SUFFIX};

/// Connection settings given on the command line or in `DLA_*` variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub account: Option<String>,
    pub endpoint: Option<String>,
    pub dns_suffix: Option<String>,
    pub api_version: Option<String>,
}

/// Resolve which profile to use
///
/// Priority:
/// 1. CLI --profile argument (or DLA_PROFILE)
/// 2. Current profile from config.json
/// 3. No profile: flags, environment and defaults only
pub fn resolve_profile(cli_profile: Option<&str>) -> Result<Option<Profile>> {
    if let Some(name) = cli_profile {
        return Profile::load(name).map(Some);
    }

    match Config::load()?.profile {
        Some(name) => Profile::load(&name).map(Some),
        None => Ok(None),
    }
}

/// Merge overrides over a profile over the client defaults
///
/// Returns the account name together with the client configuration.
pub fn resolve(
    overrides: &Overrides,
    profile: Option<&Profile>,
) -> Result<(String, ClientConfig)> {
    let stored = profile.cloned().unwrap_or_default();

    let account = overrides
        .account
        .clone()
        .or(stored.account)
        .ok_or_else(|| {
            anyhow::anyhow!("No account configured. Use --account, DLA_ACCOUNT or a profile")
        })?;

    let defaults = ClientConfig::default();
    let config = ClientConfig {
        endpoint: overrides.endpoint.clone().or(stored.endpoint),
        adla_job_dns_suffix: overrides
            .dns_suffix
            .clone()
            .or(stored.dns_suffix)
            .unwrap_or_else(|| DEFAULT_JOB_DNS_SUFFIX.to_string()),
        api_version: overrides
            .api_version
            .clone()
            .or(stored.api_version)
            .unwrap_or_else(|| API_VERSION.to_string()),
        user_agent: format!("dla/{}", env!("CARGO_PKG_VERSION")),
        ..defaults
    };

    Ok((account, config))
}
