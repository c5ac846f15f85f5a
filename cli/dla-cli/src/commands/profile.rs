// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Profile management commands

use crate::config::{Config, Overrides, Profile, paths, profile};
use crate::output::{or_dash, print_json, table};
use anyhow::Result;
use clap::Subcommand;
use datalake_analytics_client::{ClientConfig, validate_account_name};

#[derive(Subcommand, Clone)]
pub enum ProfileCommand {
    /// List all profiles
    #[command(alias = "ls")]
    List,

    /// Show a profile
    Get {
        /// Profile name (defaults to current)
        name: Option<String>,
    },

    /// Create or replace a profile from --account, --endpoint,
    /// --dns-suffix and --api-version
    Create {
        /// Profile name
        name: String,
        /// Make this the current profile
        #[arg(long)]
        set_current: bool,
    },

    /// Delete a profile
    #[command(alias = "rm")]
    Delete {
        /// Profile name
        name: String,
    },

    /// Set the current profile
    SetCurrent {
        /// Profile name
        name: String,
    },
}

impl ProfileCommand {
    pub fn run(self, overrides: &Overrides, use_json: bool) -> Result<()> {
        match self {
            Self::List => list_profiles(use_json),
            Self::Get { name } => get_profile(name, use_json),
            Self::Create { name, set_current } => {
                create_profile(name, overrides, set_current, use_json)
            }
            Self::Delete { name } => delete_profile(&name),
            Self::SetCurrent { name } => set_current_profile(&name),
        }
    }
}

fn list_profiles(use_json: bool) -> Result<()> {
    let current = Config::load()?.profile;

    let mut profiles = Vec::new();
    for name in Profile::list_all()? {
        match Profile::load(&name) {
            Ok(profile) => profiles.push(profile),
            Err(e) => tracing::warn!("Skipping profile '{}': {:#}", name, e),
        }
    }

    if use_json {
        return print_json(&profiles);
    }

    let mut tbl = table::create_table(&["NAME", "CURR", "ACCOUNT", "ENDPOINT"]);
    for profile in &profiles {
        let marker = if current.as_deref() == Some(profile.name.as_str()) {
            "*"
        } else {
            ""
        };
        tbl.add_row(vec![
            profile.name.clone(),
            marker.to_string(),
            or_dash(profile.account.as_deref()),
            or_dash(profile.endpoint.as_deref()),
        ]);
    }
    table::print_table(tbl);
    Ok(())
}

fn get_profile(name: Option<String>, use_json: bool) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => Config::load()?
            .profile
            .ok_or_else(|| anyhow::anyhow!("No current profile set"))?,
    };
    let profile = Profile::load(&name)?;

    if use_json {
        return print_json(&profile);
    }

    table::print_details(vec![
        ("Name", profile.name.clone()),
        ("Account", or_dash(profile.account.as_deref())),
        ("Endpoint", or_dash(profile.endpoint.as_deref())),
        ("DNS suffix", or_dash(profile.dns_suffix.as_deref())),
        ("API version", or_dash(profile.api_version.as_deref())),
        ("Path", paths::profile_path(&name).display().to_string()),
    ]);
    Ok(())
}

fn create_profile(
    name: String,
    overrides: &Overrides,
    set_current: bool,
    use_json: bool,
) -> Result<()> {
    profile::validate_name(&name)?;
    if let Some(account) = &overrides.account {
        validate_account_name(account)?;
    }

    let profile = Profile {
        name,
        account: overrides.account.clone(),
        endpoint: overrides.endpoint.clone(),
        dns_suffix: overrides.dns_suffix.clone(),
        api_version: overrides.api_version.clone(),
    };

    // Reject settings the client would refuse later
    ClientConfig {
        endpoint: profile.endpoint.clone(),
        ..ClientConfig::default()
    }
    .validate()?;

    profile.save()?;
    if set_current {
        Config {
            profile: Some(profile.name.clone()),
        }
        .save()?;
    }

    if use_json {
        return print_json(&profile);
    }
    println!("Saved profile '{}'", profile.name);
    Ok(())
}

fn delete_profile(name: &str) -> Result<()> {
    Profile::delete(name)?;

    let mut config = Config::load()?;
    if config.profile.as_deref() == Some(name) {
        config.profile = None;
        config.save()?;
    }

    println!("Deleted profile '{}'", name);
    Ok(())
}

fn set_current_profile(name: &str) -> Result<()> {
    // Fail before switching to a profile that cannot be loaded
    Profile::load(name)?;

    Config {
        profile: Some(name.to_string()),
    }
    .save()?;

    println!("Current profile is now '{}'", name);
    Ok(())
}
