// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Profile management types

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A connection profile
///
/// Bearer tokens are short-lived and never stored; pass them with `--token`
/// or `DLA_TOKEN`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Profile name
    pub name: String,

    /// Data Lake Analytics account name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Base URL replacing the account host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Job endpoint DNS suffix (sovereign clouds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_suffix: Option<String>,

    /// Service API version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

/// Reject names that would escape the profiles directory
pub fn validate_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        anyhow::bail!("Invalid profile name '{}'", name);
    }
    Ok(())
}

impl Profile {
    /// Load a profile from a file
    pub fn load(name: &str) -> anyhow::Result<Self> {
        validate_name(name)?;
        let path = super::paths::profile_path(name);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile '{}'", name))?;
        let profile: Profile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse profile '{}'", name))?;
        Ok(profile)
    }

    /// Save the profile to a file
    pub fn save(&self) -> anyhow::Result<()> {
        validate_name(&self.name)?;
        super::paths::ensure_config_dirs()?;
        let path = super::paths::profile_path(&self.name);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Delete the profile file
    pub fn delete(name: &str) -> anyhow::Result<()> {
        validate_name(name)?;
        let path = super::paths::profile_path(name);
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to delete profile '{}'", name))?;
        Ok(())
    }

    /// List all available profiles
    pub fn list_all() -> anyhow::Result<Vec<String>> {
        let profiles_dir = super::paths::profiles_dir();
        if !profiles_dir.exists() {
            return Ok(vec![]);
        }

        let mut profiles = vec![];
        for entry in std::fs::read_dir(&profiles_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem()
            {
                profiles.push(stem.to_string_lossy().to_string());
            }
        }
        profiles.sort();
        Ok(profiles)
    }
}

/// Main configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Current active profile name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Config {
    /// Load the main config file
    pub fn load() -> anyhow::Result<Self> {
        let path = super::paths::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save the main config file
    pub fn save(&self) -> anyhow::Result<()> {
        super::paths::ensure_config_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(super::paths::config_file(), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("work").is_ok());
        assert!(validate_name("gov-cloud_2").is_ok());
        for bad in ["", "../../x", "a/b", "a\\b", ".hidden"] {
            assert!(validate_name(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_load_and_delete_reject_traversal() {
        let err = Profile::load("../../x").unwrap_err();
        assert!(err.to_string().contains("Invalid profile name"));
        assert!(Profile::delete("../x").is_err());
    }
}
