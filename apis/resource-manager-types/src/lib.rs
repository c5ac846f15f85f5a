// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Azure Resource Manager resource types.
//!
//! This crate contains the generic resource hierarchy returned by Resource
//! Manager and the deployment preflight resource produced when a template is
//! validated. Each level of the hierarchy embeds the previous one and is
//! flattened on the wire, so a `DeploymentPreFlightResource` serializes as a
//! single JSON object.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod resource_id;

pub use resource_id::{InvalidResourceId, ResourceId, ResourceSegment};

// ============================================================================
// Generic Resources
// ============================================================================

/// Members shared by every resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceBase {
    /// Fully qualified resource id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Resource type, e.g. "Microsoft.Web/sites"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Azure region
    pub location: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// Marketplace plan of a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_code: Option<String>,
}

/// A resource of any type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GenericResource {
    #[serde(flatten)]
    pub base: ResourceBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    /// Provider-specific resource properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
}

/// A resource with its provisioning state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenericResourceExtended {
    #[serde(flatten)]
    pub resource: GenericResource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

// ============================================================================
// Deployments
// ============================================================================

/// A resource a template deployment would create, as reported by preflight
/// validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPreFlightResource {
    #[serde(flatten)]
    pub resource: GenericResourceExtended,
    /// API version the resource is deployed with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Ids of the resources this one depends on
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl DeploymentPreFlightResource {
    pub fn new(location: impl Into<String>) -> Self {
        let mut resource = Self::default();
        resource.resource.resource.base.location = location.into();
        resource
    }

    pub fn base(&self) -> &ResourceBase {
        &self.resource.resource.base
    }

    pub fn base_mut(&mut self) -> &mut ResourceBase {
        &mut self.resource.resource.base
    }

    /// Parse `depends_on` into resource ids
    pub fn dependencies(&self) -> Result<Vec<ResourceId>, InvalidResourceId> {
        self.depends_on.iter().map(|id| id.parse()).collect()
    }
}

/// Result of a template preflight validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DeploymentPreFlight {
    /// Resources the deployment would create, in template order
    #[serde(default)]
    pub resources: Vec<DeploymentPreFlightResource>,
}

impl DeploymentPreFlight {
    /// Find a resource by name
    pub fn resource(&self, name: &str) -> Option<&DeploymentPreFlightResource> {
        self.resources
            .iter()
            .find(|r| r.base().name.as_deref() == Some(name))
    }
}

// ============================================================================
// Tests
// ============================================================================
