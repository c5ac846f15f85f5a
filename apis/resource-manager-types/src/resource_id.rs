// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Fully qualified Resource Manager resource ids
//!
//! `/subscriptions/{sub}/resourceGroups/{group}/providers/{namespace}/{type}/{name}`
//! optionally followed by `/{childType}/{childName}` pairs for nested
//! resources. The fixed segment names are matched case-insensitively, as
//! Resource Manager does.

use std::fmt;
use std::str::FromStr;

/// One `{type}/{name}` pair of a resource id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceSegment {
    pub resource_type: String,
    pub name: String,
}

/// A parsed resource id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    subscription_id: String,
    resource_group: String,
    provider_namespace: String,
    segments: Vec<ResourceSegment>,
}

impl ResourceId {
    /// Parse a resource id, validating its structure
    pub fn parse(id: &str) -> Result<Self, InvalidResourceId> {
        let invalid = || InvalidResourceId(id.to_string());

        let rest = id.strip_prefix('/').ok_or_else(invalid)?;
        let parts: Vec<&str> = rest.trim_end_matches('/').split('/').collect();

        // subscriptions/{s}/resourceGroups/{g}/providers/{ns} + at least one pair
        if parts.len() < 8 || (parts.len() - 6) % 2 != 0 {
            return Err(invalid());
        }
        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }
        if !parts[0].eq_ignore_ascii_case("subscriptions")
            || !parts[2].eq_ignore_ascii_case("resourceGroups")
            || !parts[4].eq_ignore_ascii_case("providers")
        {
            return Err(invalid());
        }

        let segments = parts[6..]
            .chunks(2)
            .map(|pair| ResourceSegment {
                resource_type: pair[0].to_string(),
                name: pair[1].to_string(),
            })
            .collect();

        Ok(Self {
            subscription_id: parts[1].to_string(),
            resource_group: parts[3].to_string(),
            provider_namespace: parts[5].to_string(),
            segments,
        })
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }

    pub fn provider_namespace(&self) -> &str {
        &self.provider_namespace
    }

    pub fn segments(&self) -> &[ResourceSegment] {
        &self.segments
    }

    /// Full resource type, e.g. "Microsoft.Web/sites/slots"
    pub fn resource_type(&self) -> String {
        let mut full = self.provider_namespace.clone();
        for segment in &self.segments {
            full.push('/');
            full.push_str(&segment.resource_type);
        }
        full
    }

    /// Name of the innermost resource
    pub fn name(&self) -> &str {
        // parse() guarantees at least one segment
        self.segments.last().map(|s| s.name.as_str()).unwrap_or_default()
    }

    /// Id of the enclosing resource, if this is a nested resource
    pub fn parent(&self) -> Option<ResourceId> {
        if self.segments.len() < 2 {
            return None;
        }
        let mut parent = self.clone();
        parent.segments.pop();
        Some(parent)
    }
}

impl FromStr for ResourceId {
    type Err = InvalidResourceId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}",
            self.subscription_id, self.resource_group, self.provider_namespace
        )?;
        for segment in &self.segments {
            write!(f, "/{}/{}", segment.resource_type, segment.name)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Invalid resource id: '{0}' (expected /subscriptions/{{id}}/resourceGroups/{{group}}/providers/{{namespace}}/{{type}}/{{name}})"
)]
pub struct InvalidResourceId(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_nested_resource() {
        let id = ResourceId::parse(
            "/subscriptions/sub-1/resourceGroups/web/providers/Microsoft.Web/sites/app/slots/staging",
        )
        .unwrap();
        assert_eq!(id.subscription_id(), "sub-1");
        assert_eq!(id.resource_group(), "web");
        assert_eq!(id.provider_namespace(), "Microsoft.Web");
        assert_eq!(id.resource_type(), "Microsoft.Web/sites/slots");
        assert_eq!(id.name(), "staging");

        let parent = id.parent().unwrap();
        assert_eq!(parent.name(), "app");
        assert_eq!(parent.resource_type(), "Microsoft.Web/sites");
        assert!(parent.parent().is_none());
    }

    #[test]
    fn test_parse_is_case_insensitive_and_display_is_canonical() {
        let id: ResourceId =
            "/SUBSCRIPTIONS/s/resourcegroups/g/PROVIDERS/Microsoft.Storage/storageAccounts/acct"
                .parse()
                .unwrap();
        assert_eq!(
            id.to_string(),
            "/subscriptions/s/resourceGroups/g/providers/Microsoft.Storage/storageAccounts/acct"
        );
    }

    #[test_case("" ; "empty")]
    #[test_case("subscriptions/s/resourceGroups/g/providers/ns/t/n" ; "missing leading slash")]
    #[test_case("/subscriptions/s/resourceGroups/g/providers/ns" ; "no resource")]
    #[test_case("/subscriptions/s/resourceGroups/g/providers/ns/t" ; "type without name")]
    #[test_case("/subscriptions/s/groups/g/providers/ns/t/n" ; "wrong group keyword")]
    #[test_case("/subscriptions//resourceGroups/g/providers/ns/t/n" ; "empty subscription")]
    fn test_parse_rejects(id: &str) {
        assert_eq!(ResourceId::parse(id), Err(InvalidResourceId(id.to_string())));
    }
}
