// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Common types used across the job API

use super::job::JobInformation;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// UUID type
pub type Uuid = uuid::Uuid;

/// Azure error response envelope
///
/// Non-2xx responses from the service carry a body of the form
/// `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CloudError {
    pub error: CloudErrorBody,
}

/// Body of an Azure error response
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CloudErrorBody {
    /// Machine-readable error code (e.g., "JobNotFound")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Target of the error, usually the offending property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Nested error details
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CloudErrorBody>,
}

/// One page of job records
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobInfoListResult {
    /// Jobs on this page
    #[serde(default)]
    pub value: Vec<JobInformation>,
    /// Absolute link to the next page, absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    /// Total number of matching jobs, present only when `$count=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

/// Path parameter for single-job operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct JobPath {
    /// Job identifier
    pub job_identity: Uuid,
}

/// Query parameters accepted by every single-job operation
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ApiVersionQuery {
    /// Service API version
    #[serde(rename = "api-version")]
    pub api_version: Option<String>,
}

/// Query parameters for the job list operation
///
/// The OData system query options keep their `$` prefixed names on the wire.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListJobsQuery {
    /// Service API version
    #[serde(rename = "api-version")]
    pub api_version: Option<String>,
    /// OData filter expression, e.g. `state eq 'Running'`
    #[serde(rename = "$filter")]
    pub filter: Option<String>,
    /// Maximum number of jobs to return
    #[serde(rename = "$top")]
    pub top: Option<u32>,
    /// Number of jobs to skip
    #[serde(rename = "$skip")]
    pub skip: Option<u32>,
    /// Related entities to expand inline
    #[serde(rename = "$expand")]
    pub expand: Option<String>,
    /// Comma-separated list of properties to return
    #[serde(rename = "$select")]
    pub select: Option<String>,
    /// Ordering expression, e.g. `submitTime desc`
    #[serde(rename = "$orderby")]
    pub orderby: Option<String>,
    /// Whether to include the total count of matching jobs
    #[serde(rename = "$count")]
    pub count: Option<bool>,
    /// Free-text search expression
    #[serde(rename = "$search")]
    pub search: Option<String>,
    /// Response format, e.g. `json`
    #[serde(rename = "$format")]
    pub format: Option<String>,
}
