// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Language-specific job properties

use super::statistics::{JobDataPath, JobStatistics};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Job properties, discriminated by the `type` member
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "type")]
pub enum JobProperties {
    USql(USqlJobProperties),
    Hive(HiveJobProperties),
}

impl JobProperties {
    pub fn script(&self) -> &str {
        match self {
            Self::USql(props) => &props.script,
            Self::Hive(props) => &props.script,
        }
    }

    pub fn runtime_version(&self) -> Option<&str> {
        match self {
            Self::USql(props) => props.runtime_version.as_deref(),
            Self::Hive(props) => props.runtime_version.as_deref(),
        }
    }
}

/// Compilation mode of a U-SQL job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CompileMode {
    Semantic,
    Full,
    SingleBox,
}

/// Kind of resource a job depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum JobResourceType {
    VertexResource,
    StatisticsResource,
}

/// A resource used by a job
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<JobResourceType>,
}

/// U-SQL job properties
///
/// Durations (`total*Time`) are ISO-8601 strings as sent by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct USqlJobProperties {
    /// The U-SQL script
    pub script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<JobResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<JobStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_data: Option<JobDataPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algebra_file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_compilation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_paused_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_queued_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_running_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_process_node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yarn_application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yarn_application_time_stamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile_mode: Option<CompileMode>,
}

impl USqlJobProperties {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Default::default()
        }
    }
}

/// Hive job properties
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HiveJobProperties {
    /// The Hive script
    pub script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,
    /// Location of the job logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_location: Option<String>,
    /// Location of the job output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_statement_count: Option<i32>,
}

impl HiveJobProperties {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Default::default()
        }
    }
}
