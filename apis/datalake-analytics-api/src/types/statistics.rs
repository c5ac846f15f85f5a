// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Job statistics and debug data

use super::common::Uuid;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Execution statistics of a job
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobStatistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time_utc: Option<DateTime<Utc>>,
    /// Per-stage vertex statistics
    #[serde(default)]
    pub stages: Vec<JobStatisticsVertexStage>,
}

impl JobStatistics {
    /// Mean progress over the stages that report one, in percent
    pub fn total_progress(&self) -> Option<i32> {
        let reported: Vec<i64> = self
            .stages
            .iter()
            .filter_map(|s| s.total_progress.map(i64::from))
            .collect();
        if reported.is_empty() {
            return None;
        }
        let sum: i64 = reported.iter().sum();
        i32::try_from(sum / reported.len() as i64).ok()
    }
}

/// Statistics of one vertex stage
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobStatisticsVertexStage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_read: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_read_cross_pod: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_read_intra_pod: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_to_read: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_written: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_data_written: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vertex_data_read: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_vertex_data_read: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_discard_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_failure_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub succeeded_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i32>,
    /// ISO-8601 duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_failed_time: Option<String>,
    /// ISO-8601 duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_succeeded_time: Option<String>,
    /// Percent complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_progress: Option<i32>,
}

/// Location of a job's debug data
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobDataPath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    /// Command that downloads the debug data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default)]
    pub paths: Vec<String>,
}
