// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Job records

use super::common::Uuid;
use super::properties::{HiveJobProperties, JobProperties, USqlJobProperties};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Job language
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
pub enum JobType {
    USql,
    Hive,
}

/// Job lifecycle state
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
pub enum JobState {
    Accepted,
    Compiling,
    Ended,
    New,
    Queued,
    Running,
    Scheduling,
    Starting,
    Paused,
    WaitingForCapacity,
}

/// Final outcome of a job
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
pub enum JobResult {
    None,
    Succeeded,
    Cancelled,
    Failed,
}

/// Severity of a job error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SeverityTypes {
    Warning,
    Error,
}

/// Job information
///
/// This is both the body sent to build and create a job, and the record the
/// service returns for it. Fields the service fills in (identifier, submitter,
/// timestamps, state) are optional so a request can leave them out.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobInformation {
    /// Job identifier, assigned from the create path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    /// Friendly job name
    pub name: String,
    /// Job language
    #[serde(rename = "type")]
    pub job_type: JobType,
    /// User or account that submitted the job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter: Option<String>,
    /// Errors raised while compiling or running the job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<Vec<JobErrorDetails>>,
    /// Number of vertices the job may use concurrently
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree_of_parallelism: Option<i32>,
    /// Scheduling priority; lower values run first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<JobState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<JobResult>,
    /// State transitions in the order they happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_audit_records: Option<Vec<JobStateAuditRecord>>,
    /// Language-specific job properties
    pub properties: JobProperties,
}

impl JobInformation {
    /// Create a U-SQL job request with the given script
    pub fn usql(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self::new(
            name,
            JobType::USql,
            JobProperties::USql(USqlJobProperties::new(script)),
        )
    }

    /// Create a Hive job request with the given script
    pub fn hive(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self::new(
            name,
            JobType::Hive,
            JobProperties::Hive(HiveJobProperties::new(script)),
        )
    }

    fn new(name: impl Into<String>, job_type: JobType, properties: JobProperties) -> Self {
        Self {
            job_id: None,
            name: name.into(),
            job_type,
            submitter: None,
            error_message: None,
            degree_of_parallelism: None,
            priority: None,
            submit_time: None,
            start_time: None,
            end_time: None,
            state: None,
            result: None,
            state_audit_records: None,
            properties,
        }
    }

    pub fn with_degree_of_parallelism(mut self, degree_of_parallelism: i32) -> Self {
        self.degree_of_parallelism = Some(degree_of_parallelism);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the job has reached its final state
    pub fn is_terminal(&self) -> bool {
        self.state == Some(JobState::Ended)
    }

    /// The job script, regardless of language
    pub fn script(&self) -> &str {
        self.properties.script()
    }
}

/// Details of an error raised by a job
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobErrorDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<i32>,
    /// Service-specific error identifier (e.g., "E_CSC_USER_SYNTAXERROR")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_diagnostics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_error: Option<JobInnerError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityTypes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<i32>,
}

/// Inner error of a job error
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobInnerError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityTypes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_diagnostics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A recorded job state transition
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobStateAuditRecord {
    /// State the job moved into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<DateTime<Utc>>,
    /// User that caused the transition, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_usql_request_serializes_only_set_fields() {
        let job = JobInformation::usql("nightly", "@a = SELECT * FROM T;").with_priority(100);
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "nightly",
                "type": "USql",
                "priority": 100,
                "properties": {
                    "type": "USql",
                    "script": "@a = SELECT * FROM T;"
                }
            })
        );
    }

    #[test]
    fn test_service_record_deserializes() {
        let body = json!({
            "jobId": "6f0ba5d5-5b7b-4fd3-9b5e-3c9dfb7e4a11",
            "name": "hive-report",
            "type": "Hive",
            "submitter": "ops@contoso.com",
            "degreeOfParallelism": 4,
            "submitTime": "2016-02-01T10:00:00.000-08:00",
            "state": "Running",
            "result": "None",
            "stateAuditRecords": [
                {"newState": "Accepted", "timeStamp": "2016-02-01T18:00:00Z"}
            ],
            "properties": {
                "type": "Hive",
                "script": "SELECT 1;",
                "statementCount": 1
            }
        });
        let job: JobInformation = serde_json::from_value(body).unwrap();
        assert_eq!(job.job_type, JobType::Hive);
        assert_eq!(job.state, Some(JobState::Running));
        assert_eq!(job.result, Some(JobResult::None));
        assert_eq!(job.degree_of_parallelism, Some(4));
        assert_eq!(
            job.submit_time.map(|t| t.to_rfc3339()),
            Some("2016-02-01T18:00:00+00:00".to_string())
        );
        assert_eq!(job.script(), "SELECT 1;");
        assert!(!job.is_terminal());
        match job.properties {
            JobProperties::Hive(props) => assert_eq!(props.statement_count, Some(1)),
            other => panic!("expected Hive properties, got {:?}", other),
        }
    }

    #[test]
    fn test_job_state_display_matches_wire_name() {
        assert_eq!(JobState::WaitingForCapacity.to_string(), "WaitingForCapacity");
        assert_eq!("Ended".parse::<JobState>().unwrap(), JobState::Ended);
        assert_eq!(
            serde_json::to_value(JobResult::Cancelled).unwrap(),
            json!("Cancelled")
        );
    }
}
