// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Stub Data Lake Analytics job server for testing
//!
//! This crate provides a Dropshot-based HTTP server that implements the job
//! API trait over an in-memory job store. It can be used for:
//!
//! - Integration testing of the job client without an Azure account
//! - Local development and demos
//! - End-to-end testing of the `dla` CLI
//!
//! Jobs are seeded from `fixtures/jobs.json` and mutated by create and
//! cancel. Builds are evaluated without being stored: a script whose last
//! statement lacks a terminating `;` fails to compile.

use anyhow::{Context, Result};
use chrono::Utc;
use datalake_analytics_api::{
    ApiVersionQuery, JobDataPath, JobErrorDetails, JobInfoListResult, JobInformation, JobPath,
    JobProperties, JobResult, JobState, JobStateAuditRecord, JobStatistics, ListJobsQuery,
    SeverityTypes, Uuid,
};
use dropshot::{
    ClientErrorStatusCode, HttpError, HttpResponseOk, HttpResponseUpdatedNoContent, Path, Query,
    RequestContext, TypedBody,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

/// Jobs returned per list page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Submitter recorded for jobs created without one
const STUB_SUBMITTER: &str = "stub@contoso.com";

// ============================================================================
// Server Context
// ============================================================================

/// Context for the stub job server
#[derive(Debug)]
pub struct StubContext {
    /// Jobs indexed by job id
    jobs: Mutex<HashMap<Uuid, JobInformation>>,
    /// Maximum number of jobs per list page
    page_size: usize,
    /// Delay applied before answering each request
    latency: Duration,
    /// `x-ms-client-request-id` of every request, in arrival order
    client_request_ids: Mutex<Vec<String>>,
}

impl Default for StubContext {
    fn default() -> Self {
        Self::new()
    }
}

impl StubContext {
    /// Create an empty job store
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
            page_size: DEFAULT_PAGE_SIZE,
            latency: Duration::ZERO,
            client_request_ids: Mutex::new(Vec::new()),
        }
    }

    /// Create a job store seeded from `jobs.json` in the fixtures directory
    ///
    /// The file holds an array of job records as returned by the service.
    /// Every record must carry a `jobId`.
    pub fn from_fixtures(fixtures_dir: &std::path::Path) -> Result<Self> {
        let jobs_path = fixtures_dir.join("jobs.json");
        let json_str = std::fs::read_to_string(&jobs_path)
            .with_context(|| format!("Failed to read {}", jobs_path.display()))?;
        let records: Vec<JobInformation> = serde_json::from_str(&json_str)
            .with_context(|| format!("Failed to parse {}", jobs_path.display()))?;

        let mut jobs = HashMap::new();
        for job in records {
            let id = job
                .job_id
                .with_context(|| format!("Fixture job '{}' has no jobId", job.name))?;
            tracing::info!("Loaded job {} ({})", id, job.name);
            jobs.insert(id, job);
        }

        Ok(Self {
            jobs: Mutex::new(jobs),
            ..Self::new()
        })
    }

    /// Limit list pages to `page_size` jobs (at least one)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Client request ids received so far
    pub async fn client_request_ids(&self) -> Vec<String> {
        self.client_request_ids.lock().await.clone()
    }

    /// Number of stored jobs
    pub async fn job_count(&self) -> usize {
        self.jobs.lock().await.len()
    }

    /// A stored job, if present
    pub async fn job(&self, id: Uuid) -> Option<JobInformation> {
        self.jobs.lock().await.get(&id).cloned()
    }
}

// ============================================================================
// API Implementation
// ============================================================================

/// Marker type for the stub job API implementation
pub enum StubJobsApi {}

impl datalake_analytics_api::JobsApi for StubJobsApi {
    type Context = Arc<StubContext>;

    async fn get_statistics(
        rqctx: RequestContext<Self::Context>,
        path: Path<JobPath>,
        query: Query<ApiVersionQuery>,
    ) -> Result<HttpResponseOk<JobStatistics>, HttpError> {
        observe(&rqctx).await;
        require_api_version(query.into_inner().api_version.as_deref())?;
        let id = path.into_inner().job_identity;
        let jobs = rqctx.context().jobs.lock().await;
        let job = jobs.get(&id).ok_or_else(|| job_not_found(id))?;

        let statistics = match &job.properties {
            JobProperties::USql(props) => props.statistics.clone().unwrap_or_default(),
            JobProperties::Hive(_) => JobStatistics::default(),
        };
        Ok(HttpResponseOk(statistics))
    }

    async fn get_debug_data_path(
        rqctx: RequestContext<Self::Context>,
        path: Path<JobPath>,
        query: Query<ApiVersionQuery>,
    ) -> Result<HttpResponseOk<JobDataPath>, HttpError> {
        observe(&rqctx).await;
        require_api_version(query.into_inner().api_version.as_deref())?;
        let id = path.into_inner().job_identity;
        let jobs = rqctx.context().jobs.lock().await;
        let job = jobs.get(&id).ok_or_else(|| job_not_found(id))?;

        match &job.properties {
            JobProperties::USql(props) => Ok(HttpResponseOk(props.debug_data.clone().unwrap_or(
                JobDataPath {
                    job_id: Some(id),
                    command: None,
                    paths: Vec::new(),
                },
            ))),
            JobProperties::Hive(_) => Err(HttpError::for_bad_request(
                Some("DebugDataUnavailable".to_string()),
                format!("Job {} is a Hive job and has no debug data", id),
            )),
        }
    }

    async fn build_job(
        rqctx: RequestContext<Self::Context>,
        query: Query<ApiVersionQuery>,
        body: TypedBody<JobInformation>,
    ) -> Result<HttpResponseOk<JobInformation>, HttpError> {
        observe(&rqctx).await;
        require_api_version(query.into_inner().api_version.as_deref())?;
        let job = body.into_inner();
        validate_job(&job)?;

        let compiled = compile(job);
        tracing::info!(
            name = %compiled.name,
            result = ?compiled.result,
            "Built job"
        );
        Ok(HttpResponseOk(compiled))
    }

    async fn create_job(
        rqctx: RequestContext<Self::Context>,
        path: Path<JobPath>,
        query: Query<ApiVersionQuery>,
        body: TypedBody<JobInformation>,
    ) -> Result<HttpResponseOk<JobInformation>, HttpError> {
        observe(&rqctx).await;
        require_api_version(query.into_inner().api_version.as_deref())?;
        let id = path.into_inner().job_identity;
        let mut job = body.into_inner();
        validate_job(&job)?;

        let mut jobs = rqctx.context().jobs.lock().await;
        if jobs.contains_key(&id) {
            tracing::warn!(job_id = %id, "Job already exists");
            return Err(HttpError::for_client_error(
                Some("JobAlreadyExists".to_string()),
                ClientErrorStatusCode::CONFLICT,
                format!("Job {} already exists", id),
            ));
        }

        let now = Utc::now();
        job.job_id = Some(id);
        job.submitter.get_or_insert_with(|| STUB_SUBMITTER.to_string());
        job.submit_time = Some(now);
        job.start_time = None;
        job.end_time = None;
        job.state = Some(JobState::Accepted);
        job.result = Some(JobResult::None);
        job.error_message = None;
        job.state_audit_records = Some(vec![JobStateAuditRecord {
            new_state: Some(JobState::Accepted.to_string()),
            time_stamp: Some(now),
            requested_by_user: job.submitter.clone(),
            details: None,
        }]);

        jobs.insert(id, job.clone());
        tracing::info!(job_id = %id, name = %job.name, "Created job");
        Ok(HttpResponseOk(job))
    }

    async fn cancel_job(
        rqctx: RequestContext<Self::Context>,
        path: Path<JobPath>,
        query: Query<ApiVersionQuery>,
    ) -> Result<HttpResponseUpdatedNoContent, HttpError> {
        observe(&rqctx).await;
        require_api_version(query.into_inner().api_version.as_deref())?;
        let id = path.into_inner().job_identity;
        let mut jobs = rqctx.context().jobs.lock().await;
        let job = jobs.get_mut(&id).ok_or_else(|| job_not_found(id))?;

        if job.is_terminal() {
            tracing::info!(job_id = %id, "Job already ended, nothing to cancel");
            return Ok(HttpResponseUpdatedNoContent());
        }

        let now = Utc::now();
        job.state = Some(JobState::Ended);
        job.result = Some(JobResult::Cancelled);
        job.end_time = Some(now);
        job.state_audit_records
            .get_or_insert_with(Vec::new)
            .push(JobStateAuditRecord {
                new_state: Some(JobState::Ended.to_string()),
                time_stamp: Some(now),
                requested_by_user: None,
                details: Some("Cancelled by user".to_string()),
            });

        tracing::info!(job_id = %id, "Cancelled job");
        Ok(HttpResponseUpdatedNoContent())
    }

    async fn get_job(
        rqctx: RequestContext<Self::Context>,
        path: Path<JobPath>,
        query: Query<ApiVersionQuery>,
    ) -> Result<HttpResponseOk<JobInformation>, HttpError> {
        observe(&rqctx).await;
        require_api_version(query.into_inner().api_version.as_deref())?;
        let id = path.into_inner().job_identity;
        let jobs = rqctx.context().jobs.lock().await;
        let job = jobs.get(&id).ok_or_else(|| job_not_found(id))?;
        Ok(HttpResponseOk(job.clone()))
    }

    async fn list_jobs(
        rqctx: RequestContext<Self::Context>,
        query: Query<ListJobsQuery>,
    ) -> Result<HttpResponseOk<JobInfoListResult>, HttpError> {
        observe(&rqctx).await;
        let ctx = rqctx.context();
        let query = query.into_inner();
        require_api_version(query.api_version.as_deref())?;

        let clauses = match query.filter.as_deref() {
            Some(filter) => parse_filter(filter).map_err(|e| {
                HttpError::for_bad_request(Some("InvalidFilter".to_string()), e)
            })?,
            None => Vec::new(),
        };
        let descending = parse_orderby(query.orderby.as_deref()).map_err(|e| {
            HttpError::for_bad_request(Some("InvalidOrderBy".to_string()), e)
        })?;

        let mut matching: Vec<JobInformation> = ctx
            .jobs
            .lock()
            .await
            .values()
            .filter(|job| clauses.iter().all(|clause| clause.matches(job)))
            .cloned()
            .collect();

        // Ties on submit time fall back to the id so paging is stable
        matching.sort_by(|a, b| {
            a.submit_time
                .cmp(&b.submit_time)
                .then_with(|| a.job_id.cmp(&b.job_id))
        });
        if descending {
            matching.reverse();
        }

        let total = matching.len();
        let skip = query.skip.unwrap_or(0) as usize;
        let limit = query.top.map(|top| top as usize).unwrap_or(usize::MAX);
        let available = total.saturating_sub(skip);
        let take = available.min(limit).min(ctx.page_size);
        let value: Vec<JobInformation> = matching.into_iter().skip(skip).take(take).collect();

        let has_more = available > take && limit > take;
        let next_link = if has_more {
            let host = rqctx
                .request
                .headers()
                .get(http::header::HOST)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    HttpError::for_bad_request(None, "Missing Host header".to_string())
                })?;
            let remaining_top = query.top.map(|top| top.saturating_sub(take as u32));
            Some(next_link(host, &query, skip + take, remaining_top)?)
        } else {
            None
        };

        Ok(HttpResponseOk(JobInfoListResult {
            value,
            next_link,
            count: (query.count == Some(true)).then_some(total as i64),
        }))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Record the client request id and apply the configured latency
async fn observe(rqctx: &RequestContext<Arc<StubContext>>) {
    let ctx = rqctx.context();
    if let Some(id) = rqctx
        .request
        .headers()
        .get("x-ms-client-request-id")
        .and_then(|v| v.to_str().ok())
    {
        ctx.client_request_ids.lock().await.push(id.to_string());
    }
    if !ctx.latency.is_zero() {
        tokio::time::sleep(ctx.latency).await;
    }
}

fn require_api_version(api_version: Option<&str>) -> Result<(), HttpError> {
    match api_version {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(HttpError::for_bad_request(
            Some("MissingApiVersion".to_string()),
            "The api-version query parameter is required".to_string(),
        )),
    }
}

fn job_not_found(id: Uuid) -> HttpError {
    HttpError::for_client_error(
        Some("JobNotFound".to_string()),
        ClientErrorStatusCode::NOT_FOUND,
        format!("Job {} not found", id),
    )
}

fn validate_job(job: &JobInformation) -> Result<(), HttpError> {
    if job.name.trim().is_empty() || job.script().trim().is_empty() {
        return Err(HttpError::for_bad_request(
            Some("InvalidJob".to_string()),
            "A job requires a name and a script".to_string(),
        ));
    }
    Ok(())
}

/// Evaluate a build request
fn compile(mut job: JobInformation) -> JobInformation {
    let now = Utc::now();
    let script = job.script().trim_end();
    let failed = !script.ends_with(';');
    let last_line = script.lines().count() as i32;

    job.submit_time = Some(now);
    job.end_time = Some(now);
    job.state = Some(JobState::Ended);
    if failed {
        job.result = Some(JobResult::Failed);
        job.error_message = Some(vec![JobErrorDetails {
            error_id: Some("E_CSC_USER_SYNTAXERROR".to_string()),
            severity: Some(SeverityTypes::Error),
            message: Some("syntax error. Expected one of: ';'".to_string()),
            line_number: Some(last_line),
            resolution: Some("Terminate the last statement with ';'".to_string()),
            ..Default::default()
        }]);
    } else {
        job.result = Some(JobResult::Succeeded);
        job.error_message = None;
    }
    job
}

/// Absolute link to the next list page
fn next_link(
    host: &str,
    query: &ListJobsQuery,
    skip: usize,
    top: Option<u32>,
) -> Result<String, HttpError> {
    let mut url = Url::parse(&format!("http://{}/Jobs", host)).map_err(|e| {
        HttpError::for_bad_request(None, format!("Invalid Host header: {}", e))
    })?;
    {
        let mut pairs = url.query_pairs_mut();
        let carried = [
            ("api-version", query.api_version.as_deref()),
            ("$filter", query.filter.as_deref()),
            ("$expand", query.expand.as_deref()),
            ("$select", query.select.as_deref()),
            ("$orderby", query.orderby.as_deref()),
            ("$search", query.search.as_deref()),
            ("$format", query.format.as_deref()),
        ];
        for (name, value) in carried {
            if let Some(value) = value {
                pairs.append_pair(name, value);
            }
        }
        if let Some(count) = query.count {
            pairs.append_pair("$count", &count.to_string());
        }
        pairs.append_pair("$skip", &skip.to_string());
        if let Some(top) = top {
            pairs.append_pair("$top", &top.to_string());
        }
    }
    Ok(url.to_string())
}

/// Job fields a list filter may compare
#[derive(Debug, Clone, Copy, PartialEq)]
enum FilterField {
    State,
    Result,
    Submitter,
    Name,
    Type,
}

impl FilterField {
    fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "state" => Ok(Self::State),
            "result" => Ok(Self::Result),
            "submitter" => Ok(Self::Submitter),
            "name" => Ok(Self::Name),
            "type" => Ok(Self::Type),
            other => Err(format!("Unsupported filter field: '{}'", other)),
        }
    }
}

/// One `field eq 'value'` clause
#[derive(Debug, Clone, PartialEq)]
struct FilterClause {
    field: FilterField,
    value: String,
}

impl FilterClause {
    fn matches(&self, job: &JobInformation) -> bool {
        let actual = match self.field {
            FilterField::State => job.state.map(|s| s.to_string()),
            FilterField::Result => job.result.map(|r| r.to_string()),
            FilterField::Submitter => job.submitter.clone(),
            FilterField::Name => Some(job.name.clone()),
            FilterField::Type => Some(job.job_type.to_string()),
        };
        actual.as_deref() == Some(self.value.as_str())
    }
}

/// Parse `field eq 'value' [and field eq 'value' ...]`
fn parse_filter(filter: &str) -> Result<Vec<FilterClause>, String> {
    let mut clauses = Vec::new();
    let mut rest = filter.trim();
    loop {
        let (field, after) = rest
            .split_once(char::is_whitespace)
            .ok_or_else(|| format!("Incomplete filter clause: '{}'", rest))?;
        let field = FilterField::from_name(field)?;
        let after = after
            .trim_start()
            .strip_prefix("eq ")
            .ok_or_else(|| format!("Only 'eq' comparisons are supported: '{}'", rest))?;
        let (value, after) = parse_quoted(after.trim_start())?;
        clauses.push(FilterClause { field, value });

        let after = after.trim_start();
        if after.is_empty() {
            return Ok(clauses);
        }
        rest = after
            .strip_prefix("and ")
            .ok_or_else(|| format!("Expected 'and' before '{}'", after))?
            .trim_start();
    }
}

/// Parse a single-quoted literal where `''` stands for `'`
fn parse_quoted(input: &str) -> Result<(String, &str), String> {
    let body = input
        .strip_prefix('\'')
        .ok_or_else(|| format!("Expected a quoted string: '{}'", input))?;
    let mut value = String::new();
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '\'' {
            value.push(c);
        } else if let Some((_, '\'')) = chars.peek() {
            chars.next();
            value.push('\'');
        } else {
            return Ok((value, &body[i + 1..]));
        }
    }
    Err("Unterminated string literal".to_string())
}

/// `true` for newest first, the default
fn parse_orderby(orderby: Option<&str>) -> Result<bool, String> {
    let Some(orderby) = orderby else {
        return Ok(true);
    };
    let mut parts = orderby.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("submitTime"), Some("desc"), None) => Ok(true),
        (Some("submitTime"), None | Some("asc"), None) => Ok(false),
        _ => Err(format!(
            "Unsupported ordering: '{}' (expected 'submitTime asc' or 'submitTime desc')",
            orderby
        )),
    }
}

/// Create the Dropshot API description for the stub server
pub fn api_description() -> Result<dropshot::ApiDescription<Arc<StubContext>>, String> {
    datalake_analytics_api::jobs_api_mod::api_description::<StubJobsApi>()
        .map_err(|e| e.to_string())
}

// ============================================================================
// Tests
// ============================================================================
