// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Integration tests for the job client using the stub job server
//!
//! Each test starts its own stub on an ephemeral port so tests that create or
//! cancel jobs do not interfere with each other.

use datalake_analytics_client::{
    ClientConfig, Credentials, Error, JobInformation, JobOperations, JobResult, JobState,
    JobsClient, ODataFilter, ODataQuery, RequestOptions, Uuid,
};
use datalake_analytics_stub_server::{StubContext, api_description};
use futures_util::TryStreamExt;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

const ACCOUNT: &str = "contosoadla";
const ENDED_JOB: &str = "6f0ba5d5-5b7b-4fd3-9b5e-3c9dfb7e4a11";
const RUNNING_JOB: &str = "1d2c9e1a-7c4b-4d3e-8f1a-2b3c4d5e6f70";
const HIVE_JOB: &str = "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d";

struct TestStub {
    _server: dropshot::HttpServer<Arc<StubContext>>,
    context: Arc<StubContext>,
    client: JobsClient,
}

fn fixtures() -> StubContext {
    let fixtures_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../services/datalake-analytics-stub-server/fixtures");
    StubContext::from_fixtures(&fixtures_dir).expect("load fixtures")
}

async fn start_stub(page_size: usize) -> TestStub {
    start_stub_with(fixtures().with_page_size(page_size)).await
}

async fn start_stub_with(context: StubContext) -> TestStub {
    let context = Arc::new(context);

    let config = dropshot::ConfigDropshot {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        default_request_body_max_bytes: 1024 * 1024,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };
    let log = dropshot::ConfigLogging::StderrTerminal {
        level: dropshot::ConfigLoggingLevel::Warn,
    }
    .to_logger("dla-client-test")
    .expect("logger");

    let server = dropshot::HttpServerStarter::new(
        &config,
        api_description().expect("api description"),
        context.clone(),
        &log,
    )
    .expect("start stub server")
    .start();

    let client = JobsClient::new(
        ClientConfig::default().with_endpoint(format!("http://{}", server.local_addr())),
        Credentials::bearer("test-token"),
    )
    .expect("client");

    TestStub {
        _server: server,
        context,
        client,
    }
}

fn id(s: &str) -> Uuid {
    s.parse().unwrap()
}

fn no_options() -> RequestOptions {
    RequestOptions::new()
}

#[tokio::test]
async fn test_get_job() {
    let stub = start_stub(50).await;
    let response = stub
        .client
        .get(ACCOUNT, id(ENDED_JOB), &no_options())
        .await
        .expect("get job");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.request_id().is_some());
    assert_eq!(response.name, "daily-sales-rollup");
    assert_eq!(response.state, Some(JobState::Ended));
    assert_eq!(response.result, Some(JobResult::Succeeded));
}

#[tokio::test]
async fn test_get_unknown_job_is_service_error() {
    let stub = start_stub(50).await;
    let err = stub
        .client
        .get(ACCOUNT, Uuid::new_v4(), &no_options())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.code(), Some("JobNotFound"));
    match err {
        Error::Service { request_id, .. } => assert!(request_id.is_some()),
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_statistics() {
    let stub = start_stub(50).await;
    let statistics = stub
        .client
        .get_statistics(ACCOUNT, id(RUNNING_JOB), &no_options())
        .await
        .expect("get statistics")
        .into_inner();

    assert_eq!(statistics.stages.len(), 1);
    assert_eq!(statistics.stages[0].stage_name.as_deref(), Some("SV1_Extract"));
    assert_eq!(statistics.total_progress(), Some(40));
}

#[tokio::test]
async fn test_get_debug_data_path() {
    let stub = start_stub(50).await;
    let path = stub
        .client
        .get_debug_data_path(ACCOUNT, id(ENDED_JOB), &no_options())
        .await
        .expect("get debug data path");
    assert_eq!(path.job_id, Some(id(ENDED_JOB)));
    assert_eq!(path.paths.len(), 1);

    let err = stub
        .client
        .get_debug_data_path(ACCOUNT, id(HIVE_JOB), &no_options())
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some("DebugDataUnavailable"));
}

#[tokio::test]
async fn test_build_reports_compile_errors() {
    let stub = start_stub(50).await;

    let ok = stub
        .client
        .build(
            ACCOUNT,
            &JobInformation::usql("check", "@a = SELECT 1 AS x FROM T;"),
            &no_options(),
        )
        .await
        .expect("build");
    assert_eq!(ok.result, Some(JobResult::Succeeded));

    let failed = stub
        .client
        .build(
            ACCOUNT,
            &JobInformation::usql("check", "@a = SELECT 1 AS x FROM T"),
            &no_options(),
        )
        .await
        .expect("build");
    assert_eq!(failed.result, Some(JobResult::Failed));
    assert_eq!(failed.error_message.as_ref().map(Vec::len), Some(1));

    // Builds are never stored
    assert_eq!(stub.context.job_count().await, 5);
}

#[tokio::test]
async fn test_create_get_and_cancel() {
    let stub = start_stub(50).await;
    let job_id = Uuid::new_v4();
    let job = JobInformation::usql("adhoc", "@a = SELECT 1 AS x FROM T;")
        .with_degree_of_parallelism(2)
        .with_priority(10);

    let created = stub
        .client
        .create(ACCOUNT, job_id, &job, &no_options())
        .await
        .expect("create job");
    assert_eq!(created.job_id, Some(job_id));
    assert_eq!(created.state, Some(JobState::Accepted));
    assert_eq!(created.degree_of_parallelism, Some(2));

    let duplicate = stub
        .client
        .create(ACCOUNT, job_id, &job, &no_options())
        .await
        .unwrap_err();
    assert_eq!(duplicate.code(), Some("JobAlreadyExists"));

    let cancelled = stub
        .client
        .cancel(ACCOUNT, job_id, &no_options())
        .await
        .expect("cancel job");
    assert!(cancelled.status().is_success());

    let fetched = stub
        .client
        .get(ACCOUNT, job_id, &no_options())
        .await
        .expect("get job")
        .into_inner();
    assert_eq!(fetched.state, Some(JobState::Ended));
    assert_eq!(fetched.result, Some(JobResult::Cancelled));
    assert_eq!(fetched.state_audit_records.map(|r| r.len()), Some(2));

    // Cancelling an ended job is a no-op
    stub.client
        .cancel(ACCOUNT, job_id, &no_options())
        .await
        .expect("cancel ended job");
}

#[tokio::test]
async fn test_cancel_unknown_job() {
    let stub = start_stub(50).await;
    let err = stub
        .client
        .cancel(ACCOUNT, Uuid::new_v4(), &no_options())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_invalid_job_never_reaches_service() {
    let stub = start_stub(50).await;
    let err = stub
        .client
        .create(
            ACCOUNT,
            Uuid::new_v4(),
            &JobInformation::usql("", "@a = SELECT 1;"),
            &no_options(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(stub.context.job_count().await, 5);
}

#[tokio::test]
async fn test_list_with_filter_and_count() {
    let stub = start_stub(50).await;
    let query = ODataQuery::new()
        .filter_by(ODataFilter::new().eq("state", JobState::Running))
        .orderby("submitTime asc")
        .count(true);

    let page = stub
        .client
        .list(ACCOUNT, &query, &no_options())
        .await
        .expect("list jobs")
        .into_inner();

    let names: Vec<&str> = page.value.iter().map(|job| job.name.as_str()).collect();
    assert_eq!(names, vec!["clickstream-sessionize", "hive-log-compaction"]);
    assert_eq!(page.count, Some(2));
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_list_next_follows_links() {
    let stub = start_stub(2).await;
    let query = ODataQuery::new().orderby("submitTime asc");

    let first = stub
        .client
        .list(ACCOUNT, &query, &no_options())
        .await
        .expect("first page")
        .into_inner();
    assert_eq!(first.value.len(), 2);
    let link = first.next_link.clone().expect("next link");

    let second = stub
        .client
        .list_next(&link, &no_options())
        .await
        .expect("second page")
        .into_inner();
    assert_eq!(second.value.len(), 2);
    assert_eq!(second.value[0].name, "hive-inventory-report");

    let third = stub
        .client
        .list_next(second.next_link.as_deref().expect("next link"), &no_options())
        .await
        .expect("third page")
        .into_inner();
    assert_eq!(third.value.len(), 1);
    assert!(!third.has_next());
}

#[tokio::test]
async fn test_list_all_streams_every_page() {
    let stub = start_stub(2).await;
    let jobs: Vec<JobInformation> = stub
        .client
        .list_all(ACCOUNT, &ODataQuery::new(), &no_options())
        .try_collect()
        .await
        .expect("list all");

    assert_eq!(jobs.len(), 5);
    // Newest first by default
    assert_eq!(jobs[0].name, "hive-log-compaction");
    assert_eq!(jobs[4].name, "daily-sales-rollup");
}

#[tokio::test]
async fn test_custom_headers_reach_the_service() {
    let stub = start_stub(50).await;
    let options = RequestOptions::new()
        .header("x-ms-client-request-id", "caller-chosen-id")
        .timeout(Duration::from_secs(5));

    let response = stub
        .client
        .get(ACCOUNT, id(ENDED_JOB), &options)
        .await
        .expect("get job");
    assert_eq!(response.name, "daily-sales-rollup");
    assert_eq!(
        stub.context.client_request_ids().await,
        vec!["caller-chosen-id".to_string()]
    );

    // Without a caller header every request gets a fresh id
    stub.client
        .get(ACCOUNT, id(ENDED_JOB), &no_options())
        .await
        .expect("get job");
    let ids = stub.context.client_request_ids().await;
    assert_eq!(ids.len(), 2);
    assert!(ids[1].parse::<Uuid>().is_ok());
}

#[tokio::test]
async fn test_request_timeout_is_applied() {
    let stub = start_stub_with(fixtures().with_latency(Duration::from_secs(5))).await;
    let options = RequestOptions::new().timeout(Duration::from_millis(100));

    let err = stub
        .client
        .get(ACCOUNT, id(ENDED_JOB), &options)
        .await
        .unwrap_err();
    match err {
        Error::Http(e) => assert!(e.is_timeout(), "expected timeout, got {:?}", e),
        other => panic!("expected HTTP timeout, got {:?}", other),
    }
}
