// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Azure Data Lake Analytics Job API Trait Definition
//!
//! **IMPORTANT**: This trait defines the job-management subset of the Data Lake
//! Analytics REST API (version 2015-11-01-preview). The actual API is served by
//! Azure from `https://{accountName}.{adlaJobDnsSuffix}`. This trait exists to:
//! 1. Document the exact job API surface the client depends on
//! 2. Share the wire types between the client, the stub server and the CLI
//! 3. Enable stub implementations for testing
//!
//! Reference: https://learn.microsoft.com/rest/api/datalakeanalytics/job

use dropshot::{
    HttpError, HttpResponseOk, HttpResponseUpdatedNoContent, Path, Query, RequestContext,
    TypedBody,
};

pub mod types;
pub use types::*;

/// API version the job operations are defined against
pub const API_VERSION: &str = "2015-11-01-preview";

/// DNS suffix of the public-cloud job endpoint
pub const DEFAULT_JOB_DNS_SUFFIX: &str = "azuredatalakeanalytics.net";

/// Data Lake Analytics job API
///
/// Every endpoint takes the `api-version` query parameter. The account is not
/// part of the path: it selects the host the request is sent to.
#[dropshot::api_description]
pub trait JobsApi {
    /// Context type for request handlers
    type Context: Send + Sync + 'static;

    /// Get the statistics of a job
    #[endpoint {
        method = GET,
        path = "/Jobs/{job_identity}/GetStatistics",
        tags = ["jobs"],
    }]
    async fn get_statistics(
        rqctx: RequestContext<Self::Context>,
        path: Path<JobPath>,
        query: Query<ApiVersionQuery>,
    ) -> Result<HttpResponseOk<JobStatistics>, HttpError>;

    /// Get the debug data location of a U-SQL job
    #[endpoint {
        method = GET,
        path = "/Jobs/{job_identity}/GetDebugDataPath",
        tags = ["jobs"],
    }]
    async fn get_debug_data_path(
        rqctx: RequestContext<Self::Context>,
        path: Path<JobPath>,
        query: Query<ApiVersionQuery>,
    ) -> Result<HttpResponseOk<JobDataPath>, HttpError>;

    /// Build (compile) a job without running it
    ///
    /// Validates the job as a submission would, returning the compiled job
    /// information including any compilation errors.
    #[endpoint {
        method = POST,
        path = "/BuildJob",
        tags = ["jobs"],
    }]
    async fn build_job(
        rqctx: RequestContext<Self::Context>,
        query: Query<ApiVersionQuery>,
        body: TypedBody<JobInformation>,
    ) -> Result<HttpResponseOk<JobInformation>, HttpError>;

    /// Submit a job for computation under the given identifier
    #[endpoint {
        method = PUT,
        path = "/Jobs/{job_identity}",
        tags = ["jobs"],
    }]
    async fn create_job(
        rqctx: RequestContext<Self::Context>,
        path: Path<JobPath>,
        query: Query<ApiVersionQuery>,
        body: TypedBody<JobInformation>,
    ) -> Result<HttpResponseOk<JobInformation>, HttpError>;

    /// Cancel a running job
    #[endpoint {
        method = POST,
        path = "/Jobs/{job_identity}/CancelJob",
        tags = ["jobs"],
    }]
    async fn cancel_job(
        rqctx: RequestContext<Self::Context>,
        path: Path<JobPath>,
        query: Query<ApiVersionQuery>,
    ) -> Result<HttpResponseUpdatedNoContent, HttpError>;

    /// Get a job
    #[endpoint {
        method = GET,
        path = "/Jobs/{job_identity}",
        tags = ["jobs"],
    }]
    async fn get_job(
        rqctx: RequestContext<Self::Context>,
        path: Path<JobPath>,
        query: Query<ApiVersionQuery>,
    ) -> Result<HttpResponseOk<JobInformation>, HttpError>;

    /// List jobs, one page at a time
    ///
    /// Supports the OData system query options. Follow `nextLink` in the
    /// response to fetch the next page.
    #[endpoint {
        method = GET,
        path = "/Jobs",
        tags = ["jobs"],
    }]
    async fn list_jobs(
        rqctx: RequestContext<Self::Context>,
        query: Query<ListJobsQuery>,
    ) -> Result<HttpResponseOk<JobInfoListResult>, HttpError>;
}
