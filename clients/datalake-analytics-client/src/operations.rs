// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Job operations trait

use async_trait::async_trait;
use datalake_analytics_api::{JobDataPath, JobInformation, JobStatistics, Uuid};

use crate::error::Result;
use crate::odata::ODataQuery;
use crate::options::RequestOptions;
use crate::response::{OperationResponse, Page};

/// Operations on the jobs of a Data Lake Analytics account
///
/// `account` is the account name; it selects the host the request is sent
/// to. Dropping a returned future aborts the request in flight.
#[async_trait]
pub trait JobOperations: Send + Sync {
    /// Get the statistics of a job
    async fn get_statistics(
        &self,
        account: &str,
        job_identity: Uuid,
        options: &RequestOptions,
    ) -> Result<OperationResponse<JobStatistics>>;

    /// Get the location of a U-SQL job's debug data
    async fn get_debug_data_path(
        &self,
        account: &str,
        job_identity: Uuid,
        options: &RequestOptions,
    ) -> Result<OperationResponse<JobDataPath>>;

    /// Compile a job without running it
    async fn build(
        &self,
        account: &str,
        parameters: &JobInformation,
        options: &RequestOptions,
    ) -> Result<OperationResponse<JobInformation>>;

    /// Submit a job under the given identifier
    async fn create(
        &self,
        account: &str,
        job_identity: Uuid,
        parameters: &JobInformation,
        options: &RequestOptions,
    ) -> Result<OperationResponse<JobInformation>>;

    /// Cancel a job
    async fn cancel(
        &self,
        account: &str,
        job_identity: Uuid,
        options: &RequestOptions,
    ) -> Result<OperationResponse<()>>;

    /// Get a job
    async fn get(
        &self,
        account: &str,
        job_identity: Uuid,
        options: &RequestOptions,
    ) -> Result<OperationResponse<JobInformation>>;

    /// List the first page of jobs matching `query`
    async fn list(
        &self,
        account: &str,
        query: &ODataQuery,
        options: &RequestOptions,
    ) -> Result<OperationResponse<Page<JobInformation>>>;

    /// Fetch the page a previous page's `next_link` points to
    async fn list_next(
        &self,
        next_page_link: &str,
        options: &RequestOptions,
    ) -> Result<OperationResponse<Page<JobInformation>>>;
}
