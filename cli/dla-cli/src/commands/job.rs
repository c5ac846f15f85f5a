// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Job commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use datalake_analytics_client::{
    JobInformation, JobOperations, JobResult, JobState, JobStatistics, JobType, JobsClient,
    ODataFilter, ODataQuery, RequestOptions, Uuid,
};
use futures_util::TryStreamExt;
use std::path::PathBuf;

use crate::output::{format_time, or_dash, print_json, table};

#[derive(Subcommand, Clone)]
pub enum JobCommand {
    /// List jobs
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a job
    Get {
        /// Job ID
        id: Uuid,
    },

    /// Submit a job
    Submit(SubmitArgs),

    /// Compile a job without running it
    Build(JobArgs),

    /// Cancel a job
    Cancel {
        /// Job ID
        id: Uuid,
    },

    /// Show the statistics of a job
    #[command(alias = "statistics")]
    Stats {
        /// Job ID
        id: Uuid,
    },

    /// Show where the debug data of a U-SQL job is stored
    DebugPath {
        /// Job ID
        id: Uuid,
    },
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Only jobs in this state (e.g. Running, Ended)
    #[arg(long)]
    pub state: Option<JobState>,

    /// Only jobs with this result (e.g. Succeeded, Failed)
    #[arg(long)]
    pub result: Option<JobResult>,

    /// Only jobs submitted by this user
    #[arg(long)]
    pub submitter: Option<String>,

    /// Only jobs with this name
    #[arg(long)]
    pub name: Option<String>,

    /// Only jobs of this type (USql, Hive)
    #[arg(long = "type")]
    pub job_type: Option<JobType>,

    /// Additional OData filter clause, joined with `and`
    #[arg(long)]
    pub filter: Option<String>,

    /// Maximum number of jobs to return
    #[arg(long)]
    pub top: Option<u32>,

    /// Number of jobs to skip
    #[arg(long)]
    pub skip: Option<u32>,

    /// Ordering, e.g. "submitTime desc"
    #[arg(long)]
    pub orderby: Option<String>,

    /// Comma-separated list of properties to return
    #[arg(long)]
    pub select: Option<String>,

    /// Report the total number of matching jobs
    #[arg(long)]
    pub count: bool,

    /// Follow next links and list every page
    #[arg(long)]
    pub all: bool,
}

impl ListArgs {
    fn query(&self) -> ODataQuery {
        let mut filter = ODataFilter::new();
        if let Some(state) = self.state {
            filter = filter.eq("state", state);
        }
        if let Some(result) = self.result {
            filter = filter.eq("result", result);
        }
        if let Some(submitter) = &self.submitter {
            filter = filter.eq("submitter", submitter.as_str());
        }
        if let Some(name) = &self.name {
            filter = filter.eq("name", name.as_str());
        }
        if let Some(job_type) = self.job_type {
            filter = filter.eq("type", job_type);
        }
        if let Some(raw) = &self.filter {
            filter = filter.raw(raw.clone());
        }

        ODataQuery {
            filter: filter.build(),
            top: self.top,
            skip: self.skip,
            orderby: self.orderby.clone(),
            select: self.select.clone(),
            count: self.count.then_some(true),
            ..Default::default()
        }
    }
}

/// Job definition shared by submit and build
#[derive(Args, Clone)]
pub struct JobArgs {
    /// Job name
    #[arg(long)]
    pub name: String,

    /// Job script
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub script: Option<String>,

    /// Read the job script from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Job language (USql, Hive)
    #[arg(long = "type", default_value = "USql")]
    pub job_type: JobType,

    /// Number of vertices the job may use concurrently
    #[arg(long)]
    pub degree_of_parallelism: Option<i32>,

    /// Scheduling priority; lower values run first
    #[arg(long)]
    pub priority: Option<i32>,
}

impl JobArgs {
    fn job_information(&self) -> Result<JobInformation> {
        let script = match (&self.script, &self.file) {
            (Some(script), _) => script.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read script {}", path.display()))?,
            (None, None) => anyhow::bail!("Either --script or --file is required"),
        };

        let mut job = match self.job_type {
            JobType::USql => JobInformation::usql(&self.name, script),
            JobType::Hive => JobInformation::hive(&self.name, script),
        };
        if let Some(dop) = self.degree_of_parallelism {
            job = job.with_degree_of_parallelism(dop);
        }
        if let Some(priority) = self.priority {
            job = job.with_priority(priority);
        }
        Ok(job)
    }
}

#[derive(Args, Clone)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub job: JobArgs,

    /// Job ID to submit under (generated when omitted)
    #[arg(long)]
    pub id: Option<Uuid>,
}

impl JobCommand {
    pub async fn run(self, client: &JobsClient, account: &str, use_json: bool) -> Result<()> {
        let options = RequestOptions::new();
        match self {
            Self::List(args) => list_jobs(args, client, account, &options, use_json).await,
            Self::Get { id } => {
                let job = client.get(account, id, &options).await?.into_inner();
                print_job(&job, use_json)
            }
            Self::Submit(args) => {
                let id = args.id.unwrap_or_else(Uuid::new_v4);
                let job = args.job.job_information()?;
                let created = client.create(account, id, &job, &options).await?;
                tracing::debug!(request_id = ?created.request_id(), "Submitted job {}", id);
                print_job(&created, use_json)
            }
            Self::Build(args) => {
                let job = args.job_information()?;
                let built = client.build(account, &job, &options).await?.into_inner();
                print_job(&built, use_json)?;
                if built.result == Some(JobResult::Failed) {
                    anyhow::bail!("Job '{}' failed to compile", built.name);
                }
                Ok(())
            }
            Self::Cancel { id } => {
                client.cancel(account, id, &options).await?;
                if use_json {
                    print_json(&serde_json::json!({ "jobId": id, "cancelled": true }))
                } else {
                    println!("Cancelled job {}", id);
                    Ok(())
                }
            }
            Self::Stats { id } => {
                let stats = client.get_statistics(account, id, &options).await?.into_inner();
                print_statistics(&stats, use_json)
            }
            Self::DebugPath { id } => {
                let path = client
                    .get_debug_data_path(account, id, &options)
                    .await?
                    .into_inner();
                if use_json {
                    return print_json(&path);
                }
                println!("Command: {}", path.command.as_deref().unwrap_or("-"));
                for p in &path.paths {
                    println!("{}", p);
                }
                Ok(())
            }
        }
    }
}

async fn list_jobs(
    args: ListArgs,
    client: &JobsClient,
    account: &str,
    options: &RequestOptions,
    use_json: bool,
) -> Result<()> {
    let query = args.query();

    if args.all {
        let jobs: Vec<JobInformation> = client
            .list_all(account, &query, options)
            .try_collect()
            .await?;
        if use_json {
            return print_json(&jobs);
        }
        print_job_table(&jobs);
        return Ok(());
    }

    let page = client.list(account, &query, options).await?.into_inner();
    if use_json {
        return print_json(&page);
    }
    print_job_table(&page.value);
    if let Some(count) = page.count {
        println!("{} matching job(s)", count);
    }
    if page.has_next() {
        eprintln!("More jobs are available; use --all to list every page");
    }
    Ok(())
}

fn print_job_table(jobs: &[JobInformation]) {
    let mut tbl = table::create_table(&[
        "ID",
        "NAME",
        "TYPE",
        "STATE",
        "RESULT",
        "SUBMITTER",
        "SUBMITTED",
    ]);
    for job in jobs {
        tbl.add_row(vec![
            or_dash(job.job_id),
            job.name.clone(),
            job.job_type.to_string(),
            or_dash(job.state),
            or_dash(job.result),
            or_dash(job.submitter.as_deref()),
            format_time(job.submit_time),
        ]);
    }
    table::print_table(tbl);
}

fn print_job(job: &JobInformation, use_json: bool) -> Result<()> {
    if use_json {
        return print_json(job);
    }

    table::print_details(vec![
        ("ID", or_dash(job.job_id)),
        ("Name", job.name.clone()),
        ("Type", job.job_type.to_string()),
        ("State", or_dash(job.state)),
        ("Result", or_dash(job.result)),
        ("Submitter", or_dash(job.submitter.as_deref())),
        ("Parallelism", or_dash(job.degree_of_parallelism)),
        ("Priority", or_dash(job.priority)),
        ("Submitted", format_time(job.submit_time)),
        ("Started", format_time(job.start_time)),
        ("Ended", format_time(job.end_time)),
    ]);

    for error in job.error_message.iter().flatten() {
        eprintln!(
            "error {} (line {}): {}",
            error.error_id.as_deref().unwrap_or("-"),
            or_dash(error.line_number),
            error.message.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn print_statistics(stats: &JobStatistics, use_json: bool) -> Result<()> {
    if use_json {
        return print_json(stats);
    }

    let mut tbl = table::create_table(&[
        "STAGE",
        "PROGRESS",
        "SUCCEEDED",
        "RUNNING",
        "FAILED",
        "TOTAL",
        "READ",
        "WRITTEN",
    ]);
    for stage in &stats.stages {
        tbl.add_row(vec![
            or_dash(stage.stage_name.as_deref()),
            stage
                .total_progress
                .map(|p| format!("{}%", p))
                .unwrap_or_else(|| "-".to_string()),
            or_dash(stage.succeeded_count),
            or_dash(stage.running_count),
            or_dash(stage.failed_count),
            or_dash(stage.total_count),
            or_dash(stage.data_read),
            or_dash(stage.data_written),
        ]);
    }
    table::print_table(tbl);

    println!("Last updated: {}", format_time(stats.last_update_time_utc));
    if let Some(progress) = stats.total_progress() {
        println!("Total progress: {}%", progress);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_args() -> ListArgs {
        ListArgs {
            state: None,
            result: None,
            submitter: None,
            name: None,
            job_type: None,
            filter: None,
            top: None,
            skip: None,
            orderby: None,
            select: None,
            count: false,
            all: false,
        }
    }

    #[test]
    fn test_list_query_joins_filters() {
        let args = ListArgs {
            state: Some(JobState::Ended),
            submitter: Some("o'brien@contoso.com".to_string()),
            filter: Some("priority lt 100".to_string()),
            top: Some(5),
            count: true,
            ..list_args()
        };
        let query = args.query();
        assert_eq!(
            query.filter.as_deref(),
            Some("state eq 'Ended' and submitter eq 'o''brien@contoso.com' and priority lt 100")
        );
        assert_eq!(query.top, Some(5));
        assert_eq!(query.count, Some(true));
    }

    #[test]
    fn test_list_query_empty() {
        assert!(list_args().query().is_empty());
    }

    #[test]
    fn test_job_information_from_args() {
        let args = JobArgs {
            name: "report".to_string(),
            script: Some("SELECT 1;".to_string()),
            file: None,
            job_type: JobType::Hive,
            degree_of_parallelism: Some(3),
            priority: None,
        };
        let job = args.job_information().unwrap();
        assert_eq!(job.job_type, JobType::Hive);
        assert_eq!(job.script(), "SELECT 1;");
        assert_eq!(job.degree_of_parallelism, Some(3));
    }
}
