// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! dla - command-line interface for Azure Data Lake Analytics jobs

use anyhow::Result;
use clap::{Parser, Subcommand};
use datalake_analytics_client::{Credentials, JobsClient};

mod commands;
mod config;
mod output;

use commands::{JobCommand, ProfileCommand};
use config::Overrides;

#[derive(Parser)]
#[command(
    name = "dla",
    version,
    about = "Azure Data Lake Analytics job CLI",
    long_about = "Submit, build, cancel and inspect Data Lake Analytics jobs"
)]
struct Cli {
    /// Profile to use
    #[arg(short, long, global = true, env = "DLA_PROFILE")]
    profile: Option<String>,

    /// Data Lake Analytics account name
    #[arg(short, long, global = true, env = "DLA_ACCOUNT")]
    account: Option<String>,

    /// Base URL replacing https://{account}.{dns-suffix}
    #[arg(long, global = true, env = "DLA_ENDPOINT")]
    endpoint: Option<String>,

    /// Job endpoint DNS suffix
    #[arg(long, global = true, env = "DLA_DNS_SUFFIX")]
    dns_suffix: Option<String>,

    /// Service API version
    #[arg(long, global = true, env = "DLA_API_VERSION")]
    api_version: Option<String>,

    /// Bearer token for the job service
    #[arg(long, global = true, env = "DLA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage connection profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Manage jobs
    Job {
        #[command(subcommand)]
        command: JobCommand,
    },

    /// List jobs (shortcut for 'job list')
    #[command(alias = "ls")]
    Jobs(commands::job::ListArgs),
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            account: self.account.clone(),
            endpoint: self.endpoint.clone(),
            dns_suffix: self.dns_suffix.clone(),
            api_version: self.api_version.clone(),
        }
    }

    /// Build a client and resolve the account from flags, environment or profile
    fn build_client(&self) -> Result<(JobsClient, String)> {
        let profile = config::resolve_profile(self.profile.as_deref())?;
        let (account, client_config) = config::resolve(&self.overrides(), profile.as_ref())?;

        let credentials = match &self.token {
            Some(token) => Credentials::bearer(token.clone()),
            None => Credentials::Anonymous,
        };

        let client = JobsClient::new(client_config, credentials)?;
        Ok((client, account))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("dla=debug,datalake_analytics_client=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match &cli.command {
        Commands::Profile { command } => command.clone().run(&cli.overrides(), cli.json),
        Commands::Job { command } => {
            let (client, account) = cli.build_client()?;
            command.clone().run(&client, &account, cli.json).await
        }
        Commands::Jobs(args) => {
            let (client, account) = cli.build_client()?;
            JobCommand::List(args.clone())
                .run(&client, &account, cli.json)
                .await
        }
    }
}
