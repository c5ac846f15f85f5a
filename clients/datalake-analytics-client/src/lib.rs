// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Azure Data Lake Analytics Job Client Library
//!
//! Typed async client for the job operations of a Data Lake Analytics
//! account: submit, build, cancel, inspect and list jobs.
//!
//! ## Usage
//!
//! ```ignore
//! use datalake_analytics_client::{
//!     ClientConfig, Credentials, JobInformation, JobOperations, JobsClient, RequestOptions,
//! };
//!
//! let client = JobsClient::new(ClientConfig::default(), Credentials::bearer(token))?;
//! let job = JobInformation::usql("nightly", "@a = SELECT * FROM T;");
//! let created = client
//!     .create("contosoadla", Uuid::new_v4(), &job, &RequestOptions::new())
//!     .await?;
//! println!("{:?} ({:?})", created.state, created.request_id());
//! ```
//!
//! Operations return an [`OperationResponse`], which dereferences to the
//! typed body and also carries the HTTP status and headers. Paged results
//! are returned a page at a time by [`JobOperations::list`] and
//! [`JobOperations::list_next`], or as a stream of jobs by
//! [`JobsClient::list_all`].

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod odata;
pub mod operations;
pub mod options;
pub mod response;

pub use auth::Credentials;
pub use client::JobsClient;
pub use config::{ClientConfig, validate_account_name};
pub use error::{Error, Result};
pub use odata::{ODataFilter, ODataQuery, ODataValue};
pub use operations::JobOperations;
pub use options::RequestOptions;
pub use response::{OperationResponse, Page};

// Re-export the wire types so callers need a single dependency
pub use datalake_analytics_api::types::*;
pub use datalake_analytics_api::{API_VERSION, DEFAULT_JOB_DNS_SUFFIX};
