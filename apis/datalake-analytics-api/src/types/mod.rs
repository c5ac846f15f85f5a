// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Type definitions for the Data Lake Analytics job API
//!
//! Types are organized by domain:
//! - `common`: Error envelope, paging result, path and query parameters
//! - `job`: Job records, states, results and audit records
//! - `properties`: Per-language job properties (U-SQL and Hive)
//! - `statistics`: Job statistics and debug data paths

pub mod common;
pub mod job;
pub mod properties;
pub mod statistics;

pub use common::*;
pub use job::*;
pub use properties::*;
pub use statistics::*;
