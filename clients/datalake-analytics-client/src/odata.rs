// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! OData system query options for list operations

use chrono::{DateTime, SecondsFormat, Utc};
use datalake_analytics_api::{JobResult, JobState, JobType};
use std::fmt;

/// OData query options
///
/// Only options that are set are sent. Options are named after their wire
/// names without the `$` prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ODataQuery {
    pub filter: Option<String>,
    pub top: Option<u32>,
    pub skip: Option<u32>,
    pub expand: Option<String>,
    pub select: Option<String>,
    pub orderby: Option<String>,
    pub count: Option<bool>,
    pub search: Option<String>,
    pub format: Option<String>,
}

impl ODataQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set the filter from a builder; an empty builder clears it
    pub fn filter_by(mut self, filter: ODataFilter) -> Self {
        self.filter = filter.build();
        self
    }

    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    pub fn count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// The set options as `($name, value)` pairs, in a stable order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |name: &'static str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((name, value));
            }
        };
        push("$filter", self.filter.clone());
        push("$top", self.top.map(|v| v.to_string()));
        push("$skip", self.skip.map(|v| v.to_string()));
        push("$expand", self.expand.clone());
        push("$select", self.select.clone());
        push("$orderby", self.orderby.clone());
        push("$count", self.count.map(|v| v.to_string()));
        push("$search", self.search.clone());
        push("$format", self.format.clone());
        pairs
    }
}

/// A literal in a filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum ODataValue {
    String(String),
    Int(i64),
    Bool(bool),
    DateTime(DateTime<Utc>),
}

impl fmt::Display for ODataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Int(i) => write!(f, "{}", i),
            Self::Bool(b) => write!(f, "{}", b),
            Self::DateTime(t) => write!(
                f,
                "datetimeoffset'{}'",
                t.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
        }
    }
}

impl From<&str> for ODataValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ODataValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ODataValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for ODataValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<bool> for ODataValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<DateTime<Utc>> for ODataValue {
    fn from(t: DateTime<Utc>) -> Self {
        Self::DateTime(t)
    }
}

impl From<JobState> for ODataValue {
    fn from(state: JobState) -> Self {
        Self::String(state.to_string())
    }
}

impl From<JobResult> for ODataValue {
    fn from(result: JobResult) -> Self {
        Self::String(result.to_string())
    }
}

impl From<JobType> for ODataValue {
    fn from(job_type: JobType) -> Self {
        Self::String(job_type.to_string())
    }
}

/// Builder for `$filter` expressions
///
/// Clauses are joined with `and`:
///
/// ```
/// use datalake_analytics_client::{JobState, ODataFilter};
///
/// let filter = ODataFilter::new()
///     .eq("state", JobState::Running)
///     .eq("submitter", "o'brien@contoso.com")
///     .build();
/// assert_eq!(
///     filter.as_deref(),
///     Some("state eq 'Running' and submitter eq 'o''brien@contoso.com'")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ODataFilter {
    clauses: Vec<String>,
}

impl ODataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    fn compare(mut self, field: &str, op: &str, value: impl Into<ODataValue>) -> Self {
        self.clauses
            .push(format!("{} {} {}", field, op, value.into()));
        self
    }

    pub fn eq(self, field: &str, value: impl Into<ODataValue>) -> Self {
        self.compare(field, "eq", value)
    }

    pub fn ne(self, field: &str, value: impl Into<ODataValue>) -> Self {
        self.compare(field, "ne", value)
    }

    pub fn gt(self, field: &str, value: impl Into<ODataValue>) -> Self {
        self.compare(field, "gt", value)
    }

    pub fn ge(self, field: &str, value: impl Into<ODataValue>) -> Self {
        self.compare(field, "ge", value)
    }

    pub fn lt(self, field: &str, value: impl Into<ODataValue>) -> Self {
        self.compare(field, "lt", value)
    }

    pub fn le(self, field: &str, value: impl Into<ODataValue>) -> Self {
        self.compare(field, "le", value)
    }

    /// Add a clause verbatim
    pub fn raw(mut self, clause: impl Into<String>) -> Self {
        self.clauses.push(clause.into());
        self
    }

    /// The joined expression, `None` when there are no clauses
    pub fn build(&self) -> Option<String> {
        if self.clauses.is_empty() {
            None
        } else {
            Some(self.clauses.join(" and "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_pairs_only_set_options() {
        let query = ODataQuery::new()
            .top(10)
            .count(true)
            .select("name,state")
            .format("json");
        assert_eq!(
            query.query_pairs(),
            vec![
                ("$top", "10".to_string()),
                ("$select", "name,state".to_string()),
                ("$count", "true".to_string()),
                ("$format", "json".to_string()),
            ]
        );
        assert!(ODataQuery::new().is_empty());
    }

    #[test]
    fn test_filter_operators_and_literals() {
        let since = Utc.with_ymd_and_hms(2016, 3, 1, 8, 30, 0).unwrap();
        let filter = ODataFilter::new()
            .ge("submitTime", since)
            .ne("result", JobResult::Failed)
            .gt("degreeOfParallelism", 1i32)
            .le("priority", 1000i64)
            .eq("hasErrors", false)
            .build();
        assert_eq!(
            filter.as_deref(),
            Some(
                "submitTime ge datetimeoffset'2016-03-01T08:30:00Z' and result ne 'Failed' \
                 and degreeOfParallelism gt 1 and priority le 1000 and hasErrors eq false"
            )
        );
    }

    #[test]
    fn test_empty_filter_clears_query_filter() {
        let query = ODataQuery::new().filter("name eq 'x'").filter_by(ODataFilter::new());
        assert_eq!(query.filter, None);
    }
}
