// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Typed operation responses and list pages

use odata_pagination::Paginated;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Service-assigned request id header
pub const REQUEST_ID_HEADER: &str = "x-ms-request-id";

/// Client-generated request id header
pub const CLIENT_REQUEST_ID_HEADER: &str = "x-ms-client-request-id";

/// Request id header used by servers that are not Azure (e.g. Dropshot)
const FALLBACK_REQUEST_ID_HEADER: &str = "x-request-id";

pub(crate) fn request_id(headers: &HeaderMap) -> Option<String> {
    [REQUEST_ID_HEADER, FALLBACK_REQUEST_ID_HEADER]
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// A typed response together with its HTTP status and headers
#[derive(Debug, Clone)]
pub struct OperationResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: T,
}

impl<T> OperationResponse<T> {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: T) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request id assigned by the service, for support requests
    pub fn request_id(&self) -> Option<String> {
        request_id(&self.headers)
    }

    /// Client request id echoed back by the service
    pub fn client_request_id(&self) -> Option<&str> {
        self.headers
            .get(CLIENT_REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &T {
        &self.body
    }

    /// Consume the response, returning the body
    pub fn into_inner(self) -> T {
        self.body
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResponse<U> {
        OperationResponse {
            status: self.status,
            headers: self.headers,
            body: f(self.body),
        }
    }
}

impl<T> Deref for OperationResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.body
    }
}

/// One page of a list result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    /// Link to the next page, absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    /// Total number of matching items, when requested with `$count`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next_link
            .as_deref()
            .is_some_and(|l| !l.trim().is_empty())
    }
}

impl<T> Paginated for Page<T> {
    type Item = T;

    fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    fn into_items(self) -> Vec<T> {
        self.value
    }
}
