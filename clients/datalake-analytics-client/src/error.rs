// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for the Data Lake Analytics client

use datalake_analytics_api::CloudError;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use thiserror::Error;

use crate::response::request_id;

/// Errors that can occur while calling a job operation
#[derive(Error, Debug)]
pub enum Error {
    /// The request was rejected before being sent
    #[error("Invalid request: {0}")]
    Validation(String),

    /// A URL could not be built from the configuration or a next link
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header name or value was rejected
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Transport failure, including timeouts
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service error ({status}): {code}: {message}")]
    Service {
        status: StatusCode,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// A success response did not match the declared shape
    #[error("Failed to deserialize response ({status}): {source}")]
    Deserialize {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// HTTP status of a service or deserialization error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service { status, .. } | Self::Deserialize { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Service error code, e.g. "JobNotFound"
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Build a service error from a non-success response
    ///
    /// Understands the Azure `{"error": {"code", "message"}}` envelope and flat
    /// `{"code"|"error_code", "message"}` bodies; anything else becomes the
    /// message verbatim.
    pub(crate) fn from_response(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> Self {
        let fallback_code = || {
            status
                .canonical_reason()
                .unwrap_or("Unknown")
                .replace(' ', "")
        };
        let text = String::from_utf8_lossy(body).trim().to_string();

        let (code, message, body_request_id) = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody::Azure(CloudError { error })) => (error.code, error.message, None),
            Ok(ErrorBody::Flat {
                code,
                message,
                request_id,
            }) => (
                code.unwrap_or_else(fallback_code),
                message.unwrap_or_else(|| text.clone()),
                request_id,
            ),
            Err(_) => (fallback_code(), text, None),
        };

        Self::Service {
            status,
            code,
            message,
            request_id: request_id(headers).or(body_request_id),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Azure(CloudError),
    Flat {
        #[serde(default, alias = "error_code")]
        code: Option<String>,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        request_id: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn service_parts(err: Error) -> (StatusCode, String, String, Option<String>) {
        match err {
            Error::Service {
                status,
                code,
                message,
                request_id,
            } => (status, code, message, request_id),
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn test_azure_envelope() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ms-request-id", HeaderValue::from_static("req-1"));
        let body = br#"{"error": {"code": "JobNotFound", "message": "no such job"}}"#;

        let err = Error::from_response(StatusCode::NOT_FOUND, &headers, body);
        assert!(err.is_not_found());
        assert_eq!(err.code(), Some("JobNotFound"));
        assert_eq!(
            service_parts(err),
            (
                StatusCode::NOT_FOUND,
                "JobNotFound".to_string(),
                "no such job".to_string(),
                Some("req-1".to_string())
            )
        );
    }

    #[test]
    fn test_flat_body_with_error_code_alias() {
        let body = br#"{"request_id": "abc", "error_code": "InvalidJob", "message": "bad"}"#;
        let err = Error::from_response(StatusCode::BAD_REQUEST, &HeaderMap::new(), body);
        assert_eq!(
            service_parts(err),
            (
                StatusCode::BAD_REQUEST,
                "InvalidJob".to_string(),
                "bad".to_string(),
                Some("abc".to_string())
            )
        );
    }

    #[test]
    fn test_plain_text_body() {
        let err = Error::from_response(
            StatusCode::SERVICE_UNAVAILABLE,
            &HeaderMap::new(),
            b"try again later\n",
        );
        let (_, code, message, request_id) = service_parts(err);
        assert_eq!(code, "ServiceUnavailable");
        assert_eq!(message, "try again later");
        assert_eq!(request_id, None);
    }
}
