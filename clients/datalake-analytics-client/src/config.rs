// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client configuration

use datalake_analytics_api::{API_VERSION, DEFAULT_JOB_DNS_SUFFIX};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Client configuration
///
/// Every field has a default, so a partial JSON document deserializes:
///
/// ```
/// use datalake_analytics_client::ClientConfig;
///
/// let config: ClientConfig =
///     serde_json::from_str(r#"{"endpoint": "http://127.0.0.1:9091"}"#).unwrap();
/// assert_eq!(config.api_version, "2015-11-01-preview");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// DNS suffix of the job endpoint; requests go to `https://{account}.{suffix}`
    pub adla_job_dns_suffix: String,

    /// Service API version sent with every request
    pub api_version: String,

    /// Base URL that replaces `https://{account}.{suffix}` (stub servers,
    /// private endpoints)
    pub endpoint: Option<String>,

    /// Value of the `accept-language` header
    pub accept_language: String,

    /// Whether to send a fresh `x-ms-client-request-id` with every request
    pub generate_client_request_id: bool,

    /// Overall request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            adla_job_dns_suffix: DEFAULT_JOB_DNS_SUFFIX.to_string(),
            api_version: API_VERSION.to_string(),
            endpoint: None,
            accept_language: "en-US".to_string(),
            generate_client_request_id: true,
            timeout_secs: Some(60),
            user_agent: format!("datalake-analytics-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Send every request to `endpoint` instead of the account host
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_dns_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.adla_job_dns_suffix = suffix.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Check the configuration before a client is built from it
    pub fn validate(&self) -> Result<()> {
        if self.api_version.trim().is_empty() {
            return Err(Error::Validation("api_version must not be empty".to_string()));
        }
        if let Some(endpoint) = &self.endpoint {
            let url = Url::parse(endpoint)?;
            if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
                return Err(Error::Validation(format!(
                    "endpoint must be an http(s) base URL: {}",
                    endpoint
                )));
            }
        } else if self.adla_job_dns_suffix.trim().is_empty()
            || self.adla_job_dns_suffix.contains('/')
        {
            return Err(Error::Validation(format!(
                "invalid job DNS suffix: '{}'",
                self.adla_job_dns_suffix
            )));
        }
        Ok(())
    }

    /// Base URL of the given account's job endpoint
    pub(crate) fn account_endpoint(&self, account: &str) -> Result<Url> {
        validate_account_name(account)?;
        let url = match &self.endpoint {
            Some(endpoint) => Url::parse(endpoint)?,
            None => Url::parse(&format!(
                "https://{}.{}/",
                account, self.adla_job_dns_suffix
            ))?,
        };
        Ok(url)
    }
}

/// Data Lake Analytics account names are 3 to 24 lowercase letters and
/// digits. The name becomes part of the request host.
pub fn validate_account_name(account: &str) -> Result<()> {
    let valid_len = (3..=24).contains(&account.len());
    let valid_chars = account
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if valid_len && valid_chars {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "invalid account name '{}' (expected 3-24 lowercase letters and digits)",
            account
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_endpoint_uses_account_host() {
        let url = ClientConfig::default()
            .account_endpoint("contosoadla")
            .unwrap();
        assert_eq!(url.as_str(), "https://contosoadla.azuredatalakeanalytics.net/");
    }

    #[test]
    fn test_endpoint_override_ignores_account_host() {
        let config = ClientConfig::default().with_endpoint("http://127.0.0.1:9091");
        config.validate().unwrap();
        let url = config.account_endpoint("contosoadla").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9091/");
    }

    #[test_case("ab" ; "too short")]
    #[test_case("abcdefghijklmnopqrstuvwxy" ; "too long")]
    #[test_case("Contoso" ; "uppercase")]
    #[test_case("evil.com/x" ; "host injection")]
    #[test_case("my-account" ; "hyphen")]
    fn test_invalid_account_names(account: &str) {
        assert!(matches!(
            validate_account_name(account),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        assert!(ClientConfig::default().with_api_version(" ").validate().is_err());
        assert!(ClientConfig::default().with_dns_suffix("").validate().is_err());
        assert!(
            ClientConfig::default()
                .with_endpoint("ftp://example.com")
                .validate()
                .is_err()
        );
        assert!(
            ClientConfig::default()
                .with_endpoint("not a url")
                .validate()
                .is_err()
        );
    }
}
