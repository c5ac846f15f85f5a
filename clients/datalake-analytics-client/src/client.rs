// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! HTTP implementation of the job operations

use async_trait::async_trait;
use datalake_analytics_api::{JobDataPath, JobInformation, JobStatistics, Uuid};
use futures_util::Stream;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{Credentials, add_auth_headers};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::odata::ODataQuery;
use crate::operations::JobOperations;
use crate::options::RequestOptions;
use crate::response::{CLIENT_REQUEST_ID_HEADER, OperationResponse, Page};

/// Data Lake Analytics job client
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct JobsClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    credentials: Arc<Credentials>,
}

impl std::fmt::Debug for JobsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobsClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl JobsClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        // reqwest is built without a default crypto provider; an error means
        // another component already installed one.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Self::new_with_client(config, credentials, http)
    }

    /// Create a client on top of an existing `reqwest::Client`
    pub fn new_with_client(
        config: ClientConfig,
        credentials: Credentials,
        http: reqwest::Client,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http,
            config: Arc::new(config),
            credentials: Arc::new(credentials),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Stream every job matching `query`, following next links
    ///
    /// The first error ends the stream.
    pub fn list_all(
        &self,
        account: &str,
        query: &ODataQuery,
        options: &RequestOptions,
    ) -> impl Stream<Item = Result<JobInformation>> + Send + 'static {
        let client = self.clone();
        let account = account.to_string();
        let query = query.clone();
        let options = options.clone();

        odata_pagination::items(move |link: Option<String>| {
            let client = client.clone();
            let account = account.clone();
            let query = query.clone();
            let options = options.clone();
            async move {
                let page = match link {
                    None => client.list(&account, &query, &options).await,
                    Some(link) => client.list_next(&link, &options).await,
                };
                page.map(OperationResponse::into_inner)
            }
        })
    }

    /// URL of an operation on the given account
    fn operation_url(&self, account: &str, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.account_endpoint(account)?;
        url.path_segments_mut()
            .map_err(|()| Error::Validation("endpoint cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("api-version", &self.config.api_version);
        Ok(url)
    }

    /// Resolve a next link; relative links resolve against the endpoint
    fn next_link_url(&self, link: &str) -> Result<Url> {
        let link = link.trim();
        if link.is_empty() {
            return Err(Error::Validation("next page link is empty".to_string()));
        }
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.config.endpoint {
                Some(endpoint) => Url::parse(endpoint)?.join(link)?,
                None => {
                    return Err(Error::Validation(format!(
                        "relative next page link without a configured endpoint: {}",
                        link
                    )));
                }
            },
            Err(e) => return Err(e.into()),
        };
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Validation(format!(
                "next page link must be an http(s) URL: {}",
                link
            )));
        }
        Ok(url)
    }

    fn request_headers(&self, options: &RequestOptions) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value("accept-language", &self.config.accept_language)?,
        );
        headers.insert(
            USER_AGENT,
            header_value("user-agent", &self.config.user_agent)?,
        );
        if self.config.generate_client_request_id {
            headers.insert(
                HeaderName::from_static(CLIENT_REQUEST_ID_HEADER),
                header_value(CLIENT_REQUEST_ID_HEADER, &Uuid::new_v4().to_string())?,
            );
        }
        add_auth_headers(&self.credentials, &mut headers)?;

        // Caller headers replace ours
        headers.extend(options.header_map()?);
        Ok(headers)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&JobInformation>,
        options: &RequestOptions,
    ) -> Result<(StatusCode, HeaderMap, Vec<u8>)> {
        let headers = self.request_headers(options)?;
        let client_request_id = headers
            .get(CLIENT_REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        debug!(%method, %url, %client_request_id, "sending request");

        let mut request = self.http.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(timeout) = options.get_timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?.to_vec();

        if !status.is_success() {
            let err = Error::from_response(status, &headers, &bytes);
            warn!(%method, %url, %client_request_id, error = %err, "request failed");
            return Err(err);
        }

        debug!(%method, %url, %status, "request succeeded");
        Ok((status, headers, bytes))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&JobInformation>,
        options: &RequestOptions,
    ) -> Result<OperationResponse<T>> {
        let (status, headers, bytes) = self.execute(method, url, body, options).await?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|source| Error::Deserialize { status, source })?;
        Ok(OperationResponse::new(status, headers, value))
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))
}

/// Reject job requests the service would refuse anyway
fn validate_job(parameters: &JobInformation) -> Result<()> {
    if parameters.name.trim().is_empty() {
        return Err(Error::Validation("job name must not be empty".to_string()));
    }
    if parameters.script().trim().is_empty() {
        return Err(Error::Validation("job script must not be empty".to_string()));
    }
    Ok(())
}

#[async_trait]
impl JobOperations for JobsClient {
    async fn get_statistics(
        &self,
        account: &str,
        job_identity: Uuid,
        options: &RequestOptions,
    ) -> Result<OperationResponse<JobStatistics>> {
        let id = job_identity.to_string();
        let url = self.operation_url(account, &["Jobs", &id, "GetStatistics"])?;
        self.send(Method::GET, url, None, options).await
    }

    async fn get_debug_data_path(
        &self,
        account: &str,
        job_identity: Uuid,
        options: &RequestOptions,
    ) -> Result<OperationResponse<JobDataPath>> {
        let id = job_identity.to_string();
        let url = self.operation_url(account, &["Jobs", &id, "GetDebugDataPath"])?;
        self.send(Method::GET, url, None, options).await
    }

    async fn build(
        &self,
        account: &str,
        parameters: &JobInformation,
        options: &RequestOptions,
    ) -> Result<OperationResponse<JobInformation>> {
        validate_job(parameters)?;
        let url = self.operation_url(account, &["BuildJob"])?;
        self.send(Method::POST, url, Some(parameters), options).await
    }

    async fn create(
        &self,
        account: &str,
        job_identity: Uuid,
        parameters: &JobInformation,
        options: &RequestOptions,
    ) -> Result<OperationResponse<JobInformation>> {
        validate_job(parameters)?;
        let id = job_identity.to_string();
        let url = self.operation_url(account, &["Jobs", &id])?;
        self.send(Method::PUT, url, Some(parameters), options).await
    }

    async fn cancel(
        &self,
        account: &str,
        job_identity: Uuid,
        options: &RequestOptions,
    ) -> Result<OperationResponse<()>> {
        let id = job_identity.to_string();
        let url = self.operation_url(account, &["Jobs", &id, "CancelJob"])?;
        let (status, headers, _) = self.execute(Method::POST, url, None, options).await?;
        Ok(OperationResponse::new(status, headers, ()))
    }

    async fn get(
        &self,
        account: &str,
        job_identity: Uuid,
        options: &RequestOptions,
    ) -> Result<OperationResponse<JobInformation>> {
        let id = job_identity.to_string();
        let url = self.operation_url(account, &["Jobs", &id])?;
        self.send(Method::GET, url, None, options).await
    }

    async fn list(
        &self,
        account: &str,
        query: &ODataQuery,
        options: &RequestOptions,
    ) -> Result<OperationResponse<Page<JobInformation>>> {
        let mut url = self.operation_url(account, &["Jobs"])?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query.query_pairs() {
                pairs.append_pair(name, &value);
            }
        }
        self.send(Method::GET, url, None, options).await
    }

    async fn list_next(
        &self,
        next_page_link: &str,
        options: &RequestOptions,
    ) -> Result<OperationResponse<Page<JobInformation>>> {
        let url = self.next_link_url(next_page_link)?;
        self.send(Method::GET, url, None, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stub_client() -> JobsClient {
        JobsClient::new(
            ClientConfig::default().with_endpoint("http://127.0.0.1:9091"),
            Credentials::Anonymous,
        )
        .unwrap()
    }

    #[test]
    fn test_operation_url_on_account_host() {
        let client = JobsClient::new(ClientConfig::default(), Credentials::Anonymous).unwrap();
        let id = "6f0ba5d5-5b7b-4fd3-9b5e-3c9dfb7e4a11";
        let url = client
            .operation_url("contosoadla", &["Jobs", id, "GetStatistics"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://contosoadla.azuredatalakeanalytics.net/Jobs/\
             6f0ba5d5-5b7b-4fd3-9b5e-3c9dfb7e4a11/GetStatistics?api-version=2015-11-01-preview"
        );
    }

    #[test]
    fn test_operation_url_keeps_endpoint_prefix() {
        let client = JobsClient::new(
            ClientConfig::default().with_endpoint("http://localhost:8080/adla/"),
            Credentials::Anonymous,
        )
        .unwrap();
        let url = client.operation_url("contosoadla", &["BuildJob"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/adla/BuildJob?api-version=2015-11-01-preview"
        );
    }

    #[test]
    fn test_next_link_resolution() {
        let client = stub_client();
        assert_eq!(
            client
                .next_link_url("https://contosoadla.azuredatalakeanalytics.net/Jobs?$skip=2")
                .unwrap()
                .as_str(),
            "https://contosoadla.azuredatalakeanalytics.net/Jobs?$skip=2"
        );
        assert_eq!(
            client.next_link_url("/Jobs?$skip=2").unwrap().as_str(),
            "http://127.0.0.1:9091/Jobs?$skip=2"
        );
        assert!(matches!(
            client.next_link_url("  "),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            client.next_link_url("ftp://example.com/Jobs"),
            Err(Error::Validation(_))
        ));

        let no_endpoint = JobsClient::new(ClientConfig::default(), Credentials::Anonymous).unwrap();
        assert!(matches!(
            no_endpoint.next_link_url("/Jobs?$skip=2"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_custom_headers_win() {
        let client = stub_client();
        let options = RequestOptions::new()
            .header("accept-language", "de-DE")
            .header("x-ms-client-request-id", "fixed");
        let headers = client.request_headers(&options).unwrap();
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "de-DE");
        assert_eq!(headers.get_all(ACCEPT_LANGUAGE).iter().count(), 1);
        assert_eq!(headers.get(CLIENT_REQUEST_ID_HEADER).unwrap(), "fixed");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_client_request_id_can_be_disabled() {
        let mut config = ClientConfig::default().with_endpoint("http://127.0.0.1:9091");
        config.generate_client_request_id = false;
        let client = JobsClient::new(config, Credentials::Anonymous).unwrap();
        let headers = client.request_headers(&RequestOptions::new()).unwrap();
        assert!(headers.get(CLIENT_REQUEST_ID_HEADER).is_none());
    }

    #[test]
    fn test_validate_job() {
        assert!(validate_job(&JobInformation::usql("ok", "@a = SELECT 1;")).is_ok());
        assert!(matches!(
            validate_job(&JobInformation::usql(" ", "@a = SELECT 1;")),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            validate_job(&JobInformation::hive("report", "")),
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_account_never_reaches_network() {
        // Nothing listens on this endpoint; a validation error proves no
        // request was attempted.
        let client = JobsClient::new(
            ClientConfig::default().with_endpoint("http://127.0.0.1:1"),
            Credentials::Anonymous,
        )
        .unwrap();
        let err = client
            .get("Not-Valid", Uuid::new_v4(), &RequestOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
