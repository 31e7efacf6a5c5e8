//! Shared HTTP transport
//!
//! One [`Transport`] is built per [`MangaClient`](crate::MangaClient) and handed to every
//! component that talks to the network. It owns the connection pool (reqwest clients are
//! cheap to clone and safe to use concurrently) and applies the retry budget.

use crate::config::{ApiConfig, RetryConfig};
use crate::error::{ClientError, Error, Result};
use crate::retry::with_retry;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

/// Query parameters in request order; keys may repeat (`includedTags[]=a&includedTags[]=b`)
pub type Query = Vec<(String, String)>;

/// Body and status of a successful GET
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status (always a success status)
    pub status: StatusCode,
    /// Raw response body
    pub body: Vec<u8>,
}

/// HTTP client with connection reuse and a fixed retry budget for transport failures
#[derive(Clone, Debug)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryConfig,
}

impl Transport {
    /// Create a transport for the API described by `api`
    ///
    /// # Errors
    /// Returns a configuration error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(api: &ApiConfig, retry: RetryConfig) -> Result<Self> {
        let mut base_url = Url::parse(&api.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL '{}': {}", api.base_url, e),
            key: Some("api.base_url".to_string()),
        })?;
        // Url::join replaces the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(api.request_timeout)
            .user_agent(api.user_agent.clone())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            retry,
        })
    }

    /// API root this transport resolves endpoint paths against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path (e.g. `"manga/tag"`) against the API root
    pub fn endpoint_url(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidUrl {
                url: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// GET `url` with `query`, retrying connection-level failures
    ///
    /// A non-success status is returned as [`ClientError::Status`] without retrying.
    pub async fn get(
        &self,
        operation: &str,
        url: &Url,
        query: &[(String, String)],
    ) -> std::result::Result<TransportResponse, ClientError> {
        tracing::debug!(operation, url = %url, params = query.len(), "GET");

        with_retry(&self.retry, || async move {
            let response = self
                .http
                .get(url.clone())
                .query(query)
                .send()
                .await
                .map_err(|source| ClientError::Transport {
                    operation: operation.to_string(),
                    target: url.to_string(),
                    source,
                })?;

            let status = response.status();
            let response =
                response
                    .error_for_status()
                    .map_err(|source| ClientError::Status {
                        operation: operation.to_string(),
                        target: url.to_string(),
                        status: status.as_u16(),
                        source,
                    })?;

            let body = response
                .bytes()
                .await
                .map_err(|source| ClientError::Transport {
                    operation: operation.to_string(),
                    target: url.to_string(),
                    source,
                })?;

            Ok(TransportResponse {
                status,
                body: body.to_vec(),
            })
        })
        .await
    }

    /// GET an API endpoint and decode the JSON body into `T`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &[(String, String)],
    ) -> std::result::Result<T, ClientError> {
        let url = self.endpoint_url(path)?;
        let response = self.get(operation, &url, query).await?;
        serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
            operation: operation.to_string(),
            target: path.to_string(),
            source,
        })
    }
}
