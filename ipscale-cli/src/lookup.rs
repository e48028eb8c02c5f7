//! Public IP lookup over HTTP.
//!
//! One GET against a JSON endpoint answering `{"ip": "<address>"}`. There is
//! no retry; callers decide what a failed lookup means.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors from the public IP lookup.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Transport failure, timeout, or invalid endpoint URL.
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("Endpoint {endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The body was not `{"ip": "..."}`.
    #[error("Malformed lookup response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The body carried an empty address.
    #[error("Lookup response contained an empty address")]
    EmptyAddress,
}

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

/// Parse a lookup response body into a trimmed address.
pub fn parse_response(body: &str) -> Result<String, LookupError> {
    let response: IpResponse = serde_json::from_str(body)?;
    let ip = response.ip.trim();
    if ip.is_empty() {
        return Err(LookupError::EmptyAddress);
    }
    Ok(ip.to_string())
}

/// HTTP client for the public IP endpoint.
#[derive(Debug, Clone)]
pub struct LookupClient {
    client: reqwest::Client,
    endpoint: String,
}

impl LookupClient {
    /// Create a client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let endpoint = endpoint.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ipscale/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| LookupError::Request {
                endpoint: endpoint.clone(),
                source,
            })?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the caller's public IP address.
    pub async fn public_ip(&self) -> Result<String, LookupError> {
        tracing::debug!(endpoint = %self.endpoint, "Looking up public IP");

        let request_error = |source| LookupError::Request {
            endpoint: self.endpoint.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(request_error)?;
        let ip = parse_response(&body)?;
        tracing::debug!(%ip, "Public IP resolved");
        Ok(ip)
    }
}
