//! HTTP transport seam
//!
//! Providers never talk to reqwest directly. They hand an [`HttpRequest`] to
//! an [`HttpTransport`], so tests can answer with scripted bodies.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, Method};
use tracing::{debug, instrument};

use crate::config::TransitConfig;
use crate::error::TransitError;

/// A bodiless request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
}

impl HttpRequest {
    /// A GET request for `url`
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
        }
    }
}

/// Status and raw body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// A 200 response carrying `body`
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Anything that can execute an [`HttpRequest`]
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return the response, whatever its status
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransitError>;
}

/// [`HttpTransport`] backed by a [`reqwest::Client`]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout_secs: Option<u64>,
}

impl ReqwestTransport {
    /// Build a transport from the configured user agent and timeout
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransitError> {
        let response = self
            .client
            .request(request.method, &request.url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.timeout_secs.unwrap_or_default(),
                    }
                } else {
                    TransitError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        debug!(status, bytes = body.len(), "Response received");
        Ok(HttpResponse { status, body })
    }
}
