//! HTTP transport implementation using reqwest

use std::{
    task::{Context, Poll},
    time::Duration,
};

use async_trait::async_trait;
use url::Url;

use crate::protocol::error::AgentError;

use super::{Transport, TransportRequest, TransportResponse};

/// HTTP transport implementation using reqwest
///
/// On wasm32 reqwest goes through the browser's `fetch`, so the same
/// transport serves both the page and native tools.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Arguments
    ///
    /// * `base_url` - The replica host (e.g., "<http://127.0.0.1:4943>")
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout: None,
        }
    }

    /// Set a per-request timeout
    ///
    /// Ignored on wasm32, where the browser owns request lifetimes.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), endpoint)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Transport for HttpTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), AgentError>> {
        // HTTP client is always ready
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, AgentError> {
        let url = self.url_for(&request.endpoint);

        let mut req_builder = match request.method.as_str() {
            "POST" => self.client.post(&url),
            "GET" => self.client.get(&url),
            _ => {
                return Err(AgentError::Transport(format!(
                    "Unsupported HTTP method: {}",
                    request.method
                )))
            }
        };

        for (key, value) in request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body);
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        tracing::trace!(%url, "sending request");
        let response = req_builder.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_creation() {
        let transport = HttpTransport::new(Url::parse("http://127.0.0.1:4943").unwrap());
        assert_eq!(transport.base_url().as_str(), "http://127.0.0.1:4943/");
    }

    #[test]
    fn test_url_joining() {
        let transport = HttpTransport::new(Url::parse("https://icp0.io/").unwrap())
            .with_timeout(Duration::from_secs(5));
        assert_eq!(
            transport.url_for("/api/v2/canister/aaaaa-aa/query"),
            "https://icp0.io/api/v2/canister/aaaaa-aa/query"
        );
    }

    #[tokio::test]
    async fn test_rejects_unsupported_method() {
        let transport = HttpTransport::new(Url::parse("http://127.0.0.1:4943").unwrap());
        let result = transport
            .execute(TransportRequest::new("/status", "PATCH"))
            .await;

        assert!(matches!(result, Err(AgentError::Transport(_))));
    }
}
