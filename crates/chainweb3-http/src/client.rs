//! HTTP JSON-RPC client backed by `reqwest`.
//!
//! Features:
//! - Automatic retry with exponential backoff for transient errors
//! - Per-request timeout
//! - Safe for concurrent requests on one handle (`reqwest::Client` is shared)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use chainweb3_core::error::TransportError;
use chainweb3_core::request::{JsonRpcRequest, JsonRpcResponse};
use chainweb3_core::transport::{redact_url, Connector, RpcTransport};

use crate::retry::{RetryConfig, RetryPolicy};

/// Configuration for `HttpRpcClient`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub retry: RetryConfig,
    #[serde(with = "crate::serde_duration", rename = "request_timeout_ms")]
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP JSON-RPC client with built-in retry.
#[derive(Debug)]
pub struct HttpRpcClient {
    url: String,
    /// `url` without path or query, safe to log.
    display_url: String,
    http: reqwest::Client,
    retry: RetryPolicy,
    request_timeout: Duration,
}

impl HttpRpcClient {
    /// Create a client for the given JSON-RPC endpoint URL. No request is sent.
    pub fn new(url: impl Into<String>, config: HttpClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;

        let url = url.into();
        Ok(Self {
            display_url: redact_url(&url),
            url,
            http,
            retry: RetryPolicy::new(config.retry),
            request_timeout: config.request_timeout,
        })
    }

    /// Create with default configuration.
    pub fn default_for(url: impl Into<String>) -> Result<Self, TransportError> {
        Self::new(url, HttpClientConfig::default())
    }

    fn map_reqwest(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                ms: self.request_timeout.as_millis() as u64,
            }
        } else {
            // reqwest embeds the full URL, token included
            TransportError::Http(e.without_url().to_string())
        }
    }

    async fn send_once(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let resp = self
            .http
            .post(&self.url)
            .json(req)
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::HttpStatus { status, body });
        }

        let body = resp.bytes().await.map_err(|e| self.map_reqwest(e))?;
        Ok(serde_json::from_slice::<JsonRpcResponse>(&body)?)
    }
}

#[async_trait]
impl RpcTransport for HttpRpcClient {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let mut attempt = 0u32;
        loop {
            match self.send_once(&req).await {
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_retryable() => {
                    attempt += 1;
                    match self.retry.next_delay(attempt) {
                        Some(delay) => {
                            tracing::warn!(
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                error = %e,
                                url = %self.display_url,
                                method = %req.method,
                                "retrying request"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        None => {
                            tracing::debug!(
                                attempt,
                                error = %e,
                                url = %self.display_url,
                                method = %req.method,
                                "giving up on request"
                            );
                            return Err(e);
                        }
                    }
                }
                // Non-retryable (e.g. malformed response body)
                Err(e) => return Err(e),
            }
        }
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn supports_concurrent_requests(&self) -> bool {
        true
    }
}

/// Opens [`HttpRpcClient`] transports for `http://` and `https://` URLs.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    config: HttpClientConfig,
}

impl HttpConnector {
    pub fn new(config: HttpClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn open(&self, url: &Url) -> Result<Arc<dyn RpcTransport>, TransportError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUrl {
                url: redact_url(url.as_str()),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(TransportError::InvalidUrl {
                url: redact_url(url.as_str()),
                reason: "missing host".into(),
            });
        }
        let client = HttpRpcClient::new(url.as_str(), self.config.clone())?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn no_retry() -> HttpClientConfig {
        HttpClientConfig {
            retry: RetryConfig::disabled(),
            request_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn send_returns_node_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "eth_blockNumber"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": "0x10"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpRpcClient::new(server.uri(), no_retry()).unwrap();
        let resp = client
            .send(JsonRpcRequest::new(1, "eth_blockNumber", vec![]))
            .await
            .unwrap();
        assert_eq!(resp.into_result().unwrap(), json!("0x10"));
    }

    #[tokio::test]
    async fn server_errors_are_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let config = HttpClientConfig {
            retry: RetryConfig {
                max_retries: 2,
                initial_backoff: Duration::from_millis(1),
                max_backoff: Duration::from_millis(5),
                multiplier: 2.0,
            },
            request_timeout: Duration::from_secs(5),
        };
        let client = HttpRpcClient::new(server.uri(), config).unwrap();
        let err = client
            .send(JsonRpcRequest::new(1, "eth_chainId", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid project id"))
            .expect(1)
            .mount(&server)
            .await;

        // default config retries transient failures three times
        let client = HttpRpcClient::default_for(server.uri()).unwrap();
        let err = client
            .send(JsonRpcRequest::new(1, "eth_chainId", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransportError::HttpStatus { status: 401, ref body } if body == "invalid project id"
        ));
    }

    #[tokio::test]
    async fn rpc_errors_pass_through_unretried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32601, "message": "method not found"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpRpcClient::default_for(server.uri()).unwrap();
        let resp = client
            .send(JsonRpcRequest::new(1, "eth_foo", vec![]))
            .await
            .unwrap();
        assert_eq!(resp.into_result().unwrap_err().code, -32601);
    }

    #[tokio::test]
    async fn connector_rejects_non_http_schemes() {
        let connector = HttpConnector::new(no_retry());
        let url = Url::parse("ws://localhost:8546").unwrap();
        let Err(err) = connector.open(&url).await else {
            panic!("expected an error for a non-http scheme");
        };
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn connector_opens_without_network_io() {
        let connector = HttpConnector::default();
        let url = Url::parse("http://127.0.0.1:1/rpc").unwrap();
        let transport = connector.open(&url).await.unwrap();
        assert_eq!(transport.url(), "http://127.0.0.1:1/rpc");
        assert!(transport.supports_concurrent_requests());
    }
}
