//! The transport seam: [`RpcTransport`] sends requests, [`Connector`] opens transports.

use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// The central async trait every RPC transport must implement.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks. Whether
/// several requests may be in flight on one handle at once is up to the
/// implementation; callers must assume at most one unless it says otherwise.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn RpcTransport>`.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Send a single JSON-RPC request and return the response.
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError>;

    /// Return the transport's identifier (URL or name).
    fn url(&self) -> &str;

    /// Whether concurrent `send` calls on this handle are safe.
    fn supports_concurrent_requests(&self) -> bool {
        false
    }
}

/// Opens a transport to an endpoint.
///
/// Dropping the future returned by `open` cancels the attempt; implementations
/// must not leave background work behind when that happens.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn open(&self, url: &Url) -> Result<Arc<dyn RpcTransport>, TransportError>;
}

/// Reduce an endpoint URL to `scheme://host[:port]` for logs and error
/// messages. Hosted endpoints carry access tokens in the path.
pub fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(u) => match (u.host_str(), u.port()) {
            (Some(host), Some(port)) => format!("{}://{host}:{port}", u.scheme()),
            (Some(host), None) => format!("{}://{host}", u.scheme()),
            (None, _) => format!("{}:", u.scheme()),
        },
        Err(_) => "<invalid url>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_drops_path_and_credentials() {
        assert_eq!(
            redact_url("https://user:pw@mainnet.infura.io/v3/secret-token?x=1"),
            "https://mainnet.infura.io"
        );
        assert_eq!(redact_url("http://127.0.0.1:8545/"), "http://127.0.0.1:8545");
        assert_eq!(redact_url("not a url"), "<invalid url>");
    }
}
