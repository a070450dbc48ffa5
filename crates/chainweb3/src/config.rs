//! Client configuration.

use chainweb3_http::HttpClientConfig;
use chainweb3_providers::HostedService;
use serde::{Deserialize, Serialize};

/// Settings for binding and parsing. Every field has a default, so a partial
/// JSON/TOML document deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Transport settings for the default HTTP connector.
    pub http: HttpClientConfig,
    /// Upper bound on receipt fetches in flight while parsing one block.
    /// Only used when the transport supports concurrent requests.
    pub max_concurrent_requests: usize,
    /// Service used by [`BoundClient::bind_hosted`](crate::BoundClient::bind_hosted).
    pub hosted_service: HostedService,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            max_concurrent_requests: 8,
            hosted_service: HostedService::Infura,
        }
    }
}
