//! chainweb3-providers — URL templates for hosted node services.
//!
//! Each service module knows which [`Network`]s it serves and how to build
//! the endpoint URL from an access token. Resolution is pure: no request is
//! made, so an unsupported network fails before any I/O.
//!
//! # Quick start
//! ```rust
//! use chainweb3_core::Network;
//! use chainweb3_providers::{url_for, HostedService};
//!
//! let url = url_for(HostedService::Infura, Network::Sepolia, Some("YOUR_PROJECT_ID")).unwrap();
//! assert_eq!(url.host_str(), Some("sepolia.infura.io"));
//! ```

pub mod alchemy;
pub mod infura;

use chainweb3_core::{Network, Web3Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A hosted node service with per-network URL templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostedService {
    #[default]
    Infura,
    Alchemy,
}

impl HostedService {
    /// Networks this service has a template for, in [`Network::all_known`] order.
    pub fn supported_networks(&self) -> Vec<Network> {
        Network::all_known()
            .iter()
            .copied()
            .filter(|n| self.supports(*n))
            .collect()
    }

    pub fn supports(&self, network: Network) -> bool {
        match self {
            HostedService::Infura => infura::network_slug(network).is_some(),
            HostedService::Alchemy => alchemy::network_slug(network).is_some(),
        }
    }
}

impl fmt::Display for HostedService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostedService::Infura => write!(f, "infura"),
            HostedService::Alchemy => write!(f, "alchemy"),
        }
    }
}

/// Resolve the endpoint for `network` on `service`.
///
/// A missing token yields the template with an empty token segment; the
/// service will then reject requests, which surfaces at bind time.
///
/// # Errors
/// [`Web3Error::UnsupportedNetwork`] if the service has no template for the
/// network.
pub fn url_for(
    service: HostedService,
    network: Network,
    access_token: Option<&str>,
) -> Result<Url, Web3Error> {
    let token = access_token.unwrap_or_default();
    let raw = match service {
        HostedService::Infura => infura::http_url(token, network),
        HostedService::Alchemy => alchemy::http_url(token, network),
    }
    .ok_or_else(|| Web3Error::UnsupportedNetwork {
        service: service.to_string(),
        network: network.to_string(),
    })?;

    Url::parse(&raw).map_err(|e| Web3Error::ConnectionFailure {
        url: format!("{service} endpoint for {network}"),
        reason: e.to_string(),
    })
}
