//! `BoundClient` — a transport handle bound to a [`Network`].

use std::sync::Arc;
use url::Url;

use chainweb3_abi::LogDecoder;
use chainweb3_core::{redact_url, Connector, Network, RpcTransport, Web3Error};
use chainweb3_http::HttpConnector;
use chainweb3_providers::{url_for, HostedService};

use crate::config::ClientConfig;
use crate::eth::EthApi;
use crate::parser::{BlockEventParser, EventDecoder, TransactionEventParser};

/// A client bound to one endpoint and the network it was bound against.
///
/// Binding performs an `eth_chainId` round trip to confirm the endpoint is
/// usable. The reported id is kept as [`node_chain_id`](Self::node_chain_id)
/// but is **not** compared with [`network`](Self::network): a client bound as
/// `Mainnet` to a Sepolia node binds successfully. Callers that care must
/// compare the two themselves.
///
/// Binding has no cancellation primitive of its own. Dropping the future
/// returned by any `bind*` call aborts the attempt and releases the
/// transport.
///
/// The transport is released when the last clone of the client (and of any
/// parser built from it) is dropped.
#[derive(Debug, Clone)]
pub struct BoundClient {
    eth: Arc<EthApi>,
    network: Network,
    node_chain_id: u64,
    config: ClientConfig,
}

impl BoundClient {
    /// Bind to `url` over HTTP with default settings.
    ///
    /// `network` defaults to [`Network::Mainnet`] when `None`.
    ///
    /// # Errors
    /// [`Web3Error::ConnectionFailure`] if the URL is malformed, the endpoint
    /// is unreachable, or the handshake fails.
    pub async fn bind(
        url: &str,
        network: impl Into<Option<Network>>,
    ) -> Result<Self, Web3Error> {
        Self::bind_with_config(url, network, ClientConfig::default()).await
    }

    /// Like [`bind`](Self::bind), with explicit transport and parser settings.
    pub async fn bind_with_config(
        url: &str,
        network: impl Into<Option<Network>>,
        config: ClientConfig,
    ) -> Result<Self, Web3Error> {
        let connector = HttpConnector::new(config.http.clone());
        Self::bind_with(&connector, url, network, config).await
    }

    /// Bind through an arbitrary [`Connector`].
    pub async fn bind_with<C>(
        connector: &C,
        url: &str,
        network: impl Into<Option<Network>>,
        config: ClientConfig,
    ) -> Result<Self, Web3Error>
    where
        C: Connector + ?Sized,
    {
        let network = network.into().unwrap_or_default();
        let shown = redact_url(url);

        let parsed = Url::parse(url).map_err(|e| Web3Error::ConnectionFailure {
            url: shown.clone(),
            reason: e.to_string(),
        })?;

        let transport = connector
            .open(&parsed)
            .await
            .map_err(|e| Web3Error::ConnectionFailure {
                url: shown.clone(),
                reason: e.to_string(),
            })?;

        Self::handshake(transport, network, config, shown).await
    }

    /// Bind to a hosted node service (Infura by default, see
    /// [`ClientConfig::hosted_service`]).
    ///
    /// # Errors
    /// [`Web3Error::UnsupportedNetwork`] before any network I/O if the service
    /// has no endpoint for `network`; otherwise as [`bind`](Self::bind).
    pub async fn bind_hosted(
        network: Network,
        access_token: Option<&str>,
    ) -> Result<Self, Web3Error> {
        let config = ClientConfig::default();
        Self::bind_hosted_with(config.hosted_service, network, access_token, config).await
    }

    /// Bind to `network` on an explicitly chosen hosted service.
    pub async fn bind_hosted_with(
        service: HostedService,
        network: Network,
        access_token: Option<&str>,
        config: ClientConfig,
    ) -> Result<Self, Web3Error> {
        let url = url_for(service, network, access_token)?;
        tracing::debug!(%service, %network, "resolved hosted endpoint");
        Self::bind_with_config(url.as_str(), network, config).await
    }

    async fn handshake(
        transport: Arc<dyn RpcTransport>,
        network: Network,
        config: ClientConfig,
        shown: String,
    ) -> Result<Self, Web3Error> {
        let eth = Arc::new(EthApi::new(transport));
        let node_chain_id = eth
            .chain_id()
            .await
            .map_err(|e| Web3Error::ConnectionFailure {
                url: shown.clone(),
                reason: format!("handshake failed: {e}"),
            })?;

        tracing::info!(
            url = %shown,
            %network,
            node_chain_id,
            "bound client"
        );

        Ok(Self {
            eth,
            network,
            node_chain_id,
            config,
        })
    }

    /// The network this client was bound against.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Chain id the node reported during the handshake.
    pub fn node_chain_id(&self) -> u64 {
        self.node_chain_id
    }

    pub fn url(&self) -> &str {
        self.eth.transport().url()
    }

    pub fn eth(&self) -> &Arc<EthApi> {
        &self.eth
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A receipt-based parser over this client's transport.
    pub fn transaction_parser<D>(&self, decoder: D) -> TransactionEventParser
    where
        D: LogDecoder + 'static,
    {
        TransactionEventParser::new(Arc::clone(&self.eth), EventDecoder::new(decoder))
            .with_max_concurrent_requests(self.config.max_concurrent_requests)
    }

    /// An `eth_getLogs`-based parser over this client's transport.
    pub fn block_parser<D>(&self, decoder: D) -> BlockEventParser
    where
        D: LogDecoder + 'static,
    {
        BlockEventParser::new(Arc::clone(&self.eth), EventDecoder::new(decoder))
    }
}
