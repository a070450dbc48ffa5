//! chainweb3 — provider-bound EVM clients and event parsing.
//!
//! # Overview
//!
//! - [`BoundClient`] — a transport handle plus the [`Network`] it was bound
//!   against, created by an async handshake with the node
//! - [`TransactionEventParser`] / [`BlockEventParser`] — the two
//!   [`EventParser`] implementations, sharing one [`EventDecoder`]
//! - [`ClientConfig`] — transport and parser settings
//! - [`observability`] — opt-in `tracing` subscriber setup
//!
//! # Quick start
//! ```rust,no_run
//! use chainweb3::{AbiLogDecoder, BoundClient, EventParser, EventResult, Network};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BoundClient::bind("https://rpc.sepolia.org", Network::Sepolia).await?;
//! let decoder = AbiLogDecoder::from_signatures(&[
//!     "event Transfer(address indexed from, address indexed to, uint256 value)",
//! ])?;
//! let parser = client.block_parser(decoder);
//! for event in parser.parse_block_by_number(5_000_000).await? {
//!     println!("{} from {}", event.event_name(), event.contract_address());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod eth;
pub mod observability;
pub mod parser;

pub use client::BoundClient;
pub use config::ClientConfig;
pub use eth::EthApi;
pub use parser::{BlockEventParser, EventDecoder, TransactionEventParser};

pub use chainweb3_abi::{AbiLogDecoder, DecodedLog, LogDecoder};
pub use chainweb3_core::{
    Block, Connector, DecodeError, DecodedValue, EventParser, EventResult, Log, Network,
    ParsedEvent, ResourceKind, RpcTransport, Transaction, TransactionReceipt, TransportError,
    Web3Error,
};
pub use chainweb3_http::{HttpClientConfig, HttpConnector, RetryConfig};
pub use chainweb3_providers::HostedService;
