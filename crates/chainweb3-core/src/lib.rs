//! chainweb3-core — foundation types and traits for ChainWeb3.
//!
//! # Overview
//!
//! The core crate defines everything the other ChainWeb3 crates agree on:
//!
//! - [`Network`] — EIP-155 chain identity (well-known networks plus a custom id)
//! - [`RpcTransport`] / [`Connector`] — the async transport seam
//! - [`JsonRpcRequest`] / [`JsonRpcResponse`] — wire types
//! - [`Log`], [`Transaction`], [`TransactionReceipt`], [`Block`] — chain data
//! - [`EventResult`] / [`EventParser`] — the decoded-event contract
//! - [`DecodedValue`] — closed union of decoded ABI values
//! - [`Web3Error`], [`TransportError`], [`DecodeError`] — error taxonomy

pub mod error;
pub mod event;
pub mod network;
pub mod request;
pub mod transport;
pub mod types;
pub mod value;

pub use error::{DecodeError, ResourceKind, TransportError, Web3Error};
pub use event::{EventParser, EventResult, ParsedEvent};
pub use network::{Network, ParseNetworkError};
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId, RpcParam};
pub use transport::{redact_url, Connector, RpcTransport};
pub use types::{Block, Log, LogFilter, Transaction, TransactionReceipt};
pub use value::DecodedValue;
