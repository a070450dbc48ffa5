//! chainweb3-http — HTTP JSON-RPC transport backed by `reqwest`.
//!
//! [`HttpConnector`] is the default [`Connector`](chainweb3_core::Connector)
//! used when binding a client to a URL. The transport retries transient
//! failures itself; callers above it never retry.

pub mod client;
pub mod retry;
mod serde_duration;

pub use client::{HttpClientConfig, HttpConnector, HttpRpcClient};
pub use retry::{RetryConfig, RetryPolicy};
