//! Error types for transports, ABI decoding and client operations.

use std::fmt;
use thiserror::Error;

use crate::request::JsonRpcError;

/// Errors that can occur during an RPC transport operation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed before a response arrived (connection refused, reset, DNS).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// JSON-RPC protocol-level error returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The endpoint URL is malformed or uses an unsupported scheme.
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if this error is retryable (transient).
    ///
    /// Of the HTTP statuses only 408, 429 and 5xx are transient; other 4xx
    /// (bad token, unknown path) fail the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => {
                matches!(*status, 408 | 429) || (500..600).contains(status)
            }
            _ => false,
        }
    }

    /// Returns `true` if this is a node-side execution error (not retryable).
    pub fn is_execution_error(&self) -> bool {
        matches!(self, Self::Rpc(_))
    }
}

/// Errors raised by the ABI-decoding layer.
///
/// A log that simply doesn't match any known event is **not** an error.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid ABI: {reason}")]
    InvalidAbi { reason: String },

    #[error("ABI JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a [`Web3Error::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Block,
    Transaction,
    Receipt,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Transaction => write!(f, "transaction"),
            Self::Receipt => write!(f, "receipt"),
        }
    }
}

/// Errors surfaced by binding and event parsing.
#[derive(Debug, Error)]
pub enum Web3Error {
    /// The transport could not be opened, or the handshake failed.
    #[error("Connection to {url} failed: {reason}")]
    ConnectionFailure { url: String, reason: String },

    /// No hosted-service URL template exists for the requested network.
    #[error("{service} has no endpoint for network {network}")]
    UnsupportedNetwork { service: String, network: String },

    /// The referenced block or transaction does not exist on the connected chain.
    #[error("{kind} {id} not found")]
    NotFound { kind: ResourceKind, id: String },

    /// Network error during a parse operation.
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// The ABI handed to a decoder was malformed.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl Web3Error {
    pub fn not_found(kind: ResourceKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Returns `true` if the error is a `NotFound` (recoverable by the caller).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
