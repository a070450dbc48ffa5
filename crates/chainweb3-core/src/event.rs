//! The decoded-event contract.
//!
//! [`EventResult`] is what every consumer of log-derived data programs
//! against; [`EventParser`] is the capability set of anything that turns
//! transactions or blocks into such results.

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Web3Error;
use crate::types::{Block, Log, Transaction, TransactionReceipt};
use crate::value::DecodedValue;

/// Read-only view of one decoded event, regardless of which contract or ABI
/// produced it.
pub trait EventResult: Send + Sync {
    /// ABI event name, e.g. `"Transfer"`.
    fn event_name(&self) -> &str;

    /// Parameter name → decoded value. Keys are unique and non-empty; the map
    /// carries no ordering.
    fn decoded_result(&self) -> &HashMap<String, DecodedValue>;

    /// Address of the contract that emitted the event.
    fn contract_address(&self) -> Address;

    /// Receipt of the enclosing transaction, when the parser resolved it.
    fn transaction_receipt(&self) -> Option<&TransactionReceipt>;

    /// The raw log this result was decoded from.
    fn event_log(&self) -> Option<&Log>;
}

/// The concrete result produced by ChainWeb3 parsers.
///
/// Built once by a parser and never mutated afterwards. Results decoded from
/// the same transaction share one receipt allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEvent {
    event_name: String,
    decoded_result: HashMap<String, DecodedValue>,
    contract_address: Address,
    transaction_receipt: Option<Arc<TransactionReceipt>>,
    event_log: Option<Log>,
}

impl ParsedEvent {
    pub fn new(
        event_name: impl Into<String>,
        contract_address: Address,
        decoded_result: HashMap<String, DecodedValue>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            decoded_result,
            contract_address,
            transaction_receipt: None,
            event_log: None,
        }
    }

    pub fn with_receipt(mut self, receipt: Arc<TransactionReceipt>) -> Self {
        self.transaction_receipt = Some(receipt);
        self
    }

    pub fn with_log(mut self, log: Log) -> Self {
        self.event_log = Some(log);
        self
    }

    /// Get a parameter by name.
    pub fn param(&self, name: &str) -> Option<&DecodedValue> {
        self.decoded_result.get(name)
    }

    /// Hash of the enclosing transaction, from the log or the receipt.
    pub fn transaction_hash(&self) -> Option<B256> {
        self.event_log
            .as_ref()
            .and_then(|l| l.transaction_hash)
            .or_else(|| self.transaction_receipt.as_ref().map(|r| r.transaction_hash))
    }

    /// Number of the block the event was emitted in, if known.
    pub fn block_number(&self) -> Option<u64> {
        self.event_log
            .as_ref()
            .and_then(Log::block_number_u64)
            .or_else(|| {
                self.transaction_receipt
                    .as_ref()
                    .and_then(|r| r.block_number)
                    .map(|n| n.to::<u64>())
            })
    }

    /// Position of the log within its block, if known.
    pub fn log_index(&self) -> Option<u64> {
        self.event_log.as_ref().and_then(Log::log_index_u64)
    }
}

impl EventResult for ParsedEvent {
    fn event_name(&self) -> &str {
        &self.event_name
    }

    fn decoded_result(&self) -> &HashMap<String, DecodedValue> {
        &self.decoded_result
    }

    fn contract_address(&self) -> Address {
        self.contract_address
    }

    fn transaction_receipt(&self) -> Option<&TransactionReceipt> {
        self.transaction_receipt.as_deref()
    }

    fn event_log(&self) -> Option<&Log> {
        self.event_log.as_ref()
    }
}

/// Capability set of an event parser.
///
/// Every operation returns results in the order their logs appear in the
/// source transaction or block. An empty vector means "no recognized events"
/// and is not an error; logs whose signature matches no known event are
/// skipped silently.
///
/// # Errors
/// - [`Web3Error::NotFound`] when the referenced transaction or block does not exist
/// - [`Web3Error::TransportFailure`] for network errors, surfaced unchanged
#[async_trait]
pub trait EventParser: Send + Sync {
    async fn parse_transaction(&self, tx: &Transaction) -> Result<Vec<ParsedEvent>, Web3Error>;

    async fn parse_transaction_by_hash(&self, hash: B256) -> Result<Vec<ParsedEvent>, Web3Error>;

    async fn parse_block(&self, block: &Block) -> Result<Vec<ParsedEvent>, Web3Error>;

    async fn parse_block_by_number(&self, number: u64) -> Result<Vec<ParsedEvent>, Web3Error>;
}
