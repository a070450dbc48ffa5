//! Event parsers.
//!
//! Two [`EventParser`] implementations share one [`EventDecoder`]:
//!
//! - [`TransactionEventParser`] works from transaction receipts, so every
//!   result carries the receipt of its transaction
//! - [`BlockEventParser`] works from `eth_getLogs`, one call per block

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::fmt;
use std::sync::Arc;

use chainweb3_abi::LogDecoder;
use chainweb3_core::{
    Block, EventParser, Log, LogFilter, ParsedEvent, ResourceKind, Transaction,
    TransactionReceipt, Web3Error,
};

use crate::eth::EthApi;

/// Log-to-event routine shared by both parsers.
///
/// Skips, without error: removed logs, logs from other contracts when an
/// address filter is set, logs the decoder does not recognize, and events
/// other than the filtered name.
#[derive(Clone)]
pub struct EventDecoder {
    decoder: Arc<dyn LogDecoder>,
    address: Option<Address>,
    event_name: Option<String>,
}

impl fmt::Debug for EventDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDecoder")
            .field("address", &self.address)
            .field("event_name", &self.event_name)
            .finish_non_exhaustive()
    }
}

impl EventDecoder {
    pub fn new<D: LogDecoder + 'static>(decoder: D) -> Self {
        Self::from_shared(Arc::new(decoder))
    }

    pub fn from_shared(decoder: Arc<dyn LogDecoder>) -> Self {
        Self {
            decoder,
            address: None,
            event_name: None,
        }
    }

    /// Only decode logs emitted by `address`.
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Only keep events named `name`.
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = Some(name.into());
        self
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn event_name(&self) -> Option<&str> {
        self.event_name.as_deref()
    }

    /// Decode `logs` in order. Results share `receipt` when one is given.
    pub fn decode_logs<'a, I>(
        &self,
        logs: I,
        receipt: Option<&Arc<TransactionReceipt>>,
    ) -> Result<Vec<ParsedEvent>, Web3Error>
    where
        I: IntoIterator<Item = &'a Log>,
    {
        let mut events = Vec::new();
        for log in logs {
            if log.removed {
                continue;
            }
            if self.address.is_some_and(|a| a != log.address) {
                continue;
            }
            let Some(decoded) = self.decoder.decode_log(log)? else {
                tracing::trace!(
                    address = %log.address,
                    selector = ?log.selector(),
                    "skipping unrecognized log"
                );
                continue;
            };
            if self
                .event_name
                .as_deref()
                .is_some_and(|name| name != decoded.event_name)
            {
                continue;
            }

            let mut event = ParsedEvent::new(decoded.event_name, log.address, decoded.params)
                .with_log(log.clone());
            if let Some(receipt) = receipt {
                event = event.with_receipt(Arc::clone(receipt));
            }
            events.push(event);
        }
        Ok(events)
    }
}

// ─── TransactionEventParser ───────────────────────────────────────────────────

/// Receipt-based parser.
///
/// Block parsing fetches one receipt per transaction, up to
/// `max_concurrent_requests` at a time when the transport allows concurrent
/// requests and strictly one at a time otherwise. Results keep transaction
/// order either way.
#[derive(Debug, Clone)]
pub struct TransactionEventParser {
    eth: Arc<EthApi>,
    decoder: EventDecoder,
    max_concurrent_requests: usize,
}

impl TransactionEventParser {
    pub fn new(eth: Arc<EthApi>, decoder: EventDecoder) -> Self {
        Self {
            eth,
            decoder,
            max_concurrent_requests: 1,
        }
    }

    /// Values below 1 are treated as 1.
    pub fn with_max_concurrent_requests(mut self, n: usize) -> Self {
        self.max_concurrent_requests = n.max(1);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.decoder = self.decoder.with_address(address);
        self
    }

    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.decoder = self.decoder.with_event_name(name);
        self
    }

    fn concurrency(&self) -> usize {
        if self.eth.transport().supports_concurrent_requests() {
            self.max_concurrent_requests
        } else {
            1
        }
    }

    fn decode_receipt(&self, receipt: TransactionReceipt) -> Result<Vec<ParsedEvent>, Web3Error> {
        let receipt = Arc::new(receipt);
        self.decoder.decode_logs(&receipt.logs, Some(&receipt))
    }
}

#[async_trait]
impl EventParser for TransactionEventParser {
    async fn parse_transaction(&self, tx: &Transaction) -> Result<Vec<ParsedEvent>, Web3Error> {
        if tx.is_pending() {
            return Ok(Vec::new());
        }
        let receipt = self
            .eth
            .transaction_receipt(tx.hash)
            .await?
            .ok_or_else(|| Web3Error::not_found(ResourceKind::Receipt, tx.hash))?;
        self.decode_receipt(receipt)
    }

    async fn parse_transaction_by_hash(&self, hash: B256) -> Result<Vec<ParsedEvent>, Web3Error> {
        if let Some(receipt) = self.eth.transaction_receipt(hash).await? {
            return self.decode_receipt(receipt);
        }
        // No receipt: either pending or unknown.
        match self.eth.transaction_by_hash(hash).await? {
            Some(_) => Ok(Vec::new()),
            None => Err(Web3Error::not_found(ResourceKind::Transaction, hash)),
        }
    }

    async fn parse_block(&self, block: &Block) -> Result<Vec<ParsedEvent>, Web3Error> {
        // pending block: its transactions have no receipts yet
        if block.hash.is_none() && block.number.is_none() {
            return Ok(Vec::new());
        }
        let hashes = block.transactions.iter().copied();
        let receipts: Vec<Option<TransactionReceipt>> = stream::iter(hashes)
            .map(|hash| self.eth.transaction_receipt(hash))
            .buffered(self.concurrency())
            .try_collect()
            .await?;

        let mut events = Vec::new();
        for (hash, receipt) in block.transactions.iter().zip(receipts) {
            let receipt =
                receipt.ok_or_else(|| Web3Error::not_found(ResourceKind::Receipt, hash))?;
            events.extend(self.decode_receipt(receipt)?);
        }

        tracing::debug!(
            block = ?block.number_u64(),
            transactions = block.transactions.len(),
            events = events.len(),
            "parsed block receipts"
        );
        Ok(events)
    }

    async fn parse_block_by_number(&self, number: u64) -> Result<Vec<ParsedEvent>, Web3Error> {
        let block = self
            .eth
            .block_by_number(number)
            .await?
            .ok_or_else(|| Web3Error::not_found(ResourceKind::Block, number))?;
        self.parse_block(&block).await
    }
}

// ─── BlockEventParser ─────────────────────────────────────────────────────────

/// `eth_getLogs`-based parser. Results carry their log but no receipt.
///
/// An address filter on the decoder is pushed down into the `eth_getLogs`
/// request.
#[derive(Debug, Clone)]
pub struct BlockEventParser {
    eth: Arc<EthApi>,
    decoder: EventDecoder,
}

impl BlockEventParser {
    pub fn new(eth: Arc<EthApi>, decoder: EventDecoder) -> Self {
        Self { eth, decoder }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.decoder = self.decoder.with_address(address);
        self
    }

    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.decoder = self.decoder.with_event_name(name);
        self
    }

    /// Logs of the block identified by `hash` (preferred) or `number`, in
    /// log-index order. Neither set means a pending block: no logs.
    async fn block_logs(
        &self,
        hash: Option<B256>,
        number: Option<u64>,
    ) -> Result<Vec<Log>, Web3Error> {
        let filter = match (hash, number) {
            (Some(hash), _) => LogFilter::at_block_hash(hash),
            (None, Some(number)) => LogFilter::at_block_number(number),
            (None, None) => return Ok(Vec::new()),
        };
        let filter = match self.decoder.address() {
            Some(address) => filter.with_address(address),
            None => filter,
        };

        let mut logs = self.eth.logs(&filter).await?;
        logs.sort_by_key(Log::log_index_u64);
        Ok(logs)
    }
}

#[async_trait]
impl EventParser for BlockEventParser {
    async fn parse_transaction(&self, tx: &Transaction) -> Result<Vec<ParsedEvent>, Web3Error> {
        if tx.is_pending() {
            return Ok(Vec::new());
        }
        let logs = self
            .block_logs(tx.block_hash, tx.block_number.map(|n| n.to::<u64>()))
            .await?;
        self.decoder.decode_logs(
            logs.iter().filter(|l| l.transaction_hash == Some(tx.hash)),
            None,
        )
    }

    async fn parse_transaction_by_hash(&self, hash: B256) -> Result<Vec<ParsedEvent>, Web3Error> {
        let tx = self
            .eth
            .transaction_by_hash(hash)
            .await?
            .ok_or_else(|| Web3Error::not_found(ResourceKind::Transaction, hash))?;
        self.parse_transaction(&tx).await
    }

    async fn parse_block(&self, block: &Block) -> Result<Vec<ParsedEvent>, Web3Error> {
        let logs = self.block_logs(block.hash, block.number_u64()).await?;
        let events = self.decoder.decode_logs(&logs, None)?;
        tracing::debug!(
            block = ?block.number_u64(),
            logs = logs.len(),
            events = events.len(),
            "parsed block logs"
        );
        Ok(events)
    }

    async fn parse_block_by_number(&self, number: u64) -> Result<Vec<ParsedEvent>, Web3Error> {
        let block = self
            .eth
            .block_by_number(number)
            .await?
            .ok_or_else(|| Web3Error::not_found(ResourceKind::Block, number))?;
        self.parse_block(&block).await
    }
}
