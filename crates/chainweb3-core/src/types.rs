//! Chain data as returned by `eth_*` JSON-RPC methods.
//!
//! Only the fields the event pipeline reads are modelled; unknown fields in
//! node responses are ignored.

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// A raw EVM log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    /// `topics[0]` is the event selector for non-anonymous events.
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_index: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_index: Option<U64>,
    /// Set by the node when the log was dropped by a reorg.
    #[serde(default)]
    pub removed: bool,
}

impl Log {
    /// `topics[0]`, if present.
    pub fn selector(&self) -> Option<&B256> {
        self.topics.first()
    }

    pub fn block_number_u64(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }

    pub fn log_index_u64(&self) -> Option<u64> {
        self.log_index.map(|n| n.to::<u64>())
    }
}

/// A transaction as returned by `eth_getTransactionByHash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: B256,
    #[serde(default)]
    pub nonce: U64,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    #[serde(default)]
    pub value: U256,
    #[serde(default)]
    pub input: Bytes,
    /// `None` while the transaction is pending.
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub transaction_index: Option<U64>,
}

impl Transaction {
    pub fn is_pending(&self) -> bool {
        self.block_hash.is_none()
    }
}

/// A transaction receipt as returned by `eth_getTransactionReceipt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub transaction_index: Option<U64>,
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub block_number: Option<U64>,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub gas_used: U256,
    /// `0x1` on success, `0x0` on revert (post-Byzantium).
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |s| s == U64::from(1))
    }
}

/// A block header with transaction hashes (`eth_getBlockByNumber(n, false)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// `None` for the pending block.
    #[serde(default)]
    pub number: Option<U64>,
    #[serde(default)]
    pub hash: Option<B256>,
    pub parent_hash: B256,
    #[serde(default)]
    pub timestamp: U64,
    #[serde(default)]
    pub transactions: Vec<B256>,
}

impl Block {
    pub fn number_u64(&self) -> Option<u64> {
        self.number.map(|n| n.to::<u64>())
    }
}

/// Parameters for `eth_getLogs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl LogFilter {
    /// All logs of the block with this hash.
    pub fn at_block_hash(hash: B256) -> Self {
        Self {
            block_hash: Some(hash),
            ..Default::default()
        }
    }

    /// All logs of the block with this number.
    pub fn at_block_number(number: u64) -> Self {
        Self {
            from_block: Some(U64::from(number)),
            to_block: Some(U64::from(number)),
            ..Default::default()
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }
}
