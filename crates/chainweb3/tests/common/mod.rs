//! In-process chain fixture served through a mock `RpcTransport`.

#![allow(dead_code)]

use alloy_primitives::{keccak256, Address, Bytes, B256, U256, U64};
use async_trait::async_trait;
use chainweb3::{
    Block, Connector, Log, RpcTransport, Transaction, TransactionReceipt, TransportError,
};
use chainweb3_core::{JsonRpcRequest, JsonRpcResponse};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

// ─── Helpers ──────────────────────────────────────────────────────────────────

pub const TRANSFER_SIG: &str =
    "event Transfer(address indexed from, address indexed to, uint256 value)";

pub fn token() -> Address {
    Address::repeat_byte(0xaa)
}

pub fn other_contract() -> Address {
    Address::repeat_byte(0xbb)
}

pub fn tx_hash(n: u8) -> B256 {
    B256::repeat_byte(n)
}

pub fn block_hash(number: u64) -> B256 {
    keccak256(number.to_be_bytes())
}

/// An ERC-20 `Transfer` log emitted by `address`.
pub fn transfer_log(address: Address, value: u64) -> Log {
    Log {
        address,
        topics: vec![
            keccak256("Transfer(address,address,uint256)"),
            Address::repeat_byte(0x01).into_word(),
            Address::repeat_byte(0x02).into_word(),
        ],
        data: Bytes::from(U256::from(value).to_be_bytes::<32>().to_vec()),
        block_number: None,
        block_hash: None,
        transaction_hash: None,
        transaction_index: None,
        log_index: None,
        removed: false,
    }
}

/// A log whose selector no test ABI knows.
pub fn opaque_log(address: Address) -> Log {
    Log {
        address,
        topics: vec![keccak256("Mystery(uint256)")],
        data: Bytes::from(vec![0u8; 32]),
        block_number: None,
        block_hash: None,
        transaction_hash: None,
        transaction_index: None,
        log_index: None,
        removed: false,
    }
}

// ─── MockChain ────────────────────────────────────────────────────────────────

/// Blocks, transactions and receipts served by [`MockTransport`].
#[derive(Debug, Default)]
pub struct MockChain {
    pub chain_id: u64,
    blocks: HashMap<u64, Block>,
    transactions: HashMap<B256, Transaction>,
    receipts: HashMap<B256, TransactionReceipt>,
    reverse_logs: bool,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            ..Default::default()
        }
    }

    /// Add a mined block whose transactions emit `txs[i].1` in order.
    /// Block metadata and log indices are filled in the way a node would.
    pub fn with_block(mut self, number: u64, txs: Vec<(B256, Vec<Log>)>) -> Self {
        let hash = block_hash(number);
        let mut log_index = 0u64;
        let mut tx_hashes = Vec::new();

        for (i, (tx, logs)) in txs.into_iter().enumerate() {
            let logs = logs
                .into_iter()
                .map(|mut log| {
                    log.block_number = Some(U64::from(number));
                    log.block_hash = Some(hash);
                    log.transaction_hash = Some(tx);
                    log.transaction_index = Some(U64::from(i));
                    log.log_index = Some(U64::from(log_index));
                    log_index += 1;
                    log
                })
                .collect();

            self.transactions.insert(
                tx,
                Transaction {
                    hash: tx,
                    nonce: U64::from(i),
                    from: Address::repeat_byte(0x01),
                    to: Some(token()),
                    value: U256::ZERO,
                    input: Bytes::new(),
                    block_hash: Some(hash),
                    block_number: Some(U64::from(number)),
                    transaction_index: Some(U64::from(i)),
                },
            );
            self.receipts.insert(
                tx,
                TransactionReceipt {
                    transaction_hash: tx,
                    transaction_index: Some(U64::from(i)),
                    block_hash: Some(hash),
                    block_number: Some(U64::from(number)),
                    from: Address::repeat_byte(0x01),
                    to: Some(token()),
                    contract_address: None,
                    gas_used: U256::from(21_000),
                    status: Some(U64::from(1)),
                    logs,
                },
            );
            tx_hashes.push(tx);
        }

        self.blocks.insert(
            number,
            Block {
                number: Some(U64::from(number)),
                hash: Some(hash),
                parent_hash: B256::ZERO,
                timestamp: U64::from(1_700_000_000u64 + number * 12),
                transactions: tx_hashes,
            },
        );
        self
    }

    /// A transaction known to the node but not yet mined.
    pub fn with_pending(mut self, hash: B256) -> Self {
        self.transactions.insert(
            hash,
            Transaction {
                hash,
                nonce: U64::ZERO,
                from: Address::repeat_byte(0x01),
                to: Some(token()),
                value: U256::ZERO,
                input: Bytes::new(),
                block_hash: None,
                block_number: None,
                transaction_index: None,
            },
        );
        self
    }

    /// Answer `eth_getLogs` in descending log-index order, as some nodes do
    /// when a response is assembled from several shards.
    pub fn with_reversed_logs(mut self) -> Self {
        self.reverse_logs = true;
        self
    }

    pub fn block(&self, number: u64) -> Block {
        self.blocks[&number].clone()
    }

    pub fn transaction(&self, hash: B256) -> Transaction {
        self.transactions[&hash].clone()
    }

    fn logs(&self, filter: &Value) -> Vec<Log> {
        let block = if let Some(hash) = filter.get("blockHash") {
            let hash: B256 = serde_json::from_value(hash.clone()).unwrap();
            self.blocks.values().find(|b| b.hash == Some(hash))
        } else {
            let from: U64 = serde_json::from_value(filter["fromBlock"].clone()).unwrap();
            self.blocks.get(&from.to::<u64>())
        };
        let address: Option<Address> = filter
            .get("address")
            .map(|a| serde_json::from_value(a.clone()).unwrap());

        let Some(block) = block else {
            return Vec::new();
        };
        let mut logs: Vec<Log> = block
            .transactions
            .iter()
            .flat_map(|tx| self.receipts[tx].logs.clone())
            .filter(|log| address.map_or(true, |a| a == log.address))
            .collect();
        if self.reverse_logs {
            logs.reverse();
        }
        logs
    }

    fn answer(&self, method: &str, params: &[Value]) -> Value {
        match method {
            "eth_chainId" => json!(U64::from(self.chain_id)),
            "eth_blockNumber" => json!(U64::from(self.blocks.keys().max().copied().unwrap_or(0))),
            "eth_getBlockByNumber" => {
                let n: U64 = serde_json::from_value(params[0].clone()).unwrap();
                json!(self.blocks.get(&n.to::<u64>()))
            }
            "eth_getTransactionByHash" => {
                let h: B256 = serde_json::from_value(params[0].clone()).unwrap();
                json!(self.transactions.get(&h))
            }
            "eth_getTransactionReceipt" => {
                let h: B256 = serde_json::from_value(params[0].clone()).unwrap();
                json!(self.receipts.get(&h))
            }
            "eth_getLogs" => json!(self.logs(&params[0])),
            other => panic!("unexpected method {other}"),
        }
    }
}

// ─── MockTransport ────────────────────────────────────────────────────────────

/// Serves a [`MockChain`], recording calls and peak concurrency.
pub struct MockTransport {
    chain: MockChain,
    concurrent: bool,
    fail_method: Option<&'static str>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new(chain: MockChain) -> Self {
        Self {
            chain,
            concurrent: false,
            fail_method: None,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn concurrent(mut self) -> Self {
        self.concurrent = true;
        self
    }

    /// Make every call to `method` fail as if the connection dropped.
    pub fn failing(mut self, method: &'static str) -> Self {
        self.fail_method = Some(method);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|m| *m == method).count()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        self.calls.lock().unwrap().push(req.method.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::task::yield_now().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.fail_method == Some(req.method.as_str()) {
            return Err(TransportError::Http("connection reset by peer".into()));
        }
        Ok(JsonRpcResponse::success(
            req.id,
            self.chain.answer(&req.method, &req.params),
        ))
    }

    fn url(&self) -> &str {
        "mock://chain"
    }

    fn supports_concurrent_requests(&self) -> bool {
        self.concurrent
    }
}

/// Hands out one pre-built transport.
pub struct MockConnector(pub Arc<MockTransport>);

#[async_trait]
impl Connector for MockConnector {
    async fn open(&self, _url: &Url) -> Result<Arc<dyn RpcTransport>, TransportError> {
        Ok(self.0.clone())
    }
}
