//! Typed `eth_*` calls over an [`RpcTransport`].

use alloy_primitives::{B256, U64};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chainweb3_core::{
    Block, JsonRpcRequest, Log, LogFilter, RpcTransport, Transaction, TransactionReceipt,
    TransportError,
};

/// The handful of JSON-RPC methods the client and parsers need.
///
/// Lookups return `Ok(None)` when the node answers `null`; deciding whether
/// that is an error is left to the caller.
pub struct EthApi {
    transport: Arc<dyn RpcTransport>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for EthApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthApi")
            .field("url", &self.transport.url())
            .finish_non_exhaustive()
    }
}

impl EthApi {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn transport(&self) -> &Arc<dyn RpcTransport> {
        &self.transport
    }

    /// Call a method and deserialize the result.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let resp = self.transport.send(JsonRpcRequest::new(id, method, params)).await?;
        let result = resp.into_result().map_err(TransportError::Rpc)?;
        Ok(serde_json::from_value(result)?)
    }

    /// `eth_chainId`
    pub async fn chain_id(&self) -> Result<u64, TransportError> {
        let id: U64 = self.call("eth_chainId", vec![]).await?;
        Ok(id.to::<u64>())
    }

    /// `eth_blockNumber`
    pub async fn block_number(&self) -> Result<u64, TransportError> {
        let n: U64 = self.call("eth_blockNumber", vec![]).await?;
        Ok(n.to::<u64>())
    }

    /// `eth_getBlockByNumber(number, false)` — transactions as hashes.
    pub async fn block_by_number(&self, number: u64) -> Result<Option<Block>, TransportError> {
        self.call("eth_getBlockByNumber", vec![json!(U64::from(number)), json!(false)])
            .await
    }

    /// `eth_getTransactionByHash`
    pub async fn transaction_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<Transaction>, TransportError> {
        self.call("eth_getTransactionByHash", vec![json!(hash)]).await
    }

    /// `eth_getTransactionReceipt`
    pub async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, TransportError> {
        self.call("eth_getTransactionReceipt", vec![json!(hash)]).await
    }

    /// `eth_getLogs`
    pub async fn logs(&self, filter: &LogFilter) -> Result<Vec<Log>, TransportError> {
        self.call("eth_getLogs", vec![json!(filter)]).await
    }
}
