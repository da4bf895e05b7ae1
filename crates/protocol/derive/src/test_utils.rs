//! Test utilities for building raw provider data and normalized logs.

use crate::{
    DerivedTransaction, LogEntry, PayloadDecoder, RpcBlock, RpcLog, RpcReceipt, RpcTransaction,
};
use alloc::{format, string::String, vec::Vec};
use alloy_primitives::{Address, B256, Bytes, U256, hex};
use thiserror::Error;

/// A [`PayloadDecoder`] that accepts every payload except an explicit reject list.
#[derive(Debug, Clone, Default)]
pub struct TestDecoder {
    /// Payloads to reject.
    pub reject: Vec<Bytes>,
}

/// The rejection returned by the [`TestDecoder`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("payload rejected by test decoder")]
pub struct TestDecoderError;

impl TestDecoder {
    /// Creates a decoder that rejects the given payloads.
    pub fn rejecting(reject: impl IntoIterator<Item = Bytes>) -> Self {
        Self { reject: reject.into_iter().collect() }
    }
}

impl PayloadDecoder for TestDecoder {
    type Error = TestDecoderError;

    fn decode(
        &self,
        payload: Bytes,
        from: Address,
        contract_initiated: bool,
        source_hash: B256,
    ) -> Result<DerivedTransaction, Self::Error> {
        if self.reject.contains(&payload) {
            return Err(TestDecoderError);
        }
        Ok(DerivedTransaction::new(contract_initiated, from, payload, source_hash))
    }
}

/// Encodes payment receipt data reporting `amount` for `payload_hash`.
///
/// With `with_header` the data gets a leading word, producing the three-word layout.
pub fn receipt_data(amount: U256, payload_hash: B256, with_header: bool) -> Bytes {
    let mut data = Vec::with_capacity(96);
    if with_header {
        data.extend_from_slice(&[0u8; 32]);
    }
    data.extend_from_slice(&amount.to_be_bytes::<32>());
    data.extend_from_slice(payload_hash.as_slice());
    data.into()
}

/// Builds a normalized [`LogEntry`].
#[derive(Debug, Clone)]
pub struct LogEntryBuilder {
    log: LogEntry,
}

impl LogEntryBuilder {
    /// Starts a live log with no topics and empty data.
    pub fn new(address: Address, log_index: u64) -> Self {
        Self {
            log: LogEntry {
                address: Some(address),
                topics: Vec::new(),
                data: Some(Bytes::new()),
                log_index: Some(log_index),
                removed: false,
            },
        }
    }

    /// Sets the topics.
    pub fn with_topics(mut self, topics: impl IntoIterator<Item = B256>) -> Self {
        self.log.topics = topics.into_iter().map(Some).collect();
        self
    }

    /// Sets the data.
    pub fn with_data(mut self, data: impl Into<Bytes>) -> Self {
        self.log.data = Some(data.into());
        self
    }

    /// Marks the log as removed.
    pub fn removed(mut self) -> Self {
        self.log.removed = true;
        self
    }

    /// Returns the log.
    pub fn build(self) -> LogEntry {
        self.log
    }
}

/// Builds a raw [`RpcLog`].
#[derive(Debug, Clone)]
pub struct RpcLogBuilder {
    log: RpcLog,
}

impl RpcLogBuilder {
    /// Starts a live log with no topics and empty data.
    pub fn new(address: Address, log_index: u64) -> Self {
        Self {
            log: RpcLog {
                address: Some(format!("{address:#x}")),
                topics: Some(Vec::new()),
                data: Some(String::from("0x")),
                log_index: Some(format!("{log_index:#x}")),
                removed: false,
            },
        }
    }

    /// Sets the topics.
    pub fn with_topics(mut self, topics: impl IntoIterator<Item = B256>) -> Self {
        self.log.topics = Some(topics.into_iter().map(|topic| format!("{topic:#x}")).collect());
        self
    }

    /// Sets the data.
    pub fn with_data(mut self, data: impl AsRef<[u8]>) -> Self {
        self.log.data = Some(hex::encode_prefixed(data));
        self
    }

    /// Replaces the address with arbitrary text.
    pub fn with_raw_address(mut self, address: &str) -> Self {
        self.log.address = Some(String::from(address));
        self
    }

    /// Marks the log as removed.
    pub fn removed(mut self) -> Self {
        self.log.removed = true;
        self
    }

    /// Returns the log.
    pub fn build(self) -> RpcLog {
        self.log
    }
}

/// Returns a block at number `0x10` and timestamp `0x65` holding `transactions`.
pub fn rpc_block(transactions: Vec<RpcTransaction>) -> RpcBlock {
    RpcBlock {
        hash: Some(format!("{:#x}", B256::repeat_byte(0xb1))),
        number: Some(String::from("0x10")),
        timestamp: Some(String::from("0x65")),
        transactions,
    }
}

/// Returns a zero-value call from `0x…01` to `0x…02` with empty calldata.
pub fn rpc_transaction(hash: B256, index: u64) -> RpcTransaction {
    RpcTransaction {
        hash: Some(format!("{hash:#x}")),
        transaction_index: Some(format!("{index:#x}")),
        input: Some(String::from("0x")),
        value: Some(String::from("0x0")),
        chain_id: Some(String::from("0x1")),
        from: Some(format!("{:#x}", Address::with_last_byte(1))),
        to: Some(format!("{:#x}", Address::with_last_byte(2))),
    }
}

/// Returns a receipt for `hash` with the given status and logs.
pub fn rpc_receipt(hash: B256, status: u64, logs: Vec<RpcLog>) -> RpcReceipt {
    RpcReceipt {
        transaction_hash: Some(format!("{hash:#x}")),
        status: Some(format!("{status:#x}")),
        logs,
    }
}
