//! Normalized base-chain records and the derived transaction.

use crate::{
    RecordRef, RpcLog,
    quantity::{try_address, try_b256, try_bytes, try_u64},
};
use alloc::vec::Vec;
use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

/// A base-chain transaction joined with its receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTransaction {
    /// Hash of the containing block.
    pub block_hash: B256,
    /// Number of the containing block.
    pub block_number: u64,
    /// Timestamp of the containing block.
    pub block_timestamp: u64,
    /// The transaction hash.
    pub tx_hash: B256,
    /// Position of the transaction in the block.
    pub transaction_index: u64,
    /// Calldata.
    pub input: Bytes,
    /// Transferred value in wei.
    pub value: U256,
    /// Chain id, [None] when the provider did not report one.
    pub chain_id: Option<u64>,
    /// Sender.
    pub from: Address,
    /// Recipient, [None] for contract creation.
    pub to: Option<Address>,
    /// Receipt status, `1` on success.
    pub status: u64,
    /// Logs from the receipt, in receipt order.
    pub logs: Vec<LogEntry>,
}

impl NormalizedTransaction {
    /// Returns `true` if the transaction executed successfully.
    pub const fn is_success(&self) -> bool {
        self.status == 1
    }
}

/// A receipt log.
///
/// Every field is parsed leniently: a value that is absent or not valid hex is stored as [None],
/// which never matches anything during derivation. A malformed log never fails the block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEntry {
    /// Emitting contract.
    pub address: Option<Address>,
    /// Indexed topics, in order.
    pub topics: Vec<Option<B256>>,
    /// Non-indexed data.
    pub data: Option<Bytes>,
    /// Position of the log in the block. Only orders submission candidates.
    pub log_index: Option<u64>,
    /// Whether the log was removed by a reorg.
    pub removed: bool,
}

impl LogEntry {
    /// Normalizes a raw provider log.
    pub fn from_rpc(log: &RpcLog, record: RecordRef) -> Self {
        let log_index = log.log_index.as_deref().and_then(try_u64);
        let address = log.address.as_deref().and_then(try_address);
        let topics = log
            .topics
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|topic| try_b256(topic))
            .collect::<Vec<_>>();
        let data = log.data.as_deref().and_then(try_bytes);

        if address.is_none()
            || data.is_none()
            || log_index.is_none()
            || topics.iter().any(Option::is_none)
        {
            trace!(target: "assembler", %record, "Log carries malformed or missing fields");
        }

        Self { address, topics, data, log_index, removed: log.removed }
    }

    /// Returns the first topic if it is present and well formed.
    pub fn topic0(&self) -> Option<B256> {
        self.topics.first().copied().flatten()
    }
}

/// A transaction derived from base-chain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedTransaction {
    /// `true` if the payload came from a submission event rather than calldata.
    pub contract_initiated: bool,
    /// The credited sender: the transaction sender for calldata submissions, the emitting
    /// contract for event submissions.
    pub from: Address,
    /// The undecoded payload.
    pub payload: Bytes,
    /// The base-chain transaction hash the payload was sourced from.
    pub source_hash: B256,
}

impl DerivedTransaction {
    /// Creates a new [`DerivedTransaction`].
    pub const fn new(
        contract_initiated: bool,
        from: Address,
        payload: Bytes,
        source_hash: B256,
    ) -> Self {
        Self { contract_initiated, from, payload, source_hash }
    }
}
