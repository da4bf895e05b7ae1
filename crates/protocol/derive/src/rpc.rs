//! Raw JSON-RPC shapes of the base-chain data consumed by the assembler.
//!
//! Fields are kept as the provider's hex text and are only interpreted by [`crate::assemble`].
//! Required fields are still modelled as [Option] so that an absent value surfaces as an
//! [`IntegrityError::MissingField`](crate::IntegrityError::MissingField) naming the field,
//! rather than as an opaque deserialization failure for the whole block.

use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// A block as returned by `eth_getBlockByNumber` with full transaction objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
    /// The block hash.
    #[serde(default)]
    pub hash: Option<String>,
    /// The block number, as a hex quantity.
    #[serde(default)]
    pub number: Option<String>,
    /// The block timestamp, as a hex quantity.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// The block's transactions in index order.
    #[serde(default)]
    pub transactions: Vec<RpcTransaction>,
}

/// A transaction object inside an [`RpcBlock`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    /// The transaction hash.
    #[serde(default)]
    pub hash: Option<String>,
    /// Position in the block, as a hex quantity.
    #[serde(default)]
    pub transaction_index: Option<String>,
    /// Calldata.
    #[serde(default)]
    pub input: Option<String>,
    /// Transferred value in wei, as a hex quantity.
    #[serde(default)]
    pub value: Option<String>,
    /// Chain id, absent on legacy pre-EIP-155 transactions.
    #[serde(default)]
    pub chain_id: Option<String>,
    /// Sender.
    #[serde(default)]
    pub from: Option<String>,
    /// Recipient, absent on contract creation.
    #[serde(default)]
    pub to: Option<String>,
}

/// A receipt as returned by `eth_getBlockReceipts` or `eth_getTransactionReceipt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    /// Hash of the transaction this receipt belongs to.
    #[serde(default)]
    pub transaction_hash: Option<String>,
    /// Execution status: `0x1` on success, `0x0` on failure.
    #[serde(default)]
    pub status: Option<String>,
    /// Logs emitted during execution.
    #[serde(default)]
    pub logs: Vec<RpcLog>,
}

/// A log inside an [`RpcReceipt`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcLog {
    /// Emitting contract.
    #[serde(default)]
    pub address: Option<String>,
    /// Indexed topics.
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    /// Non-indexed data.
    #[serde(default)]
    pub data: Option<String>,
    /// Position of the log in the block, as a hex quantity.
    #[serde(default)]
    pub log_index: Option<String>,
    /// Whether the log was removed by a reorg.
    #[serde(default)]
    pub removed: bool,
}
