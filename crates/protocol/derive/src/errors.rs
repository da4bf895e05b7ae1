//! Error types for the derivation crate.

use alloc::string::String;
use alloy_primitives::B256;
use core::fmt;
use thiserror::Error;

/// A [Result] type for the [IntegrityError].
pub type IntegrityResult<T> = Result<T, IntegrityError>;

/// Identifies the raw provider record a field was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef {
    /// The block object itself.
    Block,
    /// The transaction at the given position in the block's transaction list.
    Transaction(usize),
    /// The receipt at the given position in the receipt list.
    Receipt(usize),
    /// A log inside a receipt.
    Log {
        /// Position of the receipt in the receipt list.
        receipt: usize,
        /// Position of the log inside the receipt.
        position: usize,
    },
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => f.write_str("block"),
            Self::Transaction(i) => write!(f, "transaction #{i}"),
            Self::Receipt(i) => write!(f, "receipt #{i}"),
            Self::Log { receipt, position } => write!(f, "log #{position} of receipt #{receipt}"),
        }
    }
}

/// Provider data that cannot be assembled into normalized transactions.
///
/// Any of these aborts processing of the whole block. The caller decides whether to refetch
/// or halt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// A block transaction has no receipt in the receipt set.
    #[error("No receipt found for transaction {0}")]
    MissingReceipt(B256),
    /// Two receipts share the same transaction hash.
    #[error("Duplicate receipt for transaction {0}")]
    DuplicateReceipt(B256),
    /// A required field is absent.
    #[error("Missing field `{field}` in {record}")]
    MissingField {
        /// The wire name of the field.
        field: &'static str,
        /// The record the field belongs to.
        record: RecordRef,
    },
    /// A required field is present but is not valid hex for its type.
    #[error("Invalid value {value:?} for field `{field}` in {record}")]
    InvalidHex {
        /// The wire name of the field.
        field: &'static str,
        /// The record the field belongs to.
        record: RecordRef,
        /// The offending raw value.
        value: String,
    },
}
