//! # facet-derive
//!
//! Derivation of Facet transactions from base-chain blocks and their receipts.
//!
//! Every base-chain transaction yields at most one derived transaction. A transaction qualifies
//! either by sending the inbox fee straight to the inbox address, in which case its calldata is
//! the payload, or by emitting a submission event, in which case the event data is the payload
//! and (optionally) a payment receipt log emitted by the inbox must vouch for it.
//!
//! The crate is split in two stages:
//!
//! - [`assemble`] joins a raw block with its receipts and produces one
//!   [`NormalizedTransaction`] per base-chain transaction, failing with an [`IntegrityError`]
//!   when the provider data is inconsistent.
//! - [`InboxDeriver`] walks the normalized transactions in index order and hands qualifying
//!   payloads to a [`PayloadDecoder`], collecting the resulting [`DerivedTransaction`]s.
//!
//! Both stages are pure and synchronous. Fetching data, walking the chain and selecting the
//! [`DerivationConfig`] in effect at a given height are left to the caller.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[macro_use]
extern crate tracing;

mod assembler;
pub use assembler::assemble;

mod config;
pub use config::{
    DEFAULT_INBOX_ADDRESS, DEFAULT_PAYMENT_RECEIPT_TOPIC, DEFAULT_SUBMISSION_TOPIC,
    DerivationConfig,
};

mod decoder;
pub use decoder::{DecodeError, EnvelopeDecoder, FACET_TX_TYPE, PayloadDecoder};

mod deriver;
pub use deriver::{InboxDeriver, derive};

pub mod errors;
pub use errors::{IntegrityError, IntegrityResult, RecordRef};

mod quantity;

pub mod rpc;
pub use rpc::{RpcBlock, RpcLog, RpcReceipt, RpcTransaction};

pub mod sources;

mod types;
pub use types::{DerivedTransaction, LogEntry, NormalizedTransaction};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
