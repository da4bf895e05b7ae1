//! Derivation configuration.

use alloy_primitives::{Address, B256, U256, address, b256};
use serde::{Deserialize, Serialize};

/// The inbox address used when none is configured.
pub const DEFAULT_INBOX_ADDRESS: Address = address!("0x00000000000000000000000000000000000face7");

/// The submission event topic used when none is configured.
pub const DEFAULT_SUBMISSION_TOPIC: B256 =
    b256!("0x00000000000000000000000000000000000000000000000000000000000face7");

/// The payment receipt topic used when none is configured.
pub const DEFAULT_PAYMENT_RECEIPT_TOPIC: B256 = B256::ZERO;

/// The parameters that decide which base-chain transactions are submissions.
///
/// A [`DerivationConfig`] is fixed for the duration of a block. Deployments that change the
/// inbox or fee at some height select the config in effect before invoking the deriver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DerivationConfig {
    /// Address that direct submissions must be sent to, and that emits payment receipts.
    pub inbox_address: Address,
    /// Value in wei a direct submission must carry, and a payment receipt must report.
    pub inbox_fee: U256,
    /// Topic of the single-topic log that carries an event submission.
    pub submission_topic: B256,
    /// First topic of the payment receipt log emitted by the inbox.
    pub payment_receipt_topic: B256,
    /// Whether event submissions require a matching payment receipt.
    pub enforce_event_receipt: bool,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            inbox_address: DEFAULT_INBOX_ADDRESS,
            inbox_fee: U256::ZERO,
            submission_topic: DEFAULT_SUBMISSION_TOPIC,
            payment_receipt_topic: DEFAULT_PAYMENT_RECEIPT_TOPIC,
            enforce_event_receipt: true,
        }
    }
}

impl DerivationConfig {
    /// Sets the inbox address.
    pub const fn with_inbox_address(mut self, inbox_address: Address) -> Self {
        self.inbox_address = inbox_address;
        self
    }

    /// Sets the inbox fee.
    pub const fn with_inbox_fee(mut self, inbox_fee: U256) -> Self {
        self.inbox_fee = inbox_fee;
        self
    }

    /// Sets the submission event topic.
    pub const fn with_submission_topic(mut self, topic: B256) -> Self {
        self.submission_topic = topic;
        self
    }

    /// Sets the payment receipt topic.
    pub const fn with_payment_receipt_topic(mut self, topic: B256) -> Self {
        self.payment_receipt_topic = topic;
        self
    }

    /// Toggles payment receipt enforcement for event submissions.
    pub const fn with_enforce_event_receipt(mut self, enforce: bool) -> Self {
        self.enforce_event_receipt = enforce;
        self
    }
}
