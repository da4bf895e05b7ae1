//! Derivation config flags.

use crate::{error::DeriverResult, input::read_json};
use alloy_primitives::{Address, B256, U256};
use clap::{Parser, builder::BoolishValueParser};
use facet_derive::DerivationConfig;
use std::path::PathBuf;

/// Derivation config arguments.
///
/// Every flag overrides the matching field of the config file, which in turn overrides the
/// defaults.
#[derive(Parser, Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ConfigArgs {
    /// Path to a JSON derivation config.
    #[arg(long = "config", env = "FACET_DERIVATION_CONFIG")]
    pub(crate) config_file: Option<PathBuf>,
    /// Address of the inbox.
    #[arg(long = "inbox.address", env = "INBOX_ADDRESS")]
    pub(crate) inbox_address: Option<Address>,
    /// Fee in wei that a direct submission must carry, decimal or 0x-prefixed hex.
    #[arg(long = "inbox.fee", env = "FEE_WEI")]
    pub(crate) inbox_fee: Option<U256>,
    /// Topic of a submission event.
    #[arg(long = "event.topic", env = "FACET_EVENT_TOPIC")]
    pub(crate) submission_topic: Option<B256>,
    /// First topic of the payment receipt log.
    #[arg(long = "receipt.topic", env = "PAYMENT_RECEIPT_TOPIC0")]
    pub(crate) payment_receipt_topic: Option<B256>,
    /// Whether event submissions require a payment receipt.
    #[arg(
        long = "receipt.enforce",
        env = "ENFORCE_EVENT_RECEIPT",
        value_parser = BoolishValueParser::new()
    )]
    pub(crate) enforce_event_receipt: Option<bool>,
}

impl ConfigArgs {
    /// Loads the config file, if any, and applies the flags on top.
    pub(crate) fn resolve(&self) -> DeriverResult<DerivationConfig> {
        let base = match &self.config_file {
            Some(path) => read_json(path)?,
            None => DerivationConfig::default(),
        };
        Ok(self.apply(base))
    }

    /// Applies the flags that are set to `config`.
    pub(crate) fn apply(&self, mut config: DerivationConfig) -> DerivationConfig {
        if let Some(inbox_address) = self.inbox_address {
            config = config.with_inbox_address(inbox_address);
        }
        if let Some(inbox_fee) = self.inbox_fee {
            config = config.with_inbox_fee(inbox_fee);
        }
        if let Some(topic) = self.submission_topic {
            config = config.with_submission_topic(topic);
        }
        if let Some(topic) = self.payment_receipt_topic {
            config = config.with_payment_receipt_topic(topic);
        }
        if let Some(enforce) = self.enforce_event_receipt {
            config = config.with_enforce_event_receipt(enforce);
        }
        config
    }
}
