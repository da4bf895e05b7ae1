//! CallData Source

use crate::{DerivationConfig, DerivedTransaction, NormalizedTransaction, PayloadDecoder};
use alloy_primitives::{Address, U256};

/// Reads submissions sent directly to the inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalldataSource {
    /// The inbox address.
    pub inbox_address: Address,
    /// The exact value a submission must carry.
    pub inbox_fee: U256,
}

impl CalldataSource {
    /// Creates a new calldata source.
    pub const fn new(inbox_address: Address, inbox_fee: U256) -> Self {
        Self { inbox_address, inbox_fee }
    }

    /// Creates a calldata source from the inbox settings of a [`DerivationConfig`].
    pub const fn from_config(config: &DerivationConfig) -> Self {
        Self::new(config.inbox_address, config.inbox_fee)
    }

    /// Returns `true` if `tx` targets the inbox with exactly the inbox fee.
    pub fn is_submission(&self, tx: &NormalizedTransaction) -> bool {
        tx.to == Some(self.inbox_address) && tx.value == self.inbox_fee
    }

    /// Decodes the calldata of `tx` if it is a direct submission.
    ///
    /// The execution status is not checked here.
    pub fn derive<D: PayloadDecoder>(
        &self,
        tx: &NormalizedTransaction,
        decoder: &D,
    ) -> Option<DerivedTransaction> {
        if !self.is_submission(tx) {
            return None;
        }

        match decoder.decode(tx.input.clone(), tx.from, false, tx.tx_hash) {
            Ok(derived) => Some(derived),
            Err(err) => {
                debug!(
                    target: "derive",
                    tx_hash = %tx.tx_hash,
                    %err,
                    "Rejected calldata submission"
                );
                None
            }
        }
    }
}
