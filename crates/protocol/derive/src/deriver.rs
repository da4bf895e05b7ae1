//! The derivation engine.

use crate::{
    DerivationConfig, DerivedTransaction, IntegrityResult, NormalizedTransaction, PayloadDecoder,
    RpcBlock, RpcReceipt, assemble,
    sources::{CalldataSource, EventSource},
};
use alloc::vec::Vec;

/// Derives transactions from normalized base-chain transactions.
///
/// Each base-chain transaction is checked in a fixed order, and the first rule that produces a
/// transaction wins:
///
/// 1. Failed transactions never produce anything.
/// 2. A direct submission through [`CalldataSource`].
/// 3. The first valid submission log through [`EventSource`].
#[derive(Debug, Clone)]
pub struct InboxDeriver<D> {
    config: DerivationConfig,
    calldata: CalldataSource,
    events: EventSource,
    decoder: D,
}

impl<D: PayloadDecoder> InboxDeriver<D> {
    /// Creates a new [`InboxDeriver`].
    pub const fn new(config: DerivationConfig, decoder: D) -> Self {
        Self {
            config,
            calldata: CalldataSource::from_config(&config),
            events: EventSource::from_config(&config),
            decoder,
        }
    }

    /// Returns the [`DerivationConfig`] in use.
    pub const fn config(&self) -> &DerivationConfig {
        &self.config
    }

    /// Derives the transaction carried by `tx`, if any.
    pub fn derive_transaction(&self, tx: &NormalizedTransaction) -> Option<DerivedTransaction> {
        if !tx.is_success() {
            trace!(
                target: "derive",
                tx_hash = %tx.tx_hash,
                status = tx.status,
                "Skipping failed transaction"
            );
            return None;
        }

        self.calldata
            .derive(tx, &self.decoder)
            .or_else(|| self.events.derive(tx, &self.decoder))
    }

    /// Derives transactions from `txs`, keeping their relative order.
    pub fn derive(&self, txs: &[NormalizedTransaction]) -> Vec<DerivedTransaction> {
        txs.iter().filter_map(|tx| self.derive_transaction(tx)).collect()
    }

    /// Assembles a raw block with its receipts and derives its transactions.
    ///
    /// # Errors
    ///
    /// Fails if the block and receipts cannot be assembled. See [`assemble`].
    pub fn derive_block(
        &self,
        block: &RpcBlock,
        receipts: &[RpcReceipt],
    ) -> IntegrityResult<Vec<DerivedTransaction>> {
        let txs = assemble(block, receipts)?;
        let derived = self.derive(&txs);

        if let Some(first) = txs.first() {
            info!(
                target: "derive",
                block_number = first.block_number,
                block_hash = %first.block_hash,
                transactions = txs.len(),
                derived = derived.len(),
                "Derived block"
            );
        }
        Ok(derived)
    }
}

/// Derives transactions from `txs` under `config`.
///
/// Shorthand for [`InboxDeriver::derive`].
pub fn derive<D: PayloadDecoder>(
    txs: &[NormalizedTransaction],
    config: &DerivationConfig,
    decoder: D,
) -> Vec<DerivedTransaction> {
    InboxDeriver::new(*config, decoder).derive(txs)
}
