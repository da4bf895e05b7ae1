//! Joins a raw block with its receipts.

use crate::{
    IntegrityError, IntegrityResult, LogEntry, NormalizedTransaction, RecordRef, RpcBlock,
    RpcReceipt, quantity::Field,
};
use alloc::vec::Vec;
use alloy_primitives::{B256, map::HashMap};

/// Produces one [`NormalizedTransaction`] per transaction in `block`, ordered by transaction
/// index.
///
/// Receipts are matched to transactions by hash and may be given in any order. Receipts that
/// match no transaction are ignored.
///
/// # Errors
///
/// Returns an [`IntegrityError`] if a transaction has no receipt, two receipts share a hash, or a
/// required field of the block, a transaction or a receipt is absent or malformed. Malformed log
/// fields never fail assembly.
pub fn assemble(
    block: &RpcBlock,
    receipts: &[RpcReceipt],
) -> IntegrityResult<Vec<NormalizedTransaction>> {
    let block_hash = Field::new("hash", RecordRef::Block).b256(block.hash.as_deref())?;
    let block_number = Field::new("number", RecordRef::Block).u64(block.number.as_deref())?;
    let block_timestamp =
        Field::new("timestamp", RecordRef::Block).u64(block.timestamp.as_deref())?;

    let indexed = index_receipts(receipts)?;

    let mut transactions = block
        .transactions
        .iter()
        .enumerate()
        .map(|(position, tx)| -> IntegrityResult<NormalizedTransaction> {
            let record = RecordRef::Transaction(position);
            let tx_hash = Field::new("hash", record).b256(tx.hash.as_deref())?;
            let (receipt_position, receipt) =
                indexed.get(&tx_hash).copied().ok_or(IntegrityError::MissingReceipt(tx_hash))?;
            let receipt_record = RecordRef::Receipt(receipt_position);

            let logs = receipt
                .logs
                .iter()
                .enumerate()
                .map(|(position, log)| {
                    LogEntry::from_rpc(log, RecordRef::Log { receipt: receipt_position, position })
                })
                .collect::<Vec<_>>();

            Ok(NormalizedTransaction {
                block_hash,
                block_number,
                block_timestamp,
                tx_hash,
                transaction_index: Field::new("transactionIndex", record)
                    .u64(tx.transaction_index.as_deref())?,
                input: Field::new("input", record).bytes(tx.input.as_deref())?,
                value: Field::new("value", record).u256(tx.value.as_deref())?,
                chain_id: Field::new("chainId", record).opt_u64(tx.chain_id.as_deref())?,
                from: Field::new("from", record).address(tx.from.as_deref())?,
                to: Field::new("to", record).opt_address(tx.to.as_deref())?,
                status: Field::new("status", receipt_record).u64(receipt.status.as_deref())?,
                logs,
            })
        })
        .collect::<IntegrityResult<Vec<_>>>()?;

    // Providers return transactions in index order already. The sort is stable, so this only
    // matters for hand-built inputs.
    transactions.sort_by_key(|tx| tx.transaction_index);

    debug!(
        target: "assembler",
        block_number,
        %block_hash,
        transactions = transactions.len(),
        receipts = receipts.len(),
        "Assembled block"
    );

    Ok(transactions)
}

/// Indexes receipts by transaction hash, remembering each receipt's position.
fn index_receipts(
    receipts: &[RpcReceipt],
) -> IntegrityResult<HashMap<B256, (usize, &RpcReceipt)>> {
    let mut indexed = HashMap::with_capacity_and_hasher(receipts.len(), Default::default());
    for (position, receipt) in receipts.iter().enumerate() {
        let hash = Field::new("transactionHash", RecordRef::Receipt(position))
            .b256(receipt.transaction_hash.as_deref())?;
        if indexed.insert(hash, (position, receipt)).is_some() {
            return Err(IntegrityError::DuplicateReceipt(hash));
        }
    }
    Ok(indexed)
}
