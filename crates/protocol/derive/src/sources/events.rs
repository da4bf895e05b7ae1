//! Event Source

use crate::{
    DerivationConfig, DerivedTransaction, LogEntry, NormalizedTransaction, PayloadDecoder,
    sources::PaymentReceiptVerifier,
};
use alloc::vec::Vec;
use alloy_primitives::{B256, keccak256};

/// Reads submissions emitted as logs, which lets contracts submit on behalf of themselves.
///
/// A submission log has exactly one topic, the submission topic, and carries the payload as its
/// data. Candidates are tried in log index order and the first one that decodes wins. A log whose
/// index is missing or malformed cannot be ordered and is never a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSource {
    /// The single topic of a submission log.
    pub submission_topic: B256,
    /// Receipt enforcement, if enabled.
    pub receipts: Option<PaymentReceiptVerifier>,
}

impl EventSource {
    /// Creates a new event source.
    pub const fn new(submission_topic: B256, receipts: Option<PaymentReceiptVerifier>) -> Self {
        Self { submission_topic, receipts }
    }

    /// Creates an event source from a [`DerivationConfig`].
    pub const fn from_config(config: &DerivationConfig) -> Self {
        let receipts = if config.enforce_event_receipt {
            Some(PaymentReceiptVerifier::from_config(config))
        } else {
            None
        };
        Self::new(config.submission_topic, receipts)
    }

    /// Returns the submission logs among `logs`, ordered by log index.
    pub fn candidates<'a>(&self, logs: &'a [LogEntry]) -> Vec<&'a LogEntry> {
        let mut candidates = logs
            .iter()
            .filter(|log| !log.removed && log.log_index.is_some() && self.is_submission_log(log))
            .collect::<Vec<_>>();
        candidates.sort_by_key(|log| log.log_index);
        candidates
    }

    fn is_submission_log(&self, log: &LogEntry) -> bool {
        matches!(log.topics.as_slice(), [Some(topic)] if *topic == self.submission_topic)
    }

    /// Decodes the first valid submission log of `tx`.
    ///
    /// The execution status is not checked here.
    pub fn derive<D: PayloadDecoder>(
        &self,
        tx: &NormalizedTransaction,
        decoder: &D,
    ) -> Option<DerivedTransaction> {
        for log in self.candidates(&tx.logs) {
            let (Some(payload), Some(emitter)) = (log.data.as_ref(), log.address) else {
                trace!(
                    target: "derive",
                    tx_hash = %tx.tx_hash,
                    log_index = log.log_index,
                    "Skipping malformed submission log"
                );
                continue;
            };

            if let Some(receipts) = &self.receipts {
                let payload_hash = keccak256(payload);
                if !receipts.verify(&tx.logs, payload_hash) {
                    debug!(
                        target: "derive",
                        tx_hash = %tx.tx_hash,
                        log_index = log.log_index,
                        %payload_hash,
                        "Submission log has no payment receipt"
                    );
                    continue;
                }
            }

            match decoder.decode(payload.clone(), emitter, true, tx.tx_hash) {
                Ok(derived) => return Some(derived),
                Err(err) => {
                    debug!(
                        target: "derive",
                        tx_hash = %tx.tx_hash,
                        log_index = log.log_index,
                        %err,
                        "Rejected event submission"
                    );
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LogEntryBuilder, TestDecoder, receipt_data};
    use alloc::vec;
    use alloy_primitives::{Address, Bytes, U256, address};

    const INBOX: Address = address!("0x00000000000000000000000000000000000face7");
    const EMITTER: Address = address!("0x5555555555555555555555555555555555555555");
    const SUBMISSION: B256 = B256::repeat_byte(0x5b);
    const RECEIPT: B256 = B256::repeat_byte(0x7c);

    fn config(enforce: bool) -> DerivationConfig {
        DerivationConfig::default()
            .with_inbox_address(INBOX)
            .with_inbox_fee(U256::from(42))
            .with_submission_topic(SUBMISSION)
            .with_payment_receipt_topic(RECEIPT)
            .with_enforce_event_receipt(enforce)
    }

    fn submission(payload: &'static [u8], log_index: u64) -> LogEntry {
        LogEntryBuilder::new(EMITTER, log_index)
            .with_topics([SUBMISSION])
            .with_data(Bytes::from_static(payload))
            .build()
    }

    fn receipt(payload: &[u8], log_index: u64) -> LogEntry {
        LogEntryBuilder::new(INBOX, log_index)
            .with_topics([RECEIPT])
            .with_data(receipt_data(U256::from(42), keccak256(payload), true))
            .build()
    }

    fn tx(logs: Vec<LogEntry>) -> NormalizedTransaction {
        NormalizedTransaction {
            tx_hash: B256::repeat_byte(0xee),
            from: Address::repeat_byte(0x01),
            status: 1,
            logs,
            ..Default::default()
        }
    }

    #[test]
    fn test_from_config_toggles_receipts() {
        assert!(EventSource::from_config(&config(true)).receipts.is_some());
        assert!(EventSource::from_config(&config(false)).receipts.is_none());
    }

    #[test]
    fn test_candidates_filter_and_order() {
        let removed = LogEntryBuilder::new(EMITTER, 0)
            .with_topics([SUBMISSION])
            .with_data(Bytes::from_static(b"removed"))
            .removed()
            .build();
        let two_topics =
            LogEntryBuilder::new(EMITTER, 1).with_topics([SUBMISSION, SUBMISSION]).build();
        let other_topic = LogEntryBuilder::new(EMITTER, 2).with_topics([RECEIPT]).build();
        let mut malformed_topic = submission(b"bad", 3);
        malformed_topic.topics = vec![None];
        let mut no_index = submission(b"unordered", 5);
        no_index.log_index = None;
        let logs = vec![
            submission(b"late", 9),
            removed,
            two_topics,
            other_topic,
            malformed_topic,
            no_index,
            submission(b"early", 4),
        ];

        let source = EventSource::from_config(&config(false));
        let candidates = source.candidates(&logs);
        assert_eq!(
            candidates.iter().map(|log| log.log_index).collect::<Vec<_>>(),
            vec![Some(4), Some(9)]
        );
    }

    #[test]
    fn test_derive_without_enforcement() {
        let source = EventSource::from_config(&config(false));
        let derived =
            source.derive(&tx(vec![submission(b"payload", 0)]), &TestDecoder::default()).unwrap();
        assert!(derived.contract_initiated);
        assert_eq!(derived.from, EMITTER);
        assert_eq!(derived.payload, Bytes::from_static(b"payload"));
        assert_eq!(derived.source_hash, B256::repeat_byte(0xee));
    }

    #[test]
    fn test_derive_requires_receipt_when_enforced() {
        let source = EventSource::from_config(&config(true));
        let decoder = TestDecoder::default();
        assert!(source.derive(&tx(vec![submission(b"payload", 0)]), &decoder).is_none());

        let with_receipt = tx(vec![submission(b"payload", 0), receipt(b"payload", 1)]);
        let derived = source.derive(&with_receipt, &decoder).unwrap();
        assert_eq!(derived.from, EMITTER);
    }

    #[test]
    fn test_derive_skips_candidate_without_receipt() {
        let source = EventSource::from_config(&config(true));
        let logs = vec![submission(b"first", 0), submission(b"second", 1), receipt(b"second", 2)];
        let derived = source.derive(&tx(logs), &TestDecoder::default()).unwrap();
        assert_eq!(derived.payload, Bytes::from_static(b"second"));
    }

    #[test]
    fn test_derive_first_valid_candidate_wins() {
        let source = EventSource::from_config(&config(true));
        let logs = vec![
            receipt(b"second", 0),
            receipt(b"first", 1),
            submission(b"second", 3),
            submission(b"first", 2),
        ];
        let derived = source.derive(&tx(logs), &TestDecoder::default()).unwrap();
        assert_eq!(derived.payload, Bytes::from_static(b"first"));
    }

    #[test]
    fn test_derive_falls_through_decoder_rejection() {
        let source = EventSource::from_config(&config(false));
        let decoder = TestDecoder::rejecting([Bytes::from_static(b"first")]);
        let logs = vec![submission(b"first", 0), submission(b"second", 1)];
        let derived = source.derive(&tx(logs), &decoder).unwrap();
        assert_eq!(derived.payload, Bytes::from_static(b"second"));
    }

    #[test]
    fn test_derive_ignores_removed_receipt() {
        let source = EventSource::from_config(&config(true));
        let removed_receipt = LogEntryBuilder::new(INBOX, 1)
            .with_topics([RECEIPT])
            .with_data(receipt_data(U256::from(42), keccak256(b"payload"), true))
            .removed()
            .build();
        let logs = vec![submission(b"payload", 0), removed_receipt];
        assert!(source.derive(&tx(logs), &TestDecoder::default()).is_none());
    }

    #[test]
    fn test_derive_skips_submission_with_malformed_emitter() {
        let source = EventSource::from_config(&config(false));
        let mut malformed = submission(b"first", 0);
        malformed.address = None;
        let logs = vec![malformed, submission(b"second", 1)];
        let derived = source.derive(&tx(logs), &TestDecoder::default()).unwrap();
        assert_eq!(derived.payload, Bytes::from_static(b"second"));
    }

    #[test]
    fn test_derive_skips_submission_without_log_index() {
        let source = EventSource::from_config(&config(false));
        let mut unordered = submission(b"first", 0);
        unordered.log_index = None;
        let logs = vec![unordered, submission(b"second", 1)];
        let derived = source.derive(&tx(logs), &TestDecoder::default()).unwrap();
        assert_eq!(derived.payload, Bytes::from_static(b"second"));
    }
}
