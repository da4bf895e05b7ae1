//! Payment receipt verification for event submissions.

use crate::{DerivationConfig, LogEntry};
use alloc::vec::Vec;
use alloy_primitives::{Address, B256, U256};

/// Size of an ABI word.
const WORD: usize = 32;

/// Looks for the log in which the inbox acknowledges payment of the fee for a payload.
///
/// A receipt log is emitted by the inbox with the payment receipt topic first. Its data is read
/// as 32-byte words: with three or more words the amount and payload hash are the last two,
/// otherwise they are the first two. Both layouts are in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentReceiptVerifier {
    /// The inbox address, which must emit the receipt.
    pub inbox_address: Address,
    /// The amount the receipt must report.
    pub inbox_fee: U256,
    /// The first topic of a receipt log.
    pub receipt_topic: B256,
}

impl PaymentReceiptVerifier {
    /// Creates a new verifier.
    pub const fn new(inbox_address: Address, inbox_fee: U256, receipt_topic: B256) -> Self {
        Self { inbox_address, inbox_fee, receipt_topic }
    }

    /// Creates a verifier from a [`DerivationConfig`].
    pub const fn from_config(config: &DerivationConfig) -> Self {
        Self::new(config.inbox_address, config.inbox_fee, config.payment_receipt_topic)
    }

    /// Returns `true` if `logs` contain a receipt for `payload_hash` reporting the inbox fee.
    ///
    /// Removed logs, logs without topics and logs with malformed fields never match. A
    /// receipt-shaped log whose data holds less than one full word fails the check outright.
    pub fn verify(&self, logs: &[LogEntry], payload_hash: B256) -> bool {
        for log in logs {
            if log.removed || log.topics.is_empty() || !self.is_receipt_log(log) {
                continue;
            }
            let Some(data) = log.data.as_deref() else {
                continue;
            };
            if data.len() < WORD {
                trace!(
                    target: "derive",
                    log_index = log.log_index,
                    "Receipt data is shorter than one word"
                );
                return false;
            }

            let (amount, hash_word) = receipt_fields(data);
            if amount == Some(self.inbox_fee) && hash_word == Some(payload_hash.as_slice()) {
                return true;
            }
        }
        false
    }

    fn is_receipt_log(&self, log: &LogEntry) -> bool {
        log.address == Some(self.inbox_address) && log.topic0() == Some(self.receipt_topic)
    }
}

/// Splits receipt data into its amount and payload hash words.
///
/// A trailing partial word counts as a word. A partial hash word can never equal a hash.
fn receipt_fields(data: &[u8]) -> (Option<U256>, Option<&[u8]>) {
    let words = data.chunks(WORD).collect::<Vec<_>>();
    let (amount, hash) = match words.as_slice() {
        [.., amount, hash] if words.len() >= 3 => (*amount, Some(*hash)),
        [amount, rest @ ..] => (*amount, rest.first().copied()),
        [] => return (None, None),
    };
    (U256::try_from_be_slice(amount), hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LogEntryBuilder, receipt_data};
    use alloc::vec;
    use alloy_primitives::{Bytes, address, keccak256};
    use rstest::rstest;

    const INBOX: Address = address!("0x1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e");
    const TOPIC: B256 = B256::repeat_byte(0x70);

    fn verifier() -> PaymentReceiptVerifier {
        PaymentReceiptVerifier::new(INBOX, U256::from(1_000), TOPIC)
    }

    fn payload_hash() -> B256 {
        keccak256(b"payload")
    }

    fn receipt_log(data: Bytes) -> LogEntry {
        LogEntryBuilder::new(INBOX, 0).with_topics([TOPIC]).with_data(data).build()
    }

    #[rstest]
    #[case::two_words(false)]
    #[case::with_header_word(true)]
    fn test_verify_accepts_both_layouts(#[case] with_header: bool) {
        let log = receipt_log(receipt_data(U256::from(1_000), payload_hash(), with_header));
        assert!(verifier().verify(&[log], payload_hash()));
    }

    #[test]
    fn test_verify_uses_last_two_of_many_words() {
        let mut data = vec![0xffu8; WORD * 3];
        data.extend_from_slice(&receipt_data(U256::from(1_000), payload_hash(), false));
        assert!(verifier().verify(&[receipt_log(data.into())], payload_hash()));
    }

    #[test]
    fn test_verify_extra_topics_are_allowed() {
        let log = LogEntryBuilder::new(INBOX, 0)
            .with_topics([TOPIC, B256::repeat_byte(1), B256::repeat_byte(2)])
            .with_data(receipt_data(U256::from(1_000), payload_hash(), true))
            .build();
        assert!(verifier().verify(&[log], payload_hash()));
    }

    #[test]
    fn test_verify_wrong_amount() {
        let log = receipt_log(receipt_data(U256::from(999), payload_hash(), true));
        assert!(!verifier().verify(&[log], payload_hash()));
    }

    #[test]
    fn test_verify_wrong_hash() {
        let log = receipt_log(receipt_data(U256::from(1_000), keccak256(b"other"), true));
        assert!(!verifier().verify(&[log], payload_hash()));
    }

    #[test]
    fn test_verify_wrong_emitter() {
        let log = LogEntryBuilder::new(Address::repeat_byte(0x99), 0)
            .with_topics([TOPIC])
            .with_data(receipt_data(U256::from(1_000), payload_hash(), true))
            .build();
        assert!(!verifier().verify(&[log], payload_hash()));
    }

    #[test]
    fn test_verify_wrong_topic() {
        let log = LogEntryBuilder::new(INBOX, 0)
            .with_topics([B256::repeat_byte(0x71)])
            .with_data(receipt_data(U256::from(1_000), payload_hash(), true))
            .build();
        assert!(!verifier().verify(&[log], payload_hash()));
    }

    #[test]
    fn test_verify_ignores_removed_logs() {
        let log = LogEntryBuilder::new(INBOX, 0)
            .with_topics([TOPIC])
            .with_data(receipt_data(U256::from(1_000), payload_hash(), true))
            .removed()
            .build();
        assert!(!verifier().verify(&[log], payload_hash()));
    }

    #[test]
    fn test_verify_malformed_log_does_not_stop_the_scan() {
        let mut malformed = receipt_log(receipt_data(U256::from(1_000), payload_hash(), true));
        malformed.address = None;
        let mut bad_topic = receipt_log(Bytes::new());
        bad_topic.topics = vec![None];
        let valid = receipt_log(receipt_data(U256::from(1_000), payload_hash(), true));
        assert!(verifier().verify(&[malformed, bad_topic, valid], payload_hash()));
    }

    #[test]
    fn test_verify_short_data_fails_the_check() {
        let short = receipt_log(Bytes::from(vec![0u8; WORD - 1]));
        let valid = receipt_log(receipt_data(U256::from(1_000), payload_hash(), true));
        assert!(!verifier().verify(&[short, valid.clone()], payload_hash()));
        assert!(verifier().verify(&[valid], payload_hash()));
    }

    #[test]
    fn test_verify_single_word_is_not_a_match() {
        let single = receipt_log(Bytes::from(U256::from(1_000).to_be_bytes::<32>().to_vec()));
        let valid = receipt_log(receipt_data(U256::from(1_000), payload_hash(), false));
        assert!(!verifier().verify(&[single.clone()], payload_hash()));
        assert!(verifier().verify(&[single, valid], payload_hash()));
    }

    #[test]
    fn test_verify_partial_hash_word() {
        let mut data = receipt_data(U256::from(1_000), payload_hash(), false).to_vec();
        data.truncate(WORD + 16);
        assert!(!verifier().verify(&[receipt_log(data.into())], payload_hash()));
    }

    #[test]
    fn test_receipt_fields_layouts() {
        let hash = payload_hash();
        let two = receipt_data(U256::from(5), hash, false);
        assert_eq!(receipt_fields(&two), (Some(U256::from(5)), Some(hash.as_slice())));
        let three = receipt_data(U256::from(6), hash, true);
        assert_eq!(receipt_fields(&three), (Some(U256::from(6)), Some(hash.as_slice())));
        assert_eq!(receipt_fields(&[]), (None, None));
    }
}
