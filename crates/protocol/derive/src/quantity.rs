//! Strict parsing of hex-encoded provider fields.
//!
//! Everything the provider hands us is text. Required fields go through [`Field`], which turns
//! an absent or malformed value into an [`IntegrityError`] that names the field and the record.
//! The `try_*` helpers are the lenient counterparts used for log fields, where a malformed value
//! only disqualifies the log.

use crate::{IntegrityError, IntegrityResult, RecordRef};
use alloc::string::ToString;
use alloy_primitives::{Address, B256, Bytes, U256, hex};

/// A named field of a raw provider record.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    name: &'static str,
    record: RecordRef,
}

impl Field {
    pub(crate) const fn new(name: &'static str, record: RecordRef) -> Self {
        Self { name, record }
    }

    pub(crate) fn require(self, value: Option<&str>) -> IntegrityResult<&str> {
        value.ok_or(IntegrityError::MissingField { field: self.name, record: self.record })
    }

    fn invalid(self, raw: &str) -> IntegrityError {
        IntegrityError::InvalidHex { field: self.name, record: self.record, value: raw.to_string() }
    }

    /// Parses a required hex quantity into a [u64].
    pub(crate) fn u64(self, value: Option<&str>) -> IntegrityResult<u64> {
        let raw = self.require(value)?;
        try_u64(raw).ok_or_else(|| self.invalid(raw))
    }

    /// Parses a required hex quantity into a [U256].
    pub(crate) fn u256(self, value: Option<&str>) -> IntegrityResult<U256> {
        let raw = self.require(value)?;
        quantity_digits(raw)
            .and_then(|digits| U256::from_str_radix(digits, 16).ok())
            .ok_or_else(|| self.invalid(raw))
    }

    /// Parses a required 32-byte hash.
    pub(crate) fn b256(self, value: Option<&str>) -> IntegrityResult<B256> {
        let raw = self.require(value)?;
        try_b256(raw).ok_or_else(|| self.invalid(raw))
    }

    /// Parses a required 20-byte address.
    pub(crate) fn address(self, value: Option<&str>) -> IntegrityResult<Address> {
        let raw = self.require(value)?;
        try_address(raw).ok_or_else(|| self.invalid(raw))
    }

    /// Parses an optional 20-byte address. Absence is not an error, malformed text is.
    pub(crate) fn opt_address(self, value: Option<&str>) -> IntegrityResult<Option<Address>> {
        value.map(|raw| try_address(raw).ok_or_else(|| self.invalid(raw))).transpose()
    }

    /// Parses an optional hex quantity.
    pub(crate) fn opt_u64(self, value: Option<&str>) -> IntegrityResult<Option<u64>> {
        value.map(|raw| self.u64(Some(raw))).transpose()
    }

    /// Parses a required hex byte string. `0x` is the empty string.
    pub(crate) fn bytes(self, value: Option<&str>) -> IntegrityResult<Bytes> {
        let raw = self.require(value)?;
        try_bytes(raw).ok_or_else(|| self.invalid(raw))
    }
}

/// Returns the hex digits of a quantity, or [None] if there are none or any is not hex.
fn quantity_digits(raw: &str) -> Option<&str> {
    let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")).unwrap_or(raw);
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())).then_some(digits)
}

pub(crate) fn try_u64(raw: &str) -> Option<u64> {
    quantity_digits(raw).and_then(|digits| u64::from_str_radix(digits, 16).ok())
}

pub(crate) fn try_b256(raw: &str) -> Option<B256> {
    raw.parse().ok()
}

pub(crate) fn try_address(raw: &str) -> Option<Address> {
    raw.parse().ok()
}

pub(crate) fn try_bytes(raw: &str) -> Option<Bytes> {
    hex::decode(raw).ok().map(Bytes::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};
    use rstest::rstest;

    const FIELD: Field = Field::new("number", RecordRef::Block);

    #[rstest]
    #[case::zero("0x0", 0)]
    #[case::lower("0xff", 255)]
    #[case::upper("0XFF", 255)]
    #[case::leading_zeros("0x000a", 10)]
    #[case::unprefixed("1b4", 436)]
    fn test_u64_valid(#[case] raw: &str, #[case] expected: u64) {
        assert_eq!(FIELD.u64(Some(raw)).unwrap(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::bare_prefix("0x")]
    #[case::sign("0x+1")]
    #[case::non_hex("0xg1")]
    #[case::overflow("0x10000000000000000")]
    fn test_u64_invalid(#[case] raw: &str) {
        assert_eq!(
            FIELD.u64(Some(raw)),
            Err(IntegrityError::InvalidHex {
                field: "number",
                record: RecordRef::Block,
                value: raw.to_string()
            })
        );
    }

    #[test]
    fn test_u64_missing() {
        assert_eq!(
            FIELD.u64(None),
            Err(IntegrityError::MissingField { field: "number", record: RecordRef::Block })
        );
    }

    #[test]
    fn test_u256_full_width() {
        let raw = "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
        assert_eq!(FIELD.u256(Some(raw)).unwrap(), U256::MAX);
        let overflow = "0x1ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
        assert!(FIELD.u256(Some(overflow)).is_err());
    }

    #[test]
    fn test_hash_and_address() {
        assert_eq!(
            FIELD.b256(Some("0x00000000000000000000000000000000000000000000000000000000000face7")),
            Ok(b256!("0x00000000000000000000000000000000000000000000000000000000000face7"))
        );
        assert!(FIELD.b256(Some("0xface7")).is_err());
        assert_eq!(
            FIELD.address(Some("0x00000000000000000000000000000000000FACE7")),
            Ok(address!("0x00000000000000000000000000000000000face7"))
        );
        assert!(FIELD.address(Some("0x1234")).is_err());
    }

    #[test]
    fn test_optional_fields() {
        assert_eq!(FIELD.opt_address(None), Ok(None));
        assert!(FIELD.opt_address(Some("nope")).is_err());
        assert_eq!(FIELD.opt_u64(None), Ok(None));
        assert_eq!(FIELD.opt_u64(Some("0x1")), Ok(Some(1)));
    }

    #[test]
    fn test_bytes() {
        assert_eq!(FIELD.bytes(Some("0x")).unwrap(), Bytes::new());
        assert_eq!(
            FIELD.bytes(Some("0xdeadbeef")).unwrap(),
            Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef])
        );
        assert!(FIELD.bytes(Some("0xabc")).is_err());
    }
}
