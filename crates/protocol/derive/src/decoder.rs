//! The payload decoding seam.

use crate::DerivedTransaction;
use alloy_primitives::{Address, B256, Bytes};
use alloy_rlp::Header;
use core::fmt::Display;
use thiserror::Error;

/// The EIP-2718 type byte of a Facet transaction envelope.
pub const FACET_TX_TYPE: u8 = 0x46;

/// Turns a candidate payload into a [`DerivedTransaction`].
///
/// Implementations must be deterministic: the same arguments always produce the same result.
/// A rejection is not an error for the block, it only means the candidate is not a submission.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait PayloadDecoder {
    /// The rejection reason.
    type Error: Display;

    /// Decodes `payload` as a transaction credited to `from`.
    fn decode(
        &self,
        payload: Bytes,
        from: Address,
        contract_initiated: bool,
        source_hash: B256,
    ) -> Result<DerivedTransaction, Self::Error>;
}

/// A rejection from the [`EnvelopeDecoder`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload is empty.
    #[error("Empty payload")]
    Empty,
    /// The payload does not start with the expected type byte.
    #[error("Unexpected transaction type {got:#04x}, expected {expected:#04x}")]
    UnexpectedType {
        /// The configured type byte.
        expected: u8,
        /// The first byte of the payload.
        got: u8,
    },
    /// The envelope body is not an RLP list.
    #[error("Envelope body is not an RLP list")]
    NotAList,
    /// The RLP header does not cover exactly the rest of the payload.
    #[error("RLP list length {declared} does not match body length {actual}")]
    LengthMismatch {
        /// The length declared by the list header.
        declared: usize,
        /// The bytes remaining after the header.
        actual: usize,
    },
    /// The RLP header is malformed.
    #[error("RLP error: {0}")]
    Rlp(alloy_rlp::Error),
}

/// Accepts payloads framed as `type_byte || rlp_list` and rejects everything else.
///
/// Only the framing is checked. The fields inside the list are left to the consumer of the
/// [`DerivedTransaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeDecoder {
    /// The expected leading type byte.
    pub tx_type: u8,
}

impl Default for EnvelopeDecoder {
    fn default() -> Self {
        Self { tx_type: FACET_TX_TYPE }
    }
}

impl EnvelopeDecoder {
    /// Creates a decoder that expects the given type byte.
    pub const fn new(tx_type: u8) -> Self {
        Self { tx_type }
    }

    fn check_framing(&self, payload: &[u8]) -> Result<(), DecodeError> {
        let (&ty, mut body) = payload.split_first().ok_or(DecodeError::Empty)?;
        if ty != self.tx_type {
            return Err(DecodeError::UnexpectedType { expected: self.tx_type, got: ty });
        }

        let header = Header::decode(&mut body).map_err(DecodeError::Rlp)?;
        if !header.list {
            return Err(DecodeError::NotAList);
        }
        if header.payload_length != body.len() {
            return Err(DecodeError::LengthMismatch {
                declared: header.payload_length,
                actual: body.len(),
            });
        }
        Ok(())
    }
}

impl PayloadDecoder for EnvelopeDecoder {
    type Error = DecodeError;

    fn decode(
        &self,
        payload: Bytes,
        from: Address,
        contract_initiated: bool,
        source_hash: B256,
    ) -> Result<DerivedTransaction, Self::Error> {
        self.check_framing(&payload)?;
        Ok(DerivedTransaction::new(contract_initiated, from, payload, source_hash))
    }
}
