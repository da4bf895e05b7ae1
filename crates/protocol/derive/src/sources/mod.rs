//! The ways a base-chain transaction can carry a submission.
//!
//! - [`CalldataSource`]: the transaction pays the inbox fee to the inbox, and its calldata is the
//!   payload.
//! - [`EventSource`]: the transaction emits a submission event, whose data is the payload. The
//!   payment can be enforced through a [`PaymentReceiptVerifier`].

mod calldata;
pub use calldata::CalldataSource;

mod events;
pub use events::EventSource;

mod receipt;
pub use receipt::PaymentReceiptVerifier;
