//! Transaction types carried by block bodies and transaction broadcasts.
//!
//! Only the legacy (pre-typed-envelope) transaction format exists in this
//! protocol version.

mod action;
mod legacy;

pub use action::TxAction;
pub use legacy::Transaction;
