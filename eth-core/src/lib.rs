//! # eth-core
//!
//! Value types carried by the eth wire protocol and their RLP encodings.
//!
//! This crate provides:
//! - Block headers, bodies and full blocks
//! - Legacy transactions and receipts
//! - 256-bit integers and the hash-or-number block identifier
//! - Keccak-256 hashing
//! - Whole-buffer RLP encode/decode helpers

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod block;
pub mod crypto;
pub mod error;
pub mod receipt;
pub mod serialization;
pub mod transaction;
pub mod types;
pub mod u256;

// Re-export commonly used types at crate root
pub use block::{Block, BlockBody, BlockHeader};
pub use error::SerializationError;
pub use receipt::{Log, Receipt};
pub use transaction::{Transaction, TxAction};
pub use types::{Address, BlockNumber, Bloom, Hash, HashOrNumber, Nonce};
pub use u256::U256;
