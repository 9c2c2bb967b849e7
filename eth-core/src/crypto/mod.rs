//! Hashing primitives.
//!
//! Block and transaction identities are keccak-256 digests of their RLP
//! encodings.

mod hashing;

pub use hashing::{keccak256, EMPTY_LIST_HASH};
