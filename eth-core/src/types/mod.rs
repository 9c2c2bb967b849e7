//! Primitive value types shared by blocks, transactions and receipts.

mod hash_or_number;

pub use hash_or_number::HashOrNumber;

/// A 32-byte keccak-256 digest (block hash, state root, trie node hash).
pub type Hash = [u8; 32];

/// A 20-byte account address.
pub type Address = [u8; 20];

/// A 2048-bit log bloom filter.
pub type Bloom = [u8; 256];

/// An 8-byte proof-of-work nonce.
pub type Nonce = [u8; 8];

/// Block number type.
pub type BlockNumber = u64;

/// Empty bloom filter.
pub const EMPTY_BLOOM: Bloom = [0u8; 256];
