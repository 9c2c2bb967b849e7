//! Block header structure.

use alloy_rlp::{RlpDecodable, RlpEncodable};
use bytes::Bytes;

use crate::crypto::{keccak256, EMPTY_LIST_HASH};
use crate::serialization::encode;
use crate::types::{Address, BlockNumber, Bloom, Hash, Nonce, EMPTY_BLOOM};
use crate::u256::U256;

/// Keccak-256 of the RLP empty string, the root of an empty trie.
pub const EMPTY_ROOT_HASH: Hash = [
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6, 0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8,
    0x6e, 0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0, 0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63,
    0xb4, 0x21,
];

/// Block header as exchanged between peers.
///
/// Field order is the RLP field order. The block hash is keccak-256 of the
/// encoded header.
#[derive(Clone, Debug, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct BlockHeader {
    /// Hash of the parent block header.
    pub parent_hash: Hash,

    /// Hash of the RLP list of ommer headers.
    pub ommers_hash: Hash,

    /// Address receiving the block reward.
    pub beneficiary: Address,

    /// Root of the state trie after executing the block.
    pub state_root: Hash,

    /// Root of the transaction trie.
    pub transactions_root: Hash,

    /// Root of the receipt trie.
    pub receipts_root: Hash,

    /// Bloom filter over all logs in the block.
    pub logs_bloom: Bloom,

    /// Proof-of-work difficulty.
    pub difficulty: U256,

    /// Block number (0 for genesis).
    pub number: BlockNumber,

    /// Gas limit for the block.
    pub gas_limit: u64,

    /// Gas used by all transactions in the block.
    pub gas_used: u64,

    /// Unix timestamp in seconds.
    pub timestamp: u64,

    /// Arbitrary extra data (at most 32 bytes on mainnet).
    pub extra_data: Bytes,

    /// Proof-of-work mix digest.
    pub mix_hash: Hash,

    /// Proof-of-work nonce.
    pub nonce: Nonce,
}

impl BlockHeader {
    /// Create a header for `number` on top of `parent_hash` with empty
    /// transaction, receipt and ommer commitments.
    pub fn empty(parent_hash: Hash, number: BlockNumber, difficulty: U256) -> Self {
        Self {
            parent_hash,
            ommers_hash: EMPTY_LIST_HASH,
            beneficiary: [0u8; 20],
            state_root: EMPTY_ROOT_HASH,
            transactions_root: EMPTY_ROOT_HASH,
            receipts_root: EMPTY_ROOT_HASH,
            logs_bloom: EMPTY_BLOOM,
            difficulty,
            number,
            gas_limit: 0,
            gas_used: 0,
            timestamp: 0,
            extra_data: Bytes::new(),
            mix_hash: [0u8; 32],
            nonce: [0u8; 8],
        }
    }

    /// Compute the block hash.
    ///
    /// The hash is keccak-256 of the RLP-encoded header.
    pub fn hash(&self) -> Hash {
        keccak256(&encode(self))
    }

    /// Check if this is a genesis header.
    #[inline]
    pub fn is_genesis(&self) -> bool {
        self.number == 0 && self.parent_hash == [0u8; 32]
    }
}
