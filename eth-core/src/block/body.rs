//! Block body: the part of a block fetched separately from its header.

use alloy_rlp::{RlpDecodable, RlpEncodable};

use crate::block::BlockHeader;
use crate::crypto::keccak256;
use crate::serialization::encode;
use crate::transaction::Transaction;
use crate::types::Hash;

/// Transactions and ommer headers of a block.
#[derive(Clone, Debug, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct BlockBody {
    /// Ordered list of transactions.
    pub transactions: Vec<Transaction>,

    /// Ommer (uncle) headers.
    pub ommers: Vec<BlockHeader>,
}

impl BlockBody {
    /// Hash of the encoded ommer list, as committed to by `ommers_hash`.
    pub fn ommers_hash(&self) -> Hash {
        keccak256(&encode(&self.ommers))
    }

    /// Whether the body carries neither transactions nor ommers.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.ommers.is_empty()
    }
}
