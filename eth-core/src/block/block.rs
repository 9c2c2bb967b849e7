//! Full block: header, transactions and ommers.

use alloy_rlp::{RlpDecodable, RlpEncodable};

use crate::block::{BlockBody, BlockHeader};
use crate::transaction::Transaction;
use crate::types::{BlockNumber, Hash};

/// A block as announced to peers.
#[derive(Clone, Debug, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Block {
    /// Block header.
    pub header: BlockHeader,

    /// Ordered list of transactions in this block.
    pub transactions: Vec<Transaction>,

    /// Ommer (uncle) headers.
    pub ommers: Vec<BlockHeader>,
}

impl Block {
    /// Assemble a block from a header and its body.
    pub fn new(header: BlockHeader, body: BlockBody) -> Self {
        Self {
            header,
            transactions: body.transactions,
            ommers: body.ommers,
        }
    }

    /// Split the block into header and body.
    pub fn into_parts(self) -> (BlockHeader, BlockBody) {
        (
            self.header,
            BlockBody {
                transactions: self.transactions,
                ommers: self.ommers,
            },
        )
    }

    /// Get the block hash (delegates to header).
    #[inline]
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Get the block number.
    #[inline]
    pub fn number(&self) -> BlockNumber {
        self.header.number
    }

    /// Get the number of transactions.
    #[inline]
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::{decode, encode};
    use crate::u256::U256;

    #[test]
    fn test_parts_roundtrip() {
        let header = BlockHeader::empty([0u8; 32], 5, U256::from(2u64));
        let block = Block::new(header.clone(), BlockBody::default());

        assert_eq!(block.number(), 5);
        assert_eq!(block.hash(), header.hash());
        assert_eq!(block.tx_count(), 0);

        let (h, body) = block.into_parts();
        assert_eq!(h, header);
        assert!(body.is_empty());
    }

    #[test]
    fn test_block_encoding_is_three_item_list() {
        let header = BlockHeader::empty([0u8; 32], 1, U256::from(1u64));
        let block = Block::new(header, BlockBody::default());
        let bytes = encode(&block);

        // Encoded block ends with two empty lists.
        assert_eq!(&bytes[bytes.len() - 2..], &[0xc0, 0xc0]);
        assert_eq!(decode::<Block>(&bytes).unwrap(), block);
    }
}
