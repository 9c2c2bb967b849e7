//! Transaction receipts and logs.

use alloy_rlp::{RlpDecodable, RlpEncodable};
use bytes::Bytes;

use crate::types::{Address, Bloom, Hash, EMPTY_BLOOM};

/// A log entry emitted during transaction execution.
#[derive(Clone, Debug, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Log {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<Hash>,
    /// Unindexed data.
    pub data: Bytes,
}

/// Outcome of executing one transaction.
#[derive(Clone, Debug, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Receipt {
    /// Intermediate state root, or a one-byte status code after Byzantium.
    pub state_root: Bytes,
    /// Cumulative gas used in the block after this transaction.
    pub gas_used: u64,
    /// Bloom filter over this receipt's logs.
    pub bloom: Bloom,
    /// Logs emitted by the transaction.
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Receipt with a status code in place of the state root and no logs.
    pub fn with_status(success: bool, gas_used: u64) -> Self {
        let state_root = if success {
            Bytes::from_static(&[1])
        } else {
            Bytes::new()
        };
        Self {
            state_root,
            gas_used,
            bloom: EMPTY_BLOOM,
            logs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::{decode, encode};

    #[test]
    fn test_receipt_roundtrip() {
        let mut receipt = Receipt::with_status(true, 21_000);
        receipt.logs.push(Log {
            address: [0x11; 20],
            topics: vec![[0x22; 32], [0x33; 32]],
            data: Bytes::from_static(b"payload"),
        });

        let bytes = encode(&receipt);
        assert_eq!(decode::<Receipt>(&bytes).unwrap(), receipt);
    }

    #[test]
    fn test_failed_status_is_empty() {
        let receipt = Receipt::with_status(false, 0);
        assert!(receipt.state_root.is_empty());
        assert_eq!(decode::<Receipt>(&encode(&receipt)).unwrap(), receipt);
    }
}
