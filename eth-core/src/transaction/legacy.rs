//! Legacy signed transaction.

use alloy_rlp::{RlpDecodable, RlpEncodable};
use bytes::Bytes;

use crate::crypto::keccak256;
use crate::serialization::encode;
use crate::transaction::TxAction;
use crate::types::Hash;
use crate::u256::U256;

/// A signed transaction in the legacy nine-field format.
#[derive(Clone, Debug, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Transaction {
    /// Sender account nonce.
    pub nonce: u64,
    /// Price per unit of gas, in wei.
    pub gas_price: U256,
    /// Gas limit.
    pub gas: u64,
    /// Recipient, or contract creation.
    pub to: TxAction,
    /// Value transferred, in wei.
    pub value: U256,
    /// Call data or init code.
    pub data: Bytes,
    /// Signature recovery id (with chain id folded in after EIP-155).
    pub v: u64,
    /// Signature `r` component.
    pub r: U256,
    /// Signature `s` component.
    pub s: U256,
}

impl Transaction {
    /// Transaction hash: keccak-256 of the encoded transaction.
    pub fn hash(&self) -> Hash {
        keccak256(&encode(self))
    }

    /// Whether this transaction deploys a contract.
    #[inline]
    pub fn is_create(&self) -> bool {
        matches!(self.to, TxAction::Create)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::decode;

    fn test_tx() -> Transaction {
        Transaction {
            nonce: 9,
            gas_price: U256::from(20_000_000_000u64),
            gas: 21_000,
            to: TxAction::Call([0x35; 20]),
            value: U256::from(1_000_000_000_000_000_000u64),
            data: Bytes::new(),
            v: 37,
            r: U256::from(1u64) << 200,
            s: U256::from(2u64) << 100,
        }
    }

    #[test]
    fn test_roundtrip() {
        let tx = test_tx();
        assert_eq!(decode::<Transaction>(&encode(&tx)).unwrap(), tx);
    }

    #[test]
    fn test_contract_creation() {
        let mut tx = test_tx();
        tx.to = TxAction::Create;
        tx.data = Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]);
        assert!(tx.is_create());
        assert_eq!(decode::<Transaction>(&encode(&tx)).unwrap(), tx);
    }

    #[test]
    fn test_hash_differs_per_nonce() {
        let a = test_tx();
        let mut b = test_tx();
        b.nonce += 1;
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_missing_field_rejected() {
        // A list with only the nonce.
        assert!(decode::<Transaction>(&[0xc1, 0x09]).is_err());
    }
}
