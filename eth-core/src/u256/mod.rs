//! 256-bit unsigned integer for difficulties, balances and signature values.
//!
//! On the wire a `U256` is an RLP byte string holding the big-endian value
//! with leading zero bytes stripped; zero is the empty string.

// Allow clippy warnings from the uint crate's construct_uint macro
#![allow(clippy::manual_div_ceil)]
#![allow(clippy::assign_op_pattern)]

use alloy_rlp::{BufMut, Decodable, Encodable};
use bytes::Bytes;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer.
    ///
    /// Used for:
    /// - Total chain difficulty
    /// - Header difficulty
    /// - Transaction gas price and value
    /// - Signature `r` and `s` components
    pub struct U256(4);
}

impl U256 {
    /// Serialize to big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[0..8].copy_from_slice(&self.0[3].to_be_bytes());
        bytes[8..16].copy_from_slice(&self.0[2].to_be_bytes());
        bytes[16..24].copy_from_slice(&self.0[1].to_be_bytes());
        bytes[24..32].copy_from_slice(&self.0[0].to_be_bytes());
        bytes
    }

    /// Deserialize from big-endian bytes.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let start = 24 - i * 8;
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[start..start + 8]);
            *limb = u64::from_be_bytes(word);
        }
        U256(limbs)
    }

    /// Big-endian bytes without leading zeros.
    fn minimal_be_bytes(&self) -> ([u8; 32], usize) {
        let bytes = self.to_be_bytes();
        let start = bytes.iter().position(|b| *b != 0).unwrap_or(32);
        (bytes, start)
    }
}

impl Encodable for U256 {
    fn encode(&self, out: &mut dyn BufMut) {
        let (bytes, start) = self.minimal_be_bytes();
        bytes[start..].encode(out);
    }

    fn length(&self) -> usize {
        let (bytes, start) = self.minimal_be_bytes();
        bytes[start..].length()
    }
}

impl Decodable for U256 {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let raw = Bytes::decode(buf)?;
        if raw.len() > 32 {
            return Err(alloy_rlp::Error::Overflow);
        }
        if raw.first() == Some(&0) {
            return Err(alloy_rlp::Error::LeadingZero);
        }
        let mut padded = [0u8; 32];
        padded[32 - raw.len()..].copy_from_slice(&raw);
        Ok(U256::from_be_bytes(&padded))
    }
}
