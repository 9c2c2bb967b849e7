//! Block identifier that is either a hash or a number.

use std::fmt;

use alloy_rlp::{BufMut, Decodable, Encodable, EMPTY_STRING_CODE};

use crate::types::{BlockNumber, Hash};

/// Identifies a block either by its hash or by its number.
///
/// On the wire the two are told apart by length: a 32-byte string is a hash,
/// anything else is decoded as an unsigned integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashOrNumber {
    /// Block hash.
    Hash(Hash),
    /// Block number.
    Number(BlockNumber),
}

impl HashOrNumber {
    /// Whether this identifies a block by number.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, HashOrNumber::Number(_))
    }

    /// The block number, if this identifies a block by number.
    pub fn as_number(&self) -> Option<BlockNumber> {
        match self {
            HashOrNumber::Number(n) => Some(*n),
            HashOrNumber::Hash(_) => None,
        }
    }

    /// The block hash, if this identifies a block by hash.
    pub fn as_hash(&self) -> Option<&Hash> {
        match self {
            HashOrNumber::Hash(h) => Some(h),
            HashOrNumber::Number(_) => None,
        }
    }
}

impl From<BlockNumber> for HashOrNumber {
    fn from(number: BlockNumber) -> Self {
        HashOrNumber::Number(number)
    }
}

impl From<Hash> for HashOrNumber {
    fn from(hash: Hash) -> Self {
        HashOrNumber::Hash(hash)
    }
}

impl fmt::Display for HashOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashOrNumber::Hash(h) => write!(f, "0x{}", hex::encode(h)),
            HashOrNumber::Number(n) => write!(f, "#{}", n),
        }
    }
}

impl Encodable for HashOrNumber {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            HashOrNumber::Hash(h) => h.encode(out),
            HashOrNumber::Number(n) => n.encode(out),
        }
    }

    fn length(&self) -> usize {
        match self {
            HashOrNumber::Hash(h) => h.length(),
            HashOrNumber::Number(n) => n.length(),
        }
    }
}

impl Decodable for HashOrNumber {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let first = *buf.first().ok_or(alloy_rlp::Error::InputTooShort)?;
        if first == EMPTY_STRING_CODE + 32 {
            Hash::decode(buf).map(HashOrNumber::Hash)
        } else {
            BlockNumber::decode(buf).map(HashOrNumber::Number)
        }
    }
}
