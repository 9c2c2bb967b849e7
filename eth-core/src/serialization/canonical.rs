//! Whole-buffer RLP encode/decode.

use alloy_rlp::{Decodable, Encodable};

use crate::error::SerializationError;

/// Encode a value to its RLP bytes.
pub fn encode<T: Encodable + ?Sized>(value: &T) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    out
}

/// Decode a value from bytes.
///
/// Returns an error if:
/// - The bytes are malformed or non-canonical
/// - The value doesn't match the expected structure
/// - There are trailing bytes after the value
pub fn decode<T: Decodable>(bytes: &[u8]) -> Result<T, SerializationError> {
    let mut buf = bytes;
    let value = T::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(SerializationError::TrailingBytes(buf.len()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode(&0u64), vec![0x80]);
        assert_eq!(encode(&15u64), vec![0x0f]);
        assert_eq!(encode(&1024u64), vec![0x82, 0x04, 0x00]);
        assert_eq!(encode(&Vec::<u64>::new()), vec![0xc0]);
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut bytes = encode(&42u64);
        bytes.push(0xFF);

        let result: Result<u64, _> = decode(&bytes);
        assert_eq!(result, Err(SerializationError::TrailingBytes(1)));
    }

    #[test]
    fn test_rejects_leading_zero_integer() {
        let result: Result<u64, _> = decode(&[0x82, 0x00, 0x01]);
        assert!(matches!(result, Err(SerializationError::DecodeFailed(_))));
    }

    #[test]
    fn test_nested_lists() {
        let original: Vec<Vec<u64>> = vec![vec![], vec![1, 2]];
        let bytes = encode(&original);
        let recovered: Vec<Vec<u64>> = decode(&bytes).unwrap();
        assert_eq!(original, recovered);
    }
}
