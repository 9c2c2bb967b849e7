//! Error types for the eth-core crate.

use std::fmt;

/// Errors related to RLP decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SerializationError {
    /// The bytes are not a well-formed encoding of the expected value.
    DecodeFailed(String),
    /// A complete value was decoded but input bytes remain.
    TrailingBytes(usize),
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            SerializationError::TrailingBytes(n) => {
                write!(f, "{} trailing bytes after decoded value", n)
            }
        }
    }
}

impl std::error::Error for SerializationError {}

impl From<alloy_rlp::Error> for SerializationError {
    fn from(e: alloy_rlp::Error) -> Self {
        SerializationError::DecodeFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = SerializationError::DecodeFailed("test".into());
        assert_eq!(e.to_string(), "decode failed: test");

        let e = SerializationError::TrailingBytes(2);
        assert!(e.to_string().contains("2 trailing bytes"));
    }

    #[test]
    fn test_error_conversion() {
        let rlp_err: SerializationError = alloy_rlp::Error::InputTooShort.into();
        assert!(matches!(rlp_err, SerializationError::DecodeFailed(_)));
    }
}
