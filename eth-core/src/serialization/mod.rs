//! Canonical RLP serialization for chain values.
//!
//! Every value that crosses the wire is RLP-encoded. The helpers here wrap
//! the codec so that:
//! - Encoding is infallible and sized up front
//! - Decoding consumes the whole input (trailing bytes are rejected)
//! - Codec errors surface as [`SerializationError`](crate::SerializationError)

mod canonical;

pub use canonical::{decode, encode};
