//! Request ceilings.
//!
//! Maximum number of items we can ask for in a single eth request. These
//! match the limits enforced by the majority of implementations on the
//! network; peers disconnect from us if we ask for more.

use std::fmt;

use crate::error::{EthError, EthResult};

/// Maximum number of state trie nodes per `GetNodeData` request.
pub const MAX_STATE_FETCH: usize = 384;

/// Maximum number of block bodies per `GetBlockBodies` request.
pub const MAX_BODIES_FETCH: usize = 128;

/// Maximum number of receipt lists per `GetReceipts` request.
pub const MAX_RECEIPTS_FETCH: usize = 256;

/// Maximum number of headers per `GetBlockHeaders` request.
pub const MAX_HEADERS_FETCH: usize = 192;

/// Kinds of bounded fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    /// `GetBlockHeaders`.
    Headers,
    /// `GetBlockBodies`.
    Bodies,
    /// `GetReceipts`.
    Receipts,
    /// `GetNodeData`.
    NodeData,
}

impl FetchKind {
    /// Maximum item count a conforming peer serves for this kind.
    pub const fn ceiling(self) -> usize {
        match self {
            FetchKind::Headers => MAX_HEADERS_FETCH,
            FetchKind::Bodies => MAX_BODIES_FETCH,
            FetchKind::Receipts => MAX_RECEIPTS_FETCH,
            FetchKind::NodeData => MAX_STATE_FETCH,
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchKind::Headers => write!(f, "block headers"),
            FetchKind::Bodies => write!(f, "block bodies"),
            FetchKind::Receipts => write!(f, "receipts"),
            FetchKind::NodeData => write!(f, "trie nodes"),
        }
    }
}

/// Reject a request for `requested` items of `kind` above the ceiling.
pub fn check_request(kind: FetchKind, requested: usize) -> EthResult<()> {
    let max = kind.ceiling();
    if requested > max {
        return Err(EthError::CeilingExceeded {
            kind,
            requested,
            max,
        });
    }
    Ok(())
}

/// Reject a `GetBlockHeaders` request whose `max_headers` is above the
/// header ceiling.
pub fn check_headers_request(max_headers: u64) -> EthResult<()> {
    let requested = usize::try_from(max_headers).unwrap_or(usize::MAX);
    check_request(FetchKind::Headers, requested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_values() {
        assert_eq!(FetchKind::Headers.ceiling(), 192);
        assert_eq!(FetchKind::Bodies.ceiling(), 128);
        assert_eq!(FetchKind::Receipts.ceiling(), 256);
        assert_eq!(FetchKind::NodeData.ceiling(), 384);
    }

    #[test]
    fn test_headers_at_ceiling() {
        assert!(check_headers_request(0).is_ok());
        assert!(check_headers_request(192).is_ok());
    }

    #[test]
    fn test_headers_above_ceiling() {
        let result = check_headers_request(193);
        assert!(matches!(
            result,
            Err(EthError::CeilingExceeded {
                kind: FetchKind::Headers,
                requested: 193,
                max: 192,
            })
        ));
        assert!(check_headers_request(u64::MAX).is_err());
    }

    #[test]
    fn test_check_request_per_kind() {
        for kind in [
            FetchKind::Headers,
            FetchKind::Bodies,
            FetchKind::Receipts,
            FetchKind::NodeData,
        ] {
            assert!(check_request(kind, kind.ceiling()).is_ok());
            assert!(check_request(kind, kind.ceiling() + 1).is_err());
        }
    }
}
