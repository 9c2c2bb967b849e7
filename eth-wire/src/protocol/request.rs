//! Correlating header responses with the request that asked for them.

use std::collections::HashSet;

use eth_core::{BlockHeader, BlockNumber, HashOrNumber};

use crate::error::{EthError, EthResult};
use crate::limits::MAX_HEADERS_FETCH;
use crate::protocol::GetBlockHeadersMessage;

/// An outstanding `GetBlockHeaders` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRequest {
    /// First block of the range.
    pub block_number_or_hash: HashOrNumber,
    /// Maximum number of headers asked for.
    pub max_headers: u64,
    /// Blocks skipped between consecutive headers.
    pub skip: u64,
    /// Walk towards genesis.
    pub reverse: bool,
}

impl HeaderRequest {
    /// Create a new header request.
    pub fn new(
        block_number_or_hash: impl Into<HashOrNumber>,
        max_headers: u64,
        skip: u64,
        reverse: bool,
    ) -> Self {
        Self {
            block_number_or_hash: block_number_or_hash.into(),
            max_headers,
            skip,
            reverse,
        }
    }

    /// Whether the range starts at a block number rather than a hash.
    pub fn is_numbered(&self) -> bool {
        self.block_number_or_hash.is_number()
    }

    /// The wire message for this request.
    pub fn to_message(&self) -> GetBlockHeadersMessage {
        GetBlockHeadersMessage {
            block_number_or_hash: self.block_number_or_hash,
            max_headers: self.max_headers,
            skip: self.skip,
            reverse: self.reverse,
        }
    }

    /// Block numbers a complete response would contain.
    ///
    /// Hash-based requests do not know their starting number, so the
    /// caller supplies it (usually the number of the first returned
    /// header). Numbered requests must not be given one.
    pub fn generate_block_numbers(
        &self,
        block_number: Option<BlockNumber>,
    ) -> EthResult<Vec<BlockNumber>> {
        let start = match (self.block_number_or_hash, block_number) {
            (HashOrNumber::Number(n), None) => n,
            (HashOrNumber::Hash(_), Some(n)) => n,
            (HashOrNumber::Number(_), Some(_)) => {
                return Err(EthError::InvalidRequest(
                    "block number must not be supplied for a numbered request".to_string(),
                ))
            }
            (HashOrNumber::Hash(_), None) => {
                return Err(EthError::InvalidRequest(
                    "block number is required for a hash-based request".to_string(),
                ))
            }
        };

        let count = self.max_headers.min(MAX_HEADERS_FETCH as u64) as usize;
        let step = self.skip.saturating_add(1);

        let mut numbers = Vec::with_capacity(count);
        let mut next = Some(start);
        while let Some(number) = next {
            if numbers.len() >= count {
                break;
            }
            numbers.push(number);
            next = if self.reverse {
                number.checked_sub(step)
            } else {
                number.checked_add(step)
            };
        }
        Ok(numbers)
    }

    /// Check that `numbers` could be a (possibly partial) answer.
    ///
    /// Peers may omit headers but may not add, repeat or reorder them.
    pub fn validate_sequence(&self, numbers: &[BlockNumber]) -> EthResult<()> {
        let first = match numbers.first() {
            Some(first) => *first,
            None => return Ok(()),
        };

        let expected = if self.is_numbered() {
            self.generate_block_numbers(None)?
        } else {
            self.generate_block_numbers(Some(first))?
        };

        let expected_set: HashSet<_> = expected.iter().copied().collect();
        let unexpected: Vec<_> = numbers
            .iter()
            .filter(|n| !expected_set.contains(n))
            .collect();
        if !unexpected.is_empty() {
            return Err(EthError::InvalidResponse(format!(
                "unexpected block numbers: {:?}",
                unexpected
            )));
        }

        let ordered = numbers.windows(2).all(|pair| {
            if self.reverse {
                pair[0] >= pair[1]
            } else {
                pair[0] <= pair[1]
            }
        });
        if !ordered {
            let direction = if self.reverse { "descending" } else { "ascending" };
            return Err(EthError::InvalidResponse(format!(
                "block numbers are not in {} order",
                direction
            )));
        }

        // Each number consumes the expected sequence up to itself, so a
        // repeated number finds nothing left to match.
        let mut remaining = expected.iter();
        for number in numbers {
            if !remaining.any(|n| n == number) {
                return Err(EthError::InvalidResponse(format!(
                    "block number {} repeated or out of sequence",
                    number
                )));
            }
        }

        Ok(())
    }

    /// Check a header response against this request.
    pub fn validate_headers(&self, headers: &[BlockHeader]) -> EthResult<()> {
        let first = match headers.first() {
            Some(first) => first,
            None => return Ok(()),
        };

        if let HashOrNumber::Hash(hash) = self.block_number_or_hash {
            let actual = first.hash();
            if actual != hash {
                return Err(EthError::InvalidResponse(format!(
                    "first header {} does not match requested hash {}",
                    hex::encode(actual),
                    hex::encode(hash)
                )));
            }
        }

        let numbers: Vec<_> = headers.iter().map(|h| h.number).collect();
        self.validate_sequence(&numbers)
    }
}

impl From<GetBlockHeadersMessage> for HeaderRequest {
    fn from(msg: GetBlockHeadersMessage) -> Self {
        Self {
            block_number_or_hash: msg.block_number_or_hash,
            max_headers: msg.max_headers,
            skip: msg.skip,
            reverse: msg.reverse,
        }
    }
}
