//! eth/63 protocol messages.
//!
//! Each [`Command`] has exactly one [`Message`] variant. Field-shaped
//! commands carry a struct whose field order is the wire order; repeated
//! commands carry the element list directly.

use std::fmt;

use alloy_rlp::{Decodable, RlpDecodable, RlpEncodable};
use bytes::Bytes;
use eth_core::serialization::{decode, encode};
use eth_core::{Block, BlockBody, BlockHeader, BlockNumber, Hash, HashOrNumber, Receipt, Transaction, U256};

use crate::error::{EthError, EthResult};
use crate::protocol::Command;

/// Handshake: the first message on every connection.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct StatusMessage {
    /// Protocol version of the sender.
    pub protocol_version: u64,
    /// Network the sender is on.
    pub network_id: u64,
    /// Total difficulty of the sender's best chain.
    pub total_difficulty: U256,
    /// Hash of the sender's best block, as an unchecked byte string.
    pub best_hash: Bytes,
    /// Hash of the sender's genesis block. May be empty.
    pub genesis_hash: Bytes,
}

/// One entry of a `NewBlockHashes` announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct NewBlockHash {
    /// Announced block hash.
    pub hash: Hash,
    /// Announced block number.
    pub number: BlockNumber,
}

/// Request for up to `max_headers` headers.
///
/// Starts at `block_number_or_hash` and walks forward, or backward when
/// `reverse` is set, stepping over `skip` blocks between headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct GetBlockHeadersMessage {
    /// First block of the range.
    pub block_number_or_hash: HashOrNumber,
    /// Maximum number of headers to return.
    pub max_headers: u64,
    /// Blocks to skip between consecutive headers.
    pub skip: u64,
    /// Walk towards genesis instead of towards the head.
    pub reverse: bool,
}

/// Announcement of a full block together with the chain's total difficulty.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct NewBlockMessage {
    /// The announced block.
    pub block: Block,
    /// Total difficulty including this block.
    pub total_difficulty: U256,
}

/// All eth/63 messages.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::large_enum_variant)]
pub enum Message {
    // Handshake
    /// Chain identity and head.
    Status(StatusMessage),

    // Announcements
    /// New block hashes.
    NewBlockHashes(Vec<NewBlockHash>),
    /// Transactions to relay.
    Transactions(Vec<Transaction>),
    /// A full new block.
    NewBlock(NewBlockMessage),

    // Chain sync
    /// Request for headers.
    GetBlockHeaders(GetBlockHeadersMessage),
    /// Headers in the order requested.
    BlockHeaders(Vec<BlockHeader>),
    /// Request for bodies by block hash.
    GetBlockBodies(Vec<Hash>),
    /// Bodies in the order requested.
    BlockBodies(Vec<BlockBody>),

    // State sync
    /// Request for trie nodes by hash.
    GetNodeData(Vec<Hash>),
    /// Trie nodes.
    NodeData(Vec<Bytes>),
    /// Request for receipts by block hash.
    GetReceipts(Vec<Hash>),
    /// One receipt list per requested block.
    Receipts(Vec<Vec<Receipt>>),
}

fn decode_payload<T: Decodable>(command: Command, payload: &[u8]) -> EthResult<T> {
    decode(payload).map_err(|e| EthError::SchemaMismatch {
        command,
        reason: e.to_string(),
    })
}

impl Message {
    /// The command kind of this message.
    pub fn command(&self) -> Command {
        match self {
            Message::Status(_) => Command::Status,
            Message::NewBlockHashes(_) => Command::NewBlockHashes,
            Message::Transactions(_) => Command::Transactions,
            Message::NewBlock(_) => Command::NewBlock,
            Message::GetBlockHeaders(_) => Command::GetBlockHeaders,
            Message::BlockHeaders(_) => Command::BlockHeaders,
            Message::GetBlockBodies(_) => Command::GetBlockBodies,
            Message::BlockBodies(_) => Command::BlockBodies,
            Message::GetNodeData(_) => Command::GetNodeData,
            Message::NodeData(_) => Command::NodeData,
            Message::GetReceipts(_) => Command::GetReceipts,
            Message::Receipts(_) => Command::Receipts,
        }
    }

    /// Get a human-readable name for the message type.
    pub fn name(&self) -> &'static str {
        self.command().name()
    }

    /// Encode the payload (without command id).
    pub fn encode_payload(&self) -> Vec<u8> {
        match self {
            Message::Status(m) => encode(m),
            Message::NewBlockHashes(m) => encode(m),
            Message::Transactions(m) => encode(m),
            Message::NewBlock(m) => encode(m),
            Message::GetBlockHeaders(m) => encode(m),
            Message::BlockHeaders(m) => encode(m),
            Message::GetBlockBodies(m) => encode(m),
            Message::BlockBodies(m) => encode(m),
            Message::GetNodeData(m) => encode(m),
            Message::NodeData(m) => encode(m),
            Message::GetReceipts(m) => encode(m),
            Message::Receipts(m) => encode(m),
        }
    }

    /// Decode a payload received under `command`.
    ///
    /// The payload is first checked against the command's shape, then
    /// decoded into typed values. Both failures are reported as
    /// [`EthError::SchemaMismatch`].
    pub fn decode(command: Command, payload: &[u8]) -> EthResult<Message> {
        command
            .shape()
            .validate(payload)
            .map_err(|reason| EthError::SchemaMismatch { command, reason })?;

        let message = match command {
            Command::Status => Message::Status(decode_payload(command, payload)?),
            Command::NewBlockHashes => Message::NewBlockHashes(decode_payload(command, payload)?),
            Command::Transactions => Message::Transactions(decode_payload(command, payload)?),
            Command::NewBlock => Message::NewBlock(decode_payload(command, payload)?),
            Command::GetBlockHeaders => {
                Message::GetBlockHeaders(decode_payload(command, payload)?)
            }
            Command::BlockHeaders => Message::BlockHeaders(decode_payload(command, payload)?),
            Command::GetBlockBodies => Message::GetBlockBodies(decode_payload(command, payload)?),
            Command::BlockBodies => Message::BlockBodies(decode_payload(command, payload)?),
            Command::GetNodeData => Message::GetNodeData(decode_payload(command, payload)?),
            Command::NodeData => Message::NodeData(decode_payload(command, payload)?),
            Command::GetReceipts => Message::GetReceipts(decode_payload(command, payload)?),
            Command::Receipts => Message::Receipts(decode_payload(command, payload)?),
        };
        Ok(message)
    }

    /// Headers carried by a header response, in wire order.
    ///
    /// Defined for every message: `None` unless the message is a header
    /// response.
    pub fn extract_headers(&self) -> Option<&[BlockHeader]> {
        match self {
            Message::BlockHeaders(headers) => Some(headers),
            _ => None,
        }
    }

    /// Owned variant of [`extract_headers`](Self::extract_headers).
    pub fn into_headers(self) -> Option<Vec<BlockHeader>> {
        match self {
            Message::BlockHeaders(headers) => Some(headers),
            _ => None,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Status(s) => write!(
                f,
                "Status(version={}, network={}, td={}, best={})",
                s.protocol_version,
                s.network_id,
                s.total_difficulty,
                hex::encode(&s.best_hash[..s.best_hash.len().min(4)])
            ),
            Message::NewBlockHashes(h) => write!(f, "NewBlockHashes(count={})", h.len()),
            Message::Transactions(t) => write!(f, "Transactions(count={})", t.len()),
            Message::NewBlock(b) => write!(
                f,
                "NewBlock(number={}, td={})",
                b.block.number(),
                b.total_difficulty
            ),
            Message::GetBlockHeaders(g) => write!(
                f,
                "GetBlockHeaders(start={}, max={}, skip={}, reverse={})",
                g.block_number_or_hash, g.max_headers, g.skip, g.reverse
            ),
            Message::BlockHeaders(h) => write!(f, "BlockHeaders(count={})", h.len()),
            Message::GetBlockBodies(h) => write!(f, "GetBlockBodies(count={})", h.len()),
            Message::BlockBodies(b) => write!(f, "BlockBodies(count={})", b.len()),
            Message::GetNodeData(h) => write!(f, "GetNodeData(count={})", h.len()),
            Message::NodeData(n) => write!(f, "NodeData(count={})", n.len()),
            Message::GetReceipts(h) => write!(f, "GetReceipts(count={})", h.len()),
            Message::Receipts(r) => write!(f, "Receipts(count={})", r.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(number: u64) -> BlockHeader {
        BlockHeader::empty([0u8; 32], number, U256::from(131_072u64))
    }

    #[test]
    fn test_command_matches_variant() {
        let messages = vec![
            Message::NewBlockHashes(vec![]),
            Message::Transactions(vec![]),
            Message::BlockHeaders(vec![]),
            Message::GetBlockBodies(vec![]),
            Message::BlockBodies(vec![]),
            Message::GetNodeData(vec![]),
            Message::NodeData(vec![]),
            Message::GetReceipts(vec![]),
            Message::Receipts(vec![]),
        ];
        for message in messages {
            let payload = message.encode_payload();
            let decoded = Message::decode(message.command(), &payload).unwrap();
            assert_eq!(decoded, message);
        }
    }

    #[test]
    fn test_get_block_headers_scenario() {
        let message = Message::GetBlockHeaders(GetBlockHeadersMessage {
            block_number_or_hash: HashOrNumber::Number(42),
            max_headers: 10,
            skip: 0,
            reverse: false,
        });
        let payload = message.encode_payload();
        assert_eq!(payload, vec![0xc4, 42, 10, 0x80, 0x80]);

        match Message::decode(Command::GetBlockHeaders, &payload).unwrap() {
            Message::GetBlockHeaders(g) => {
                assert_eq!(g.block_number_or_hash, HashOrNumber::Number(42));
                assert_eq!(g.max_headers, 10);
                assert_eq!(g.skip, 0);
                assert!(!g.reverse);
            }
            other => panic!("unexpected message {}", other),
        }
    }

    #[test]
    fn test_receipts_empty_vs_one_empty() {
        let none = Message::Receipts(vec![]);
        let one_empty = Message::Receipts(vec![vec![]]);

        let none_bytes = none.encode_payload();
        let one_bytes = one_empty.encode_payload();
        assert_eq!(none_bytes, vec![0xc0]);
        assert_eq!(one_bytes, vec![0xc1, 0xc0]);

        match Message::decode(Command::Receipts, &none_bytes).unwrap() {
            Message::Receipts(r) => assert!(r.is_empty()),
            other => panic!("unexpected message {}", other),
        }
        match Message::decode(Command::Receipts, &one_bytes).unwrap() {
            Message::Receipts(r) => {
                assert_eq!(r.len(), 1);
                assert!(r[0].is_empty());
            }
            other => panic!("unexpected message {}", other),
        }
    }

    #[test]
    fn test_extract_headers() {
        let headers = vec![header(1), header(2), header(3)];
        let message = Message::BlockHeaders(headers.clone());
        let decoded = Message::decode(Command::BlockHeaders, &message.encode_payload()).unwrap();

        assert_eq!(decoded.extract_headers(), Some(headers.as_slice()));
        assert_eq!(decoded.into_headers(), Some(headers));
        assert_eq!(Message::GetBlockBodies(vec![]).extract_headers(), None);
    }

    #[test]
    fn test_wrong_command_is_schema_mismatch() {
        let payload = Message::GetBlockBodies(vec![[1u8; 32]]).encode_payload();
        let result = Message::decode(Command::BlockHeaders, &payload);
        assert!(matches!(
            result,
            Err(EthError::SchemaMismatch {
                command: Command::BlockHeaders,
                ..
            })
        ));
    }

    #[test]
    fn test_status_with_empty_genesis_decodes() {
        // [63, 1, 1, best_hash, ""]
        let mut payload = vec![0xe5, 63, 1, 1, 0xa0];
        payload.extend_from_slice(&[7u8; 32]);
        payload.push(0x80);

        let decoded = Message::decode(Command::Status, &payload).unwrap();
        match &decoded {
            Message::Status(status) => {
                assert_eq!(status.protocol_version, 63);
                assert_eq!(&status.best_hash[..], &[7u8; 32]);
                assert!(status.genesis_hash.is_empty());
            }
            other => panic!("unexpected message {}", other),
        }
        assert_eq!(decoded.encode_payload(), payload);
    }

    #[test]
    fn test_status_display_short_hash() {
        let message = Message::Status(StatusMessage {
            protocol_version: 63,
            network_id: 1,
            total_difficulty: U256::from(5u64),
            best_hash: Bytes::from_static(&[0xab]),
            genesis_hash: Bytes::new(),
        });
        assert_eq!(
            message.to_string(),
            "Status(version=63, network=1, td=5, best=ab)"
        );
    }

    #[test]
    fn test_new_block_roundtrip() {
        let message = Message::NewBlock(NewBlockMessage {
            block: Block::new(header(100), BlockBody::default()),
            total_difficulty: U256::from(u64::MAX) * U256::from(1_000u64),
        });
        let decoded = Message::decode(Command::NewBlock, &message.encode_payload()).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_message_display() {
        let msg = Message::GetNodeData(vec![[0u8; 32]; 3]);
        assert_eq!(format!("{}", msg), "GetNodeData(count=3)");
        assert_eq!(msg.name(), "GetNodeData");
    }
}
