//! Command registry for eth/63.
//!
//! The command set of a protocol version is closed: every kind is a variant
//! of [`Command`] and its discriminant is the relative command id. The
//! absolute id on the wire is the connection's command id offset plus that
//! discriminant.
//!
//! # Command ids
//!
//! - `0-7`: status, announcements, headers and bodies
//! - `8-12`: vacant in this version
//! - `13-16`: node data and receipts

use std::fmt;

use crate::config::{CMD_LENGTH, PROTOCOL_NAME, PROTOCOL_VERSION};
use crate::error::{EthError, EthResult};
use crate::limits::FetchKind;
use crate::protocol::shape::{Field, Shape, ValueKind};

/// Every message kind of the eth/63 protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Command {
    /// Handshake carrying chain identity and head.
    Status = 0,
    /// Announcement of new block hashes.
    NewBlockHashes = 1,
    /// Transaction broadcast.
    Transactions = 2,
    /// Request for block headers.
    GetBlockHeaders = 3,
    /// Block headers response.
    BlockHeaders = 4,
    /// Request for block bodies by hash.
    GetBlockBodies = 5,
    /// Block bodies response.
    BlockBodies = 6,
    /// Full new block announcement.
    NewBlock = 7,
    /// Request for state trie nodes by hash.
    GetNodeData = 13,
    /// State trie nodes response.
    NodeData = 14,
    /// Request for receipts by block hash.
    GetReceipts = 15,
    /// Receipts response, one list per requested block.
    Receipts = 16,
}

const STATUS_FIELDS: &[Field] = &[
    Field::new("protocol_version", ValueKind::UnsignedInt),
    Field::new("network_id", ValueKind::UnsignedInt),
    Field::new("td", ValueKind::UnsignedInt),
    Field::new("best_hash", ValueKind::Binary),
    Field::new("genesis_hash", ValueKind::Binary),
];

const GET_BLOCK_HEADERS_FIELDS: &[Field] = &[
    Field::new("block_number_or_hash", ValueKind::HashOrNumber),
    Field::new("max_headers", ValueKind::UnsignedInt),
    Field::new("skip", ValueKind::UnsignedInt),
    Field::new("reverse", ValueKind::Boolean),
];

const BLOCK_HASH_ANNOUNCEMENT: ValueKind =
    ValueKind::Tuple(&[ValueKind::Hash, ValueKind::UnsignedInt]);

const RECEIPT_LIST: ValueKind = ValueKind::List(&ValueKind::Receipt);

const NEW_BLOCK_FIELDS: &[Field] = &[
    Field::new(
        "block",
        ValueKind::Tuple(&[
            ValueKind::Header,
            ValueKind::List(&ValueKind::Transaction),
            ValueKind::List(&ValueKind::Header),
        ]),
    ),
    Field::new("total_difficulty", ValueKind::UnsignedInt),
];

impl Command {
    /// All commands in id order.
    pub const ALL: [Command; 12] = [
        Command::Status,
        Command::NewBlockHashes,
        Command::Transactions,
        Command::GetBlockHeaders,
        Command::BlockHeaders,
        Command::GetBlockBodies,
        Command::BlockBodies,
        Command::NewBlock,
        Command::GetNodeData,
        Command::NodeData,
        Command::GetReceipts,
        Command::Receipts,
    ];

    /// Relative command id.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Look up a command by relative id.
    pub const fn from_id(id: u8) -> Option<Command> {
        match id {
            0 => Some(Command::Status),
            1 => Some(Command::NewBlockHashes),
            2 => Some(Command::Transactions),
            3 => Some(Command::GetBlockHeaders),
            4 => Some(Command::BlockHeaders),
            5 => Some(Command::GetBlockBodies),
            6 => Some(Command::BlockBodies),
            7 => Some(Command::NewBlock),
            13 => Some(Command::GetNodeData),
            14 => Some(Command::NodeData),
            15 => Some(Command::GetReceipts),
            16 => Some(Command::Receipts),
            _ => None,
        }
    }

    /// Command name as used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Command::Status => "Status",
            Command::NewBlockHashes => "NewBlockHashes",
            Command::Transactions => "Transactions",
            Command::GetBlockHeaders => "GetBlockHeaders",
            Command::BlockHeaders => "BlockHeaders",
            Command::GetBlockBodies => "GetBlockBodies",
            Command::BlockBodies => "BlockBodies",
            Command::NewBlock => "NewBlock",
            Command::GetNodeData => "GetNodeData",
            Command::NodeData => "NodeData",
            Command::GetReceipts => "GetReceipts",
            Command::Receipts => "Receipts",
        }
    }

    /// Payload structure of this command.
    pub const fn shape(self) -> Shape {
        match self {
            Command::Status => Shape::Fields(STATUS_FIELDS),
            Command::NewBlockHashes => Shape::Repeated(BLOCK_HASH_ANNOUNCEMENT),
            Command::Transactions => Shape::Repeated(ValueKind::Transaction),
            Command::GetBlockHeaders => Shape::Fields(GET_BLOCK_HEADERS_FIELDS),
            Command::BlockHeaders => Shape::Repeated(ValueKind::Header),
            Command::GetBlockBodies => Shape::Repeated(ValueKind::Hash),
            Command::BlockBodies => Shape::Repeated(ValueKind::BlockBody),
            Command::NewBlock => Shape::Fields(NEW_BLOCK_FIELDS),
            Command::GetNodeData => Shape::Repeated(ValueKind::Hash),
            Command::NodeData => Shape::Repeated(ValueKind::Binary),
            Command::GetReceipts => Shape::Repeated(ValueKind::Hash),
            Command::Receipts => Shape::Repeated(RECEIPT_LIST),
        }
    }

    /// The command that answers this request, if it is one.
    pub const fn response(self) -> Option<Command> {
        match self {
            Command::GetBlockHeaders => Some(Command::BlockHeaders),
            Command::GetBlockBodies => Some(Command::BlockBodies),
            Command::GetNodeData => Some(Command::NodeData),
            Command::GetReceipts => Some(Command::Receipts),
            _ => None,
        }
    }

    /// Ceiling that bounds this request, if it is a fetch request.
    pub const fn fetch_kind(self) -> Option<FetchKind> {
        match self {
            Command::GetBlockHeaders => Some(FetchKind::Headers),
            Command::GetBlockBodies => Some(FetchKind::Bodies),
            Command::GetNodeData => Some(FetchKind::NodeData),
            Command::GetReceipts => Some(FetchKind::Receipts),
            _ => None,
        }
    }

    /// Whether a response is expected for this command.
    #[inline]
    pub fn is_request(self) -> bool {
        self.response().is_some()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name, version and command set of a subprotocol.
#[derive(Debug)]
pub struct ProtocolDescriptor {
    /// Capability name.
    pub name: &'static str,
    /// Capability version.
    pub version: u64,
    /// Number of command ids reserved, including vacant ones.
    pub cmd_length: u8,
    /// Registered commands in id order.
    pub commands: &'static [Command],
}

/// The eth/63 protocol.
pub static ETH_PROTOCOL: ProtocolDescriptor = ProtocolDescriptor {
    name: PROTOCOL_NAME,
    version: PROTOCOL_VERSION,
    cmd_length: CMD_LENGTH,
    commands: &Command::ALL,
};

impl ProtocolDescriptor {
    /// Resolve a relative command id.
    ///
    /// Fails with [`EthError::UnknownCommand`] for ids at or past
    /// `cmd_length` and for vacant ids.
    pub fn resolve(&self, id: u64) -> EthResult<Command> {
        u8::try_from(id)
            .ok()
            .filter(|id| *id < self.cmd_length)
            .and_then(Command::from_id)
            .filter(|command| self.commands.contains(command))
            .ok_or(EthError::UnknownCommand { id })
    }

    /// Absolute wire id of `command` for a connection using `offset`.
    #[inline]
    pub fn absolute_id(&self, offset: u64, command: Command) -> u64 {
        offset + u64::from(command.id())
    }

    /// Resolve an absolute wire id for a connection using `offset`.
    pub fn resolve_absolute(&self, offset: u64, absolute: u64) -> EthResult<Command> {
        match absolute.checked_sub(offset) {
            Some(relative) if relative < u64::from(self.cmd_length) => self.resolve(relative),
            _ => Err(EthError::UnknownCommand { id: absolute }),
        }
    }
}

/// Resolve a relative command id against eth/63.
pub fn resolve(id: u64) -> EthResult<Command> {
    ETH_PROTOCOL.resolve(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_ordered_and_in_range() {
        let ids: Vec<u8> = Command::ALL.iter().map(|c| c.id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(ids.iter().all(|id| *id < CMD_LENGTH));
        assert_eq!(ids.last().copied(), Some(CMD_LENGTH - 1));
    }

    #[test]
    fn test_from_id_inverts_id() {
        for command in Command::ALL {
            assert_eq!(Command::from_id(command.id()), Some(command));
            assert_eq!(resolve(u64::from(command.id())).unwrap(), command);
        }
    }

    #[test]
    fn test_vacant_ids_unknown() {
        for id in 8..=12 {
            assert!(matches!(resolve(id), Err(EthError::UnknownCommand { id: i }) if i == id));
        }
    }

    #[test]
    fn test_out_of_range_unknown() {
        assert!(matches!(resolve(17), Err(EthError::UnknownCommand { id: 17 })));
        assert!(resolve(256).is_err());
        assert!(resolve(u64::MAX).is_err());
    }

    #[test]
    fn test_descriptor() {
        assert_eq!(ETH_PROTOCOL.name, "eth");
        assert_eq!(ETH_PROTOCOL.version, 63);
        assert_eq!(ETH_PROTOCOL.cmd_length, 17);
        assert_eq!(ETH_PROTOCOL.commands.len(), 12);
    }

    #[test]
    fn test_absolute_ids() {
        assert_eq!(ETH_PROTOCOL.absolute_id(16, Command::Status), 16);
        assert_eq!(ETH_PROTOCOL.absolute_id(16, Command::Receipts), 32);
        assert_eq!(ETH_PROTOCOL.resolve_absolute(16, 19).unwrap(), Command::GetBlockHeaders);
        assert!(ETH_PROTOCOL.resolve_absolute(16, 15).is_err());
        assert!(ETH_PROTOCOL.resolve_absolute(16, 33).is_err());
        assert!(ETH_PROTOCOL.resolve_absolute(16, 26).is_err());
    }

    #[test]
    fn test_shapes() {
        assert_eq!(
            Command::GetBlockHeaders.shape().field_names(),
            vec!["block_number_or_hash", "max_headers", "skip", "reverse"]
        );
        assert_eq!(
            Command::Status.shape().field_names(),
            vec!["protocol_version", "network_id", "td", "best_hash", "genesis_hash"]
        );
        assert_eq!(Command::BlockHeaders.shape().to_string(), "[header]");
        assert_eq!(Command::NewBlockHashes.shape().to_string(), "[(hash, uint)]");
        assert_eq!(Command::Receipts.shape().to_string(), "[[receipt]]");
        assert_eq!(
            Command::NewBlock.shape().to_string(),
            "(block: (header, [transaction], [header]), total_difficulty: uint)"
        );
        for command in [Command::GetBlockBodies, Command::GetNodeData, Command::GetReceipts] {
            assert_eq!(command.shape(), Shape::Repeated(ValueKind::Hash));
        }
    }

    #[test]
    fn test_request_response_pairs() {
        for command in Command::ALL {
            assert_eq!(command.is_request(), command.fetch_kind().is_some());
        }
        assert_eq!(Command::GetReceipts.response(), Some(Command::Receipts));
        assert_eq!(Command::Status.response(), None);
    }
}
