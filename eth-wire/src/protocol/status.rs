//! Status handshake.
//!
//! Both peers send a `Status` as their first message and wait for the
//! other's. The connection is usable once each side has sent its own and
//! accepted the peer's. There is no acknowledgement message.

use bytes::Bytes;
use eth_core::{BlockHeader, BlockNumber, Hash, U256};

use crate::config::PROTOCOL_VERSION;
use crate::error::{EthError, EthResult};
use crate::protocol::{Command, Message, StatusMessage};

/// Local chain head advertised in the handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainInfo {
    /// Number of the head block.
    pub block_number: BlockNumber,
    /// Hash of the head block.
    pub block_hash: Hash,
    /// Total difficulty up to and including the head.
    pub total_difficulty: U256,
    /// Genesis block hash.
    pub genesis_hash: Hash,
}

impl ChainInfo {
    /// Describe a chain whose head is `head`.
    pub fn from_head(head: &BlockHeader, total_difficulty: U256, genesis_hash: Hash) -> Self {
        Self {
            block_number: head.number,
            block_hash: head.hash(),
            total_difficulty,
            genesis_hash,
        }
    }
}

/// Build the Status message for a new connection.
pub fn create_status(network_id: u64, head: &ChainInfo) -> StatusMessage {
    StatusMessage {
        protocol_version: PROTOCOL_VERSION,
        network_id,
        total_difficulty: head.total_difficulty,
        best_hash: Bytes::copy_from_slice(&head.block_hash),
        genesis_hash: Bytes::copy_from_slice(&head.genesis_hash),
    }
}

/// Validate a received Status message.
///
/// Checks:
/// - Protocol version is 63
/// - Network id matches
/// - Genesis hash matches byte for byte
pub fn validate_status(
    received: &StatusMessage,
    network_id: u64,
    genesis_hash: &[u8],
) -> EthResult<()> {
    if received.protocol_version != PROTOCOL_VERSION {
        return Err(EthError::IncompatibleVersion {
            peer_version: received.protocol_version,
            our_version: PROTOCOL_VERSION,
        });
    }

    if received.network_id != network_id {
        return Err(EthError::NetworkMismatch {
            expected: network_id,
            actual: received.network_id,
        });
    }

    if received.genesis_hash[..] != *genesis_hash {
        return Err(EthError::GenesisMismatch {
            expected: hex::encode(genesis_hash),
            actual: hex::encode(&received.genesis_hash),
        });
    }

    Ok(())
}

/// What the peer told us about its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeResult {
    /// Peer's network id.
    pub network_id: u64,
    /// Peer's total difficulty.
    pub total_difficulty: U256,
    /// Peer's best block hash.
    pub best_hash: Bytes,
    /// Shared genesis hash.
    pub genesis_hash: Bytes,
}

impl From<StatusMessage> for HandshakeResult {
    fn from(msg: StatusMessage) -> Self {
        Self {
            network_id: msg.network_id,
            total_difficulty: msg.total_difficulty,
            best_hash: msg.best_hash,
            genesis_hash: msg.genesis_hash,
        }
    }
}

/// Handshake state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HandshakeState {
    /// Nothing sent or received.
    #[default]
    Initial,
    /// Our Status sent, waiting for the peer's.
    StatusSent,
    /// Peer's Status accepted, ours not yet sent.
    StatusReceived(StatusMessage),
    /// Both Status messages exchanged.
    Complete(HandshakeResult),
    /// Handshake failed.
    Failed(String),
}

impl HandshakeState {
    /// Create initial handshake state.
    pub fn new() -> Self {
        Self::Initial
    }

    /// Record that our Status was sent.
    pub fn sent_status(&mut self) -> EthResult<()> {
        match self {
            Self::Initial => {
                *self = Self::StatusSent;
                Ok(())
            }
            Self::StatusReceived(msg) => {
                let result = HandshakeResult::from(msg.clone());
                *self = Self::Complete(result);
                Ok(())
            }
            _ => Err(EthError::InvalidRequest(
                "Status already sent on this connection".to_string(),
            )),
        }
    }

    /// Process a message received before the handshake completed.
    ///
    /// Anything other than a valid Status moves the state to `Failed`.
    pub fn received_message(
        &mut self,
        msg: Message,
        network_id: u64,
        genesis_hash: &[u8],
    ) -> EthResult<()> {
        let result = self.accept(msg, network_id, genesis_hash);
        if let Err(e) = &result {
            *self = Self::Failed(e.to_string());
        }
        result
    }

    fn accept(&mut self, msg: Message, network_id: u64, genesis_hash: &[u8]) -> EthResult<()> {
        let status = match msg {
            Message::Status(status) => status,
            other => {
                return Err(EthError::UnexpectedMessage {
                    expected: Command::Status.name().to_string(),
                    actual: other.name().to_string(),
                })
            }
        };

        validate_status(&status, network_id, genesis_hash)?;

        match self {
            Self::Initial => {
                *self = Self::StatusReceived(status);
                Ok(())
            }
            Self::StatusSent => {
                *self = Self::Complete(HandshakeResult::from(status));
                Ok(())
            }
            _ => Err(EthError::UnexpectedMessage {
                expected: "non-Status message".to_string(),
                actual: Command::Status.name().to_string(),
            }),
        }
    }

    /// Check if handshake is complete.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Get the handshake result if complete.
    pub fn result(&self) -> Option<&HandshakeResult> {
        match self {
            Self::Complete(r) => Some(r),
            _ => None,
        }
    }
}
