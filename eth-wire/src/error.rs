//! eth wire error types.

use std::io;
use thiserror::Error;

use crate::limits::FetchKind;
use crate::protocol::Command;

/// Errors raised while building, sending or decoding eth messages.
#[derive(Debug, Error)]
pub enum EthError {
    /// I/O error from the underlying byte stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A request asks for more items than peers will serve.
    #[error("Cannot ask for more than {max} {kind} in a single request (asked for {requested})")]
    CeilingExceeded {
        /// Kind of item requested.
        kind: FetchKind,
        /// Number of items asked for.
        requested: usize,
        /// Ceiling for this kind.
        max: usize,
    },

    /// Command id not registered for this protocol version.
    #[error("Unknown command id: {id}")]
    UnknownCommand {
        /// The unrecognised id.
        id: u64,
    },

    /// Payload does not match the command's shape.
    #[error("Schema mismatch for {command}: {reason}")]
    SchemaMismatch {
        /// Command the payload was decoded as.
        command: Command,
        /// First structural problem found.
        reason: String,
    },

    /// Frame exceeds the configured size limit.
    #[error("Frame too large: {size} bytes (max: {max})")]
    FrameTooLarge {
        /// Frame size in bytes.
        size: usize,
        /// Configured limit.
        max: usize,
    },

    /// Frame header or body is malformed.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Peer speaks a different protocol version.
    #[error("Incompatible protocol version: {peer_version} (our version: {our_version})")]
    IncompatibleVersion {
        /// Version the peer announced.
        peer_version: u64,
        /// Version we speak.
        our_version: u64,
    },

    /// Peer is on a different network.
    #[error("Network id mismatch: expected {expected}, got {actual}")]
    NetworkMismatch {
        /// Our network id.
        expected: u64,
        /// Peer's network id.
        actual: u64,
    },

    /// Genesis hash mismatch during handshake.
    #[error("Genesis mismatch: expected {expected}, got {actual}")]
    GenesisMismatch {
        /// Our genesis hash, hex encoded.
        expected: String,
        /// Peer's genesis hash, hex encoded.
        actual: String,
    },

    /// Peer sent an unexpected message.
    #[error("Unexpected message: expected {expected}, got {actual}")]
    UnexpectedMessage {
        /// What was acceptable at this point.
        expected: String,
        /// What arrived.
        actual: String,
    },

    /// Request parameters are inconsistent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Response does not answer the request it was matched with.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The transport no longer accepts frames.
    #[error("Transport closed")]
    TransportClosed,
}

/// Result type for eth wire operations.
pub type EthResult<T> = Result<T, EthError>;
