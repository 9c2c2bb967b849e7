//! eth/63 protocol layer.
//!
//! This module contains:
//! - The command registry and payload shapes
//! - Typed message definitions for all 12 commands
//! - Frame construction and the stream codec
//! - Status handshake logic
//! - Header request correlation

pub mod command;
pub mod framing;
pub mod messages;
pub mod request;
pub mod shape;
pub mod status;

// Re-export main types
pub use command::{resolve, Command, ProtocolDescriptor, ETH_PROTOCOL};
pub use framing::{Frame, FrameCodec};
pub use messages::{
    GetBlockHeadersMessage, Message, NewBlockHash, NewBlockMessage, StatusMessage,
};
pub use request::HeaderRequest;
pub use shape::{Field, Shape, ValueKind};
pub use status::{create_status, validate_status, ChainInfo, HandshakeResult, HandshakeState};
