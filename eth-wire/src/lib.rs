//! The `eth` wire subprotocol, version 63.
//!
//! This crate defines the messages two chain-synchronizing peers exchange
//! and the rules for sending them:
//!
//! - A fixed command registry mapping ids 0-16 to payload shapes
//! - Typed encode/decode of every message, rejecting non-conforming input
//! - Per-request ceilings on headers, bodies, receipts and trie nodes
//! - Status handshake building and validation
//! - Matching header responses against their requests
//!
//! # Architecture
//!
//! ```text
//! EthProtocol::send_*  -> Message -> RLP payload -> Frame -> Transport
//! Frame -> absolute id -> Command -> Shape check -> Message
//! ```
//!
//! Session encryption, multiplexing and connection lifecycle belong to
//! the layer implementing [`Transport`].
//!
//! # Usage
//!
//! ```ignore
//! use eth_wire::{ChainInfo, ChannelTransport, EthConfig, EthProtocol};
//!
//! let (transport, mut frames) = ChannelTransport::channel();
//! let eth = EthProtocol::new(EthConfig::new(1), transport);
//!
//! eth.send_handshake(&head)?;
//! let request = eth.send_get_block_headers(42u64, 10, 0, false)?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod eth;
pub mod limits;
pub mod protocol;
pub mod transport;

// Re-export main types
pub use config::{EthConfig, CMD_LENGTH, DEFAULT_CMD_ID_OFFSET, PROTOCOL_NAME, PROTOCOL_VERSION};
pub use error::{EthError, EthResult};
pub use eth::EthProtocol;
pub use limits::{
    check_headers_request, check_request, FetchKind, MAX_BODIES_FETCH, MAX_HEADERS_FETCH,
    MAX_RECEIPTS_FETCH, MAX_STATE_FETCH,
};
pub use protocol::{
    ChainInfo, Command, Frame, FrameCodec, HandshakeState, HeaderRequest, Message, ETH_PROTOCOL,
};
pub use transport::{ChannelTransport, Transport};
