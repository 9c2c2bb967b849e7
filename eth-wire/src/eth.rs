//! The eth subprotocol bound to one connection.

use bytes::Bytes;
use eth_core::{Block, BlockBody, BlockHeader, Hash, HashOrNumber, Receipt, Transaction, U256};

use crate::config::EthConfig;
use crate::error::EthResult;
use crate::limits::{check_headers_request, check_request, FetchKind};
use crate::protocol::{
    create_status, ChainInfo, Frame, HeaderRequest, Message, NewBlockHash, NewBlockMessage,
    ETH_PROTOCOL,
};
use crate::transport::Transport;

/// Sends and decodes eth/63 messages for one connection.
///
/// Every `send_*` validates its arguments, builds the message, frames it
/// under this connection's command id offset and hands the frame to the
/// transport. None of them wait for a response.
#[derive(Debug)]
pub struct EthProtocol<T> {
    config: EthConfig,
    transport: T,
}

impl<T: Transport> EthProtocol<T> {
    /// Bind the protocol to a transport.
    pub fn new(config: EthConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Connection configuration.
    pub fn config(&self) -> &EthConfig {
        &self.config
    }

    /// Base offset of this protocol's command ids.
    pub fn cmd_id_offset(&self) -> u64 {
        self.config.cmd_id_offset
    }

    /// Network id advertised in our Status.
    pub fn network_id(&self) -> u64 {
        self.config.network_id
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Frame a message under this connection's offset.
    pub fn encode(&self, message: &Message) -> EthResult<Frame> {
        let cmd_id = ETH_PROTOCOL.absolute_id(self.config.cmd_id_offset, message.command());
        let payload = message.encode_payload();
        Frame::new(cmd_id, &payload, self.config.max_frame_size)
    }

    /// Frame a message and pass it to the transport.
    pub fn send_message(&self, message: Message) -> EthResult<()> {
        let frame = self.encode(&message)?;
        tracing::debug!(
            cmd = %message.command(),
            msg = %message,
            size = frame.wire_len(),
            "Sending eth message"
        );
        self.transport.send(frame)
    }

    fn check_ceiling(&self, kind: FetchKind, requested: usize) -> EthResult<()> {
        if self.config.enforce_all_ceilings {
            check_request(kind, requested)?;
        }
        Ok(())
    }

    /// Send our Status built from the local chain head.
    pub fn send_handshake(&self, head: &ChainInfo) -> EthResult<()> {
        let status = create_status(self.config.network_id, head);
        tracing::debug!(
            network_id = status.network_id,
            td = %status.total_difficulty,
            best = %hex::encode(&status.best_hash),
            genesis = %hex::encode(&status.genesis_hash),
            "Sending eth handshake"
        );
        self.send_message(Message::Status(status))
    }

    /// Announce new block hashes.
    pub fn send_new_block_hashes(&self, hashes: Vec<NewBlockHash>) -> EthResult<()> {
        self.send_message(Message::NewBlockHashes(hashes))
    }

    /// Relay transactions.
    pub fn send_transactions(&self, transactions: Vec<Transaction>) -> EthResult<()> {
        self.send_message(Message::Transactions(transactions))
    }

    /// Request headers. Returns the request for matching the response.
    pub fn send_get_block_headers(
        &self,
        block_number_or_hash: impl Into<HashOrNumber>,
        max_headers: u64,
        skip: u64,
        reverse: bool,
    ) -> EthResult<HeaderRequest> {
        let request = HeaderRequest::new(block_number_or_hash, max_headers, skip, reverse);
        self.send_header_request(&request)?;
        Ok(request)
    }

    /// Send a prepared header request.
    pub fn send_header_request(&self, request: &HeaderRequest) -> EthResult<()> {
        check_headers_request(request.max_headers)?;
        self.send_message(Message::GetBlockHeaders(request.to_message()))
    }

    /// Answer a header request.
    pub fn send_block_headers(&self, headers: Vec<BlockHeader>) -> EthResult<()> {
        self.send_message(Message::BlockHeaders(headers))
    }

    /// Request block bodies by block hash.
    pub fn send_get_block_bodies(&self, block_hashes: Vec<Hash>) -> EthResult<()> {
        self.check_ceiling(FetchKind::Bodies, block_hashes.len())?;
        self.send_message(Message::GetBlockBodies(block_hashes))
    }

    /// Answer a body request.
    pub fn send_block_bodies(&self, bodies: Vec<BlockBody>) -> EthResult<()> {
        self.send_message(Message::BlockBodies(bodies))
    }

    /// Announce a full block.
    pub fn send_new_block(&self, block: Block, total_difficulty: U256) -> EthResult<()> {
        self.send_message(Message::NewBlock(NewBlockMessage {
            block,
            total_difficulty,
        }))
    }

    /// Request state trie nodes by hash.
    pub fn send_get_node_data(&self, node_hashes: Vec<Hash>) -> EthResult<()> {
        self.check_ceiling(FetchKind::NodeData, node_hashes.len())?;
        self.send_message(Message::GetNodeData(node_hashes))
    }

    /// Answer a node data request.
    pub fn send_node_data(&self, nodes: Vec<Bytes>) -> EthResult<()> {
        self.send_message(Message::NodeData(nodes))
    }

    /// Request receipts by block hash.
    pub fn send_get_receipts(&self, block_hashes: Vec<Hash>) -> EthResult<()> {
        self.check_ceiling(FetchKind::Receipts, block_hashes.len())?;
        self.send_message(Message::GetReceipts(block_hashes))
    }

    /// Answer a receipts request with one list per block.
    pub fn send_receipts(&self, receipts: Vec<Vec<Receipt>>) -> EthResult<()> {
        self.send_message(Message::Receipts(receipts))
    }

    /// Decode a received frame.
    pub fn decode(&self, frame: &Frame) -> EthResult<Message> {
        let (cmd_id, payload) = frame.split()?;
        self.decode_body(cmd_id, payload)
    }

    /// Decode a payload received under an absolute command id.
    pub fn decode_body(&self, cmd_id: u64, payload: &[u8]) -> EthResult<Message> {
        let command = ETH_PROTOCOL.resolve_absolute(self.config.cmd_id_offset, cmd_id)?;
        let message = Message::decode(command, payload)?;
        tracing::debug!(cmd = %command, cmd_id, msg = %message, "Received eth message");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EthError;
    use crate::protocol::Command;
    use crate::transport::ChannelTransport;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn protocol() -> (EthProtocol<ChannelTransport>, UnboundedReceiver<Frame>) {
        let (transport, rx) = ChannelTransport::channel();
        (EthProtocol::new(EthConfig::default(), transport), rx)
    }

    fn head() -> ChainInfo {
        ChainInfo {
            block_number: 0,
            block_hash: [3u8; 32],
            total_difficulty: U256::from(17_179_869_184u64),
            genesis_hash: [3u8; 32],
        }
    }

    #[test]
    fn test_handshake_frame() {
        let (eth, mut rx) = protocol();
        eth.send_handshake(&head()).unwrap();

        let frame = rx.try_recv().unwrap();
        let (cmd_id, _) = frame.split().unwrap();
        assert_eq!(cmd_id, 16);

        match eth.decode(&frame).unwrap() {
            Message::Status(status) => {
                assert_eq!(status.protocol_version, 63);
                assert_eq!(status.network_id, 1);
                assert_eq!(&status.best_hash[..], &[3u8; 32]);
            }
            other => panic!("unexpected message {}", other),
        }
    }

    #[test]
    fn test_header_ceiling() {
        let (eth, mut rx) = protocol();

        let err = eth.send_get_block_headers(0u64, 193, 0, false).unwrap_err();
        assert!(matches!(
            err,
            EthError::CeilingExceeded {
                kind: FetchKind::Headers,
                requested: 193,
                max: 192
            }
        ));
        assert!(rx.try_recv().is_err());

        let request = eth.send_get_block_headers(0u64, 192, 0, false).unwrap();
        assert_eq!(request.max_headers, 192);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_hash_list_ceilings() {
        let (eth, mut rx) = protocol();

        assert!(eth.send_get_block_bodies(vec![[0u8; 32]; 128]).is_ok());
        assert!(matches!(
            eth.send_get_block_bodies(vec![[0u8; 32]; 129]),
            Err(EthError::CeilingExceeded { max: 128, .. })
        ));
        assert!(eth.send_get_receipts(vec![[0u8; 32]; 256]).is_ok());
        assert!(matches!(
            eth.send_get_receipts(vec![[0u8; 32]; 257]),
            Err(EthError::CeilingExceeded { max: 256, .. })
        ));
        assert!(eth.send_get_node_data(vec![[0u8; 32]; 384]).is_ok());
        assert!(matches!(
            eth.send_get_node_data(vec![[0u8; 32]; 385]),
            Err(EthError::CeilingExceeded { max: 384, .. })
        ));

        let mut sent = 0;
        while rx.try_recv().is_ok() {
            sent += 1;
        }
        assert_eq!(sent, 3);
    }

    #[test]
    fn test_ceilings_can_be_relaxed() {
        let (transport, _rx) = ChannelTransport::channel();
        let config = EthConfig::default().with_enforce_all_ceilings(false);
        let eth = EthProtocol::new(config, transport);

        assert!(eth.send_get_block_bodies(vec![[0u8; 32]; 500]).is_ok());
        assert!(eth.send_get_block_headers(0u64, 193, 0, false).is_err());
    }

    #[test]
    fn test_offset_is_applied() {
        let (transport, mut rx) = ChannelTransport::channel();
        let eth = EthProtocol::new(EthConfig::default().with_cmd_id_offset(32), transport);

        eth.send_receipts(vec![]).unwrap();
        let frame = rx.try_recv().unwrap();
        assert_eq!(frame.split().unwrap().0, 48);
        assert_eq!(eth.decode(&frame).unwrap().command(), Command::Receipts);

        assert!(matches!(
            eth.decode_body(16, &[0xc0]),
            Err(EthError::UnknownCommand { id: 16 })
        ));
    }

    #[test]
    fn test_decode_unknown_ids() {
        let (eth, _rx) = protocol();
        for id in [16 + 8, 16 + 12, 16 + 17, 3] {
            assert!(matches!(
                eth.decode_body(id, &[0xc0]),
                Err(EthError::UnknownCommand { .. })
            ));
        }
    }

    #[test]
    fn test_send_on_closed_transport() {
        let (eth, rx) = protocol();
        drop(rx);
        assert!(matches!(
            eth.send_transactions(vec![]),
            Err(EthError::TransportClosed)
        ));
    }

    #[test]
    fn test_frame_size_limit() {
        let (transport, _rx) = ChannelTransport::channel();
        let eth = EthProtocol::new(EthConfig::default().with_max_frame_size(64), transport);

        let result = eth.send_node_data(vec![Bytes::from(vec![0u8; 100])]);
        assert!(matches!(result, Err(EthError::FrameTooLarge { max: 64, .. })));
    }
}
