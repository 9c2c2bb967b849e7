//! Where finished frames go.
//!
//! Encryption, multiplexing and socket I/O live behind [`Transport`]; the
//! eth layer only hands it complete frames and never waits for a reply.

use tokio::sync::mpsc;

use crate::error::{EthError, EthResult};
use crate::protocol::Frame;

/// Sink for outbound frames of one connection.
pub trait Transport {
    /// Queue a frame for sending. Must not block.
    fn send(&self, frame: Frame) -> EthResult<()>;
}

/// Transport backed by an unbounded in-process channel.
///
/// The receiving half is typically drained by the connection's writer
/// task.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<Frame>,
}

impl ChannelTransport {
    /// Create a transport and the receiver its frames arrive on.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Frame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Whether the receiving half has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Transport for ChannelTransport {
    fn send(&self, frame: Frame) -> EthResult<()> {
        self.tx.send(frame).map_err(|_| EthError::TransportClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_FRAME_SIZE;

    #[tokio::test]
    async fn test_channel_delivers_frames_in_order() {
        let (transport, mut rx) = ChannelTransport::channel();

        let first = Frame::new(16, &[0xc0], MAX_FRAME_SIZE).unwrap();
        let second = Frame::new(17, &[0xc0], MAX_FRAME_SIZE).unwrap();
        transport.send(first.clone()).unwrap();
        transport.send(second.clone()).unwrap();

        assert_eq!(rx.recv().await, Some(first));
        assert_eq!(rx.recv().await, Some(second));
    }

    #[test]
    fn test_closed_channel() {
        let (transport, rx) = ChannelTransport::channel();
        drop(rx);

        assert!(transport.is_closed());
        let frame = Frame::new(16, &[0xc0], MAX_FRAME_SIZE).unwrap();
        assert!(matches!(transport.send(frame), Err(EthError::TransportClosed)));
    }
}
