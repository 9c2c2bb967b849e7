//! Frame construction and the stream codec.
//!
//! A frame is a 16-byte header followed by a body:
//! - header: 3-byte big-endian frame size, the header data `c2 80 80`,
//!   zero padding up to 16 bytes
//! - body: RLP-encoded absolute command id, then the RLP payload, zero
//!   padded up to a multiple of 16 bytes
//!
//! The frame size counts the body without padding.

use alloy_rlp::{Decodable, Encodable};
use bytes::{BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::config::{FRAME_HEADER_SIZE, MAX_FRAME_SIZE};
use crate::error::{EthError, EthResult};

/// Header data following the frame size: the RLP list `[0, 0]`.
const HEADER_DATA: [u8; 3] = [0xc2, 0x80, 0x80];

/// Frame bodies are padded to this block size.
const BLOCK_SIZE: usize = 16;

fn padded_len(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE) * BLOCK_SIZE
}

/// One encoded message ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// 16-byte frame header.
    pub header: Bytes,
    /// Padded frame body.
    pub body: Bytes,
}

impl Frame {
    /// Build a frame carrying `payload` under the absolute command id.
    pub fn new(cmd_id: u64, payload: &[u8], max_frame_size: usize) -> EthResult<Self> {
        let frame_size = cmd_id.length() + payload.len();
        let max = max_frame_size.min(MAX_FRAME_SIZE);
        if frame_size > max {
            return Err(EthError::FrameTooLarge {
                size: frame_size,
                max,
            });
        }

        let mut body = BytesMut::with_capacity(padded_len(frame_size));
        cmd_id.encode(&mut body);
        body.put_slice(payload);
        body.resize(padded_len(frame_size), 0);

        let mut header = BytesMut::with_capacity(FRAME_HEADER_SIZE);
        header.put_uint(frame_size as u64, 3);
        header.put_slice(&HEADER_DATA);
        header.resize(FRAME_HEADER_SIZE, 0);

        Ok(Self {
            header: header.freeze(),
            body: body.freeze(),
        })
    }

    /// Reassemble a frame from a header and body received separately.
    pub fn from_parts(header: Bytes, body: Bytes) -> EthResult<Self> {
        let frame = Self { header, body };
        frame.split()?;
        Ok(frame)
    }

    /// Unpadded body length declared by the header.
    pub fn frame_size(&self) -> EthResult<usize> {
        if self.header.len() != FRAME_HEADER_SIZE {
            return Err(EthError::InvalidFrame(format!(
                "header is {} bytes, expected {}",
                self.header.len(),
                FRAME_HEADER_SIZE
            )));
        }
        Ok(read_frame_size(&self.header))
    }

    /// Absolute command id and payload carried by the body.
    pub fn split(&self) -> EthResult<(u64, &[u8])> {
        let frame_size = self.frame_size()?;
        if self.body.len() < frame_size {
            return Err(EthError::InvalidFrame(format!(
                "body is {} bytes, header declares {}",
                self.body.len(),
                frame_size
            )));
        }
        let mut buf = &self.body[..frame_size];
        let cmd_id = u64::decode(&mut buf)
            .map_err(|e| EthError::InvalidFrame(format!("bad command id: {}", e)))?;
        Ok((cmd_id, buf))
    }

    /// Total number of bytes on the wire.
    pub fn wire_len(&self) -> usize {
        self.header.len() + self.body.len()
    }
}

fn read_frame_size(header: &[u8]) -> usize {
    (usize::from(header[0]) << 16) | (usize::from(header[1]) << 8) | usize::from(header[2])
}

/// Codec reading and writing [`Frame`]s on a byte stream.
#[derive(Debug)]
pub struct FrameCodec {
    max_frame_size: usize,
    /// Declared size of the frame whose header has been read.
    current_size: Option<usize>,
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(MAX_FRAME_SIZE)
    }
}

impl FrameCodec {
    /// Create a codec accepting frames up to `max_frame_size` bytes.
    pub fn new(max_frame_size: usize) -> Self {
        Self {
            max_frame_size: max_frame_size.min(MAX_FRAME_SIZE),
            current_size: None,
        }
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = EthError;

    fn decode(&mut self, src: &mut BytesMut) -> EthResult<Option<Frame>> {
        let frame_size = match self.current_size {
            Some(size) => size,
            None => {
                if src.len() < FRAME_HEADER_SIZE {
                    return Ok(None);
                }
                if src[3..6] != HEADER_DATA {
                    return Err(EthError::InvalidFrame(format!(
                        "unexpected header data {}",
                        hex::encode(&src[3..6])
                    )));
                }
                let size = read_frame_size(&src[..3]);
                if size > self.max_frame_size {
                    return Err(EthError::FrameTooLarge {
                        size,
                        max: self.max_frame_size,
                    });
                }
                self.current_size = Some(size);
                size
            }
        };

        let total = FRAME_HEADER_SIZE + padded_len(frame_size);
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        self.current_size = None;
        let header = src.split_to(FRAME_HEADER_SIZE).freeze();
        let body = src.split_to(padded_len(frame_size)).freeze();
        Frame::from_parts(header, body).map(Some)
    }
}

impl Encoder<Frame> for FrameCodec {
    type Error = EthError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> EthResult<()> {
        let size = frame.frame_size()?;
        if size > self.max_frame_size {
            return Err(EthError::FrameTooLarge {
                size,
                max: self.max_frame_size,
            });
        }
        dst.reserve(frame.wire_len());
        dst.put_slice(&frame.header);
        dst.put_slice(&frame.body);
        Ok(())
    }
}
