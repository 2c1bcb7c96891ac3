//! The codec collaborator seam.
//!
//! Sessions drive an external codec implementation through the
//! [`DecoderBackend`] and [`EncoderBackend`] traits. Backends report failures
//! as raw negative integer codes of their own convention; the bridge passes
//! them through unchanged. [`open_decoder`] / [`open_encoder`] look a backend
//! up by numeric codec id.

pub mod pcm;

use crate::error::BridgeError;
use crate::frame::Frame;
use crate::packet::Packet;

/// Numeric codec identifier, passed through to the collaborator unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodecId(pub u32);

impl CodecId {
    /// Built-in planar float passthrough codec.
    pub const PCM_F32: CodecId = CodecId(0x1_0000);
}

/// Error codes used by the built-in backends.
///
/// All codes are ≤ −2 so none can collide with the bridge's −1 capacity
/// sentinel. External collaborators define their own codes.
pub mod err {
    /// No frame/packet available yet; feed more input and retry.
    pub const AGAIN: i32 = -11;
    /// Malformed packet or rejected frame.
    pub const INVALID_DATA: i32 = -22;
}

/// Decoding side of a codec collaborator.
///
/// One `send_packet` is followed by at most one `receive_frame`; the backend
/// keeps whatever internal state the codec needs between calls.
pub trait DecoderBackend {
    /// Submits one compressed packet. The slice is borrowed for this call
    /// only; the backend must not retain it.
    fn send_packet(&mut self, data: &[u8]) -> Result<(), i32>;

    /// Produces one decoded frame into `frame`, replacing its contents.
    /// Returns an error code when no frame is available.
    fn receive_frame(&mut self, frame: &mut Frame) -> Result<(), i32>;

    /// Discards any buffered internal state (end of stream, seek).
    fn flush(&mut self);
}

/// Encoding side of a codec collaborator.
pub trait EncoderBackend {
    /// Nominal samples per channel the codec expects per submitted frame.
    fn frame_size(&self) -> usize;

    /// Submits one planar frame for encoding. The frame's active sample
    /// count may be shorter than `frame_size()` (final frame).
    fn send_frame(&mut self, frame: &Frame) -> Result<(), i32>;

    /// Produces one compressed packet into `packet`, replacing its contents.
    /// Returns an error code when no packet is ready (encoders may buffer).
    fn receive_packet(&mut self, packet: &mut Packet) -> Result<(), i32>;
}

/// Looks up and opens a decoder backend by codec id.
pub fn open_decoder(
    id: CodecId,
    sample_rate: u32,
    channels: usize,
) -> Result<Box<dyn DecoderBackend>, BridgeError> {
    match id {
        CodecId::PCM_F32 => Ok(Box::new(pcm::PcmDecoder::new(sample_rate, channels))),
        _ => Err(BridgeError::UnknownCodec(id)),
    }
}

/// Looks up and opens an encoder backend by codec id.
pub fn open_encoder(
    id: CodecId,
    sample_rate: u32,
    channels: usize,
    bit_rate: u32,
) -> Result<Box<dyn EncoderBackend>, BridgeError> {
    match id {
        CodecId::PCM_F32 => Ok(Box::new(pcm::PcmEncoder::new(sample_rate, channels, bit_rate))),
        _ => Err(BridgeError::UnknownCodec(id)),
    }
}
