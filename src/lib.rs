//! Session-based encode/decode bridge over pluggable audio codec backends.
//!
//! This crate is a thin boundary adapter: it owns per-session codec state,
//! marshals interleaved ⇄ planar float sample buffers, and forwards the
//! actual coding work to a codec collaborator behind the
//! [`codec::DecoderBackend`] / [`codec::EncoderBackend`] traits. Codec
//! algorithms (entropy coding, transforms) live entirely in the backend.
//!
//! # Example
//!
//! ```rust
//! use codec_bridge::{CodecId, Decoder, Encoder};
//!
//! let mut encoder = Encoder::new(CodecId::PCM_F32, 48000, 2, 0).unwrap();
//! let mut decoder = Decoder::new(CodecId::PCM_F32, 48000, 2).unwrap();
//!
//! // One frame of interleaved stereo PCM in, one compressed packet out.
//! let pcm = vec![0.0f32; 256 * 2];
//! let mut packet = vec![0u8; 4096];
//! let written = encoder.encode(&pcm, 256, &mut packet).unwrap();
//!
//! // And back: one packet in, interleaved PCM out.
//! let mut out = vec![0.0f32; 256 * 2];
//! let info = decoder.decode(&packet[..written], &mut out).unwrap();
//! assert_eq!(info.frames, 256);
//! assert_eq!(info.channels, 2);
//! ```
//!
//! Each session is single-threaded and caller-driven: create, call
//! repeatedly, drop. Sessions are fully independent of each other.

pub mod codec;
mod decoder;
mod encoder;
mod error;
mod frame;
mod packet;

pub use codec::CodecId;
pub use decoder::{Decoder, FrameInfo};
pub use encoder::Encoder;
pub use error::BridgeError;
pub use frame::Frame;
pub use packet::Packet;
