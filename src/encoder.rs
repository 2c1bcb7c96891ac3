//! Encoder session.

use tracing::{debug, trace, warn};

use crate::codec::{self, CodecId, EncoderBackend};
use crate::error::BridgeError;
use crate::frame::Frame;
use crate::packet::Packet;

/// One live encoding session: a codec backend plus its scratch frame and
/// packet.
///
/// Interleaved f32 PCM goes in, compressed packets come out. Unlike the
/// decoder, the scratch frame is fully backed at creation time: the codec
/// requires writable plane storage of its nominal frame size before the
/// first submission. Dropping the session releases everything.
pub struct Encoder {
    backend: Box<dyn EncoderBackend>,
    frame: Frame,
    packet: Packet,
    sample_rate: u32,
    channels: usize,
}

impl Encoder {
    /// Opens an encoding session for the given codec id at the given target
    /// bit rate.
    ///
    /// Fails with [`BridgeError::UnknownCodec`] when no backend is registered
    /// for `codec`, and atomically: no session state survives a failed open.
    pub fn new(
        codec: CodecId,
        sample_rate: u32,
        channels: usize,
        bit_rate: u32,
    ) -> Result<Self, BridgeError> {
        if sample_rate == 0 || channels == 0 {
            return Err(BridgeError::InvalidConfig {
                reason: "sample rate and channel count must be non-zero",
            });
        }
        let backend = codec::open_encoder(codec, sample_rate, channels, bit_rate)?;
        debug!(
            "opened encoder session: codec={:?} rate={} channels={} bit_rate={} frame_size={}",
            codec,
            sample_rate,
            channels,
            bit_rate,
            backend.frame_size()
        );
        Ok(Self::from_backend(backend, sample_rate, channels))
    }

    /// Builds a session around a caller-supplied backend, for collaborators
    /// that are not in the registry.
    pub fn from_backend(
        backend: Box<dyn EncoderBackend>,
        sample_rate: u32,
        channels: usize,
    ) -> Self {
        let frame = Frame::with_layout(channels, backend.frame_size(), sample_rate);
        Self {
            backend,
            frame,
            packet: Packet::new(),
            sample_rate,
            channels,
        }
    }

    /// Sample rate fixed at creation.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count fixed at creation.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Nominal samples per channel the codec expects per call.
    pub fn frame_size(&self) -> usize {
        self.backend.frame_size()
    }

    /// Encodes `frames` samples per channel of interleaved f32 PCM into
    /// `out`, returning the number of compressed bytes written.
    ///
    /// `frames` may be shorter than [`Encoder::frame_size`] for the final
    /// frame of a stream; samples beyond `frames * channels` are never read
    /// from `input`. Backend error codes pass through unchanged as
    /// [`BridgeError::Codec`] — including "no packet ready yet", since
    /// encoders may buffer internally. A packet larger than `out` fails with
    /// [`BridgeError::OutputTooSmall`] and leaves `out` untouched; this is a
    /// caller-buffer condition, not a codec error.
    pub fn encode(
        &mut self,
        input: &[f32],
        frames: usize,
        out: &mut [u8],
    ) -> Result<usize, BridgeError> {
        let frame_size = self.backend.frame_size();
        if frames > frame_size {
            return Err(BridgeError::FrameOverrun { frames, frame_size });
        }
        let needed = frames * self.channels;
        if input.len() < needed {
            return Err(BridgeError::InputTooShort {
                needed,
                got: input.len(),
            });
        }

        self.frame.fill_interleaved(&input[..needed], frames);

        self.backend
            .send_frame(&self.frame)
            .map_err(BridgeError::Codec)?;

        self.packet.clear();
        self.backend
            .receive_packet(&mut self.packet)
            .map_err(BridgeError::Codec)?;

        let size = self.packet.len();
        if size > out.len() {
            warn!("packet of {} bytes exceeds output capacity {}", size, out.len());
            self.packet.clear();
            return Err(BridgeError::OutputTooSmall);
        }
        out[..size].copy_from_slice(self.packet.as_bytes());
        self.packet.clear();

        trace!("encoded {} frames into {} bytes", frames, size);
        Ok(size)
    }
}

impl Drop for Encoder {
    fn drop(&mut self) {
        trace!("closing encoder session");
    }
}
