//! Decoder session.

use tracing::{debug, trace};

use crate::codec::{self, CodecId, DecoderBackend};
use crate::error::BridgeError;
use crate::frame::Frame;

/// What one decode call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Samples per channel written to the output buffer.
    pub frames: usize,
    /// Sample rate of the decoded frame (creation value if the codec did
    /// not report one).
    pub sample_rate: u32,
    /// Channel count of the decoded frame (creation value if the codec did
    /// not report one).
    pub channels: usize,
}

/// One live decoding session: a codec backend plus its scratch frame.
///
/// Compressed packets go in, interleaved f32 PCM comes out. The session is
/// single-threaded; `&mut self` on [`Decoder::decode`] keeps concurrent use
/// of the scratch buffers unrepresentable. Dropping the session releases the
/// backend and all scratch storage.
pub struct Decoder {
    backend: Box<dyn DecoderBackend>,
    frame: Frame,
    sample_rate: u32,
    channels: usize,
}

impl Decoder {
    /// Opens a decoding session for the given codec id.
    ///
    /// Fails with [`BridgeError::UnknownCodec`] when no backend is registered
    /// for `codec`, and atomically: no session state survives a failed open.
    pub fn new(codec: CodecId, sample_rate: u32, channels: usize) -> Result<Self, BridgeError> {
        if sample_rate == 0 || channels == 0 {
            return Err(BridgeError::InvalidConfig {
                reason: "sample rate and channel count must be non-zero",
            });
        }
        let backend = codec::open_decoder(codec, sample_rate, channels)?;
        debug!(
            "opened decoder session: codec={:?} rate={} channels={}",
            codec, sample_rate, channels
        );
        Ok(Self::from_backend(backend, sample_rate, channels))
    }

    /// Builds a session around a caller-supplied backend, for collaborators
    /// that are not in the registry.
    ///
    /// `sample_rate` and `channels` become the session's fixed fallback
    /// values; they must be non-zero for [`Decoder::new`], and should be
    /// here too.
    pub fn from_backend(
        backend: Box<dyn DecoderBackend>,
        sample_rate: u32,
        channels: usize,
    ) -> Self {
        Self {
            backend,
            frame: Frame::new(),
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

    /// Decodes one packet into interleaved f32 PCM.
    ///
    /// Exactly one packet in, zero-or-one frame out: codecs that emit
    /// several frames per packet are not drained, and codecs that need more
    /// than one packet per frame surface their "feed more input" code.
    /// `out` receives `frames * channels` samples laid out as
    /// `out[i * channels + ch]` and must be sized accordingly;
    /// [`BridgeError::OutputTooSmall`] is returned before anything is
    /// written when it is not.
    ///
    /// `packet` is borrowed for this call only. Backend error codes pass
    /// through unchanged as [`BridgeError::Codec`].
    pub fn decode(&mut self, packet: &[u8], out: &mut [f32]) -> Result<FrameInfo, BridgeError> {
        self.frame.clear();
        self.backend.send_packet(packet).map_err(BridgeError::Codec)?;
        self.backend
            .receive_frame(&mut self.frame)
            .map_err(BridgeError::Codec)?;

        let frames = self.frame.samples();
        let plane_channels = self.frame.channels();

        // Fall back to the creation-time values when the decoded frame does
        // not carry them.
        let mut sample_rate = self.frame.sample_rate();
        if sample_rate == 0 {
            sample_rate = self.sample_rate;
        }
        let mut channels = plane_channels;
        if channels == 0 {
            channels = self.channels;
        }

        if out.len() < frames * plane_channels {
            return Err(BridgeError::OutputTooSmall);
        }
        self.frame.interleave_into(out);
        self.frame.clear();

        trace!("decoded {} frames ({} ch @ {} Hz)", frames, channels, sample_rate);
        Ok(FrameInfo {
            frames,
            sample_rate,
            channels,
        })
    }

    /// Tells the codec to discard any buffered internal state, e.g. at end
    /// of stream or after a seek.
    pub fn flush(&mut self) {
        self.backend.flush();
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        trace!("closing decoder session");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::err;
    use crate::encoder::Encoder;

    /// Backend scripted to fail or to emit frames with chosen metadata.
    struct ScriptedBackend {
        send_result: Result<(), i32>,
        receive_result: Result<(), i32>,
        emit_channels: usize,
        emit_samples: usize,
        emit_rate: u32,
        flushed: bool,
    }

    impl ScriptedBackend {
        fn ok(channels: usize, samples: usize, rate: u32) -> Self {
            Self {
                send_result: Ok(()),
                receive_result: Ok(()),
                emit_channels: channels,
                emit_samples: samples,
                emit_rate: rate,
                flushed: false,
            }
        }
    }

    impl DecoderBackend for ScriptedBackend {
        fn send_packet(&mut self, _data: &[u8]) -> Result<(), i32> {
            self.send_result
        }

        fn receive_frame(&mut self, frame: &mut Frame) -> Result<(), i32> {
            self.receive_result?;
            frame.allocate(self.emit_channels, self.emit_samples);
            frame.set_sample_rate(self.emit_rate);
            for ch in 0..self.emit_channels {
                for i in 0..self.emit_samples {
                    frame.plane_mut(ch)[i] = (ch * 100 + i) as f32;
                }
            }
            Ok(())
        }

        fn flush(&mut self) {
            self.flushed = true;
        }
    }

    #[test]
    fn test_unknown_codec() {
        let result = Decoder::new(CodecId(0xbeef), 48000, 2);
        assert!(matches!(result, Err(BridgeError::UnknownCodec(_))));
    }

    #[test]
    fn test_zero_config_rejected() {
        assert!(matches!(
            Decoder::new(CodecId::PCM_F32, 0, 2),
            Err(BridgeError::InvalidConfig { .. })
        ));
        assert!(matches!(
            Decoder::new(CodecId::PCM_F32, 48000, 0),
            Err(BridgeError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let decoder = Decoder::new(CodecId::PCM_F32, 48000, 2).unwrap();
        assert_eq!(decoder.sample_rate(), 48000);
        assert_eq!(decoder.channels(), 2);
    }

    #[test]
    fn test_send_error_passes_through() {
        let backend = ScriptedBackend {
            send_result: Err(-77),
            ..ScriptedBackend::ok(1, 0, 16000)
        };
        let mut decoder = Decoder::from_backend(Box::new(backend), 16000, 1);
        let mut out = [0.0f32; 16];
        assert_eq!(decoder.decode(&[0], &mut out), Err(BridgeError::Codec(-77)));
    }

    #[test]
    fn test_receive_error_passes_through() {
        let backend = ScriptedBackend {
            receive_result: Err(err::AGAIN),
            ..ScriptedBackend::ok(1, 0, 16000)
        };
        let mut decoder = Decoder::from_backend(Box::new(backend), 16000, 1);
        let mut out = [0.0f32; 16];
        assert_eq!(
            decoder.decode(&[0], &mut out),
            Err(BridgeError::Codec(err::AGAIN))
        );
    }

    #[test]
    fn test_interleaved_output() {
        let backend = ScriptedBackend::ok(2, 4, 48000);
        let mut decoder = Decoder::from_backend(Box::new(backend), 48000, 2);
        let mut out = [0.0f32; 8];
        let info = decoder.decode(&[0], &mut out).unwrap();

        assert_eq!(info.frames, 4);
        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 48000);
        // out[i * channels + ch] == plane[ch][i] == ch * 100 + i
        for i in 0..4 {
            for ch in 0..2 {
                assert_eq!(out[i * 2 + ch], (ch * 100 + i) as f32);
            }
        }
    }

    #[test]
    fn test_zero_metadata_falls_back_to_creation_values() {
        let backend = ScriptedBackend::ok(0, 0, 0);
        let mut decoder = Decoder::from_backend(Box::new(backend), 44100, 2);
        let mut out = [0.0f32; 8];
        let info = decoder.decode(&[0], &mut out).unwrap();

        assert_eq!(info.frames, 0);
        assert_eq!(info.sample_rate, 44100);
        assert_eq!(info.channels, 2);
    }

    #[test]
    fn test_output_too_small() {
        let backend = ScriptedBackend::ok(2, 16, 48000);
        let mut decoder = Decoder::from_backend(Box::new(backend), 48000, 2);
        let mut out = [0.0f32; 8]; // needs 32
        assert_eq!(decoder.decode(&[0], &mut out), Err(BridgeError::OutputTooSmall));
    }

    #[test]
    fn test_flush_forwards_to_backend() {
        let mut decoder = Decoder::new(CodecId::PCM_F32, 48000, 2).unwrap();
        // Idle session: flush must be accepted without error.
        decoder.flush();
    }

    #[test]
    fn test_roundtrip_through_builtin_codec() {
        let mut encoder = Encoder::new(CodecId::PCM_F32, 48000, 2, 0).unwrap();
        let mut decoder = Decoder::new(CodecId::PCM_F32, 48000, 2).unwrap();

        let frames = 256;
        let input: Vec<f32> = (0..frames * 2).map(|i| i as f32 / 512.0).collect();
        let mut packet = vec![0u8; frames * 2 * 4];
        let written = encoder.encode(&input, frames, &mut packet).unwrap();

        let mut output = vec![0.0f32; frames * 2];
        let info = decoder.decode(&packet[..written], &mut output).unwrap();

        assert_eq!(info.frames, frames);
        assert_eq!(info.sample_rate, 48000);
        assert_eq!(info.channels, 2);
        assert_eq!(output, input);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = Decoder::new(CodecId::PCM_F32, 48000, 1).unwrap();
        let mut b = Decoder::new(CodecId::PCM_F32, 16000, 1).unwrap();

        let packet: Vec<u8> = [1.0f32, 2.0]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        let mut out = [0.0f32; 2];

        let info_a = a.decode(&packet, &mut out).unwrap();
        assert_eq!(info_a.sample_rate, 48000);
        let info_b = b.decode(&packet, &mut out).unwrap();
        assert_eq!(info_b.sample_rate, 16000);
    }
}
