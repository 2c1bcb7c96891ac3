//! Built-in planar float passthrough codec.
//!
//! Packets are the planar little-endian f32 samples of one frame, plane
//! after plane, with no header. There is no compression; this backend exists
//! to exercise the session contract end to end.

use super::{err, DecoderBackend, EncoderBackend};
use crate::frame::Frame;
use crate::packet::Packet;

/// Samples per channel in one nominal frame.
pub const FRAME_SIZE: usize = 1024;

/// Passthrough decoder backend.
pub struct PcmDecoder {
    sample_rate: u32,
    channels: usize,
    pending: Option<Vec<f32>>,
}

impl PcmDecoder {
    pub fn new(sample_rate: u32, channels: usize) -> Self {
        Self {
            sample_rate,
            channels,
            pending: None,
        }
    }
}

impl DecoderBackend for PcmDecoder {
    fn send_packet(&mut self, data: &[u8]) -> Result<(), i32> {
        if self.pending.is_some() {
            return Err(err::AGAIN);
        }
        if data.is_empty() || data.len() % (4 * self.channels) != 0 {
            return Err(err::INVALID_DATA);
        }
        let samples = data
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        self.pending = Some(samples);
        Ok(())
    }

    fn receive_frame(&mut self, frame: &mut Frame) -> Result<(), i32> {
        let Some(samples) = self.pending.take() else {
            return Err(err::AGAIN);
        };
        let per_channel = samples.len() / self.channels;
        frame.allocate(self.channels, per_channel);
        frame.set_sample_rate(self.sample_rate);
        for ch in 0..self.channels {
            frame
                .plane_mut(ch)
                .copy_from_slice(&samples[ch * per_channel..(ch + 1) * per_channel]);
        }
        Ok(())
    }

    fn flush(&mut self) {
        self.pending = None;
    }
}

/// Passthrough encoder backend.
pub struct PcmEncoder {
    channels: usize,
    pending: Option<Vec<u8>>,
}

impl PcmEncoder {
    pub fn new(_sample_rate: u32, channels: usize, _bit_rate: u32) -> Self {
        Self {
            channels,
            pending: None,
        }
    }
}

impl EncoderBackend for PcmEncoder {
    fn frame_size(&self) -> usize {
        FRAME_SIZE
    }

    fn send_frame(&mut self, frame: &Frame) -> Result<(), i32> {
        if self.pending.is_some() {
            return Err(err::AGAIN);
        }
        if frame.channels() != self.channels || frame.is_empty() {
            return Err(err::INVALID_DATA);
        }
        let mut data = Vec::with_capacity(frame.samples() * self.channels * 4);
        for ch in 0..self.channels {
            for &sample in frame.plane(ch) {
                data.extend_from_slice(&sample.to_le_bytes());
            }
        }
        self.pending = Some(data);
        Ok(())
    }

    fn receive_packet(&mut self, packet: &mut Packet) -> Result<(), i32> {
        let Some(data) = self.pending.take() else {
            return Err(err::AGAIN);
        };
        packet.set_data(&data);
        Ok(())
    }
}
