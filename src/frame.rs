//! Reusable planar float frame.

/// One unit of planar PCM: a contiguous f32 region per channel.
///
/// Sessions own one `Frame` as scratch space and overwrite it on every call.
/// The active sample count may be shorter than the allocated plane length
/// (a short final frame on the encode path).
#[derive(Debug, Default)]
pub struct Frame {
    planes: Vec<Vec<f32>>,
    samples: usize,
    sample_rate: u32,
}

impl Frame {
    /// Creates an empty frame with no backing storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frame with fully backed planes of `capacity` samples each.
    pub fn with_layout(channels: usize, capacity: usize, sample_rate: u32) -> Self {
        Self {
            planes: vec![vec![0.0; capacity]; channels],
            samples: capacity,
            sample_rate,
        }
    }

    /// Releases any referenced sample data. The next use starts clean.
    pub fn clear(&mut self) {
        self.planes.clear();
        self.samples = 0;
        self.sample_rate = 0;
    }

    /// Reallocates the planes for `channels` x `samples`, overwriting any
    /// previous contents. Plane storage is reused where possible.
    pub fn allocate(&mut self, channels: usize, samples: usize) {
        self.planes.resize_with(channels, Vec::new);
        for plane in &mut self.planes {
            plane.clear();
            plane.resize(samples, 0.0);
        }
        self.samples = samples;
    }

    /// Number of channels currently backed by planes.
    pub fn channels(&self) -> usize {
        self.planes.len()
    }

    /// Active samples per channel.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Sets the active sample count. Must not exceed the allocated capacity.
    pub fn set_samples(&mut self, samples: usize) {
        debug_assert!(samples <= self.capacity());
        self.samples = samples;
    }

    /// Allocated samples per plane.
    pub fn capacity(&self) -> usize {
        self.planes.first().map_or(0, Vec::len)
    }

    /// Returns the sample rate tagged on this frame (0 if unset).
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Tags the frame with a sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
    }

    /// Returns true if the frame holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples == 0 || self.planes.is_empty()
    }

    /// Active samples of one channel.
    pub fn plane(&self, channel: usize) -> &[f32] {
        &self.planes[channel][..self.samples]
    }

    /// Active samples of one channel, writable.
    pub fn plane_mut(&mut self, channel: usize) -> &mut [f32] {
        let samples = self.samples;
        &mut self.planes[channel][..samples]
    }

    /// Writes the active samples into `out` in interleaved order:
    /// `out[i * channels + ch] = plane(ch)[i]`.
    ///
    /// `out` must hold at least `samples() * channels()` values.
    pub fn interleave_into(&self, out: &mut [f32]) {
        let channels = self.planes.len();
        debug_assert!(out.len() >= self.samples * channels);
        for (ch, plane) in self.planes.iter().enumerate() {
            for (i, &sample) in plane[..self.samples].iter().enumerate() {
                out[i * channels + ch] = sample;
            }
        }
    }

    /// Fills the planes from interleaved input, reading
    /// `input[i * channels + ch]` for the first `frames` sample periods,
    /// and sets the active sample count to `frames`.
    ///
    /// `frames` must not exceed the allocated capacity and `input` must hold
    /// at least `frames * channels()` values. Samples beyond `frames` are
    /// never read.
    pub fn fill_interleaved(&mut self, input: &[f32], frames: usize) {
        let channels = self.planes.len();
        debug_assert!(frames <= self.capacity());
        debug_assert!(input.len() >= frames * channels);
        for (ch, plane) in self.planes.iter_mut().enumerate() {
            for (i, sample) in plane[..frames].iter_mut().enumerate() {
                *sample = input[i * channels + ch];
            }
        }
        self.samples = frames;
    }
}
