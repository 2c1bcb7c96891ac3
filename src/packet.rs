//! Reusable compressed-data packet.

/// One unit of compressed bitstream data.
///
/// Sessions own one `Packet` as scratch space; it is cleared before each
/// refill so no stale bytes survive across calls.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Packet {
    data: Vec<u8>,
}

impl Packet {
    /// Creates an empty packet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the packet's contents, keeping its allocation for reuse.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Replaces the packet's contents.
    pub fn set_data(&mut self, data: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(data);
    }

    /// Appends bytes to the packet.
    pub fn extend(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data);
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the packet holds no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
