use crate::codec::CodecId;
use thiserror::Error;

/// Errors returned by bridge sessions.
///
/// Collaborator failures keep their raw numeric code (`Codec`), so callers
/// can tell a codec-native error apart from the bridge's own capacity
/// sentinel (`OutputTooSmall`).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("no codec registered for id {0:?}")]
    UnknownCodec(CodecId),

    #[error("invalid session config: {reason}")]
    InvalidConfig { reason: &'static str },

    /// Raw error code from the codec collaborator, passed through unchanged.
    #[error("codec error {0}")]
    Codec(i32),

    /// The caller-supplied output buffer is too small for the produced unit.
    #[error("output buffer too small")]
    OutputTooSmall,

    #[error("frame count {frames} exceeds codec frame size {frame_size}")]
    FrameOverrun { frames: usize, frame_size: usize },

    #[error("input has {got} samples, need {needed}")]
    InputTooShort { needed: usize, got: usize },
}

impl BridgeError {
    /// Flattens the error to the boundary's numeric convention.
    ///
    /// `Codec(c)` maps to `c`, `OutputTooSmall` to the reserved −1 sentinel,
    /// everything else to −2. A collaborator that itself uses −1 would be
    /// indistinguishable from the sentinel here; the enum is the primary
    /// interface, this is for hosts that need a plain integer.
    pub fn code(&self) -> i32 {
        match self {
            Self::Codec(c) => *c,
            Self::OutputTooSmall => -1,
            _ => -2,
        }
    }
}
