//! Core types for display scripts.

use crate::face::SEGMENT_MASK;

/// A single display step: show `pattern`, then hold it for `hold_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// 7-bit segment pattern.
    pub pattern: u8,

    /// Hold time after the pattern is written.
    pub hold_ms: u16,
}

impl Frame {
    /// Creates a new frame. Bit 7 of `pattern` is dropped.
    #[inline]
    pub const fn new(pattern: u8, hold_ms: u16) -> Self {
        Self {
            pattern: pattern & SEGMENT_MASK,
            hold_ms,
        }
    }
}

/// Sequence validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// No frames provided.
    EmptySequence,

    /// Sequence capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::EmptySequence => {
                write!(f, "sequence must have at least one frame")
            }
            SequenceError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
