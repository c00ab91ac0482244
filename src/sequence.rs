//! Frame sequences: fixed display scripts played with blocking delays.

use crate::hal::SegmentDisplay;
use crate::types::{Frame, SequenceError};
use embedded_hal::delay::DelayNs;
use heapless::Vec;

/// A fixed, ordered script of display frames.
///
/// Played front to back exactly once. Every frame writes exactly one pattern
/// to the display and then blocks for its hold time.
///
/// # Type Parameters
/// * `N` - Maximum number of frames this sequence can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence<const N: usize> {
    frames: Vec<Frame, N>,
}

impl<const N: usize> FrameSequence<N> {
    /// Creates a new sequence builder.
    pub fn builder() -> SequenceBuilder<N> {
        SequenceBuilder::new()
    }

    /// Writes every frame to `display`, holding each for its duration.
    pub fn play<S: SegmentDisplay, D: DelayNs>(&self, display: &mut S, delay: &mut D) {
        for frame in &self.frames {
            display.show(frame.pattern);
            if frame.hold_ms > 0 {
                delay.delay_ms(u32::from(frame.hold_ms));
            }
        }
    }

    /// Total hold time of all frames.
    pub fn total_duration_ms(&self) -> u32 {
        self.frames.iter().map(|f| u32::from(f.hold_ms)).sum()
    }

    /// Returns the number of frames in this sequence.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Returns the frame at the given index.
    pub fn get_frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Returns all frames in playback order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Returns the last frame, which stays on the display after playback.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

/// Builder for constructing validated frame sequences.
#[derive(Debug)]
pub struct SequenceBuilder<const N: usize> {
    frames: Vec<Frame, N>,
}

impl<const N: usize> SequenceBuilder<N> {
    /// Creates a new empty sequence builder.
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Appends a frame.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The sequence already holds `N` frames
    pub fn frame(mut self, pattern: u8, hold_ms: u16) -> Result<Self, SequenceError> {
        self.frames
            .push(Frame::new(pattern, hold_ms))
            .map_err(|_| SequenceError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds and validates the sequence.
    ///
    /// # Errors
    /// * `EmptySequence` - No frames were added
    pub fn build(self) -> Result<FrameSequence<N>, SequenceError> {
        if self.frames.is_empty() {
            return Err(SequenceError::EmptySequence);
        }

        Ok(FrameSequence {
            frames: self.frames,
        })
    }
}

impl<const N: usize> From<[Frame; N]> for FrameSequence<N> {
    fn from(array: [Frame; N]) -> Self {
        let mut frames = Vec::new();
        for frame in array {
            // Capacity equals the array length.
            if frames.push(frame).is_err() {
                break;
            }
        }
        Self { frames }
    }
}

impl<const N: usize> Default for SequenceBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}
