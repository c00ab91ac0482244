//! Roll, blink and startup animations.
//!
//! Provides [`AnimationSequencer`], which turns an entropy sample and an
//! already decided result into a scripted, decelerating "tumble" on the pip
//! display. The sequencer decides nothing itself: the caller supplies both
//! the display seed and the result.

use crate::face::{BLANK, Face};
use crate::hal::SegmentDisplay;
use crate::sequence::FrameSequence;
use crate::types::Frame;
use embedded_hal::delay::DelayNs;

/// Number of tumbling frames before the result settles.
pub const ROLL_FRAMES: usize = 24;
/// Tumbling frames plus the settle frame.
pub const ROLL_LEN: usize = ROLL_FRAMES + 1;
/// Frames per deceleration phase.
pub const FRAMES_PER_PHASE: usize = 8;
/// Hold time of frames 0-7.
pub const FAST_HOLD_MS: u16 = 40;
/// Hold time of frames 8-15.
pub const MEDIUM_HOLD_MS: u16 = 90;
/// Hold time of frames 16-23.
pub const SLOW_HOLD_MS: u16 = 160;

/// Number of off/on cycles signalling "roll complete".
pub const BLINK_COUNT: usize = 3;
/// Blink frames (one off and one on frame per cycle).
pub const BLINK_LEN: usize = BLINK_COUNT * 2;
/// Blank phase of each blink.
pub const BLINK_OFF_MS: u16 = 100;
/// Lit phase of each blink.
pub const BLINK_ON_MS: u16 = 200;

/// Startup demo: every face, face 1, blank, face 1.
pub const STARTUP_LEN: usize = 9;
/// Hold time of each face in the startup demo.
pub const STARTUP_FACE_MS: u16 = 140;
/// Hold time of face 1 after the startup faces.
pub const STARTUP_READY_MS: u16 = 400;
/// Blank gap before the final face 1.
pub const STARTUP_BLANK_MS: u16 = 200;

/// Hold time of tumbling frame `index`.
#[inline]
pub const fn roll_hold_ms(index: usize) -> u16 {
    match index / FRAMES_PER_PHASE {
        0 => FAST_HOLD_MS,
        1 => MEDIUM_HOLD_MS,
        _ => SLOW_HOLD_MS,
    }
}

/// Drives the pip display through the scripted animations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationSequencer;

impl AnimationSequencer {
    /// Creates the sequencer. It holds no state.
    pub const fn new() -> Self {
        Self
    }

    /// Builds the roll script.
    ///
    /// Frame `i` shows face `(entropy_sample + i) % 6`, cycling through all six
    /// faces with 40/90/160 ms holds per phase. The final frame shows
    /// `result`, independent of the rotation, and has no hold.
    pub fn roll_frames(&self, entropy_sample: u8, result: Face) -> FrameSequence<ROLL_LEN> {
        let frames: [Frame; ROLL_LEN] = core::array::from_fn(|i| {
            if i < ROLL_FRAMES {
                let face = Face::from_index(((entropy_sample as usize + i) % 6) as u8);
                Frame::new(face.pattern(), roll_hold_ms(i))
            } else {
                Frame::new(result.pattern(), 0)
            }
        });
        FrameSequence::from(frames)
    }

    /// Plays the roll script, leaving `result` on the display.
    pub fn roll<S: SegmentDisplay, D: DelayNs>(
        &self,
        display: &mut S,
        delay: &mut D,
        entropy_sample: u8,
        result: Face,
    ) {
        trace!("roll: seed {} -> {}", entropy_sample, result);
        self.roll_frames(entropy_sample, result).play(display, delay);
    }

    /// Builds the completion blink: off 100 ms, `face` 200 ms, three times.
    pub fn blink_frames(&self, face: Face) -> FrameSequence<BLINK_LEN> {
        let frames: [Frame; BLINK_LEN] = core::array::from_fn(|i| {
            if i % 2 == 0 {
                Frame::new(BLANK, BLINK_OFF_MS)
            } else {
                Frame::new(face.pattern(), BLINK_ON_MS)
            }
        });
        FrameSequence::from(frames)
    }

    /// Plays the completion blink, leaving `face` on the display.
    pub fn blink<S: SegmentDisplay, D: DelayNs>(&self, display: &mut S, delay: &mut D, face: Face) {
        self.blink_frames(face).play(display, delay);
    }

    /// Builds the power-on demo, ending on face 1 as the idle display.
    pub fn startup_frames(&self) -> FrameSequence<STARTUP_LEN> {
        let ready = Face::One.pattern();
        let f = |face: Face| Frame::new(face.pattern(), STARTUP_FACE_MS);
        FrameSequence::from([
            f(Face::One),
            f(Face::Two),
            f(Face::Three),
            f(Face::Four),
            f(Face::Five),
            f(Face::Six),
            Frame::new(ready, STARTUP_READY_MS),
            Frame::new(BLANK, STARTUP_BLANK_MS),
            Frame::new(ready, 0),
        ])
    }

    /// Plays the power-on demo.
    pub fn startup<S: SegmentDisplay, D: DelayNs>(&self, display: &mut S, delay: &mut D) {
        self.startup_frames().play(display, delay);
    }
}
