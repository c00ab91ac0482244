#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Face`**: One of the six die outcomes and its fixed 7-LED pip pattern
//! - **`TickCounters`**: Entropy and sleep counters shared between the tick ISR and the main loop
//! - **`TickRate`** / **`DieConfig`**: Tick frequency and every timing parameter of the device
//! - **`Debouncer`**: Turns the raw button line into one press event per physical press
//! - **`AnimationSequencer`**: Plays the decelerating roll, the result blink and the startup demo
//! - **`PowerManager`**: Idle timeout, display blanking, halt and wake handling
//! - **`Die`**: The main loop composing all of the above
//! - **`SegmentDisplay`**, **`Button`**, **`WakeControl`**: Traits to implement for your board
//!
//! Delays use [`embedded_hal::delay::DelayNs`], so any HAL delay provider plugs in directly.

// Must stay first: the logging macros are textually scoped.
#[macro_use]
mod fmt;

pub mod animation;
pub mod config;
pub mod controller;
pub mod counters;
pub mod debounce;
pub mod face;
pub mod hal;
pub mod power;
pub mod sequence;
pub mod time;
pub mod types;

pub use animation::AnimationSequencer;
pub use config::{ConfigError, DieConfig, DieConfigBuilder};
pub use controller::{Die, LoopEvent};
pub use counters::TickCounters;
pub use debounce::{DebounceState, Debouncer};
pub use face::{BLANK, Face};
pub use hal::{ActiveLow, Button, NoWake, SegmentDisplay, WakeControl};
pub use power::{PowerManager, PowerState, WakeOutcome};
pub use sequence::{FrameSequence, SequenceBuilder};
pub use time::TickRate;
pub use types::{Frame, SequenceError};
