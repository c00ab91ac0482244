//! Idle timeout, halt and wake handling.
//!
//! Provides [`PowerManager`], which decides when the device goes to sleep and
//! runs the halt/wake protocol. The order of operations around the halt
//! matters:
//!
//! 1. blank the display
//! 2. clear any stale pending wake flag, *then* arm the wake interrupt, so
//!    an edge from before the decision to sleep cannot wake the device at once
//! 3. reset the sleep counter and halt
//! 4. after the halt returns (interrupts enabled, wake handler has run),
//!    disarm the wake source before anything else so it cannot fire during
//!    normal operation
//! 5. show the last result, wait for the waking press to end, reset the
//!    sleep counter
//!
//! A spurious wake (noise on the line) goes through exactly the same path.

use crate::config::DieConfig;
use crate::counters::TickCounters;
use crate::debounce::wait_for_release;
use crate::face::{BLANK, Face};
use crate::hal::{Button, SegmentDisplay, WakeControl};
use embedded_hal::delay::DelayNs;

/// Power state of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Running the main loop.
    Active,
    /// Halted, waiting for the wake interrupt.
    Sleeping,
}

/// What happened during one sleep/wake cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeOutcome {
    /// The face shown after waking.
    pub shown: Face,
    /// The button was still held when the release wait timed out.
    pub release_timed_out: bool,
}

/// Runs the idle → sleep → wake cycle.
#[derive(Debug, Clone)]
pub struct PowerManager {
    state: PowerState,
    auto_sleep: bool,
    threshold_ticks: u16,
    wake_display_ms: u16,
    release_timeout_ms: u16,
    wake_settle_ms: u16,
    sleep_cycles: u32,
}

impl PowerManager {
    /// Creates an active power manager with the timings from `config`.
    pub fn new(config: &DieConfig) -> Self {
        Self {
            state: PowerState::Active,
            auto_sleep: config.auto_sleep(),
            threshold_ticks: config.sleep_threshold_ticks(),
            wake_display_ms: config.wake_display_ms(),
            release_timeout_ms: config.release_timeout_ms(),
            wake_settle_ms: config.wake_settle_ms(),
            sleep_cycles: 0,
        }
    }

    /// Returns true if the idle timeout has been reached.
    ///
    /// Reads the sleep counter inside a critical section.
    pub fn should_sleep(&self, counters: &TickCounters) -> bool {
        self.auto_sleep && counters.sleep_ticks() >= self.threshold_ticks
    }

    /// Puts the device to sleep and handles the wake.
    ///
    /// Blocks in [`WakeControl::halt`] until the wake interrupt fires, then
    /// shows `last_result`, waits (bounded) for the button to be released and
    /// returns in [`PowerState::Active`] with the sleep counter at zero.
    pub fn sleep_cycle<S, B, W, D>(
        &mut self,
        counters: &TickCounters,
        display: &mut S,
        button: &mut B,
        wake: &mut W,
        delay: &mut D,
        last_result: Face,
    ) -> WakeOutcome
    where
        S: SegmentDisplay,
        B: Button,
        W: WakeControl,
        D: DelayNs,
    {
        info!("power: idle for {} ticks, sleeping", counters.sleep_ticks());

        display.show(BLANK);

        wake.clear_pending_wake_flag();
        wake.arm_wake_interrupt();

        counters.reset_sleep();
        self.state = PowerState::Sleeping;
        self.sleep_cycles = self.sleep_cycles.wrapping_add(1);

        wake.halt();

        wake.disarm_wake_interrupt();
        self.state = PowerState::Active;
        info!("power: woke up, showing {}", last_result);

        display.show(last_result.pattern());
        delay.delay_ms(u32::from(self.wake_display_ms));

        let release_timed_out = !wait_for_release(button, delay, self.release_timeout_ms);
        if release_timed_out {
            warn!("power: button still held after wake");
        }
        delay.delay_ms(u32::from(self.wake_settle_ms));

        counters.reset_sleep();

        WakeOutcome {
            shown: last_result,
            release_timed_out,
        }
    }

    /// Returns the current power state.
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Number of completed sleep cycles since power-on.
    pub fn sleep_cycles(&self) -> u32 {
        self.sleep_cycles
    }

    /// Sleep threshold in ticks.
    pub fn threshold_ticks(&self) -> u16 {
        self.threshold_ticks
    }
}
