//! Button debouncing and press detection.
//!
//! The debouncer walks `Idle → Candidate → Confirmed → AwaitingRelease → Idle`:
//!
//! - **Idle**: line released. A pressed reading moves to `Candidate`.
//! - **Candidate**: wait the settle window, then re-read. Still pressed moves
//!   to `Confirmed`, anything else is a glitch and returns to `Idle`.
//! - **Confirmed**: the press is accepted; exactly one event is produced.
//! - **AwaitingRelease**: wait for release, bounded by a timeout so a stuck
//!   or mis-wired button cannot hang the device, then wait the release
//!   settle window and return to `Idle`.
//!
//! [`Debouncer::check`] returns immediately while the line is idle. Once a
//! press is seen it blocks until the press is resolved.
//!
//! A press whose release wait timed out is still the same physical press.
//! Until the line has been seen released, `Idle` reports nothing and starts
//! no new candidate. That check does not block.

use crate::config::DieConfig;
use crate::hal::Button;
use embedded_hal::delay::DelayNs;

/// Polling interval of bounded release waits.
pub const RELEASE_POLL_MS: u32 = 1;

/// Debouncer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Line released, nothing pending.
    Idle,
    /// First pressed reading seen, settle window running.
    Candidate,
    /// Press accepted.
    Confirmed,
    /// Waiting for the button to be let go.
    AwaitingRelease,
}

/// Waits until `button` is released or `timeout_ms` has elapsed.
///
/// Polls every [`RELEASE_POLL_MS`]. Returns `true` if the button was
/// released, `false` on timeout.
pub fn wait_for_release<B: Button, D: DelayNs>(button: &mut B, delay: &mut D, timeout_ms: u16) -> bool {
    let mut waited: u32 = 0;
    while button.is_pressed() {
        if waited >= u32::from(timeout_ms) {
            return false;
        }
        delay.delay_ms(RELEASE_POLL_MS);
        waited += RELEASE_POLL_MS;
    }
    true
}

/// Single-button debouncer producing one event per physical press.
#[derive(Debug, Clone)]
pub struct Debouncer {
    state: DebounceState,
    settle_ms: u16,
    release_settle_ms: u16,
    release_timeout_ms: u16,
    release_timed_out: bool,
    release_pending: bool,
}

impl Debouncer {
    /// Creates an idle debouncer with the timings from `config`.
    pub fn new(config: &DieConfig) -> Self {
        Self {
            state: DebounceState::Idle,
            settle_ms: config.settle_ms(),
            release_settle_ms: config.release_settle_ms(),
            release_timeout_ms: config.release_timeout_ms(),
            release_timed_out: false,
            release_pending: false,
        }
    }

    /// Polls the button once.
    ///
    /// Returns `true` exactly once per accepted press, after the press has
    /// been resolved (released or timed out) and the release has settled.
    pub fn check<B: Button, D: DelayNs>(&mut self, button: &mut B, delay: &mut D) -> bool {
        loop {
            self.state = match self.state {
                DebounceState::Idle => {
                    let pressed = button.is_pressed();
                    if self.release_pending {
                        if !pressed {
                            trace!("debounce: held press released");
                            self.release_pending = false;
                        }
                        return false;
                    }
                    if !pressed {
                        return false;
                    }
                    DebounceState::Candidate
                }
                DebounceState::Candidate => {
                    delay.delay_ms(u32::from(self.settle_ms));
                    if !button.is_pressed() {
                        trace!("debounce: glitch rejected");
                        self.state = DebounceState::Idle;
                        return false;
                    }
                    DebounceState::Confirmed
                }
                DebounceState::Confirmed => {
                    debug!("debounce: press confirmed");
                    DebounceState::AwaitingRelease
                }
                DebounceState::AwaitingRelease => {
                    self.release_timed_out =
                        !wait_for_release(button, delay, self.release_timeout_ms);
                    if self.release_timed_out {
                        warn!("debounce: release timed out after {} ms", self.release_timeout_ms);
                        self.release_pending = true;
                    }
                    delay.delay_ms(u32::from(self.release_settle_ms));
                    self.state = DebounceState::Idle;
                    return true;
                }
            };
        }
    }

    /// Returns the current state. `Idle` between calls to [`Self::check`].
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Returns true if the last accepted press ended by timeout instead of release.
    pub fn release_timed_out(&self) -> bool {
        self.release_timed_out
    }

    /// Returns true while a press is held past its release timeout.
    ///
    /// No new press is reported until the line reads released once.
    pub fn release_pending(&self) -> bool {
        self.release_pending
    }

    /// Treats the button as held until it is seen released.
    ///
    /// Used when a press was consumed elsewhere, e.g. by a wake whose
    /// release wait timed out.
    pub fn expect_release(&mut self) {
        self.release_pending = true;
    }
}
