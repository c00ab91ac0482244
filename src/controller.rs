//! The device main loop.
//!
//! [`Die`] owns the board peripherals and composes the debouncer, the
//! animation sequencer and the power manager into the operating cycle:
//!
//! ```text
//! start: startup demo, reset sleep counter
//! loop:
//!     sleep counter >= threshold  -> sleep/wake cycle, waking press is
//!                                    swallowed even if still held
//!     else debounced press        -> reset sleep counter, sample entropy,
//!                                    roll, pause, blink, remember result
//! ```

use crate::animation::AnimationSequencer;
use crate::config::DieConfig;
use crate::counters::TickCounters;
use crate::debounce::Debouncer;
use crate::face::Face;
use crate::hal::{Button, SegmentDisplay, WakeControl};
use crate::power::{PowerManager, PowerState, WakeOutcome};
use embedded_hal::delay::DelayNs;

/// Result of one main-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopEvent {
    /// Nothing happened.
    Idle,
    /// A press was handled and the die settled on this face.
    Rolled(Face),
    /// The device slept and woke up again.
    Woke(WakeOutcome),
}

/// An electronic die: board peripherals plus control state.
///
/// # Type Parameters
/// * `'c` - Lifetime of the shared tick counters (usually `'static`)
/// * `S` - Pip display
/// * `B` - Roll button
/// * `W` - Wake interrupt and halt control
/// * `D` - Blocking delay provider
pub struct Die<'c, S, B, W, D>
where
    S: SegmentDisplay,
    B: Button,
    W: WakeControl,
    D: DelayNs,
{
    counters: &'c TickCounters,
    display: S,
    button: B,
    wake: W,
    delay: D,
    config: DieConfig,
    debouncer: Debouncer,
    power: PowerManager,
    animation: AnimationSequencer,
    last_result: Face,
    rolls: u32,
}

impl<'c, S, B, W, D> Die<'c, S, B, W, D>
where
    S: SegmentDisplay,
    B: Button,
    W: WakeControl,
    D: DelayNs,
{
    /// Creates a die in the `Active` state with face 1 as last result.
    ///
    /// Nothing is written to the display until [`Self::start`].
    pub fn new(
        config: DieConfig,
        counters: &'c TickCounters,
        display: S,
        button: B,
        wake: W,
        delay: D,
    ) -> Self {
        Self {
            counters,
            display,
            button,
            wake,
            delay,
            debouncer: Debouncer::new(&config),
            power: PowerManager::new(&config),
            animation: AnimationSequencer::new(),
            config,
            last_result: Face::One,
            rolls: 0,
        }
    }

    /// Plays the startup demo and clears the idle timer.
    pub fn start(&mut self) {
        self.animation.startup(&mut self.display, &mut self.delay);
        self.counters.reset_sleep();
        info!(
            "die: ready, sleep after {} ticks",
            self.power.threshold_ticks()
        );
    }

    /// Runs one main-loop iteration.
    pub fn poll(&mut self) -> LoopEvent {
        if self.power.should_sleep(self.counters) {
            let outcome = self.power.sleep_cycle(
                self.counters,
                &mut self.display,
                &mut self.button,
                &mut self.wake,
                &mut self.delay,
                self.last_result,
            );
            // The waking press must not turn into a roll once it outlasts
            // the release wait.
            if outcome.release_timed_out {
                self.debouncer.expect_release();
            }
            return LoopEvent::Woke(outcome);
        }

        if self.debouncer.check(&mut self.button, &mut self.delay) {
            return LoopEvent::Rolled(self.roll());
        }

        LoopEvent::Idle
    }

    /// Starts the device and runs the main loop forever.
    pub fn run(&mut self) -> ! {
        self.start();
        loop {
            self.poll();
        }
    }

    fn roll(&mut self) -> Face {
        self.counters.reset_sleep();

        let sample = self.counters.entropy();
        let result = Face::from_entropy(sample);

        self.animation
            .roll(&mut self.display, &mut self.delay, sample, result);
        self.delay
            .delay_ms(u32::from(self.config.result_pause_ms()));
        self.animation.blink(&mut self.display, &mut self.delay, result);

        self.last_result = result;
        self.rolls = self.rolls.wrapping_add(1);
        debug!("die: rolled {}", result);
        result
    }

    /// The most recently rolled face (face 1 before the first roll).
    pub fn last_result(&self) -> Face {
        self.last_result
    }

    /// Number of completed rolls.
    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    /// Current power state. `Active` whenever the die is not halted.
    pub fn power_state(&self) -> PowerState {
        self.power.state()
    }

    /// Number of completed sleep cycles.
    pub fn sleep_cycles(&self) -> u32 {
        self.power.sleep_cycles()
    }

    /// Returns the configuration the die was built with.
    pub fn config(&self) -> &DieConfig {
        &self.config
    }

    /// Returns a reference to the pip display.
    pub fn display(&self) -> &S {
        &self.display
    }

    /// Returns a reference to the roll button.
    pub fn button(&self) -> &B {
        &self.button
    }

    /// Returns a reference to the wake control.
    pub fn wake(&self) -> &W {
        &self.wake
    }

    /// Consumes the die and returns its peripherals.
    pub fn release(self) -> (S, B, W, D) {
        (self.display, self.button, self.wake, self.delay)
    }
}
