//! Hardware abstraction traits.
//!
//! Implement these for your board. Every board variant (pin mapping, port
//! split, oscillator) differs only in these impls and in its
//! [`DieConfig`](crate::DieConfig); the control logic is shared.

use embedded_hal::digital::InputPin;

/// Trait for abstracting the 7-LED pip display.
pub trait SegmentDisplay {
    /// Shows a 7-bit pattern (bit 0 = segment A ... bit 6 = segment G).
    ///
    /// Bit 7 is always zero. Write through output latches rather than
    /// read-modify-write on the port, and leave any input sharing the port
    /// untouched. This method cannot fail.
    fn show(&mut self, pattern: u8);
}

/// Trait for abstracting the roll button.
pub trait Button {
    /// Returns `true` while the button is held down.
    fn is_pressed(&mut self) -> bool;
}

/// Trait for abstracting the edge-triggered wake interrupt and low-power halt.
///
/// The wake interrupt handler itself only clears its own pending flag and
/// calls [`TickCounters::on_wake`](crate::TickCounters::on_wake).
pub trait WakeControl {
    /// Clears a stale pending wake flag so an old edge cannot cause an
    /// immediate wake.
    ///
    /// Clear the flag of the button pin itself. On parts where the summary
    /// flag only clears once all pin flags are zero, writing the summary flag
    /// has no effect.
    fn clear_pending_wake_flag(&mut self);

    /// Enables the falling-edge (press) wake interrupt on the button line.
    fn arm_wake_interrupt(&mut self);

    /// Disables the wake interrupt source.
    fn disarm_wake_interrupt(&mut self);

    /// Suspends execution until any enabled interrupt fires.
    ///
    /// Must return with global interrupts enabled, so the wake handler has
    /// run before the caller inspects the counters.
    fn halt(&mut self);
}

/// Wake control for boards without a low-power mode.
///
/// Pair with [`DieConfig::auto_sleep`](crate::DieConfig::auto_sleep) set to
/// `false`. `halt` returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWake;

impl WakeControl for NoWake {
    fn clear_pending_wake_flag(&mut self) {}

    fn arm_wake_interrupt(&mut self) {}

    fn disarm_wake_interrupt(&mut self) {}

    fn halt(&mut self) {}
}

/// Adapts an active-low [`InputPin`] with pull-up into a [`Button`].
///
/// A failed pin read counts as "not pressed".
pub struct ActiveLow<P> {
    pin: P,
}

impl<P: InputPin> ActiveLow<P> {
    /// Wraps a configured input pin.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Returns the wrapped pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Button for ActiveLow<P> {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}
