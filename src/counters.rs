//! Counters shared between the tick interrupt and the main loop.
//!
//! Two counters are advanced once per tick from interrupt context:
//!
//! - the **entropy counter**, a free-running `u8` sampled when a press is
//!   detected. It is a single byte, so loads and stores are naturally atomic
//!   and the main loop may read it without masking interrupts.
//! - the **sleep counter**, a `u16` counting ticks since the last activity.
//!   On 8-bit cores a `u16` access takes two instructions, so every access
//!   from the main loop runs inside a critical section. Otherwise a tick
//!   landing between the two byte accesses yields a torn value.
//!
//! Both counters live behind accessor methods only. The raw storage is
//! never exposed.
//!
//! # Wiring
//!
//! ```ignore
//! static COUNTERS: TickCounters = TickCounters::new();
//!
//! #[interrupt]
//! fn TIMER0_OVF() {
//!     COUNTERS.on_tick();
//! }
//!
//! #[interrupt]
//! fn PCINT0() {
//!     clear_pin_change_flag(); // the pin's own flag, never the summary flag
//!     COUNTERS.on_wake();
//! }
//! ```

use core::cell::Cell;
use core::sync::atomic::{AtomicU8, Ordering};
use critical_section::Mutex;

/// Tick-driven counters shared with interrupt context.
pub struct TickCounters {
    entropy: AtomicU8,
    sleep: Mutex<Cell<u16>>,
}

impl TickCounters {
    /// Creates zeroed counters. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            entropy: AtomicU8::new(0),
            sleep: Mutex::new(Cell::new(0)),
        }
    }

    /// Advances both counters by one tick.
    ///
    /// Call this from the tick interrupt handler only. The entropy counter
    /// wraps; the sleep counter saturates so a long idle period can never
    /// wrap it back below the timeout.
    #[inline]
    pub fn on_tick(&self) {
        // Load/store only, no CAS on AVR. The tick ISR is the only writer.
        let entropy = self.entropy.load(Ordering::Relaxed);
        self.entropy.store(entropy.wrapping_add(1), Ordering::Relaxed);

        critical_section::with(|cs| {
            let sleep = self.sleep.borrow(cs);
            sleep.set(sleep.get().saturating_add(1));
        });
    }

    /// Resets the sleep counter from the wake interrupt handler.
    ///
    /// The handler must also clear its own pending flag.
    #[inline]
    pub fn on_wake(&self) {
        self.reset_sleep();
    }

    /// Samples the entropy counter. No critical section needed.
    #[inline]
    pub fn entropy(&self) -> u8 {
        self.entropy.load(Ordering::Relaxed)
    }

    /// Reads the sleep counter inside a critical section.
    #[inline]
    pub fn sleep_ticks(&self) -> u16 {
        critical_section::with(|cs| self.sleep.borrow(cs).get())
    }

    /// Zeroes the sleep counter inside a critical section.
    #[inline]
    pub fn reset_sleep(&self) {
        critical_section::with(|cs| self.sleep.borrow(cs).set(0));
    }
}

impl Default for TickCounters {
    fn default() -> Self {
        Self::new()
    }
}
