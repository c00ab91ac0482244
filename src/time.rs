//! Tick-rate abstraction and tick/millisecond conversions.
//!
//! The periodic tick interrupt is the only clock the control logic knows.
//! Its frequency differs per board (timer prescaler, oscillator) and is often
//! fractional, so it is carried in millihertz.

/// Frequency of the periodic tick interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickRate {
    millihertz: u32,
}

impl TickRate {
    /// 4 MHz instruction clock / 4 / 256 prescaler / 256 counts ≈ 15.259 Hz.
    pub const TIMER0_4MHZ_PRESCALE_256: TickRate = TickRate::from_millihertz(15_259);

    /// Creates a tick rate from millihertz.
    #[inline]
    pub const fn from_millihertz(millihertz: u32) -> Self {
        Self { millihertz }
    }

    /// Creates a tick rate from whole hertz.
    #[inline]
    pub const fn from_hz(hz: u32) -> Self {
        Self {
            millihertz: hz.saturating_mul(1000),
        }
    }

    /// Returns the rate in millihertz.
    #[inline]
    pub const fn millihertz(&self) -> u32 {
        self.millihertz
    }

    /// Number of ticks in `secs` seconds, rounded to the nearest tick.
    ///
    /// Returns `None` if the result does not fit the 16-bit sleep counter.
    pub const fn ticks_for_secs(&self, secs: u16) -> Option<u16> {
        let ticks = (secs as u64 * self.millihertz as u64 + 500) / 1000;
        if ticks > u16::MAX as u64 {
            None
        } else {
            Some(ticks as u16)
        }
    }

    /// Number of whole ticks elapsed after `ms` milliseconds.
    pub const fn ticks_in_ms(&self, ms: u64) -> u64 {
        ms * self.millihertz as u64 / 1_000_000
    }

    /// Tick period in microseconds, rounded down.
    ///
    /// Returns 0 for a zero rate.
    pub const fn period_us(&self) -> u64 {
        if self.millihertz == 0 {
            0
        } else {
            1_000_000_000 / self.millihertz as u64
        }
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self::TIMER0_4MHZ_PRESCALE_256
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_seconds_at_timer0_rate_is_153_ticks() {
        assert_eq!(TickRate::TIMER0_4MHZ_PRESCALE_256.ticks_for_secs(10), Some(153));
    }

    #[test]
    fn timeout_follows_configured_rate() {
        // The fast-tick variant needs four times as many ticks for the same timeout.
        assert_eq!(TickRate::from_hz(61).ticks_for_secs(10), Some(610));
        assert_eq!(TickRate::from_hz(15).ticks_for_secs(10), Some(150));
    }

    #[test]
    fn timeout_overflow_is_reported() {
        assert_eq!(TickRate::from_hz(61).ticks_for_secs(u16::MAX), None);
    }

    #[test]
    fn ticks_in_ms_counts_whole_ticks() {
        let rate = TickRate::from_hz(20);
        assert_eq!(rate.ticks_in_ms(49), 0);
        assert_eq!(rate.ticks_in_ms(50), 1);
        assert_eq!(rate.ticks_in_ms(1000), 20);
        assert_eq!(rate.period_us(), 50_000);
    }
}
