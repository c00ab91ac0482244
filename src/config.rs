//! Device timing configuration.

use crate::time::TickRate;

/// Debounce settle window after the first low reading.
pub const DEFAULT_SETTLE_MS: u16 = 25;
/// Settle window after the button was released.
pub const DEFAULT_RELEASE_SETTLE_MS: u16 = 15;
/// Upper bound on waiting for a release (stuck or mis-wired button).
pub const DEFAULT_RELEASE_TIMEOUT_MS: u16 = 1500;
/// How long the last result is shown after waking.
pub const DEFAULT_WAKE_DISPLAY_MS: u16 = 800;
/// Settle window after the post-wake release wait.
pub const DEFAULT_WAKE_SETTLE_MS: u16 = 25;
/// Hold time of the settled result before it blinks.
pub const DEFAULT_RESULT_PAUSE_MS: u16 = 500;
/// Idle time before the device halts.
pub const DEFAULT_SLEEP_TIMEOUT_SECS: u16 = 10;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick rate is zero.
    ZeroTickRate,

    /// Auto-sleep enabled with a zero timeout.
    ZeroSleepTimeout,

    /// Sleep timeout does not fit the 16-bit sleep counter at this tick rate.
    SleepTimeoutOverflow,

    /// Debounce settle window is zero.
    ZeroSettleWindow,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroTickRate => write!(f, "tick rate must be non-zero"),
            ConfigError::ZeroSleepTimeout => {
                write!(f, "sleep timeout must be non-zero when auto-sleep is enabled")
            }
            ConfigError::SleepTimeoutOverflow => {
                write!(f, "sleep timeout exceeds the 16-bit tick counter")
            }
            ConfigError::ZeroSettleWindow => {
                write!(f, "debounce settle window must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated device configuration.
///
/// The sleep threshold is derived from the configured tick rate, never
/// hard-coded as a tick count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DieConfig {
    tick_rate: TickRate,
    auto_sleep: bool,
    sleep_timeout_secs: u16,
    sleep_threshold_ticks: u16,
    settle_ms: u16,
    release_settle_ms: u16,
    release_timeout_ms: u16,
    wake_display_ms: u16,
    wake_settle_ms: u16,
    result_pause_ms: u16,
}

impl DieConfig {
    /// Creates a new configuration builder with default timings.
    pub fn builder() -> DieConfigBuilder {
        DieConfigBuilder::new()
    }

    /// Tick interrupt frequency.
    pub fn tick_rate(&self) -> TickRate {
        self.tick_rate
    }

    /// Whether the device halts after the idle timeout.
    pub fn auto_sleep(&self) -> bool {
        self.auto_sleep
    }

    /// Idle timeout in seconds.
    pub fn sleep_timeout_secs(&self) -> u16 {
        self.sleep_timeout_secs
    }

    /// Idle timeout in ticks.
    pub fn sleep_threshold_ticks(&self) -> u16 {
        self.sleep_threshold_ticks
    }

    /// Debounce settle window in milliseconds.
    pub fn settle_ms(&self) -> u16 {
        self.settle_ms
    }

    /// Settle window after a release in milliseconds.
    pub fn release_settle_ms(&self) -> u16 {
        self.release_settle_ms
    }

    /// Upper bound on a release wait in milliseconds.
    pub fn release_timeout_ms(&self) -> u16 {
        self.release_timeout_ms
    }

    /// How long the last result is shown after waking.
    pub fn wake_display_ms(&self) -> u16 {
        self.wake_display_ms
    }

    /// Settle window after the post-wake release wait.
    pub fn wake_settle_ms(&self) -> u16 {
        self.wake_settle_ms
    }

    /// Hold time of the settled result before it blinks.
    pub fn result_pause_ms(&self) -> u16 {
        self.result_pause_ms
    }
}

impl Default for DieConfig {
    /// 15.259 Hz tick, 10 s auto-sleep, default timings.
    fn default() -> Self {
        let tick_rate = TickRate::default();
        Self {
            tick_rate,
            auto_sleep: true,
            sleep_timeout_secs: DEFAULT_SLEEP_TIMEOUT_SECS,
            sleep_threshold_ticks: match tick_rate.ticks_for_secs(DEFAULT_SLEEP_TIMEOUT_SECS) {
                Some(ticks) => ticks,
                None => u16::MAX,
            },
            settle_ms: DEFAULT_SETTLE_MS,
            release_settle_ms: DEFAULT_RELEASE_SETTLE_MS,
            release_timeout_ms: DEFAULT_RELEASE_TIMEOUT_MS,
            wake_display_ms: DEFAULT_WAKE_DISPLAY_MS,
            wake_settle_ms: DEFAULT_WAKE_SETTLE_MS,
            result_pause_ms: DEFAULT_RESULT_PAUSE_MS,
        }
    }
}

/// Builder for constructing a validated [`DieConfig`].
#[derive(Debug, Clone, Copy)]
pub struct DieConfigBuilder {
    tick_rate: TickRate,
    auto_sleep: bool,
    sleep_timeout_secs: u16,
    settle_ms: u16,
    release_settle_ms: u16,
    release_timeout_ms: u16,
    wake_display_ms: u16,
    wake_settle_ms: u16,
    result_pause_ms: u16,
}

impl DieConfigBuilder {
    /// Creates a builder with default timings.
    pub fn new() -> Self {
        Self {
            tick_rate: TickRate::default(),
            auto_sleep: true,
            sleep_timeout_secs: DEFAULT_SLEEP_TIMEOUT_SECS,
            settle_ms: DEFAULT_SETTLE_MS,
            release_settle_ms: DEFAULT_RELEASE_SETTLE_MS,
            release_timeout_ms: DEFAULT_RELEASE_TIMEOUT_MS,
            wake_display_ms: DEFAULT_WAKE_DISPLAY_MS,
            wake_settle_ms: DEFAULT_WAKE_SETTLE_MS,
            result_pause_ms: DEFAULT_RESULT_PAUSE_MS,
        }
    }

    /// Sets the tick interrupt frequency.
    pub fn tick_rate(mut self, rate: TickRate) -> Self {
        self.tick_rate = rate;
        self
    }

    /// Enables or disables auto-sleep. Default is enabled.
    pub fn auto_sleep(mut self, enabled: bool) -> Self {
        self.auto_sleep = enabled;
        self
    }

    /// Sets the idle timeout in seconds.
    pub fn sleep_timeout_secs(mut self, secs: u16) -> Self {
        self.sleep_timeout_secs = secs;
        self
    }

    /// Sets the debounce settle window. Must be non-zero.
    pub fn settle_ms(mut self, ms: u16) -> Self {
        self.settle_ms = ms;
        self
    }

    /// Sets the settle window after a release.
    pub fn release_settle_ms(mut self, ms: u16) -> Self {
        self.release_settle_ms = ms;
        self
    }

    /// Sets the upper bound on release waits.
    pub fn release_timeout_ms(mut self, ms: u16) -> Self {
        self.release_timeout_ms = ms;
        self
    }

    /// Sets how long the last result is shown after waking.
    pub fn wake_display_ms(mut self, ms: u16) -> Self {
        self.wake_display_ms = ms;
        self
    }

    /// Sets the settle window after the post-wake release wait.
    pub fn wake_settle_ms(mut self, ms: u16) -> Self {
        self.wake_settle_ms = ms;
        self
    }

    /// Sets the hold time of the settled result before it blinks.
    pub fn result_pause_ms(mut self, ms: u16) -> Self {
        self.result_pause_ms = ms;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `ZeroTickRate` - Tick rate is zero
    /// * `ZeroSleepTimeout` - Auto-sleep enabled with a zero timeout
    /// * `SleepTimeoutOverflow` - Timeout in ticks exceeds `u16::MAX`
    /// * `ZeroSettleWindow` - Debounce settle window is zero
    pub fn build(self) -> Result<DieConfig, ConfigError> {
        if self.tick_rate.millihertz() == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.settle_ms == 0 {
            return Err(ConfigError::ZeroSettleWindow);
        }
        if self.auto_sleep && self.sleep_timeout_secs == 0 {
            return Err(ConfigError::ZeroSleepTimeout);
        }

        let sleep_threshold_ticks = self
            .tick_rate
            .ticks_for_secs(self.sleep_timeout_secs)
            .ok_or(ConfigError::SleepTimeoutOverflow)?;

        // A sub-tick timeout still has to wait for one tick.
        let sleep_threshold_ticks = sleep_threshold_ticks.max(1);

        Ok(DieConfig {
            tick_rate: self.tick_rate,
            auto_sleep: self.auto_sleep,
            sleep_timeout_secs: self.sleep_timeout_secs,
            sleep_threshold_ticks,
            settle_ms: self.settle_ms,
            release_settle_ms: self.release_settle_ms,
            release_timeout_ms: self.release_timeout_ms,
            wake_display_ms: self.wake_display_ms,
            wake_settle_ms: self.wake_settle_ms,
            result_pause_ms: self.result_pause_ms,
        })
    }
}

impl Default for DieConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_builder_defaults() {
        assert_eq!(DieConfig::builder().build(), Ok(DieConfig::default()));
    }

    #[test]
    fn threshold_is_derived_from_tick_rate() {
        let config = DieConfig::builder()
            .tick_rate(TickRate::from_hz(61))
            .sleep_timeout_secs(10)
            .build()
            .unwrap();
        assert_eq!(config.sleep_threshold_ticks(), 610);
    }

    #[test]
    fn builder_rejects_zero_tick_rate() {
        let result = DieConfig::builder()
            .tick_rate(TickRate::from_hz(0))
            .build();
        assert_eq!(result, Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn builder_rejects_zero_timeout_only_with_auto_sleep() {
        let result = DieConfig::builder().sleep_timeout_secs(0).build();
        assert_eq!(result, Err(ConfigError::ZeroSleepTimeout));

        let result = DieConfig::builder()
            .auto_sleep(false)
            .sleep_timeout_secs(0)
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn builder_rejects_overflowing_timeout() {
        let result = DieConfig::builder()
            .tick_rate(TickRate::from_hz(100))
            .sleep_timeout_secs(1000)
            .build();
        assert_eq!(result, Err(ConfigError::SleepTimeoutOverflow));
    }

    #[test]
    fn builder_rejects_zero_settle_window() {
        let result = DieConfig::builder().settle_ms(0).build();
        assert_eq!(result, Err(ConfigError::ZeroSettleWindow));
    }
}
