//! Configuration types for the watchdog drivers.

use crate::error::{WatchdogError, WatchdogResult};
use crate::prescaler::Prescaler;

/// LSI frequency the IWDG runs from when nothing else is configured.
pub const DEFAULT_IWDG_INPUT_HZ: u32 = 40_000;

/// PCLK1 frequency after reset, which clocks the WWDG.
pub const DEFAULT_WWDG_INPUT_HZ: u32 = 8_000_000;

/// Default bound on status polls while waiting for a pending update.
pub const DEFAULT_MAX_POLLS: u32 = 100_000;

/// How `set_timeout` chooses the prescaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrescalerPolicy {
    /// Smallest divisor whose reload value still fits in 12 bits.
    #[default]
    FinestResolution,
    /// Always use this divisor.
    Fixed(Prescaler),
}

/// Lowest reload value `set_timeout` will write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReloadFloor {
    /// Never write a zero reload; the shortest countdown is one tick.
    #[default]
    One,
    /// Allow a zero reload, which resets almost immediately.
    Zero,
}

impl ReloadFloor {
    /// The floor as a reload value.
    #[must_use]
    pub fn value(self) -> u16 {
        match self {
            Self::One => 1,
            Self::Zero => 0,
        }
    }
}

/// What to do with a timeout the hardware cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangePolicy {
    /// Clamp to the nearest representable period and report the clamp.
    #[default]
    Clamp,
    /// Return an error and leave the registers untouched.
    Reject,
}

/// Whether to wait for `PVU`/`RVU` to clear before reconfiguring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingUpdate {
    /// Poll the status register at most `max_polls` times.
    Wait {
        /// Upper bound on status reads.
        max_polls: u32,
    },
    /// Write without checking the status register.
    Skip,
}

impl Default for PendingUpdate {
    fn default() -> Self {
        Self::Wait {
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

/// Independent watchdog configuration.
///
/// Contains only `Copy` data so it can live in a `static` board description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IwdgConfig {
    /// IWDG input clock in Hz.
    ///
    /// Default: 40 000 Hz.
    pub input_frequency_hz: u32,

    /// Prescaler selection policy.
    pub prescaler: PrescalerPolicy,

    /// Lowest reload value written.
    pub reload_floor: ReloadFloor,

    /// Handling of unrepresentable timeouts.
    pub range: RangePolicy,

    /// Pending-update handling before register writes.
    pub pending_update: PendingUpdate,
}

impl IwdgConfig {
    /// Create a configuration with the given input frequency.
    ///
    /// # Errors
    ///
    /// Returns an error if `input_frequency_hz` is zero.
    pub fn new(input_frequency_hz: u32) -> WatchdogResult<Self> {
        let config = Self {
            input_frequency_hz,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration matching the fixed divide-by-256 behaviour.
    #[must_use]
    pub fn fixed_max_prescaler() -> Self {
        Self {
            prescaler: PrescalerPolicy::Fixed(Prescaler::MAX),
            ..Self::default()
        }
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> IwdgConfigBuilder {
        IwdgConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> WatchdogResult<()> {
        if self.input_frequency_hz == 0 {
            return Err(WatchdogError::ZeroInputFrequency);
        }
        if let PendingUpdate::Wait { max_polls: 0 } = self.pending_update {
            return Err(WatchdogError::invalid_configuration(
                "max_polls must be at least 1 when waiting for pending updates",
            ));
        }
        Ok(())
    }
}

impl Default for IwdgConfig {
    fn default() -> Self {
        Self {
            input_frequency_hz: DEFAULT_IWDG_INPUT_HZ,
            prescaler: PrescalerPolicy::default(),
            reload_floor: ReloadFloor::default(),
            range: RangePolicy::default(),
            pending_update: PendingUpdate::default(),
        }
    }
}

/// Builder for `IwdgConfig`.
#[derive(Debug, Default)]
pub struct IwdgConfigBuilder {
    config: IwdgConfig,
}

impl IwdgConfigBuilder {
    /// Set the input clock frequency in Hz.
    #[must_use]
    pub fn input_frequency_hz(mut self, hz: u32) -> Self {
        self.config.input_frequency_hz = hz;
        self
    }

    /// Set the prescaler policy.
    #[must_use]
    pub fn prescaler(mut self, policy: PrescalerPolicy) -> Self {
        self.config.prescaler = policy;
        self
    }

    /// Set the reload floor.
    #[must_use]
    pub fn reload_floor(mut self, floor: ReloadFloor) -> Self {
        self.config.reload_floor = floor;
        self
    }

    /// Set the out-of-range policy.
    #[must_use]
    pub fn range(mut self, range: RangePolicy) -> Self {
        self.config.range = range;
        self
    }

    /// Set the pending-update handling.
    #[must_use]
    pub fn pending_update(mut self, pending: PendingUpdate) -> Self {
        self.config.pending_update = pending;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> WatchdogResult<IwdgConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IwdgConfig::default();
        assert_eq!(config.input_frequency_hz, 40_000);
        assert_eq!(config.prescaler, PrescalerPolicy::FinestResolution);
        assert_eq!(config.reload_floor, ReloadFloor::One);
        assert_eq!(config.range, RangePolicy::Clamp);
        assert_eq!(
            config.pending_update,
            PendingUpdate::Wait {
                max_polls: DEFAULT_MAX_POLLS
            }
        );
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(IwdgConfig::new(0), Err(WatchdogError::ZeroInputFrequency));
        assert!(IwdgConfig::new(32_000).is_ok());

        let result = IwdgConfig::builder()
            .pending_update(PendingUpdate::Wait { max_polls: 0 })
            .build();
        assert!(matches!(result, Err(WatchdogError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_config_builder() -> WatchdogResult<()> {
        let config = IwdgConfig::builder()
            .input_frequency_hz(32_000)
            .prescaler(PrescalerPolicy::Fixed(Prescaler::Div64))
            .reload_floor(ReloadFloor::Zero)
            .range(RangePolicy::Reject)
            .pending_update(PendingUpdate::Skip)
            .build()?;
        assert_eq!(config.input_frequency_hz, 32_000);
        assert_eq!(config.prescaler, PrescalerPolicy::Fixed(Prescaler::Div64));
        assert_eq!(config.reload_floor.value(), 0);
        assert_eq!(config.range, RangePolicy::Reject);
        assert_eq!(config.pending_update, PendingUpdate::Skip);
        Ok(())
    }

    #[test]
    fn test_fixed_max_prescaler() {
        let config = IwdgConfig::fixed_max_prescaler();
        assert_eq!(config.prescaler, PrescalerPolicy::Fixed(Prescaler::Div256));
        assert_eq!(config.input_frequency_hz, DEFAULT_IWDG_INPUT_HZ);
    }
}
