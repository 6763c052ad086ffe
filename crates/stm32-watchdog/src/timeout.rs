//! Timeout to register value conversion for the IWDG.
//!
//! The counter decrements once per `divisor / input_hz` seconds, so a timeout
//! of `t` milliseconds needs `t * input_hz / (divisor * 1000)` ticks. The
//! product is formed in `u64` before dividing. Dividing the input clock down
//! to a per-millisecond tick rate first truncates to zero for the usual 32-40
//! kHz LSI once the prescaler is above 32.

use crate::config::{IwdgConfig, PrescalerPolicy, RangePolicy};
use crate::error::{WatchdogError, WatchdogResult};
use crate::prescaler::Prescaler;
use crate::registers::MAX_RELOAD;

/// Which bound, if any, was applied to the computed reload value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clamp {
    /// The computed value was in range.
    #[default]
    None,
    /// Raised to the reload floor.
    Floor,
    /// Lowered to `MAX_RELOAD`.
    Ceiling,
}

/// Prescaler and reload value chosen for a timeout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedTimeout {
    /// Timeout the caller asked for.
    pub requested_ms: u32,
    /// Chosen prescaler.
    pub prescaler: Prescaler,
    /// Reload value written to `RLR`.
    pub reload: u16,
    /// Input frequency the computation used.
    pub input_frequency_hz: u32,
    /// Bound applied to reach `reload`.
    pub clamp: Clamp,
}

impl AppliedTimeout {
    /// True when the request fit the hardware without clamping.
    ///
    /// Integer rounding down to a whole tick still counts as exact.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.clamp == Clamp::None
    }

    /// Period the hardware will actually count, in microseconds.
    #[must_use]
    pub fn achieved_period_us(&self) -> u64 {
        period_us(self.reload, self.prescaler, self.input_frequency_hz)
    }
}

/// Number of counter ticks for `timeout_ms` at the given clock and prescaler.
///
/// Returns 0 when `input_hz` is 0.
#[must_use]
pub fn ticks_for(timeout_ms: u32, input_hz: u32, prescaler: Prescaler) -> u64 {
    let numerator = u64::from(timeout_ms) * u64::from(input_hz);
    numerator / (u64::from(prescaler.divisor()) * 1000)
}

/// Period of `reload` ticks in microseconds.
///
/// Returns 0 when `input_hz` is 0.
#[must_use]
pub fn period_us(reload: u16, prescaler: Prescaler, input_hz: u32) -> u64 {
    if input_hz == 0 {
        return 0;
    }
    u64::from(reload) * u64::from(prescaler.divisor()) * 1_000_000 / u64::from(input_hz)
}

/// Pick the prescaler for `timeout_ms` under `policy`.
#[must_use]
pub fn select_prescaler(timeout_ms: u32, input_hz: u32, policy: PrescalerPolicy) -> Prescaler {
    match policy {
        PrescalerPolicy::Fixed(prescaler) => prescaler,
        PrescalerPolicy::FinestResolution => Prescaler::ALL
            .into_iter()
            .find(|p| ticks_for(timeout_ms, input_hz, *p) <= u64::from(MAX_RELOAD))
            .unwrap_or(Prescaler::MAX),
    }
}

/// Compute the register values for `timeout_ms` under `config`.
///
/// # Errors
///
/// - [`WatchdogError::ZeroInputFrequency`] if the configured clock is zero.
/// - [`WatchdogError::TimeoutTooShort`] / [`WatchdogError::TimeoutTooLong`]
///   if clamping was needed and the range policy is `Reject`.
pub fn plan(timeout_ms: u32, config: &IwdgConfig) -> WatchdogResult<AppliedTimeout> {
    let input_hz = config.input_frequency_hz;
    if input_hz == 0 {
        return Err(WatchdogError::ZeroInputFrequency);
    }

    let prescaler = select_prescaler(timeout_ms, input_hz, config.prescaler);
    let ticks = ticks_for(timeout_ms, input_hz, prescaler);
    let floor = config.reload_floor.value();

    let (reload, clamp) = if ticks > u64::from(MAX_RELOAD) {
        (MAX_RELOAD, Clamp::Ceiling)
    } else if ticks < u64::from(floor) {
        (floor, Clamp::Floor)
    } else {
        (u16::try_from(ticks).unwrap_or(MAX_RELOAD), Clamp::None)
    };

    if config.range == RangePolicy::Reject {
        match clamp {
            Clamp::None => {}
            Clamp::Floor => {
                return Err(WatchdogError::TimeoutTooShort {
                    requested_ms: timeout_ms,
                    min_ms: min_timeout_ms(floor, prescaler, input_hz),
                });
            }
            Clamp::Ceiling => {
                return Err(WatchdogError::TimeoutTooLong {
                    requested_ms: timeout_ms,
                    max_ms: max_timeout_ms(prescaler, input_hz),
                });
            }
        }
    }

    Ok(AppliedTimeout {
        requested_ms: timeout_ms,
        prescaler,
        reload,
        input_frequency_hz: input_hz,
        clamp,
    })
}

/// Longest timeout representable with `prescaler`, in whole milliseconds.
#[must_use]
pub fn max_timeout_ms(prescaler: Prescaler, input_hz: u32) -> u32 {
    let us = period_us(MAX_RELOAD, prescaler, input_hz);
    u32::try_from(us / 1000).unwrap_or(u32::MAX)
}

/// Shortest request that does not hit the floor, in whole milliseconds.
fn min_timeout_ms(floor: u16, prescaler: Prescaler, input_hz: u32) -> u32 {
    let us = period_us(floor, prescaler, input_hz);
    u32::try_from(us.div_ceil(1000)).unwrap_or(u32::MAX)
}
