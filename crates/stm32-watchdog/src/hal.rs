//! `embedded-hal` 0.2 watchdog traits.
//!
//! `WatchdogEnable::start` takes the period in milliseconds and cannot report
//! failure. A period outside the hardware range is clamped even under
//! [`RangePolicy::Reject`]. If the registers are still busy the watchdog starts
//! with the period already latched. The IWDG cannot be stopped, so
//! `WatchdogDisable` is not implemented.

use embedded_hal::watchdog as hal;

use crate::config::RangePolicy;
use crate::iwdg::{ArmedWatchdog, IndependentWatchdog};
use crate::registers::IwdgRegisters;
use crate::watchdog::Watchdog;

impl<R: IwdgRegisters> hal::WatchdogEnable for IndependentWatchdog<R> {
    type Time = u32;

    fn start<T>(&mut self, period: T)
    where
        T: Into<Self::Time>,
    {
        let timeout_ms = period.into();
        let result = match self.set_timeout(timeout_ms) {
            Err(err) if err.is_out_of_range() => {
                tracing::warn!(%err, timeout_ms, "IWDG timeout out of range; clamping");
                self.apply_with(timeout_ms, RangePolicy::Clamp)
            }
            other => other,
        };
        if let Err(err) = result {
            tracing::error!(
                %err,
                timeout_ms,
                "IWDG timeout not applied; starting with previous period"
            );
        }
        Watchdog::start(self);
    }
}

impl<R: IwdgRegisters> hal::Watchdog for IndependentWatchdog<R> {
    fn feed(&mut self) {
        Watchdog::feed(self);
    }
}

impl<R: IwdgRegisters> hal::Watchdog for ArmedWatchdog<R> {
    fn feed(&mut self) {
        ArmedWatchdog::feed(self);
    }
}
