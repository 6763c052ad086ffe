//! Window watchdog (WWDG) placeholder.
//!
//! The WWDG resets the system when it is refreshed too late *or* too early,
//! which does not fit a single countdown period. Until it gets a proper
//! window model this driver accepts the shared interface, keeps track of the
//! input clock, and writes nothing to the hardware. Its status stays
//! [`WatchdogStatus::Idle`] after `start`, so `is_started` never reports
//! protection that is not there.

use crate::config::DEFAULT_WWDG_INPUT_HZ;
use crate::error::{WatchdogError, WatchdogResult};
use crate::state::{WatchdogKind, WatchdogStatus};
use crate::timeout::AppliedTimeout;
use crate::watchdog::Watchdog;

/// Window watchdog driver with no register effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowWatchdog {
    input_frequency_hz: u32,
}

impl WindowWatchdog {
    /// Create a driver assuming the reset PCLK1 frequency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input_frequency_hz: DEFAULT_WWDG_INPUT_HZ,
        }
    }
}

impl Default for WindowWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog for WindowWatchdog {
    fn kind(&self) -> WatchdogKind {
        WatchdogKind::Window
    }

    fn start(&mut self) {
        tracing::warn!("WWDG start requested but the window watchdog is not driven");
    }

    fn feed(&mut self) {
        tracing::trace!("WWDG feed ignored");
    }

    fn set_timeout(&mut self, _timeout_ms: u32) -> WatchdogResult<AppliedTimeout> {
        Err(WatchdogError::unsupported(
            WatchdogKind::Window.peripheral(),
            "set_timeout",
        ))
    }

    fn set_input_frequency(&mut self, hz: u32) -> WatchdogResult<()> {
        if hz == 0 {
            return Err(WatchdogError::ZeroInputFrequency);
        }
        self.input_frequency_hz = hz;
        Ok(())
    }

    fn input_frequency_hz(&self) -> u32 {
        self.input_frequency_hz
    }

    fn status(&self) -> WatchdogStatus {
        WatchdogStatus::Idle
    }
}
