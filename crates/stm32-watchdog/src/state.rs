//! Watchdog lifecycle.

/// Watchdog lifecycle status.
///
/// ```text
/// Idle ──start()──► Armed ──start() / feed() / set_timeout()──► Armed
/// ```
///
/// There is no transition back to `Idle`: an armed IWDG can only be stopped
/// by a system reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchdogStatus {
    /// Not started. Configuration may still change freely.
    #[default]
    Idle,
    /// Counting down. The system resets unless fed in time.
    Armed,
}

impl WatchdogStatus {
    /// Check if the watchdog is counting.
    #[must_use]
    pub fn is_armed(self) -> bool {
        matches!(self, Self::Armed)
    }

    /// Get the status as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Armed => "Armed",
        }
    }
}

impl core::fmt::Display for WatchdogStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which peripheral a driver controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogKind {
    /// Independent watchdog (IWDG), clocked from the LSI oscillator.
    Independent,
    /// Window watchdog (WWDG), clocked from PCLK1.
    Window,
}

impl WatchdogKind {
    /// Peripheral name as it appears in reference manuals.
    #[must_use]
    pub fn peripheral(self) -> &'static str {
        match self {
            Self::Independent => "IWDG",
            Self::Window => "WWDG",
        }
    }
}
