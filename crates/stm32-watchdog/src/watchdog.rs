//! Watchdog trait definition and enum dispatch.
//!
//! Generic code takes `W: Watchdog` and is monomorphized per peripheral. Where
//! the peripheral is only known at runtime (a board table, for example),
//! [`AnyWatchdog`] dispatches with a `match` instead of a vtable.

use crate::error::WatchdogResult;
use crate::iwdg::IndependentWatchdog;
use crate::registers::IwdgRegisters;
use crate::state::{WatchdogKind, WatchdogStatus};
use crate::timeout::AppliedTimeout;
use crate::wwdg::WindowWatchdog;

/// Capability set shared by every STM32 watchdog driver.
///
/// # Exclusive Access
///
/// All mutating methods take `&mut self`. The IWDG configuration sequence
/// (unlock, write prescaler, write reload) must not be interleaved with another
/// context's key writes, so a driver shared with an interrupt handler needs an
/// outer lock such as a critical section.
pub trait Watchdog {
    /// Which peripheral this driver controls.
    fn kind(&self) -> WatchdogKind;

    /// Arm the countdown.
    ///
    /// For the IWDG this cannot be undone: once started only a reset stops
    /// it. Calling `start` again rewrites the start key and has no further
    /// effect.
    fn start(&mut self);

    /// Reload the countdown.
    ///
    /// May be called before `start`.
    fn feed(&mut self);

    /// Reconfigure the countdown period.
    ///
    /// # Errors
    ///
    /// Returns an error if the period cannot be applied. Under the default
    /// clamp policy an out-of-range request succeeds and reports the clamp in
    /// the returned [`AppliedTimeout`].
    fn set_timeout(&mut self, timeout_ms: u32) -> WatchdogResult<AppliedTimeout>;

    /// Record the input clock frequency used by `set_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if `hz` is zero.
    fn set_input_frequency(&mut self, hz: u32) -> WatchdogResult<()>;

    /// Input clock frequency in Hz.
    fn input_frequency_hz(&self) -> u32;

    /// Current lifecycle status.
    fn status(&self) -> WatchdogStatus;

    /// True while the countdown is armed. Drivers with no hardware effect
    /// report false even after `start`.
    fn is_started(&self) -> bool {
        self.status().is_armed()
    }
}

/// Either watchdog driver behind one concrete type.
#[derive(Debug)]
pub enum AnyWatchdog<R> {
    /// Independent watchdog.
    Independent(IndependentWatchdog<R>),
    /// Window watchdog.
    Window(WindowWatchdog),
}

impl<R: IwdgRegisters> From<IndependentWatchdog<R>> for AnyWatchdog<R> {
    fn from(watchdog: IndependentWatchdog<R>) -> Self {
        Self::Independent(watchdog)
    }
}

impl<R> From<WindowWatchdog> for AnyWatchdog<R> {
    fn from(watchdog: WindowWatchdog) -> Self {
        Self::Window(watchdog)
    }
}

impl<R: IwdgRegisters> Watchdog for AnyWatchdog<R> {
    fn kind(&self) -> WatchdogKind {
        match self {
            Self::Independent(w) => w.kind(),
            Self::Window(w) => w.kind(),
        }
    }

    fn start(&mut self) {
        match self {
            Self::Independent(w) => w.start(),
            Self::Window(w) => w.start(),
        }
    }

    fn feed(&mut self) {
        match self {
            Self::Independent(w) => w.feed(),
            Self::Window(w) => w.feed(),
        }
    }

    fn set_timeout(&mut self, timeout_ms: u32) -> WatchdogResult<AppliedTimeout> {
        match self {
            Self::Independent(w) => w.set_timeout(timeout_ms),
            Self::Window(w) => w.set_timeout(timeout_ms),
        }
    }

    fn set_input_frequency(&mut self, hz: u32) -> WatchdogResult<()> {
        match self {
            Self::Independent(w) => w.set_input_frequency(hz),
            Self::Window(w) => w.set_input_frequency(hz),
        }
    }

    fn input_frequency_hz(&self) -> u32 {
        match self {
            Self::Independent(w) => w.input_frequency_hz(),
            Self::Window(w) => w.input_frequency_hz(),
        }
    }

    fn status(&self) -> WatchdogStatus {
        match self {
            Self::Independent(w) => w.status(),
            Self::Window(w) => w.status(),
        }
    }
}
