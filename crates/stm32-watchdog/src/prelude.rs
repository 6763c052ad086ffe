//! Prelude for stm32-watchdog.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use stm32_watchdog::prelude::*;
//!
//! let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
//! watchdog.set_timeout(100).expect("Failed to set timeout");
//! watchdog.start();
//! ```

pub use crate::config::{
    IwdgConfig, IwdgConfigBuilder, PendingUpdate, PrescalerPolicy, RangePolicy, ReloadFloor,
};
pub use crate::error::{WatchdogError, WatchdogResult};
pub use crate::iwdg::{ArmedWatchdog, IndependentWatchdog};
pub use crate::prescaler::Prescaler;
pub use crate::registers::{IwdgRegisters, Key, Status};
pub use crate::software_regs::{RecordingRegisters, RegisterWrite};
pub use crate::state::{WatchdogKind, WatchdogStatus};
pub use crate::timeout::{AppliedTimeout, Clamp};
pub use crate::watchdog::{AnyWatchdog, Watchdog};
pub use crate::wwdg::WindowWatchdog;
