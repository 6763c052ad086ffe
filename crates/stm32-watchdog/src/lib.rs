//! # stm32-watchdog
//!
//! One start/feed/timeout interface over the STM32 independent (IWDG) and
//! window (WWDG) watchdogs.
//!
//! This crate is `#![no_std]` and provides:
//! - [`Watchdog`], the capability set every driver implements, resolved at
//!   compile time for generic callers
//! - [`AnyWatchdog`] for choosing a peripheral at runtime without a vtable
//! - [`IndependentWatchdog`], which converts a millisecond timeout into an IWDG
//!   prescaler and reload value and writes them in the required order
//! - [`ArmedWatchdog`], the started IWDG as a separate type
//! - [`IwdgRegisters`], the injected register block, with
//!   [`RecordingRegisters`] for host tests
//!
//! ## Irreversible Start
//!
//! Once the IWDG start key is written, nothing but a system reset stops the
//! countdown. [`Watchdog::start`] records this as the `Armed` status, and
//! [`IndependentWatchdog::arm`] consumes the idle driver so the caller cannot
//! reconfigure its clock afterwards.
//!
//! ## Timeout Conversion
//!
//! ```text
//! ticks  = timeout_ms * input_hz / (divisor * 1000)
//! reload = clamp(ticks, floor, 4095)
//! ```
//!
//! The divisor is the finest one whose reload fits in 12 bits unless a fixed
//! prescaler is configured. Clamping is reported in [`AppliedTimeout`], or
//! turned into an error with [`RangePolicy::Reject`].
//!
//! ## Features
//!
//! - `std` (default): `std::error::Error` support via `thiserror`
//! - `serde` (default): `Serialize`/`Deserialize` for configuration types
//! - `embedded-hal`: `embedded_hal::watchdog` 0.2 trait implementations
//! - `stm32f1`: [`IwdgRegisters`] for the `stm32f1` PAC's `IWDG`
//!
//! ## Example
//!
//! ```rust
//! use stm32_watchdog::prelude::*;
//!
//! let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
//! watchdog.set_input_frequency(32_000).expect("non-zero clock");
//!
//! let applied = watchdog.set_timeout(500).expect("timeout applied");
//! assert!(applied.is_exact());
//!
//! watchdog.start();
//! watchdog.feed();
//! assert!(watchdog.is_started());
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod config;
pub mod error;
pub mod iwdg;
pub mod prelude;
pub mod prescaler;
pub mod registers;
pub mod software_regs;
pub mod state;
pub mod timeout;
pub mod watchdog;
pub mod wwdg;

#[cfg(feature = "embedded-hal")]
mod hal;

#[cfg(feature = "stm32f1")]
mod pac;

pub use config::{IwdgConfig, PendingUpdate, PrescalerPolicy, RangePolicy, ReloadFloor};
pub use error::{WatchdogError, WatchdogResult};
pub use iwdg::{ArmedWatchdog, IndependentWatchdog};
pub use prescaler::Prescaler;
pub use registers::{IwdgRegisters, Key, MAX_RELOAD, Status};
pub use software_regs::{RecordingRegisters, RegisterWrite};
pub use state::{WatchdogKind, WatchdogStatus};
pub use timeout::{AppliedTimeout, Clamp};
pub use watchdog::{AnyWatchdog, Watchdog};
pub use wwdg::WindowWatchdog;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
