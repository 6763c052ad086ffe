//! Independent watchdog (IWDG) driver.
//!
//! The IWDG is a 12-bit down-counter clocked from the LSI oscillator through a
//! prescaler. Its `PR` and `RLR` registers are write-protected: a write of the
//! unlock key lifts the protection, and any other key restores it. Changes to
//! either register are synchronized into the LSI clock domain and flagged in
//! `SR` until they land.
//!
//! ## Write Sequence
//!
//! Every successful `set_timeout` performs, in order:
//!
//! ```text
//! [poll SR until PVU = RVU = 0]   (PendingUpdate::Wait)
//! KR  <- 0x5555                   unlock
//! PR  <- prescaler
//! RLR <- reload
//! KR  <- 0xAAAA                   reload counter, re-lock
//! ```

use crate::config::{IwdgConfig, PendingUpdate, RangePolicy};
use crate::error::{WatchdogError, WatchdogResult};
use crate::registers::{IwdgRegisters, Key};
use crate::state::{WatchdogKind, WatchdogStatus};
use crate::timeout::{self, AppliedTimeout, Clamp};
use crate::watchdog::Watchdog;

/// Independent watchdog driver over a register block `R`.
///
/// # Example
///
/// ```rust
/// use stm32_watchdog::prelude::*;
///
/// let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
/// let applied = watchdog.set_timeout(1000).expect("timeout fits");
/// assert_eq!(applied.reload, 2500);
///
/// let mut armed = watchdog.arm();
/// armed.feed();
/// ```
#[derive(Debug)]
pub struct IndependentWatchdog<R> {
    regs: R,
    config: IwdgConfig,
    status: WatchdogStatus,
    applied: Option<AppliedTimeout>,
}

impl<R: IwdgRegisters> IndependentWatchdog<R> {
    /// Create a driver with the default configuration (40 kHz input clock).
    ///
    /// Does not touch the hardware.
    #[must_use]
    pub fn new(regs: R) -> Self {
        Self {
            regs,
            config: IwdgConfig::default(),
            status: WatchdogStatus::Idle,
            applied: None,
        }
    }

    /// Create a driver with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(regs: R, config: IwdgConfig) -> WatchdogResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(regs)
        })
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &IwdgConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next `set_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn set_config(&mut self, config: IwdgConfig) -> WatchdogResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// The last timeout written to the hardware, if any.
    #[must_use]
    pub fn applied_timeout(&self) -> Option<AppliedTimeout> {
        self.applied
    }

    /// Borrow the register block.
    #[must_use]
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Start the watchdog and give up the ability to reconfigure its clock.
    ///
    /// This is the typestate form of [`Watchdog::start`]; prefer it when the
    /// driver is owned by a single task.
    #[must_use]
    pub fn arm(mut self) -> ArmedWatchdog<R> {
        Watchdog::start(&mut self);
        ArmedWatchdog { inner: self }
    }

    fn wait_for_idle(&self) -> WatchdogResult<()> {
        let PendingUpdate::Wait { max_polls } = self.config.pending_update else {
            return Ok(());
        };

        for _ in 0..max_polls {
            if self.regs.status().is_idle() {
                return Ok(());
            }
        }

        tracing::warn!(polls = max_polls, "IWDG register update still pending");
        Err(WatchdogError::UpdatePending { polls: max_polls })
    }

    fn apply(&mut self, timeout_ms: u32) -> WatchdogResult<AppliedTimeout> {
        self.apply_with(timeout_ms, self.config.range)
    }

    /// Apply `timeout_ms` with `range` in place of the configured policy.
    pub(crate) fn apply_with(
        &mut self,
        timeout_ms: u32,
        range: RangePolicy,
    ) -> WatchdogResult<AppliedTimeout> {
        let config = IwdgConfig {
            range,
            ..self.config
        };
        let applied = timeout::plan(timeout_ms, &config)?;
        self.wait_for_idle()?;

        self.regs.write_key(Key::Unlock);
        self.regs.write_prescaler(applied.prescaler);
        self.regs.write_reload(applied.reload);
        self.regs.write_key(Key::Reload);

        match applied.clamp {
            Clamp::None => tracing::debug!(
                timeout_ms,
                prescaler = applied.prescaler.divisor(),
                reload = applied.reload,
                period_us = applied.achieved_period_us(),
                "IWDG timeout applied"
            ),
            clamp => tracing::warn!(
                timeout_ms,
                ?clamp,
                prescaler = applied.prescaler.divisor(),
                reload = applied.reload,
                period_us = applied.achieved_period_us(),
                "IWDG timeout clamped to hardware range"
            ),
        }

        self.applied = Some(applied);
        Ok(applied)
    }
}

impl<R: IwdgRegisters> Watchdog for IndependentWatchdog<R> {
    fn kind(&self) -> WatchdogKind {
        WatchdogKind::Independent
    }

    fn start(&mut self) {
        self.regs.write_key(Key::Start);
        if self.status == WatchdogStatus::Idle {
            self.status = WatchdogStatus::Armed;
            tracing::info!(
                input_hz = self.config.input_frequency_hz,
                reload = self.applied.map(|a| a.reload),
                "IWDG armed; it cannot be stopped until reset"
            );
        }
    }

    fn feed(&mut self) {
        self.regs.write_key(Key::Reload);
    }

    fn set_timeout(&mut self, timeout_ms: u32) -> WatchdogResult<AppliedTimeout> {
        self.apply(timeout_ms)
    }

    fn set_input_frequency(&mut self, hz: u32) -> WatchdogResult<()> {
        if hz == 0 {
            return Err(WatchdogError::ZeroInputFrequency);
        }
        self.config.input_frequency_hz = hz;
        Ok(())
    }

    fn input_frequency_hz(&self) -> u32 {
        self.config.input_frequency_hz
    }

    fn status(&self) -> WatchdogStatus {
        self.status
    }
}

/// A started independent watchdog.
///
/// Produced by [`IndependentWatchdog::arm`]. It can be fed, re-keyed and have
/// its period changed, but there is no way back to an idle driver and the
/// input clock is fixed.
#[derive(Debug)]
pub struct ArmedWatchdog<R> {
    inner: IndependentWatchdog<R>,
}

impl<R: IwdgRegisters> ArmedWatchdog<R> {
    /// Reload the countdown.
    pub fn feed(&mut self) {
        self.inner.feed();
    }

    /// Rewrite the start key. The watchdog is already running, so this only
    /// repeats the hardware write.
    pub fn start(&mut self) {
        self.inner.start();
    }

    /// Change the countdown period while running.
    ///
    /// # Errors
    ///
    /// Same as [`Watchdog::set_timeout`].
    pub fn set_timeout(&mut self, timeout_ms: u32) -> WatchdogResult<AppliedTimeout> {
        self.inner.apply(timeout_ms)
    }

    /// Input clock frequency in Hz.
    #[must_use]
    pub fn input_frequency_hz(&self) -> u32 {
        self.inner.config.input_frequency_hz
    }

    /// The last timeout written to the hardware, if any.
    #[must_use]
    pub fn applied_timeout(&self) -> Option<AppliedTimeout> {
        self.inner.applied
    }

    /// Borrow the register block.
    #[must_use]
    pub fn registers(&self) -> &R {
        &self.inner.regs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prescaler::Prescaler;
    use crate::software_regs::{RecordingRegisters, RegisterWrite};
    use alloc::vec;

    #[test]
    fn test_set_timeout_write_sequence() -> WatchdogResult<()> {
        let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
        watchdog.set_timeout(1000)?;

        assert_eq!(
            watchdog.registers().writes(),
            vec![
                RegisterWrite::Key(Key::Unlock),
                RegisterWrite::Prescaler(Prescaler::Div16),
                RegisterWrite::Reload(2500),
                RegisterWrite::Key(Key::Reload),
            ]
            .as_slice()
        );
        assert_eq!(watchdog.registers().reload(), 2500);
        assert_eq!(watchdog.registers().prescaler(), Prescaler::Div16);
        Ok(())
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
        watchdog.start();
        watchdog.start();

        assert_eq!(watchdog.status(), WatchdogStatus::Armed);
        assert_eq!(
            watchdog.registers().writes(),
            [RegisterWrite::Key(Key::Start), RegisterWrite::Key(Key::Start)].as_slice()
        );
    }

    #[test]
    fn test_feed_before_start() {
        let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
        watchdog.feed();
        assert_eq!(watchdog.status(), WatchdogStatus::Idle);
        assert!(!watchdog.registers().is_running());
    }

    #[test]
    fn test_zero_input_frequency_rejected() {
        let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
        assert_eq!(
            watchdog.set_input_frequency(0),
            Err(WatchdogError::ZeroInputFrequency)
        );
        assert_eq!(watchdog.input_frequency_hz(), 40_000);
    }

    #[test]
    fn test_pending_update_times_out() -> WatchdogResult<()> {
        let config = IwdgConfig::builder()
            .pending_update(PendingUpdate::Wait { max_polls: 3 })
            .build()?;
        let mut watchdog =
            IndependentWatchdog::with_config(RecordingRegisters::with_busy_polls(10), config)?;

        assert_eq!(
            watchdog.set_timeout(100),
            Err(WatchdogError::UpdatePending { polls: 3 })
        );
        assert!(watchdog.registers().writes().is_empty());
        assert_eq!(watchdog.registers().status_reads(), 3);
        assert_eq!(watchdog.applied_timeout(), None);
        Ok(())
    }

    #[test]
    fn test_armed_typestate() -> WatchdogResult<()> {
        let mut armed = IndependentWatchdog::new(RecordingRegisters::new()).arm();
        assert!(armed.registers().is_running());

        let applied = armed.set_timeout(250)?;
        armed.feed();
        assert_eq!(armed.applied_timeout(), Some(applied));
        assert_eq!(armed.input_frequency_hz(), 40_000);
        assert_eq!(armed.registers().rejected_writes(), 0);
        Ok(())
    }
}
