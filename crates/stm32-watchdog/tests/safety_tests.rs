//! Safety-hardening tests for the IWDG driver.
//!
//! These tests pin down the register ordering and the one-way lifecycle
//! using the recording register block. All tests use `Result<>` return types
//! and avoid `unwrap`/`expect`.

#![cfg(test)]

use stm32_watchdog::prelude::*;

/// Every prescaler write is preceded by an unlock key write.
#[test]
fn test_unlock_precedes_prescaler_write() -> Result<(), Box<dyn std::error::Error>> {
    let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());

    for timeout_ms in [10, 100, 1000, 10_000, 30_000] {
        watchdog.set_timeout(timeout_ms)?;
    }

    let writes = watchdog.registers().writes();
    for (index, write) in writes.iter().enumerate() {
        if matches!(write, RegisterWrite::Prescaler(_)) {
            let previous = index.checked_sub(1).and_then(|i| writes.get(i));
            assert_eq!(previous, Some(&RegisterWrite::Key(Key::Unlock)));
        }
    }
    assert_eq!(watchdog.registers().rejected_writes(), 0);

    Ok(())
}

/// Configuration ends with the reload key, which re-locks PR and RLR.
#[test]
fn test_configuration_relocks_registers() -> Result<(), Box<dyn std::error::Error>> {
    let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
    watchdog.set_timeout(500)?;

    assert_eq!(
        watchdog.registers().writes().last(),
        Some(&RegisterWrite::Key(Key::Reload))
    );
    Ok(())
}

/// Rejected timeouts leave the hardware untouched.
#[test]
fn test_reject_policy_leaves_registers_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let config = IwdgConfig::builder().range(RangePolicy::Reject).build()?;
    let mut watchdog = IndependentWatchdog::with_config(RecordingRegisters::new(), config)?;

    let result = watchdog.set_timeout(60_000);
    assert!(matches!(result, Err(WatchdogError::TimeoutTooLong { .. })));
    assert!(watchdog.registers().writes().is_empty());
    assert_eq!(watchdog.registers().status_reads(), 0);
    assert_eq!(watchdog.applied_timeout(), None);

    Ok(())
}

/// A pending update that clears within the poll budget does not fail.
#[test]
fn test_pending_update_clears_within_budget() -> Result<(), Box<dyn std::error::Error>> {
    let config = IwdgConfig::builder()
        .pending_update(PendingUpdate::Wait { max_polls: 3 })
        .build()?;
    let mut watchdog =
        IndependentWatchdog::with_config(RecordingRegisters::with_busy_polls(2), config)?;

    watchdog.set_timeout(100)?;
    assert_eq!(watchdog.registers().status_reads(), 3);
    assert_eq!(watchdog.registers().writes().len(), 4);

    Ok(())
}

/// Skipping the wait never reads the status register.
#[test]
fn test_skip_pending_update_does_not_poll() -> Result<(), Box<dyn std::error::Error>> {
    let config = IwdgConfig::builder()
        .pending_update(PendingUpdate::Skip)
        .build()?;
    let mut watchdog =
        IndependentWatchdog::with_config(RecordingRegisters::with_busy_polls(u32::MAX), config)?;

    watchdog.set_timeout(100)?;
    assert_eq!(watchdog.registers().status_reads(), 0);

    Ok(())
}

/// An armed watchdog can be reconfigured but stays armed.
#[test]
fn test_armed_watchdog_cannot_return_to_idle() -> Result<(), Box<dyn std::error::Error>> {
    let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
    watchdog.set_timeout(100)?;
    watchdog.start();

    watchdog.set_timeout(2000)?;
    watchdog.feed();
    watchdog.set_input_frequency(32_000)?;
    watchdog.set_timeout(50)?;

    assert_eq!(watchdog.status(), WatchdogStatus::Armed);
    assert!(watchdog.registers().is_running());

    Ok(())
}

/// The typestate path keeps feeding and reconfiguration available.
#[test]
fn test_arm_typestate() -> Result<(), Box<dyn std::error::Error>> {
    let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
    watchdog.set_timeout(100)?;

    let mut armed = watchdog.arm();
    armed.feed();
    armed.start();
    let applied = armed.set_timeout(200)?;

    assert_eq!(armed.registers().reload(), applied.reload);
    assert!(armed.registers().is_running());

    Ok(())
}
