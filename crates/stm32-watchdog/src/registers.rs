//! IWDG register block abstraction.
//!
//! The driver never touches memory directly. It talks to an [`IwdgRegisters`]
//! implementation, which is either the real peripheral (see the `stm32f1`
//! feature) or [`RecordingRegisters`](crate::software_regs::RecordingRegisters)
//! on the host.

use crate::prescaler::Prescaler;

/// Largest value the 12-bit reload register accepts.
pub const MAX_RELOAD: u16 = 0x0FFF;

/// Keys accepted by the IWDG key register (`KR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    /// Lifts write protection on `PR` and `RLR`.
    Unlock = 0x5555,
    /// Reloads the counter from `RLR` and re-enables write protection.
    Reload = 0xAAAA,
    /// Starts the watchdog. Cannot be undone by software.
    Start = 0xCCCC,
}

impl Key {
    /// Raw key value.
    #[must_use]
    pub fn value(self) -> u16 {
        self as u16
    }
}

/// Snapshot of the IWDG status register (`SR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    /// `PVU`: a prescaler update is still being synchronized.
    pub prescaler_update: bool,
    /// `RVU`: a reload value update is still being synchronized.
    pub reload_update: bool,
}

impl Status {
    /// True when neither update flag is set.
    #[must_use]
    pub fn is_idle(self) -> bool {
        !self.prescaler_update && !self.reload_update
    }
}

/// Typed access to the IWDG register block.
///
/// Implementations perform exactly one register access per call, in program
/// order. The driver is responsible for sequencing (unlock before configure).
pub trait IwdgRegisters {
    /// Write a key to `KR`.
    fn write_key(&mut self, key: Key);

    /// Write the prescaler field of `PR`.
    fn write_prescaler(&mut self, prescaler: Prescaler);

    /// Write the reload field of `RLR`. Callers pass values `<= MAX_RELOAD`.
    fn write_reload(&mut self, reload: u16);

    /// Read `SR`.
    fn status(&self) -> Status;
}

impl<R: IwdgRegisters + ?Sized> IwdgRegisters for &mut R {
    fn write_key(&mut self, key: Key) {
        (**self).write_key(key);
    }

    fn write_prescaler(&mut self, prescaler: Prescaler) {
        (**self).write_prescaler(prescaler);
    }

    fn write_reload(&mut self, reload: u16) {
        (**self).write_reload(reload);
    }

    fn status(&self) -> Status {
        (**self).status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_values() {
        assert_eq!(Key::Unlock.value(), 0x5555);
        assert_eq!(Key::Reload.value(), 0xAAAA);
        assert_eq!(Key::Start.value(), 0xCCCC);
    }

    #[test]
    fn test_status_idle() {
        assert!(Status::default().is_idle());
        let busy = Status {
            prescaler_update: false,
            reload_update: true,
        };
        assert!(!busy.is_idle());
    }
}
