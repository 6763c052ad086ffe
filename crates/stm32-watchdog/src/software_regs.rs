//! Software IWDG register block.
//!
//! This module provides `RecordingRegisters`, an in-memory implementation of
//! [`IwdgRegisters`] for host tests and hardware-free environments. It keeps
//! an ordered log of every write and models the parts of the peripheral the
//! driver depends on:
//!
//! - `PR`/`RLR` writes only land while the unlock key is active; any other key
//!   re-locks them. Locked writes are logged and counted but have no effect.
//! - The start key sets a running flag that nothing clears.
//! - `SR` can report busy for a configurable number of reads.

use alloc::vec::Vec;
use core::cell::Cell;

use crate::prescaler::Prescaler;
use crate::registers::{IwdgRegisters, Key, MAX_RELOAD, Status};

/// One register access, in program order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterWrite {
    /// Write to `KR`.
    Key(Key),
    /// Write to `PR`.
    Prescaler(Prescaler),
    /// Write to `RLR`.
    Reload(u16),
}

impl core::fmt::Display for RegisterWrite {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Key(key) => write!(f, "KR  <- {:#06X} ({key:?})", key.value()),
            Self::Prescaler(p) => write!(f, "PR  <- {} ({p})", p.bits()),
            Self::Reload(value) => write!(f, "RLR <- {value}"),
        }
    }
}

/// Recording IWDG register block.
#[derive(Debug)]
pub struct RecordingRegisters {
    writes: Vec<RegisterWrite>,
    unlocked: bool,
    running: bool,
    prescaler: Prescaler,
    reload: u16,
    rejected_writes: u32,
    busy_polls: Cell<u32>,
    status_reads: Cell<u32>,
}

impl RecordingRegisters {
    /// Create a register block in its reset state: `PR = /4`, `RLR = 0xFFF`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            unlocked: false,
            running: false,
            prescaler: Prescaler::Div4,
            reload: MAX_RELOAD,
            rejected_writes: 0,
            busy_polls: Cell::new(0),
            status_reads: Cell::new(0),
        }
    }

    /// Create a register block whose `SR` reports both update flags set for
    /// the first `polls` reads.
    #[must_use]
    pub fn with_busy_polls(polls: u32) -> Self {
        let regs = Self::new();
        regs.busy_polls.set(polls);
        regs
    }

    /// Every write so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> &[RegisterWrite] {
        &self.writes
    }

    /// Render the write log one access per line.
    #[must_use]
    pub fn trace(&self) -> alloc::string::String {
        let mut out = alloc::string::String::new();
        for write in &self.writes {
            out.push_str(&alloc::format!("{write}\n"));
        }
        out
    }

    /// Prescaler currently latched in `PR`.
    #[must_use]
    pub fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    /// Reload value currently latched in `RLR`.
    #[must_use]
    pub fn reload(&self) -> u16 {
        self.reload
    }

    /// True once the start key has been written.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of `PR`/`RLR` writes dropped because of write protection.
    #[must_use]
    pub fn rejected_writes(&self) -> u32 {
        self.rejected_writes
    }

    /// Number of `SR` reads so far.
    #[must_use]
    pub fn status_reads(&self) -> u32 {
        self.status_reads.get()
    }

    /// Clear the write log. Latched register values are kept.
    pub fn clear_log(&mut self) {
        self.writes.clear();
    }
}

impl Default for RecordingRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl IwdgRegisters for RecordingRegisters {
    fn write_key(&mut self, key: Key) {
        self.writes.push(RegisterWrite::Key(key));
        match key {
            Key::Unlock => self.unlocked = true,
            Key::Reload => self.unlocked = false,
            Key::Start => {
                self.unlocked = false;
                self.running = true;
            }
        }
    }

    fn write_prescaler(&mut self, prescaler: Prescaler) {
        self.writes.push(RegisterWrite::Prescaler(prescaler));
        if self.unlocked {
            self.prescaler = prescaler;
        } else {
            self.rejected_writes = self.rejected_writes.saturating_add(1);
        }
    }

    fn write_reload(&mut self, reload: u16) {
        self.writes.push(RegisterWrite::Reload(reload));
        if self.unlocked {
            self.reload = reload & MAX_RELOAD;
        } else {
            self.rejected_writes = self.rejected_writes.saturating_add(1);
        }
    }

    fn status(&self) -> Status {
        self.status_reads.set(self.status_reads.get().saturating_add(1));
        let remaining = self.busy_polls.get();
        if remaining == 0 {
            Status::default()
        } else {
            self.busy_polls.set(remaining - 1);
            Status {
                prescaler_update: true,
                reload_update: true,
            }
        }
    }
}
