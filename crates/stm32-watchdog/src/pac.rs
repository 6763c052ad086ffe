//! Register block backed by the `stm32f1` peripheral access crate.
#![expect(unsafe_code, reason = "PAC field writes take raw bit patterns")]

use ::stm32f1::stm32f103::IWDG;

use crate::prescaler::Prescaler;
use crate::registers::{IwdgRegisters, Key, MAX_RELOAD, Status};

impl IwdgRegisters for IWDG {
    fn write_key(&mut self, key: Key) {
        self.kr.write(|w| {
            // SAFETY: `key` is one of the three documented KR keys.
            unsafe { w.key().bits(key.value()) }
        });
    }

    fn write_prescaler(&mut self, prescaler: Prescaler) {
        self.pr.write(|w| {
            // SAFETY: `Prescaler` only encodes the values 0..=6.
            unsafe { w.pr().bits(prescaler.bits()) }
        });
    }

    fn write_reload(&mut self, reload: u16) {
        self.rlr.write(|w| {
            // SAFETY: masked to the 12-bit RL field.
            unsafe { w.rl().bits(reload & MAX_RELOAD) }
        });
    }

    fn status(&self) -> Status {
        let sr = self.sr.read();
        Status {
            prescaler_update: sr.pvu().bit_is_set(),
            reload_update: sr.rvu().bit_is_set(),
        }
    }
}
