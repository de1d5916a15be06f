//! DIV/TIMA/TMA/TAC timer.
//!
//! This is a simplified model: DIV always increments every 256 T-cycles and
//! TIMA increments at the TAC-selected rate with no modeling of the
//! DIV-falling-edge glitches real hardware exhibits on TAC/TIMA writes during
//! a reload. Those are out of scope (spec non-goal: sub-instruction timing).

use crate::interrupt::{Interrupt, InterruptController};
use bitflags::bitflags;

bitflags! {
    pub struct TimerControl: u8 {
        const ENABLE = 0b_0000_0100;
        const CLOCK_SELECT = 0b_0000_0011;
    }
}

impl Default for TimerControl {
    fn default() -> TimerControl {
        TimerControl::empty()
    }
}

pub struct Timer {
    div_counter: u16,
    tima_counter: u32,
    pub tima: u8,
    pub tma: u8,
    pub tac: TimerControl,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            div_counter: 0,
            tima_counter: 0,
            tima: 0,
            tma: 0,
            tac: TimerControl::empty(),
        }
    }

    pub fn read_div(&self) -> u8 {
        (self.div_counter >> 8) as u8
    }

    pub fn write_div(&mut self) {
        self.div_counter = 0;
    }

    pub fn read_tac(&self) -> u8 {
        0xF8 | self.tac.bits()
    }

    pub fn write_tac(&mut self, val: u8) {
        self.tac = TimerControl::from_bits_truncate(val);
    }

    fn tima_period(&self) -> u32 {
        match (self.tac & TimerControl::CLOCK_SELECT).bits() {
            0b00 => 1024,
            0b01 => 16,
            0b10 => 64,
            0b11 => 256,
            _ => unreachable!(),
        }
    }

    pub fn advance(&mut self, t_cycles: u32, interrupts: &mut InterruptController) {
        self.div_counter = self.div_counter.wrapping_add(t_cycles as u16);

        if !self.tac.contains(TimerControl::ENABLE) {
            return;
        }

        self.tima_counter += t_cycles;
        let period = self.tima_period();

        while self.tima_counter >= period {
            self.tima_counter -= period;
            self.step_tima(interrupts);
        }
    }

    fn step_tima(&mut self, interrupts: &mut InterruptController) {
        let (new, overflow) = self.tima.overflowing_add(1);

        if overflow {
            self.tima = self.tma;
            interrupts.request(Interrupt::Timer);
        } else {
            self.tima = new;
        }
    }
}

impl Default for Timer {
    fn default() -> Timer {
        Timer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_increments_every_256_t_cycles() {
        let mut timer = Timer::new();
        let mut interrupts = InterruptController::new();
        timer.advance(255, &mut interrupts);
        assert_eq!(timer.read_div(), 0);
        timer.advance(1, &mut interrupts);
        assert_eq!(timer.read_div(), 1);
    }

    #[test]
    fn tima_overflow_reloads_from_tma_and_raises_interrupt() {
        let mut timer = Timer::new();
        let mut interrupts = InterruptController::new();
        timer.tac = TimerControl::ENABLE | TimerControl::from_bits_truncate(0b01); // every 16 cycles
        timer.tma = 0x10;
        timer.tima = 0xFF;

        timer.advance(16, &mut interrupts);

        assert_eq!(timer.tima, 0x10);
        assert_eq!(interrupts.pending(), None); // timer interrupt not yet enabled in IE
        interrupts.write_ie(0xFF);
        assert!(interrupts.pending().is_some());
    }

    #[test]
    fn disabled_timer_never_increments_tima() {
        let mut timer = Timer::new();
        let mut interrupts = InterruptController::new();
        timer.advance(100_000, &mut interrupts);
        assert_eq!(timer.tima, 0);
    }
}
