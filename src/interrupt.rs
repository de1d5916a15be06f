//! The interrupt controller: IE/IF bitsets and priority-ordered dispatch.

use bitflags::bitflags;

bitflags! {
    pub struct Interrupts: u8 {
        const VBLANK = 0b_0000_0001;
        const STAT   = 0b_0000_0010;
        const TIMER  = 0b_0000_0100;
        const SERIAL = 0b_0000_1000;
        const JOYPAD = 0b_0001_0000;
    }
}

/// A single interrupt source, ordered by priority (top to bottom, matching
/// bit order in IE/IF: VBlank is checked first).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank,
    Stat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub fn flag(self) -> Interrupts {
        match self {
            Interrupt::VBlank => Interrupts::VBLANK,
            Interrupt::Stat => Interrupts::STAT,
            Interrupt::Timer => Interrupts::TIMER,
            Interrupt::Serial => Interrupts::SERIAL,
            Interrupt::Joypad => Interrupts::JOYPAD,
        }
    }

    pub fn vector(self) -> u16 {
        match self {
            Interrupt::VBlank => 0x0040,
            Interrupt::Stat => 0x0048,
            Interrupt::Timer => 0x0050,
            Interrupt::Serial => 0x0058,
            Interrupt::Joypad => 0x0060,
        }
    }

    const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::Stat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];
}

#[derive(Default)]
pub struct InterruptController {
    pub ie: Interrupts,
    pub iflag: Interrupts,
}

impl Default for Interrupts {
    fn default() -> Interrupts {
        Interrupts::empty()
    }
}

impl InterruptController {
    pub fn new() -> InterruptController {
        InterruptController {
            ie: Interrupts::empty(),
            // Bits 5-7 of IF are unused and read back as 1 on real hardware;
            // games never rely on their value so we leave IF at 0 here and
            // let `read_if` paper over the unused bits.
            iflag: Interrupts::empty(),
        }
    }

    pub fn request(&mut self, interrupt: Interrupt) {
        self.iflag.insert(interrupt.flag());
    }

    /// Returns the highest-priority interrupt that is both requested and
    /// enabled, regardless of IME. `Cpu::step` checks this before deciding
    /// whether to dispatch an interrupt this step.
    pub fn pending(&self) -> Option<Interrupt> {
        let active = self.ie & self.iflag;
        if active.is_empty() {
            return None;
        }

        Interrupt::ALL.iter().copied().find(|i| active.contains(i.flag()))
    }

    pub fn ack(&mut self, interrupt: Interrupt) {
        self.iflag.remove(interrupt.flag());
    }

    pub fn read_ie(&self) -> u8 {
        self.ie.bits()
    }

    pub fn write_ie(&mut self, val: u8) {
        self.ie = Interrupts::from_bits_truncate(val);
    }

    pub fn read_if(&self) -> u8 {
        0xE0 | self.iflag.bits()
    }

    pub fn write_if(&mut self, val: u8) {
        self.iflag = Interrupts::from_bits_truncate(val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_is_vblank_first() {
        let mut ic = InterruptController::new();
        ic.write_ie(0xFF);
        ic.request(Interrupt::Timer);
        ic.request(Interrupt::VBlank);
        assert_eq!(ic.pending(), Some(Interrupt::VBlank));
    }

    #[test]
    fn disabled_interrupt_is_not_pending() {
        let mut ic = InterruptController::new();
        ic.request(Interrupt::VBlank);
        assert_eq!(ic.pending(), None);
        ic.write_ie(Interrupts::VBLANK.bits());
        assert_eq!(ic.pending(), Some(Interrupt::VBlank));
    }

    #[test]
    fn ack_clears_the_flag() {
        let mut ic = InterruptController::new();
        ic.write_ie(0xFF);
        ic.request(Interrupt::Stat);
        ic.ack(Interrupt::Stat);
        assert_eq!(ic.pending(), None);
    }
}
