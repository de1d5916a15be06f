//! The P1/JOYP register and button state.
//!
//! Button polling (reading the host's keyboard/gamepad) is the host's job;
//! this module only tracks which buttons are currently held and exposes the
//! P1 register's active-low selection semantics.

use crate::interrupt::{Interrupt, InterruptController};
use bitflags::bitflags;

bitflags! {
    pub struct Buttons: u8 {
        const RIGHT  = 0b_0000_0001;
        const LEFT   = 0b_0000_0010;
        const UP     = 0b_0000_0100;
        const DOWN   = 0b_0000_1000;
        const A      = 0b_0001_0000;
        const B      = 0b_0010_0000;
        const SELECT = 0b_0100_0000;
        const START  = 0b_1000_0000;
    }
}

impl Default for Buttons {
    fn default() -> Buttons {
        Buttons::empty()
    }
}

bitflags! {
    struct Select: u8 {
        const DIRECTIONS = 0b_0001_0000;
        const ACTIONS    = 0b_0010_0000;
    }
}

impl Default for Select {
    fn default() -> Select {
        Select::empty()
    }
}

#[derive(Default)]
pub struct Joypad {
    pressed: Buttons,
    select: Select,
}

impl Joypad {
    pub fn new() -> Joypad {
        Joypad::default()
    }

    /// Replaces the full set of held buttons. Raises the joypad interrupt on
    /// any newly-pressed button whose group (directions/actions) is
    /// currently selected, matching the real P1 low-edge trigger.
    pub fn set_buttons(&mut self, buttons: Buttons, interrupts: &mut InterruptController) {
        let newly_pressed = buttons & !self.pressed;
        self.pressed = buttons;

        // A select line is active when its stored bit is 0, not 1.
        let triggers = (!self.select.contains(Select::DIRECTIONS)
            && newly_pressed.intersects(Buttons::RIGHT | Buttons::LEFT | Buttons::UP | Buttons::DOWN))
            || (!self.select.contains(Select::ACTIONS)
                && newly_pressed.intersects(Buttons::A | Buttons::B | Buttons::SELECT | Buttons::START));

        if triggers {
            interrupts.request(Interrupt::Joypad);
        }
    }

    pub fn read_p1(&self) -> u8 {
        0xC0 | self.select.bits() | self.low_nibble()
    }

    /// Selecting a group can by itself reveal an already-held button: the
    /// interrupt fires on any bit 3-0 high-to-low transition caused by the
    /// selection change, not just on newly-pressed buttons.
    pub fn write_p1(&mut self, val: u8, interrupts: &mut InterruptController) {
        let before = self.low_nibble();
        self.select = Select::from_bits_truncate(val & 0x30);
        let after = self.low_nibble();

        if before & !after != 0 {
            interrupts.request(Interrupt::Joypad);
        }
    }

    fn low_nibble(&self) -> u8 {
        let mut lower_nibble = 0x0F;

        if !self.select.contains(Select::DIRECTIONS) {
            lower_nibble &= !(self.pressed.bits() & 0x0F);
        }
        if !self.select.contains(Select::ACTIONS) {
            lower_nibble &= !((self.pressed.bits() >> 4) & 0x0F);
        }

        lower_nibble
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_unselected_group_returns_all_high() {
        let mut joypad = Joypad::new();
        let mut interrupts = InterruptController::new();
        joypad.set_buttons(Buttons::A, &mut interrupts);
        // Select directions (bit4=0) only; actions (bit5=1) stay deselected.
        joypad.write_p1(Select::ACTIONS.bits(), &mut interrupts);
        assert_eq!(joypad.read_p1() & 0x0F, 0x0F);
    }

    #[test]
    fn pressed_action_button_pulls_bit_low() {
        let mut joypad = Joypad::new();
        let mut interrupts = InterruptController::new();
        // Select actions (bit5=0) only; directions (bit4=1) stay deselected.
        joypad.write_p1(Select::DIRECTIONS.bits(), &mut interrupts);
        joypad.set_buttons(Buttons::A, &mut interrupts);
        assert_eq!(joypad.read_p1() & 0x01, 0);
    }

    #[test]
    fn newly_pressed_button_in_selected_group_raises_interrupt() {
        let mut joypad = Joypad::new();
        let mut interrupts = InterruptController::new();
        interrupts.write_ie(0xFF);
        joypad.write_p1(Select::DIRECTIONS.bits(), &mut interrupts);
        joypad.set_buttons(Buttons::START, &mut interrupts);
        assert!(interrupts.pending().is_some());
    }

    #[test]
    fn selecting_a_group_that_reveals_a_held_button_raises_interrupt() {
        let mut joypad = Joypad::new();
        let mut interrupts = InterruptController::new();
        interrupts.write_ie(0xFF);

        // Select directions only (bit5=1 deselects actions); hold START,
        // which is in the (currently deselected) actions group.
        joypad.write_p1(Select::ACTIONS.bits(), &mut interrupts);
        joypad.set_buttons(Buttons::START, &mut interrupts);
        assert_eq!(interrupts.pending(), None);

        // Selecting actions (bit5=0) now reveals the already-held button.
        joypad.write_p1(Select::DIRECTIONS.bits(), &mut interrupts);
        assert!(interrupts.pending().is_some());
    }
}
