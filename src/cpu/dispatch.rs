//! Maps each of the 256 primary opcodes (and 256 CB-prefixed opcodes) to the
//! instruction semantics implemented in [`super::execute`].

use super::execute as ex;
use super::operands::{HighRamOperand, HlOperand, Imm8, ImmAddr, RegOrMem};
use super::registers::{Flags, R16, R8};
use super::Cpu;
use crate::bus::Bus;

fn rr_group1(idx: u8) -> R16 {
    match idx & 0b11 {
        0 => R16::BC,
        1 => R16::DE,
        2 => R16::HL,
        3 => R16::SP,
        _ => unreachable!(),
    }
}

fn rr_group2(idx: u8) -> R16 {
    match idx & 0b11 {
        0 => R16::BC,
        1 => R16::DE,
        2 => R16::HL,
        3 => R16::AF,
        _ => unreachable!(),
    }
}

fn condition(cpu: &Cpu, idx: u8) -> bool {
    match idx & 0b11 {
        0 => !cpu.reg.flags.contains(Flags::Z),
        1 => cpu.reg.flags.contains(Flags::Z),
        2 => !cpu.reg.flags.contains(Flags::C),
        3 => cpu.reg.flags.contains(Flags::C),
        _ => unreachable!(),
    }
}

pub fn execute(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) {
    match opcode {
        0x00 => {}
        0x10 => cpu.stopped = true,
        // HALT is treated as a 4-cycle NOP; the real stall-until-interrupt
        // behavior is out of scope.
        0x76 => {}
        0xF3 => cpu.disable_ime(),
        0xFB => cpu.request_ime_enable(),

        0x07 => ex::rlca(cpu),
        0x0F => ex::rrca(cpu),
        0x17 => ex::rla(cpu),
        0x1F => ex::rra(cpu),
        0x27 => ex::daa(cpu),
        0x2F => ex::cpl(cpu),
        0x37 => ex::scf(cpu),
        0x3F => ex::ccf(cpu),

        0x08 => ex::ld_a16_sp(cpu, bus),
        0xE8 => ex::add_sp_r8(cpu, bus),
        0xF8 => ex::ld_hl_sp_r8(cpu, bus),
        0xF9 => ex::ld_sp_hl(cpu, bus),

        0x18 => ex::jr_cond(cpu, bus, true),
        0x20 | 0x28 | 0x30 | 0x38 => {
            let cond = condition(cpu, opcode >> 3);
            ex::jr_cond(cpu, bus, cond);
        }

        0xC3 => ex::jp_cond(cpu, bus, true),
        0xC2 | 0xCA | 0xD2 | 0xDA => {
            let cond = condition(cpu, opcode >> 3);
            ex::jp_cond(cpu, bus, cond);
        }
        0xE9 => ex::jp_hl(cpu),

        0xCD => ex::call_cond(cpu, bus, true),
        0xC4 | 0xCC | 0xD4 | 0xDC => {
            let cond = condition(cpu, opcode >> 3);
            ex::call_cond(cpu, bus, cond);
        }

        0xC9 => ex::ret(cpu, bus, false),
        0xD9 => ex::ret(cpu, bus, true),
        0xC0 | 0xC8 | 0xD0 | 0xD8 => {
            let cond = condition(cpu, opcode >> 3);
            ex::ret_cond(cpu, bus, cond);
        }

        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            ex::rst(cpu, bus, (opcode & 0b0011_1000) as u16);
        }

        0x01 | 0x11 | 0x21 | 0x31 => ex::ld_rr_d16(cpu, bus, rr_group1(opcode >> 4)),
        0x03 | 0x13 | 0x23 | 0x33 => ex::inc_rr(cpu, rr_group1(opcode >> 4)),
        0x0B | 0x1B | 0x2B | 0x3B => ex::dec_rr(cpu, rr_group1(opcode >> 4)),
        0x09 | 0x19 | 0x29 | 0x39 => ex::add_hl_rr(cpu, rr_group1(opcode >> 4)),

        0xC1 | 0xD1 | 0xE1 => ex::pop(cpu, bus, rr_group2(opcode >> 4)),
        0xF1 => ex::pop_af(cpu, bus),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => ex::push(cpu, bus, rr_group2(opcode >> 4)),

        0x02 => ex::ld8(cpu, bus, R16::BC, R8::A),
        0x12 => ex::ld8(cpu, bus, R16::DE, R8::A),
        0x0A => ex::ld8(cpu, bus, R8::A, R16::BC),
        0x1A => ex::ld8(cpu, bus, R8::A, R16::DE),
        0x22 => ex::ld8(cpu, bus, HlOperand::HlInc, R8::A),
        0x32 => ex::ld8(cpu, bus, HlOperand::HlDec, R8::A),
        0x2A => ex::ld8(cpu, bus, R8::A, HlOperand::HlInc),
        0x3A => ex::ld8(cpu, bus, R8::A, HlOperand::HlDec),

        0xE0 => ex::ld8(cpu, bus, HighRamOperand::Imm8, R8::A),
        0xF0 => ex::ld8(cpu, bus, R8::A, HighRamOperand::Imm8),
        0xE2 => ex::ld8(cpu, bus, HighRamOperand::C, R8::A),
        0xF2 => ex::ld8(cpu, bus, R8::A, HighRamOperand::C),
        0xEA => ex::ld8(cpu, bus, ImmAddr, R8::A),
        0xFA => ex::ld8(cpu, bus, R8::A, ImmAddr),

        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            let dst = RegOrMem::from_bits(opcode >> 3);
            ex::ld8(cpu, bus, dst, Imm8);
        }

        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            ex::inc8(cpu, bus, RegOrMem::from_bits(opcode >> 3));
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            ex::dec8(cpu, bus, RegOrMem::from_bits(opcode >> 3));
        }

        0x40..=0x7F => {
            let dst = RegOrMem::from_bits(opcode >> 3);
            let src = RegOrMem::from_bits(opcode);
            ex::ld8(cpu, bus, dst, src);
        }

        0x80..=0xBF => {
            let src = RegOrMem::from_bits(opcode);
            alu_op(cpu, bus, (opcode >> 3) & 0b111, src);
        }

        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
            alu_op(cpu, bus, (opcode >> 3) & 0b111, Imm8);
        }

        0xCB => {
            let cb_opcode = cpu.fetch8(bus);
            execute_cb(cpu, bus, cb_opcode);
        }

        // Unassigned primary opcodes behave as a 1-cycle NOP.
        0xD3 | 0xDB | 0xDD | 0xE3 | 0xE4 | 0xEB | 0xEC | 0xED | 0xF4 | 0xFC | 0xFD => {
            log::warn!("executed illegal opcode {:#04x}, treating as NOP", opcode);
        }

        _ => unreachable!("opcode {:#04x} not covered by dispatch", opcode),
    }
}

fn alu_op(cpu: &mut Cpu, bus: &mut Bus, op: u8, src: impl super::operands::Src8) {
    match op {
        0 => ex::add8(cpu, bus, src),
        1 => ex::adc8(cpu, bus, src),
        2 => ex::sub8(cpu, bus, src),
        3 => ex::sbc8(cpu, bus, src),
        4 => ex::and8(cpu, bus, src),
        5 => ex::xor8(cpu, bus, src),
        6 => ex::or8(cpu, bus, src),
        7 => {
            ex::cp8(cpu, bus, src);
        }
        _ => unreachable!(),
    }
}

fn execute_cb(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) {
    let target = RegOrMem::from_bits(opcode);
    let op = (opcode >> 3) & 0b111;

    match opcode >> 6 {
        0 => match op {
            0 => ex::rlc(cpu, bus, target),
            1 => ex::rrc(cpu, bus, target),
            2 => ex::rl(cpu, bus, target),
            3 => ex::rr_(cpu, bus, target),
            4 => ex::sla(cpu, bus, target),
            5 => ex::sra(cpu, bus, target),
            6 => ex::swap(cpu, bus, target),
            7 => ex::srl(cpu, bus, target),
            _ => unreachable!(),
        },
        1 => ex::bit_op(cpu, bus, op, target),
        2 => ex::res(cpu, bus, op, target),
        3 => ex::set(cpu, bus, op, target),
        _ => unreachable!(),
    }
}
