//! To avoid repetitive code in the [`super::execute`] module, this module
//! provides the [`Src8`] and [`Dst8`] traits, which generalize over source and
//! destination locations for 8-bit values without requiring the caller to
//! think about how many cycles such a memory access costs.
//!
//! ```ignore
//! let x = R8::A.read(cpu, bus);   // Doesn't consume a cycle
//! let y = Imm8.read(cpu, bus);    // Consumes a single cycle
//! ```

use super::registers::{R16, R8};
use super::Cpu;
use crate::bus::Bus;

/// The HL register offers optional "free" INC/DEC on HL after (HL) is resolved.
pub enum HlOperand {
    /// Increments HL after the lookup (HL+)
    HlInc,
    /// Decrements HL after the lookup (HL-)
    HlDec,
}

/// Reads an 8 bit value (from memory or a CPU register), consuming the
/// correct number of cycles in the process.
pub trait Src8 {
    fn read(self, cpu: &mut Cpu, bus: &mut Bus) -> u8;
}

/// Writes an 8 bit value (to memory or a CPU register), consuming the
/// correct number of cycles in the process.
pub trait Dst8 {
    fn write(self, cpu: &mut Cpu, bus: &mut Bus, val: u8);
}

/// Reads an immediate operand from (PC), then increments PC.
pub struct Imm8;

impl Src8 for Imm8 {
    fn read(self, cpu: &mut Cpu, bus: &mut Bus) -> u8 {
        cpu.fetch8(bus)
    }
}

/// LDH operand: assumes the upper byte of the address is 0xFF, with the
/// lower byte coming from either an immediate byte or register C.
pub enum HighRamOperand {
    Imm8,
    C,
}

impl Src8 for HighRamOperand {
    fn read(self, cpu: &mut Cpu, bus: &mut Bus) -> u8 {
        let offset = match self {
            HighRamOperand::Imm8 => cpu.fetch8(bus) as u16,
            HighRamOperand::C => cpu.reg.r8(R8::C) as u16,
        };

        cpu.read8(bus, 0xFF00 + offset)
    }
}

impl Dst8 for HighRamOperand {
    fn write(self, cpu: &mut Cpu, bus: &mut Bus, val: u8) {
        let offset = match self {
            HighRamOperand::Imm8 => cpu.fetch8(bus) as u16,
            HighRamOperand::C => cpu.reg.r8(R8::C) as u16,
        };

        cpu.write8(bus, 0xFF00 + offset, val);
    }
}

impl Src8 for HlOperand {
    fn read(self, cpu: &mut Cpu, bus: &mut Bus) -> u8 {
        let addr = cpu.reg.hl;
        let result = cpu.read8(bus, addr);

        match self {
            HlOperand::HlInc => cpu.reg.hl = cpu.reg.hl.wrapping_add(1),
            HlOperand::HlDec => cpu.reg.hl = cpu.reg.hl.wrapping_sub(1),
        }

        result
    }
}

impl Dst8 for HlOperand {
    fn write(self, cpu: &mut Cpu, bus: &mut Bus, val: u8) {
        let addr = cpu.reg.hl;
        cpu.write8(bus, addr, val);

        match self {
            HlOperand::HlInc => cpu.reg.hl = cpu.reg.hl.wrapping_add(1),
            HlOperand::HlDec => cpu.reg.hl = cpu.reg.hl.wrapping_sub(1),
        }
    }
}

impl Src8 for R8 {
    fn read(self, cpu: &mut Cpu, _bus: &mut Bus) -> u8 {
        cpu.reg.r8(self)
    }
}

impl Dst8 for R8 {
    fn write(self, cpu: &mut Cpu, _bus: &mut Bus, val: u8) {
        cpu.reg.set_r8(self, val);
    }
}

/// (HL), (BC), (DE): read/write the byte at the address held in a 16-bit
/// register, without touching the register itself.
impl Src8 for R16 {
    fn read(self, cpu: &mut Cpu, bus: &mut Bus) -> u8 {
        let addr = cpu.reg.r16(self);
        cpu.read8(bus, addr)
    }
}

impl Dst8 for R16 {
    fn write(self, cpu: &mut Cpu, bus: &mut Bus, val: u8) {
        let addr = cpu.reg.r16(self);
        cpu.write8(bus, addr, val);
    }
}

/// One of the eight register-or-(HL) operand slots used by the regular
/// 0x40-0xBF block and their CB-prefixed counterparts, selected by a 3-bit
/// opcode field (0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A).
#[derive(Copy, Clone, Debug)]
pub enum RegOrMem {
    Reg(R8),
    Mem,
}

impl RegOrMem {
    pub fn from_bits(bits: u8) -> RegOrMem {
        match bits & 0b111 {
            0 => RegOrMem::Reg(R8::B),
            1 => RegOrMem::Reg(R8::C),
            2 => RegOrMem::Reg(R8::D),
            3 => RegOrMem::Reg(R8::E),
            4 => RegOrMem::Reg(R8::H),
            5 => RegOrMem::Reg(R8::L),
            6 => RegOrMem::Mem,
            7 => RegOrMem::Reg(R8::A),
            _ => unreachable!(),
        }
    }
}

impl Src8 for RegOrMem {
    fn read(self, cpu: &mut Cpu, bus: &mut Bus) -> u8 {
        match self {
            RegOrMem::Reg(r) => r.read(cpu, bus),
            RegOrMem::Mem => R16::HL.read(cpu, bus),
        }
    }
}

impl Dst8 for RegOrMem {
    fn write(self, cpu: &mut Cpu, bus: &mut Bus, val: u8) {
        match self {
            RegOrMem::Reg(r) => r.write(cpu, bus, val),
            RegOrMem::Mem => R16::HL.write(cpu, bus, val),
        }
    }
}

/// (a16): reads a 16-bit immediate address, then reads/writes the byte there.
pub struct ImmAddr;

impl Src8 for ImmAddr {
    fn read(self, cpu: &mut Cpu, bus: &mut Bus) -> u8 {
        let addr = cpu.fetch16(bus);
        cpu.read8(bus, addr)
    }
}

impl Dst8 for ImmAddr {
    fn write(self, cpu: &mut Cpu, bus: &mut Bus, val: u8) {
        let addr = cpu.fetch16(bus);
        cpu.write8(bus, addr, val);
    }
}
