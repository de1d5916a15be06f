//! OAM DMA: a write to 0xFF46 triggers a 160-byte copy from
//! `val * 0x100`..+160 into OAM, during which the CPU cannot access any bus
//! range except HRAM (0xFF80-0xFFFE).

use crate::cartridge::Cartridge;
use crate::ppu::Ppu;

const TRANSFER_LEN: u16 = 160;
/// One byte transferred per M-cycle on real hardware.
const CYCLES_PER_BYTE: u32 = 4;
const TRANSFER_CYCLES: u32 = TRANSFER_LEN as u32 * CYCLES_PER_BYTE;

pub struct OamDma {
    source_high: u8,
    remaining_cycles: u32,
}

impl OamDma {
    pub fn new() -> OamDma {
        OamDma { source_high: 0, remaining_cycles: 0 }
    }

    pub fn read_source(&self) -> u8 {
        self.source_high
    }

    pub fn start(&mut self, source_high: u8) {
        self.source_high = source_high;
        self.remaining_cycles = TRANSFER_CYCLES;
    }

    pub fn active(&self) -> bool {
        self.remaining_cycles > 0
    }

    /// HRAM remains reachable during a transfer; everything else is
    /// blocked, matching the instruction fetch loop (which lives in HRAM on
    /// real hardware during a DMA-gated stall).
    pub fn blocks(&self, addr: u16) -> bool {
        self.active() && !(0xFF80..=0xFFFE).contains(&addr)
    }

    pub fn advance(&mut self, t_cycles: u32, ppu: &mut Ppu, cartridge: &Cartridge, wram: &[u8]) {
        if !self.active() {
            return;
        }

        // The copy itself is performed instantaneously on the first tick of
        // a transfer; `remaining_cycles` only continues to exist to gate bus
        // access for the rest of the transfer's real-hardware duration.
        if self.remaining_cycles == TRANSFER_CYCLES {
            let base = (self.source_high as u16) << 8;
            for offset in 0..TRANSFER_LEN {
                let src = base.wrapping_add(offset);
                let byte = Self::read_source_byte(src, ppu, cartridge, wram);
                ppu.dma_write_oam(offset, byte);
            }
        }

        self.remaining_cycles = self.remaining_cycles.saturating_sub(t_cycles);
    }

    fn read_source_byte(addr: u16, ppu: &Ppu, cartridge: &Cartridge, wram: &[u8]) -> u8 {
        match addr {
            0x0000..=0x7FFF => cartridge.read8(addr),
            0x8000..=0x9FFF => ppu.read_vram_raw(addr),
            0xA000..=0xBFFF => cartridge.read8(addr),
            0xC000..=0xDFFF => wram[(addr - 0xC000) as usize],
            0xE000..=0xFDFF => wram[(addr - 0xE000) as usize],
            _ => 0xFF,
        }
    }
}

impl Default for OamDma {
    fn default() -> OamDma {
        OamDma::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_non_hram_access_while_active() {
        let mut dma = OamDma::new();
        dma.start(0xC0);
        assert!(dma.blocks(0x8000));
        assert!(!dma.blocks(0xFF80));
    }

    #[test]
    fn unblocks_after_full_transfer_duration() {
        let mut dma = OamDma::new();
        dma.start(0xC0);
        let mut ppu = Ppu::new();
        let mut cart_rom = vec![0u8; 0x8000];
        let checksum = cart_rom[0x0134..0x014D]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1));
        cart_rom[0x014D] = checksum;
        let cartridge = Cartridge::load(cart_rom.into_boxed_slice()).unwrap();
        let wram = [0u8; 0x2000];

        dma.advance(TRANSFER_CYCLES, &mut ppu, &cartridge, &wram);
        assert!(!dma.active());
    }
}
