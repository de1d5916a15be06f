pub mod header;
pub mod mbc;

use crate::error::CoreError;
use header::{CartridgeHeader, CartridgeType};
use mbc::Mbc;
use num_enum::TryFromPrimitive;

pub struct Cartridge {
    rom: Box<[u8]>,
    ram: Box<[u8]>,
    mbc: Mbc,
    pub header: CartridgeHeader,
}

const ROM_BANK_SIZE: usize = 0x4000;
const RAM_BANK_SIZE: usize = 0x2000;

impl Cartridge {
    pub fn load(rom: Box<[u8]>) -> Result<Cartridge, CoreError> {
        let header = CartridgeHeader::parse(&rom)?;

        let mbc = match CartridgeType::try_from_primitive(header.cartridge_type_raw) {
            Ok(CartridgeType::RomOnly) => Mbc::none(),
            Ok(CartridgeType::Mbc1) | Ok(CartridgeType::Mbc1Ram) | Ok(CartridgeType::Mbc1RamBattery) => {
                Mbc::mbc1()
            }
            Err(_) => {
                log::warn!(
                    "unsupported cartridge type {:#04x}, falling back to MBC1",
                    header.cartridge_type_raw
                );
                Mbc::mbc1()
            }
        };

        let ram_len = header.ram_size.byte_len().max(RAM_BANK_SIZE);
        let ram = vec![0u8; ram_len].into_boxed_slice();

        Ok(Cartridge { rom, ram, mbc, header })
    }

    pub fn read8(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => {
                let bank = self.mbc.rom_bank_lo();
                self.rom_byte(bank, addr as usize)
            }
            0x4000..=0x7FFF => {
                let bank = self.mbc.rom_bank_hi();
                self.rom_byte(bank, addr as usize - 0x4000)
            }
            0xA000..=0xBFFF => {
                if !self.mbc.ram_enabled() || self.ram.is_empty() {
                    return 0xFF;
                }
                let bank = self.mbc.ram_bank();
                let offset = bank * RAM_BANK_SIZE + (addr as usize - 0xA000);
                self.ram.get(offset % self.ram.len()).copied().unwrap_or(0xFF)
            }
            _ => unreachable!("cartridge reads are only routed for ROM/RAM ranges"),
        }
    }

    pub fn write8(&mut self, addr: u16, val: u8) {
        match addr {
            0x0000..=0x7FFF => self.mbc.write_control(addr, val),
            0xA000..=0xBFFF => {
                if !self.mbc.ram_enabled() || self.ram.is_empty() {
                    return;
                }
                let bank = self.mbc.ram_bank();
                let offset = bank * RAM_BANK_SIZE + (addr as usize - 0xA000);
                let len = self.ram.len();
                self.ram[offset % len] = val;
            }
            _ => unreachable!("cartridge writes are only routed for ROM/RAM ranges"),
        }
    }

    fn rom_byte(&self, bank: usize, offset_in_bank: usize) -> u8 {
        let offset = bank * ROM_BANK_SIZE + offset_in_bank;
        self.rom.get(offset % self.rom.len().max(1)).copied().unwrap_or(0xFF)
    }

    pub fn load_ram(&mut self, bytes: &[u8]) {
        let len = self.ram.len().min(bytes.len());
        self.ram[..len].copy_from_slice(&bytes[..len]);
    }

    pub fn save_ram(&self) -> &[u8] {
        &self.ram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rom(cartridge_type: u8, bank_count: usize) -> Box<[u8]> {
        let mut rom = vec![0u8; bank_count * ROM_BANK_SIZE];
        rom[0x0147] = cartridge_type;
        let code = (bank_count / 2).trailing_zeros() as u8;
        rom[0x0148] = code;
        rom[0x0149] = 0x02;
        let checksum = rom[0x0134..0x014D]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1));
        rom[0x014D] = checksum;
        // Tag each bank's first byte with its bank index, for bank-switch tests.
        for bank in 0..bank_count {
            rom[bank * ROM_BANK_SIZE] = bank as u8;
        }
        rom.into_boxed_slice()
    }

    #[test]
    fn rom_only_cartridge_has_no_banking() {
        let cart = Cartridge::load(make_rom(0x00, 2)).unwrap();
        assert_eq!(cart.read8(0x4000), 1);
    }

    #[test]
    fn mbc1_bank_select_switches_the_high_window() {
        let mut cart = Cartridge::load(make_rom(0x01, 4)).unwrap();
        cart.write8(0x2000, 0x03);
        assert_eq!(cart.read8(0x4000), 3);
    }

    #[test]
    fn mbc1_ram_is_gated_by_enable() {
        let mut cart = Cartridge::load(make_rom(0x03, 2)).unwrap();
        cart.write8(0xA000, 0x42);
        assert_eq!(cart.read8(0xA000), 0xFF);

        cart.write8(0x0000, 0x0A);
        cart.write8(0xA000, 0x42);
        assert_eq!(cart.read8(0xA000), 0x42);
    }
}
