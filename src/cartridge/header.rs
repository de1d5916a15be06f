//! Parses the fixed-layout cartridge header at 0x0100-0x014F.

use crate::error::CoreError;
use num_enum::TryFromPrimitive;

#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive)]
#[repr(u8)]
pub enum CartridgeType {
    RomOnly = 0x00,
    Mbc1 = 0x01,
    Mbc1Ram = 0x02,
    Mbc1RamBattery = 0x03,
}

#[derive(Copy, Clone, Debug)]
pub struct RomSize {
    pub code: u8,
    pub bank_count: usize,
}

impl RomSize {
    fn from_code(code: u8) -> RomSize {
        // code N => 32 KiB << N, i.e. bank_count = 2 << N (16 KiB banks)
        RomSize { code, bank_count: 2usize << code }
    }

    pub fn byte_len(&self) -> usize {
        self.bank_count * 0x4000
    }
}

#[derive(Copy, Clone, Debug)]
pub struct RamSize {
    pub code: u8,
    pub bank_count: usize,
    pub bank_len: usize,
}

impl RamSize {
    fn from_code(code: u8) -> RamSize {
        match code {
            0x00 => RamSize { code, bank_count: 0, bank_len: 0 },
            0x01 => RamSize { code, bank_count: 1, bank_len: 0x800 },
            0x02 => RamSize { code, bank_count: 1, bank_len: 0x2000 },
            0x03 => RamSize { code, bank_count: 4, bank_len: 0x2000 },
            0x04 => RamSize { code, bank_count: 16, bank_len: 0x2000 },
            0x05 => RamSize { code, bank_count: 8, bank_len: 0x2000 },
            _ => {
                log::warn!("unrecognized RAM size code {:#04x}, assuming none", code);
                RamSize { code, bank_count: 0, bank_len: 0 }
            }
        }
    }

    pub fn byte_len(&self) -> usize {
        self.bank_count * self.bank_len
    }
}

pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type_raw: u8,
    pub rom_size: RomSize,
    pub ram_size: RamSize,
}

const HEADER_START: usize = 0x0100;
const HEADER_LEN: usize = 0x50;

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<CartridgeHeader, CoreError> {
        if rom.len() < HEADER_START + HEADER_LEN {
            return Err(CoreError::InvalidRomSize {
                expected_at_least: HEADER_START + HEADER_LEN,
                actual: rom.len(),
            });
        }

        let (expected, actual) = Self::checksum(rom);
        if expected != actual {
            return Err(CoreError::InvalidHeaderChecksum { expected, actual });
        }

        let title_bytes = &rom[0x0134..0x0144];
        let title = title_bytes
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect();

        let cartridge_type_raw = rom[0x0147];
        let rom_size = RomSize::from_code(rom[0x0148]);
        let ram_size = RamSize::from_code(rom[0x0149]);

        if rom.len() < rom_size.byte_len() {
            log::warn!(
                "ROM header claims {} bytes but file is only {} bytes",
                rom_size.byte_len(),
                rom.len()
            );
        }

        Ok(CartridgeHeader { title, cartridge_type_raw, rom_size, ram_size })
    }

    /// Returns (header's stored checksum, freshly computed checksum).
    fn checksum(rom: &[u8]) -> (u8, u8) {
        let stored = rom[0x014D];
        let computed = rom[0x0134..0x014D]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1));
        (stored, computed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rom(cartridge_type: u8) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x0134] = b'T';
        rom[0x0135] = b'E';
        rom[0x0136] = b'S';
        rom[0x0137] = b'T';
        rom[0x0147] = cartridge_type;
        rom[0x0148] = 0x00; // 32 KiB, 2 banks
        rom[0x0149] = 0x02; // 8 KiB RAM
        let checksum = rom[0x0134..0x014D]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1));
        rom[0x014D] = checksum;
        rom
    }

    #[test]
    fn parses_title_and_sizes() {
        let rom = make_rom(0x00);
        let header = CartridgeHeader::parse(&rom).unwrap();
        assert_eq!(header.title, "TEST");
        assert_eq!(header.rom_size.bank_count, 2);
        assert_eq!(header.ram_size.byte_len(), 0x2000);
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut rom = make_rom(0x00);
        rom[0x014D] ^= 0xFF;
        assert!(CartridgeHeader::parse(&rom).is_err());
    }
}
