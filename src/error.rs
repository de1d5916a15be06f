//! Crate-local error type. The instruction loop itself never fails; only ROM
//! loading and save-RAM I/O can.

use std::fmt;

#[derive(Debug)]
pub enum CoreError {
    /// The ROM blob is smaller than its own header claims, or smaller than
    /// the minimum 32 KiB a cartridge header can even be read from.
    InvalidRomSize { expected_at_least: usize, actual: usize },
    /// The header checksum at 0x014D didn't match the bytes it covers.
    InvalidHeaderChecksum { expected: u8, actual: u8 },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidRomSize { expected_at_least, actual } => write!(
                f,
                "ROM is too small: expected at least {} bytes, got {}",
                expected_at_least, actual
            ),
            CoreError::InvalidHeaderChecksum { expected, actual } => write!(
                f,
                "cartridge header checksum mismatch: expected {:#04x}, computed {:#04x}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for CoreError {}
