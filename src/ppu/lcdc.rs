//! LCDC (0xFF40): the LCD control register.

#[derive(Copy, Clone, Debug, Default)]
pub struct Lcdc(u8);

impl Lcdc {
    pub fn from_bits(bits: u8) -> Lcdc {
        Lcdc(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn lcd_enable(self) -> bool {
        self.0 & 0b1000_0000 != 0
    }

    pub fn window_tile_map_hi(self) -> bool {
        self.0 & 0b0100_0000 != 0
    }

    pub fn window_enable(self) -> bool {
        self.0 & 0b0010_0000 != 0
    }

    pub fn bg_window_tile_data_lo(self) -> bool {
        self.0 & 0b0001_0000 != 0
    }

    pub fn bg_tile_map_hi(self) -> bool {
        self.0 & 0b0000_1000 != 0
    }

    pub fn obj_size_tall(self) -> bool {
        self.0 & 0b0000_0100 != 0
    }

    pub fn obj_enable(self) -> bool {
        self.0 & 0b0000_0010 != 0
    }

    pub fn bg_enable(self) -> bool {
        self.0 & 0b0000_0001 != 0
    }
}
