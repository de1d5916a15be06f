//! Object Attribute Memory: 40 4-byte sprite entries, plus the per-scanline
//! sprite-selection scan (max 10 sprites, lower OAM index wins ties).

use bitflags::bitflags;

bitflags! {
    pub struct SpriteAttrs: u8 {
        const PALETTE  = 0b0001_0000;
        const X_FLIP   = 0b0010_0000;
        const Y_FLIP   = 0b0100_0000;
        const BG_OVER_OBJ = 0b1000_0000;
    }
}

impl Default for SpriteAttrs {
    fn default() -> SpriteAttrs {
        SpriteAttrs::empty()
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Sprite {
    pub y: u8,
    pub x: u8,
    pub tile_index: u8,
    pub attrs: SpriteAttrs,
    /// OAM index (0-39), used to break ties in both selection and rendering
    /// priority (lower index drawn on top).
    pub oam_index: u8,
}

pub const OAM_SIZE: usize = 40 * 4;
pub const MAX_SPRITES_PER_LINE: usize = 10;

pub struct Oam {
    bytes: [u8; OAM_SIZE],
}

impl Oam {
    pub fn new() -> Oam {
        Oam { bytes: [0; OAM_SIZE] }
    }

    pub fn read8(&self, offset: u16) -> u8 {
        self.bytes[offset as usize]
    }

    pub fn write8(&mut self, offset: u16, val: u8) {
        self.bytes[offset as usize] = val;
    }

    pub fn raw(&self) -> &[u8] {
        &self.bytes
    }

    pub fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    fn sprite(&self, index: usize) -> Sprite {
        let base = index * 4;
        Sprite {
            y: self.bytes[base],
            x: self.bytes[base + 1],
            tile_index: self.bytes[base + 2],
            attrs: SpriteAttrs::from_bits_truncate(self.bytes[base + 3]),
            oam_index: index as u8,
        }
    }

    /// Returns up to [`MAX_SPRITES_PER_LINE`] sprites that overlap scanline
    /// `ly`, in OAM order (the order rendering priority is resolved in).
    pub fn sprites_on_line(&self, ly: u8, tall: bool) -> Vec<Sprite> {
        let height: i16 = if tall { 16 } else { 8 };
        let ly = ly as i16;

        let mut selected = Vec::with_capacity(MAX_SPRITES_PER_LINE);
        for index in 0..40 {
            let sprite = self.sprite(index);
            let top = sprite.y as i16 - 16;

            if ly >= top && ly < top + height {
                selected.push(sprite);
                if selected.len() == MAX_SPRITES_PER_LINE {
                    break;
                }
            }
        }

        selected
    }
}

impl Default for Oam {
    fn default() -> Oam {
        Oam::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_sprite(oam: &mut Oam, index: usize, y: u8) {
        oam.write8(index as u16 * 4, y);
        oam.write8(index as u16 * 4 + 1, 8);
    }

    #[test]
    fn scan_never_exceeds_ten_sprites() {
        let mut oam = Oam::new();
        for i in 0..40 {
            place_sprite(&mut oam, i, 16); // every sprite overlaps LY=0
        }
        assert_eq!(oam.sprites_on_line(0, false).len(), MAX_SPRITES_PER_LINE);
    }

    #[test]
    fn lower_oam_index_appears_first() {
        let mut oam = Oam::new();
        place_sprite(&mut oam, 5, 16);
        place_sprite(&mut oam, 2, 16);
        let sprites = oam.sprites_on_line(0, false);
        assert_eq!(sprites[0].oam_index, 2);
        assert_eq!(sprites[1].oam_index, 5);
    }

    #[test]
    fn tall_sprites_cover_sixteen_lines() {
        let mut oam = Oam::new();
        place_sprite(&mut oam, 0, 16); // top at line 0
        assert!(oam.sprites_on_line(15, true).len() == 1);
        assert!(oam.sprites_on_line(16, true).is_empty());
    }
}
