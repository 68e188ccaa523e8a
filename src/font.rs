//! Built-in hexadecimal glyphs, seeded into reserved memory before any
//! program code runs.

use crate::memory::Memory;

pub const FONT_ADDR: u16 = 0x000;
/// Rows per glyph, each row is one byte wide
pub const FONT_HEIGHT: u16 = 5;

#[rustfmt::skip]
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Address of the glyph for the low nibble of `digit`
pub fn glyph_addr(digit: u8) -> u16 {
    FONT_ADDR + (digit & 0x0F) as u16 * FONT_HEIGHT
}

pub fn load_fonts(memory: &mut Memory) {
    let start = FONT_ADDR as usize;
    memory.as_raw_mut()[start..start + FONT.len()].copy_from_slice(&FONT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fonts_land_in_low_memory() {
        let mut memory = Memory::new();
        load_fonts(&mut memory);
        assert_eq!(&memory.as_raw()[..80], &FONT[..]);
        assert!(memory.as_raw()[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn glyph_addresses() {
        assert_eq!(glyph_addr(0x0), 0x00);
        assert_eq!(glyph_addr(0xA), 0x32);
        assert_eq!(glyph_addr(0xF), 0x4B);
        assert_eq!(glyph_addr(0x1F), glyph_addr(0xF));
    }
}
