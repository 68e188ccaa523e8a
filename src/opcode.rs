//! Field access over a raw 16-bit instruction word.
//!
//! Naming follows [chip8 mastering](http://mattmik.com/files/chip8/mastering/chip8.html):
//! an opcode `0xGXYN` has group `G`, registers `X` and `Y`, and nibble `N`;
//! `NN` is the low byte and `NNN` the low 12 bits.
//!
//! Examples:
//! ```
//! use chip8_core::opcode::Opcode;
//!
//! let opcode = Opcode::new(0xD125);
//!
//! assert_eq!(opcode.group(), 0xD);
//! assert_eq!((opcode.x(), opcode.y(), opcode.n()), (0x1, 0x2, 0x5));
//! ```

use core::fmt;

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Opcode(u16);

impl Opcode {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Top nibble, selects the handler group
    pub const fn group(self) -> u8 {
        (self.0 >> 12 & 0x000F) as u8
    }

    pub const fn x(self) -> u8 {
        (self.0 >> 8 & 0x000F) as u8
    }

    pub const fn y(self) -> u8 {
        (self.0 >> 4 & 0x000F) as u8
    }

    pub const fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    pub const fn nn(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    pub const fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X}", self.0)
    }
}
