use crate::error::Fault;

pub const KEY_COUNT: usize = 16;

/// State of the 4x4 hexadecimal keypad
///
/// Besides the held keys it latches every released to pressed transition,
/// so a key wait can tell a fresh press from a key that was already down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
    presses: u16,
}

impl Keypad {
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_COUNT],
            presses: 0,
        }
    }

    pub fn set(&mut self, key: u8, pressed: bool) -> Result<(), Fault> {
        let state = self
            .keys
            .get_mut(key as usize)
            .ok_or(Fault::KeyOutOfBounds(key))?;
        if pressed && !*state {
            self.presses |= 1 << key;
        }
        *state = pressed;
        Ok(())
    }

    pub fn is_pressed(&self, key: u8) -> Result<bool, Fault> {
        self.keys
            .get(key as usize)
            .copied()
            .ok_or(Fault::KeyOutOfBounds(key))
    }

    /// Forget the presses latched so far
    pub fn clear_presses(&mut self) {
        self.presses = 0;
    }

    /// Lowest key pressed since the latch was last cleared, clears the latch
    pub fn take_press(&mut self) -> Option<u8> {
        if self.presses == 0 {
            return None;
        }
        let key = self.presses.trailing_zeros() as u8;
        self.presses = 0;
        Some(key)
    }

    pub fn as_raw(&self) -> &[bool; KEY_COUNT] {
        &self.keys
    }
}
