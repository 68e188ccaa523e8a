use crate::font::load_fonts;
use crate::frame::Frame;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::timer::Timer;

/// All mutable state of the virtual machine
///
/// Handlers receive it by exclusive reference and keep nothing of their own.
#[derive(Debug, Clone)]
pub struct Machine {
    pub(crate) memory: Memory,
    pub(crate) regs: Registers,
    pub(crate) delay_timer: Timer,
    pub(crate) sound_timer: Timer,
    pub(crate) frame: Frame,
    pub(crate) keypad: Keypad,
    pub(crate) redraw: bool,
    /// Set while `FX0A` is stalled waiting for a fresh key press
    pub(crate) key_wait: bool,
}

impl Machine {
    /// Fresh state with the font table already in place
    pub fn new() -> Self {
        let mut memory = Memory::new();
        load_fonts(&mut memory);
        Self {
            memory,
            regs: Registers::new(),
            delay_timer: Timer::new(),
            sound_timer: Timer::new(),
            frame: Frame::new(),
            keypad: Keypad::new(),
            redraw: false,
            key_wait: false,
        }
    }

    /// Move to the following instruction
    #[inline]
    pub(crate) fn advance(&mut self) {
        self.regs.pc = self.regs.pc.wrapping_add(2);
    }

    /// Move past the following instruction when `cond` holds
    #[inline]
    pub(crate) fn skip_if(&mut self, cond: bool) {
        let step = if cond { 4 } else { 2 };
        self.regs.pc = self.regs.pc.wrapping_add(step);
    }

    pub(crate) fn tick_timers(&mut self) {
        self.delay_timer.decrement();
        self.sound_timer.decrement();
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
