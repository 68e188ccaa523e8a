use heapless::{consts::U16, Vec};

use crate::error::Fault;
use crate::memory::START_ADDR;

pub const REG_COUNT: usize = 16;
pub const STACK_DEPTH: usize = 16;
/// Index of VF, the carry/borrow/collision flag
pub const VF: u8 = 0xF;

#[derive(Debug, Clone)]
pub struct Registers {
    v: [u8; REG_COUNT],
    pub i: u16,
    pub pc: u16,
    stack: Vec<u16, U16>,
}

impl Registers {
    pub fn new() -> Self {
        Self {
            v: [0; REG_COUNT],
            i: 0,
            pc: START_ADDR,
            stack: Vec::new(),
        }
    }

    pub fn v(&self, x: u8) -> Result<u8, Fault> {
        self.v
            .get(x as usize)
            .copied()
            .ok_or(Fault::RegisterOutOfBounds(x))
    }

    pub fn set_v(&mut self, x: u8, value: u8) -> Result<(), Fault> {
        self.v
            .get_mut(x as usize)
            .map(|reg| *reg = value)
            .ok_or(Fault::RegisterOutOfBounds(x))
    }

    pub fn set_flag(&mut self, set: bool) {
        self.v[VF as usize] = set as u8;
    }

    pub fn as_raw(&self) -> &[u8; REG_COUNT] {
        &self.v
    }

    /// Stack pointer, the number of return addresses held
    pub fn sp(&self) -> u8 {
        self.stack.len() as u8
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        self.stack.push(addr).map_err(|_| Fault::StackOverflow)
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        self.stack.pop().ok_or(Fault::StackUnderflow)
    }

    /// Return addresses, bottom of the stack first
    pub fn stack(&self) -> &[u16] {
        &self.stack
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
