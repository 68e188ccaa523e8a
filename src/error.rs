//! Typed faults raised while loading or executing a program.
//!
//! Every fault is unrecoverable for the current execution. `Chip8::step`
//! wraps the fault together with the location it happened at, so the driver
//! can report it and decide whether to halt or abort.

use core::fmt;

use crate::opcode::Opcode;

/// Reason why an instruction could not be executed
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Fault {
    /// Low bits of the opcode match no instruction of its group
    Decode,
    /// Return executed with an empty call stack
    StackUnderflow,
    /// Subroutine call executed with all 16 stack slots in use
    StackOverflow,
    /// Register index outside of V0..=VF
    RegisterOutOfBounds(u8),
    /// Memory address outside of 0x000..=0xFFF
    AddressOutOfBounds(u16),
    /// Store into the interpreter area below 0x200
    ReservedAddress(u16),
    /// Key index outside of 0x0..=0xF
    KeyOutOfBounds(u8),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Fault::Decode => write!(f, "unknown instruction"),
            Fault::StackUnderflow => write!(f, "can't return, not in subroutine"),
            Fault::StackOverflow => write!(f, "can't enter subroutine, stack is full"),
            Fault::RegisterOutOfBounds(x) => write!(f, "register V{:X} does not exist", x),
            Fault::AddressOutOfBounds(addr) => {
                write!(f, "address {:#05X} is out of address space", addr)
            }
            Fault::ReservedAddress(addr) => {
                write!(f, "address {:#05X} is reserved for the interpreter", addr)
            }
            Fault::KeyOutOfBounds(key) => write!(f, "key {:#X} does not exist", key),
        }
    }
}

/// A fault annotated with the instruction that raised it
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Trap {
    pub pc: u16,
    pub opcode: Opcode,
    pub fault: Fault,
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (opcode {}, pc {:#05X})", self.fault, self.opcode, self.pc)
    }
}

/// Raised when a program can't be placed in memory
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoadError {
    RomTooLarge { len: usize, max: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LoadError::RomTooLarge { len, max } => {
                write!(f, "rom of {} bytes exceeds the {} bytes available", len, max)
            }
        }
    }
}

/// Raised by `Builder::build`
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BuildError {
    MissingContext,
    MissingProgram,
    Load(LoadError),
}

impl From<LoadError> for BuildError {
    fn from(err: LoadError) -> Self {
        BuildError::Load(err)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingContext => write!(f, "context not provided"),
            BuildError::MissingProgram => write!(f, "program not provided"),
            BuildError::Load(err) => write!(f, "{}", err),
        }
    }
}
