use log::{debug, error, trace, warn};

use crate::context::Context;
use crate::error::{Fault, LoadError, Trap};
use crate::frame::FrameView;
use crate::handlers;
use crate::machine::Machine;
use crate::memory::{MAX_ROM_LENGTH, START_ADDR};
use crate::opcode::Opcode;

/// Execution state observed by the driver
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Status {
    Running,
    /// Stalled on `FX0A` until a key goes down, PC does not move
    AwaitingKey,
    /// Program counter left the loaded program or an instruction trapped
    Stopped,
}

/// CHIP-8 virtual machine
///
/// Exists only with a program loaded. Each `step` executes a single
/// instruction; pacing is left to the caller.
pub struct Chip8<C: Context> {
    ctx: C,
    machine: Machine,
    rom_len: usize,
    opcode: Opcode,
    status: Status,
}

impl<C: Context> Chip8<C> {
    /// Load program from slice of bytes to memory from 0x200 (_start address)
    pub fn load(ctx: C, rom: &[u8]) -> Result<Self, LoadError> {
        if rom.len() > MAX_ROM_LENGTH {
            error!(
                "rom of {} bytes does not fit in {} bytes of program memory",
                rom.len(),
                MAX_ROM_LENGTH
            );
            return Err(LoadError::RomTooLarge {
                len: rom.len(),
                max: MAX_ROM_LENGTH,
            });
        }

        let mut machine = Machine::new();
        machine
            .memory
            .load(START_ADDR, rom)
            .map_err(|_| LoadError::RomTooLarge {
                len: rom.len(),
                max: MAX_ROM_LENGTH,
            })?;
        debug!("loaded {} bytes at {:#05X}", rom.len(), START_ADDR);

        Ok(Self {
            ctx,
            machine,
            rom_len: rom.len(),
            opcode: Opcode::default(),
            status: Status::Running,
        })
    }

    /// Execute a single instruction cycle
    ///
    /// Once stopped, further calls do nothing. A trap stops the machine and
    /// leaves the state as it was when the faulting instruction started.
    pub fn step(&mut self) -> Result<(), Trap> {
        if self.status == Status::Stopped {
            return Ok(());
        }

        let pc = self.machine.regs.pc;
        if pc as usize >= START_ADDR as usize + self.rom_len {
            debug!("pc {:#05X} is past the end of the program, stopping", pc);
            self.status = Status::Stopped;
            return Ok(());
        }

        let opcode = match self.machine.memory.read_word(pc) {
            Ok(raw) => Opcode::new(raw),
            Err(fault) => return Err(self.trap(pc, Opcode::default(), fault)),
        };
        self.opcode = opcode;
        trace!("pc={:#05X} opcode={}", pc, opcode);

        match handlers::dispatch(&mut self.machine, &mut self.ctx, opcode) {
            Ok(()) => self.status = Status::Running,
            Err(nb::Error::WouldBlock) => {
                if self.status != Status::AwaitingKey {
                    debug!("waiting for key press at {:#05X}", pc);
                }
                self.status = Status::AwaitingKey;
            }
            Err(nb::Error::Other(fault)) => return Err(self.trap(pc, opcode, fault)),
        }

        self.machine.tick_timers();
        Ok(())
    }

    /// Returns whether the frame changed since the last call, and resets the flag
    pub fn consume_redraw(&mut self) -> bool {
        core::mem::replace(&mut self.machine.redraw, false)
    }

    pub fn frame(&self) -> FrameView<'_> {
        self.machine.frame.view()
    }

    /// Update the state of a single key, to be called between steps
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<(), Fault> {
        self.machine.keypad.set(key, pressed).map_err(|fault| {
            warn!("ignoring event for key {:#X}: {}", key, fault);
            fault
        })
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status != Status::Stopped
    }

    /// Whether a host should currently be emitting a tone
    pub fn sound_active(&self) -> bool {
        self.machine.sound_timer.is_active()
    }

    pub fn pc(&self) -> u16 {
        self.machine.regs.pc
    }

    pub fn i(&self) -> u16 {
        self.machine.regs.i
    }

    pub fn sp(&self) -> u8 {
        self.machine.regs.sp()
    }

    pub fn v(&self, x: u8) -> Result<u8, Fault> {
        self.machine.regs.v(x)
    }

    pub fn delay_timer(&self) -> u8 {
        self.machine.delay_timer.load()
    }

    pub fn sound_timer(&self) -> u8 {
        self.machine.sound_timer.load()
    }

    /// Most recently fetched instruction
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn memory(&self) -> &[u8] {
        self.machine.memory.as_raw()
    }

    fn trap(&mut self, pc: u16, opcode: Opcode, fault: Fault) -> Trap {
        let trap = Trap { pc, opcode, fault };
        error!("{}", trap);
        self.status = Status::Stopped;
        trap
    }
}
