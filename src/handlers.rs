//! Instruction handlers, grouped by the top nibble of the opcode.
//!
//! Each handler is responsible for moving the program counter: past itself for
//! ordinary instructions, past the following instruction for a taken skip, or
//! to a new location for jumps, calls and returns.

use crate::context::Context;
use crate::error::Fault;
use crate::font::glyph_addr;
use crate::machine::Machine;
use crate::opcode::Opcode;

/// `WouldBlock` means the instruction made no progress and must be retried
pub(crate) type HandlerResult = nb::Result<(), Fault>;

/// Run the handler group selected by the top nibble of `op`
#[rustfmt::skip]
pub(crate) fn dispatch<C: Context>(m: &mut Machine, ctx: &mut C, op: Opcode) -> HandlerResult {
    match op.group() {
        0x0 => group_0(m, op)?,
        0x1 => m.jump_to(op.nnn()),
        0x2 => m.call_subroutine_at(op.nnn())?,
        0x3 => m.skip_if_vx_eq_nn(op.x(), op.nn())?,
        0x4 => m.skip_if_vx_ne_nn(op.x(), op.nn())?,
        0x5 => group_5(m, op)?,
        0x6 => m.assign_vx_nn(op.x(), op.nn())?,
        0x7 => m.assign_add_vx_nn(op.x(), op.nn())?,
        0x8 => group_8(m, op)?,
        0x9 => group_9(m, op)?,
        0xA => m.assign_i_nnn(op.nnn()),
        0xB => m.jump_to_nnn_add_v0(op.nnn()),
        0xC => m.assign_vx_random_and_nn(op.x(), op.nn(), ctx.gen_random())?,
        0xD => m.draw_n_at_vx_vy(op.x(), op.y(), op.n())?,
        0xE => group_e(m, op)?,
        _ => group_f(m, op)?,
    };
    Ok(())
}

fn group_0(m: &mut Machine, op: Opcode) -> Result<(), Fault> {
    match op.nnn() {
        0x0E0 => {
            m.clear_screen();
            Ok(())
        }
        0x0EE => m.subroutine_return(),
        _ => Err(Fault::Decode),
    }
}

fn group_5(m: &mut Machine, op: Opcode) -> Result<(), Fault> {
    match op.n() {
        0x0 => m.skip_if_vx_eq_vy(op.x(), op.y()),
        _ => Err(Fault::Decode),
    }
}

#[rustfmt::skip]
fn group_8(m: &mut Machine, op: Opcode) -> Result<(), Fault> {
    let (x, y) = (op.x(), op.y());
    match op.n() {
        0x0 => m.assign_vx_vy(x, y),
        0x1 => m.assign_or_vx_vy(x, y),
        0x2 => m.assign_and_vx_vy(x, y),
        0x3 => m.assign_xor_vx_vy(x, y),
        0x4 => m.assign_add_vx_vy(x, y),
        0x5 => m.assign_sub_vx_vy(x, y),
        0x6 => m.assign_vx_shifted_r(x),
        0x7 => m.assign_vy_sub_vx(x, y),
        0xE => m.assign_vx_shifted_l(x),
        _   => Err(Fault::Decode),
    }
}

fn group_9(m: &mut Machine, op: Opcode) -> Result<(), Fault> {
    match op.n() {
        0x0 => m.skip_if_vx_ne_vy(op.x(), op.y()),
        _ => Err(Fault::Decode),
    }
}

fn group_e(m: &mut Machine, op: Opcode) -> Result<(), Fault> {
    match op.nn() {
        0x9E => m.skip_if_key_vx_pressed(op.x()),
        0xA1 => m.skip_if_key_vx_not_pressed(op.x()),
        _ => Err(Fault::Decode),
    }
}

#[rustfmt::skip]
fn group_f(m: &mut Machine, op: Opcode) -> HandlerResult {
    let x = op.x();
    match op.nn() {
        0x07 => m.assign_vx_delay_t(x)?,
        0x0A => m.assign_vx_wait_for_key(x)?,
        0x15 => m.assign_delay_t_vx(x)?,
        0x18 => m.assign_sound_t_vx(x)?,
        0x1E => m.assign_add_i_vx(x)?,
        0x29 => m.assign_i_addr_of_sprite_vx(x)?,
        0x33 => m.assign_mem_at_i_bcd_of_vx(x)?,
        0x55 => m.assign_mem_at_i_v0_to_vx(x)?,
        0x65 => m.assign_v0_to_vx_mem_at_i(x)?,
        _    => return Err(nb::Error::Other(Fault::Decode)),
    };
    Ok(())
}

// Instruction impls
impl Machine {
    /// Clear the screen
    /// 00E0
    fn clear_screen(&mut self) {
        self.frame.clear();
        self.redraw = true;
        self.advance();
    }

    /// Return from a subroutine
    /// 00EE
    fn subroutine_return(&mut self) -> Result<(), Fault> {
        self.regs.pc = self.regs.pop()?;
        Ok(())
    }

    /// Jump to address NNN
    /// 1NNN
    fn jump_to(&mut self, nnn: u16) {
        self.regs.pc = nnn;
    }

    /// Execute subroutine starting at address NNN, returning to the following instruction
    /// 2NNN
    fn call_subroutine_at(&mut self, nnn: u16) -> Result<(), Fault> {
        self.regs.push(self.regs.pc.wrapping_add(2))?;
        self.regs.pc = nnn;
        Ok(())
    }

    /// Skip the following instruction if the value of register VX equals NN
    /// 3XNN
    fn skip_if_vx_eq_nn(&mut self, x: u8, nn: u8) -> Result<(), Fault> {
        let vx = self.regs.v(x)?;
        self.skip_if(vx == nn);
        Ok(())
    }

    /// Skip the following instruction if the value of register VX is not equal to NN
    /// 4XNN
    fn skip_if_vx_ne_nn(&mut self, x: u8, nn: u8) -> Result<(), Fault> {
        let vx = self.regs.v(x)?;
        self.skip_if(vx != nn);
        Ok(())
    }

    /// Skip the following instruction if the value of register VX is equal to the value of register VY
    /// 5XY0
    fn skip_if_vx_eq_vy(&mut self, x: u8, y: u8) -> Result<(), Fault> {
        let (vx, vy) = (self.regs.v(x)?, self.regs.v(y)?);
        self.skip_if(vx == vy);
        Ok(())
    }

    /// Store number NN in register VX
    /// 6XNN
    fn assign_vx_nn(&mut self, x: u8, nn: u8) -> Result<(), Fault> {
        self.regs.set_v(x, nn)?;
        self.advance();
        Ok(())
    }

    /// Add the value NN to register VX, VF is left untouched
    /// 7XNN
    fn assign_add_vx_nn(&mut self, x: u8, nn: u8) -> Result<(), Fault> {
        let vx = self.regs.v(x)?;
        self.regs.set_v(x, vx.wrapping_add(nn))?;
        self.advance();
        Ok(())
    }

    /// Store the value of register VY in register VX
    /// 8XY0
    fn assign_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Fault> {
        self.alu(x, y, |_, vy| (vy, None))
    }

    /// Set VX to VX OR VY
    /// 8XY1
    fn assign_or_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Fault> {
        self.alu(x, y, |vx, vy| (vx | vy, None))
    }

    /// Set VX to VX AND VY
    /// 8XY2
    fn assign_and_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Fault> {
        self.alu(x, y, |vx, vy| (vx & vy, None))
    }

    /// Set VX to VX XOR VY
    /// 8XY3
    fn assign_xor_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Fault> {
        self.alu(x, y, |vx, vy| (vx ^ vy, None))
    }

    /// Add the value of register VY to register VX, Set VF to 01 if a carry occurs, Set VF to 00 if a carry does not occur
    /// 8XY4
    fn assign_add_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Fault> {
        self.alu(x, y, |vx, vy| {
            let (value, carry) = vx.overflowing_add(vy);
            (value, Some(carry))
        })
    }

    /// Subtract the value of register VY from register VX, Set VF to 00 if a borrow occurs, Set VF to 01 if a borrow does not occur
    /// 8XY5
    fn assign_sub_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Fault> {
        self.alu(x, y, |vx, vy| {
            let (value, borrow) = vx.overflowing_sub(vy);
            (value, Some(!borrow))
        })
    }

    /// Shift VX right by one bit, Set VF to the bit shifted out
    /// 8XY6
    fn assign_vx_shifted_r(&mut self, x: u8) -> Result<(), Fault> {
        self.alu(x, x, |vx, _| (vx >> 1, Some(vx & 0x01 == 0x01)))
    }

    /// Set register VX to the value of VY minus VX, Set VF to 00 if a borrow occurs, Set VF to 01 if a borrow does not occur
    /// 8XY7
    fn assign_vy_sub_vx(&mut self, x: u8, y: u8) -> Result<(), Fault> {
        self.alu(x, y, |vx, vy| {
            let (value, borrow) = vy.overflowing_sub(vx);
            (value, Some(!borrow))
        })
    }

    /// Shift VX left by one bit, Set VF to the bit shifted out
    /// 8XYE
    fn assign_vx_shifted_l(&mut self, x: u8) -> Result<(), Fault> {
        self.alu(x, x, |vx, _| (vx << 1, Some(vx & 0x80 == 0x80)))
    }

    /// Skip the following instruction if the value of register VX is not equal to the value of register VY
    /// 9XY0
    fn skip_if_vx_ne_vy(&mut self, x: u8, y: u8) -> Result<(), Fault> {
        let (vx, vy) = (self.regs.v(x)?, self.regs.v(y)?);
        self.skip_if(vx != vy);
        Ok(())
    }

    /// Store memory address NNN in register I
    /// ANNN
    fn assign_i_nnn(&mut self, nnn: u16) {
        self.regs.i = nnn;
        self.advance();
    }

    /// Jump to address NNN + V0
    /// BNNN
    fn jump_to_nnn_add_v0(&mut self, nnn: u16) {
        self.regs.pc = nnn + self.regs.as_raw()[0] as u16;
    }

    /// Set VX to a random number with a mask of NN
    /// CXNN
    fn assign_vx_random_and_nn(&mut self, x: u8, nn: u8, random: u8) -> Result<(), Fault> {
        self.regs.set_v(x, random & nn)?;
        self.advance();
        Ok(())
    }

    /// Draw a sprite at position VX, VY with N bytes of sprite data starting at the address stored in I, Set VF to 01 if any set pixels are changed to unset, and 00 otherwise
    /// DXYN
    fn draw_n_at_vx_vy(&mut self, x: u8, y: u8, n: u8) -> Result<(), Fault> {
        let (vx, vy) = (self.regs.v(x)?, self.regs.v(y)?);
        let sprite = self.memory.slice(self.regs.i, n as usize)?;
        let collision = self.frame.draw_sprite(vx, vy, sprite);
        self.regs.set_flag(collision);
        self.redraw = true;
        self.advance();
        Ok(())
    }

    /// Skip the following instruction if the key corresponding to the hex value currently stored in register VX is pressed
    /// EX9E
    fn skip_if_key_vx_pressed(&mut self, x: u8) -> Result<(), Fault> {
        let pressed = self.key_vx_pressed(x)?;
        self.skip_if(pressed);
        Ok(())
    }

    /// Skip the following instruction if the key corresponding to the hex value currently stored in register VX is not pressed
    /// EXA1
    fn skip_if_key_vx_not_pressed(&mut self, x: u8) -> Result<(), Fault> {
        let pressed = self.key_vx_pressed(x)?;
        self.skip_if(!pressed);
        Ok(())
    }

    /// Store the current value of the delay timer in register VX
    /// FX07
    fn assign_vx_delay_t(&mut self, x: u8) -> Result<(), Fault> {
        self.regs.set_v(x, self.delay_timer.load())?;
        self.advance();
        Ok(())
    }

    /// Wait for a keypress and store the result in register VX
    /// FX0A
    ///
    /// Keys already held when the wait starts don't count, only a press that
    /// happens while stalled releases it.
    fn assign_vx_wait_for_key(&mut self, x: u8) -> HandlerResult {
        if !self.key_wait {
            self.keypad.clear_presses();
            self.key_wait = true;
            return Err(nb::Error::WouldBlock);
        }
        let key = self.keypad.take_press().ok_or(nb::Error::WouldBlock)?;
        self.key_wait = false;
        self.regs.set_v(x, key)?;
        self.advance();
        Ok(())
    }

    /// Set the delay timer to the value of register VX
    /// FX15
    fn assign_delay_t_vx(&mut self, x: u8) -> Result<(), Fault> {
        self.delay_timer.store(self.regs.v(x)?);
        self.advance();
        Ok(())
    }

    /// Set the sound timer to the value of register VX
    /// FX18
    fn assign_sound_t_vx(&mut self, x: u8) -> Result<(), Fault> {
        self.sound_timer.store(self.regs.v(x)?);
        self.advance();
        Ok(())
    }

    /// Add the value stored in register VX to register I
    /// FX1E
    fn assign_add_i_vx(&mut self, x: u8) -> Result<(), Fault> {
        self.regs.i = self.regs.i.wrapping_add(self.regs.v(x)? as u16);
        self.advance();
        Ok(())
    }

    /// Set I to the memory address of the sprite data corresponding to the hexadecimal digit stored in register VX
    /// FX29
    fn assign_i_addr_of_sprite_vx(&mut self, x: u8) -> Result<(), Fault> {
        self.regs.i = glyph_addr(self.regs.v(x)?);
        self.advance();
        Ok(())
    }

    /// Store the binary-coded decimal equivalent of the value stored in register VX at addresses I, I+1, and I+2
    /// FX33
    fn assign_mem_at_i_bcd_of_vx(&mut self, x: u8) -> Result<(), Fault> {
        let value = self.regs.v(x)?;
        let digits = [value / 100, (value % 100) / 10, value % 10];
        self.memory.store(self.regs.i, &digits)?;
        self.advance();
        Ok(())
    }

    /// Store the values of registers V0 to VX inclusive in memory starting at address I, I is left unchanged
    /// FX55
    fn assign_mem_at_i_v0_to_vx(&mut self, x: u8) -> Result<(), Fault> {
        let regs = self
            .regs
            .as_raw()
            .get(..=x as usize)
            .ok_or(Fault::RegisterOutOfBounds(x))?;
        self.memory.store(self.regs.i, regs)?;
        self.advance();
        Ok(())
    }

    /// Fill registers V0 to VX inclusive with the values stored in memory starting at address I, I is left unchanged
    /// FX65
    fn assign_v0_to_vx_mem_at_i(&mut self, x: u8) -> Result<(), Fault> {
        let count = x as usize + 1;
        let cells = self.memory.slice(self.regs.i, count)?;
        for (idx, &value) in cells.iter().enumerate() {
            self.regs.set_v(idx as u8, value)?;
        }
        self.advance();
        Ok(())
    }

    /// Run a register to register operation
    ///
    /// `op` maps (VX, VY) to the new VX and an optional flag. The flag is
    /// written to VF before VX, so when X is F the result wins.
    fn alu<F>(&mut self, x: u8, y: u8, op: F) -> Result<(), Fault>
    where
        F: FnOnce(u8, u8) -> (u8, Option<bool>),
    {
        let (vx, vy) = (self.regs.v(x)?, self.regs.v(y)?);
        let (value, flag) = op(vx, vy);
        if let Some(flag) = flag {
            self.regs.set_flag(flag);
        }
        self.regs.set_v(x, value)?;
        self.advance();
        Ok(())
    }

    fn key_vx_pressed(&self, x: u8) -> Result<bool, Fault> {
        self.keypad.is_pressed(self.regs.v(x)? & 0x0F)
    }
}
