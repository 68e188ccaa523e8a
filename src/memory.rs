use crate::error::Fault;

pub const MEM_LENGTH: usize = 4096;
/// First address of program code, everything below is reserved for the interpreter
pub const START_ADDR: u16 = 0x200;
/// Longest program that fits between `START_ADDR` and the end of memory
pub const MAX_ROM_LENGTH: usize = MEM_LENGTH - START_ADDR as usize;

/// Bounds-checked 4 KiB address space
#[derive(Clone, PartialEq, Eq)]
pub struct Memory([u8; MEM_LENGTH]);

impl Memory {
    pub fn new() -> Self {
        Self([0; MEM_LENGTH])
    }

    pub fn read(&self, addr: u16) -> Result<u8, Fault> {
        self.0
            .get(addr as usize)
            .copied()
            .ok_or(Fault::AddressOutOfBounds(addr))
    }

    /// Read a big-endian word from `addr` and `addr + 1`
    pub fn read_word(&self, addr: u16) -> Result<u16, Fault> {
        let hi = self.read(addr)?;
        let lo = self.read(addr.checked_add(1).ok_or(Fault::AddressOutOfBounds(addr))?)?;
        Ok((hi as u16) << 8 | lo as u16)
    }

    /// View `len` cells starting at `addr`
    pub fn slice(&self, addr: u16, len: usize) -> Result<&[u8], Fault> {
        let start = addr as usize;
        self.0
            .get(start..start + len)
            .ok_or_else(|| Fault::AddressOutOfBounds(Self::last_addr(start, len)))
    }

    fn slice_mut(&mut self, addr: u16, len: usize) -> Result<&mut [u8], Fault> {
        let start = addr as usize;
        self.0
            .get_mut(start..start + len)
            .ok_or_else(|| Fault::AddressOutOfBounds(Self::last_addr(start, len)))
    }

    /// Copy `data` into memory starting at `addr`, reserved area included
    pub fn load(&mut self, addr: u16, data: &[u8]) -> Result<(), Fault> {
        self.slice_mut(addr, data.len())?.copy_from_slice(data);
        Ok(())
    }

    /// Program store of `data` at `addr`, which must not touch the reserved area
    pub fn store(&mut self, addr: u16, data: &[u8]) -> Result<(), Fault> {
        if addr < START_ADDR {
            return Err(Fault::ReservedAddress(addr));
        }
        self.load(addr, data)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8; MEM_LENGTH] {
        &mut self.0
    }

    fn last_addr(start: usize, len: usize) -> u16 {
        (start + len.saturating_sub(1)).min(u16::MAX as usize) as u16
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Memory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Memory").field("len", &self.0.len()).finish()
    }
}
