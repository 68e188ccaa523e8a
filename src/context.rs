//! Context for accessing functionalities of the platform that `Chip8` is
//! emulated on.
//!
//! Only randomness is borrowed from the host. Display and keypad state are
//! owned by the VM and exchanged through `Chip8::frame` and `Chip8::set_key`.

use nanorand::{rand::pcg64::Pcg64, RNG};

/// Trait aggregating platform functionalities
pub trait Context {
    /// Generate random 8-bit number
    ///
    /// Called by `step` whenever requested by the executing program
    fn gen_random(&mut self) -> u8;
}

impl<C: Context + ?Sized> Context for &mut C {
    fn gen_random(&mut self) -> u8 {
        (**self).gen_random()
    }
}

/// Default context backed by a seeded PCG generator
pub struct PcgContext {
    rng: Pcg64,
}

impl PcgContext {
    /// The VM has no clock of its own, so hosts wanting different sequences
    /// between runs should seed it from their own entropy source.
    pub fn new(seed: u128) -> Self {
        Self {
            rng: Pcg64::new_seed(seed),
        }
    }
}

impl Default for PcgContext {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Context for PcgContext {
    fn gen_random(&mut self) -> u8 {
        self.rng.generate::<u8>()
    }
}
