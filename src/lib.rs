//! Interpreter core for the CHIP-8 virtual machine.
//!
//! The core owns memory, registers, timers, the display buffer and the
//! keypad state. Rendering, input polling and pacing belong to the host:
//!
//! ```
//! use chip8_core::{Builder, Status};
//!
//! // LD V0, 5; ADD V0, 3
//! let rom = [0x60, 0x05, 0x70, 0x03];
//! let mut chip = Builder::new().with_seed(0).with_program(&rom).build().unwrap();
//!
//! while chip.is_running() {
//!     chip.step().unwrap();
//!     if chip.consume_redraw() {
//!         // present chip.frame() here
//!     }
//! }
//! assert_eq!(chip.v(0), Ok(8));
//! assert_eq!(chip.status(), Status::Stopped);
//! ```
#![no_std]

pub mod builder;
pub mod chip8;
pub mod context;
pub mod error;
pub mod font;
pub mod frame;
mod handlers;
pub mod keypad;
pub mod machine;
pub mod memory;
pub mod opcode;
pub mod registers;
pub mod timer;

pub use builder::Builder;
pub use chip8::{Chip8, Status};
pub use context::{Context, PcgContext};
pub use error::{BuildError, Fault, LoadError, Trap};
pub use frame::{FrameView, HEIGHT, WIDTH};
pub use opcode::Opcode;
