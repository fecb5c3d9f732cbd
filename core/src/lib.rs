pub use chip8::Chip8;
pub use error::{Chip8Error, Result};
pub use instruction::Instruction;
pub use memory::Memory;
pub use state::{FrameBuffer, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod memory;
mod opcode;
mod operations;
pub mod state;
