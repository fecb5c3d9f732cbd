use thiserror::Error;

/// Everything that can stop a Chip-8 program.
///
/// None of these can happen while running a well-formed ROM, so they are all fatal to the
/// VM instance that raised them; it's up to the host to decide whether to halt, reset or report.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Chip8Error {
    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("stack overflow: more than 16 nested subroutine calls")]
    StackOverflow,

    #[error("stack underflow: return with no pending subroutine call")]
    StackUnderflow,

    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("invalid key {key:#04X}, the keypad only has keys 0x0..0xF")]
    InvalidKey { key: u8 },
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
