use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, KEY_COUNT, PROGRAM_START, REGISTER_COUNT,
    STACK_DEPTH,
};
use crate::error::{Chip8Error, Result};
use crate::memory::Memory;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of pending subroutine calls (0..=16)
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - Both count down to 0 at 60Hz; the host plays a tone while the sound timer is non-zero
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
/// - 64x32 frame buffer
///     - stores the contents of the next frame to be drawn
///
/// ## Input
/// - the pressed status of keys 0..F
/// - Emulation halts while `awaiting_key` until a key's value is written to that register
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: [bool; KEY_COUNT],
    pub awaiting_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory: Memory::new(),
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keypad: [false; KEY_COUNT],
            awaiting_key: None,
        }
    }

    /// Writes VF as 0 or 1.
    /// Instructions that produce a flag call this after storing their result.
    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = u8::from(flag);
    }

    /// stack[sp] = addr; sp += 1
    pub fn push(&mut self, addr: u16) -> Result<()> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Chip8Error::StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    /// sp -= 1; stack[sp]
    pub fn pop(&mut self) -> Result<u16> {
        self.sp = self.sp.checked_sub(1).ok_or(Chip8Error::StackUnderflow)?;
        Ok(self.stack[self.sp as usize])
    }

    /// Skips the next instruction when `condition` holds
    pub fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc += 2;
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The FrameBuffer is indexed as [y][x]; every pixel is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
