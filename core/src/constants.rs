/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are loaded (and execution starts) here; everything below is reserved for the interpreter
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of general purpose registers (V0..VF)
pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry/borrow/collision flag
pub const FLAG_REGISTER: usize = 0xF;

/// Maximum number of pending subroutine calls
pub const STACK_DEPTH: usize = 16;

/// Keys 0..F on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// The delay and sound timers count down at 60Hz
pub const TIMER_HZ: u32 = 60;

/// Instructions per second when the host doesn't ask for anything else
pub const DEFAULT_CYCLES_PER_SECOND: u32 = 700;

/// How many past states are kept around for rewinding
pub const MAX_SAVED_STATES: usize = 1024;

/// Where the font sprite sheet lives in the reserved region
pub const FONT_START: u16 = 0x50;

/// Every font glyph is 5 rows tall
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Font
/// Sprites for the hexadecimal digits 0..F.
///
/// Each glyph is 4 pixels wide and 5 rows tall; only the high nibble of each row is used.
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
