use crate::constants::{FONT, FONT_START, MEMORY_SIZE};
use crate::error::{Chip8Error, Result};

/// # Memory
/// 4096 bytes of flat, byte-addressable memory.
///
/// By convention (nothing enforces it):
/// ```text
/// 0x000-0x1FF  reserved for the interpreter; the font lives at 0x050-0x09F
/// 0x200-0xFFF  program code and data
/// ```
///
/// Every access is bounds checked; anything outside `0x000..0x1000` is an error rather than
/// being wrapped or clamped.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the font installed at `FONT_START`
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font_start = FONT_START as usize;
        bytes[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    pub fn read(&self, addr: usize) -> Result<u8> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(Chip8Error::MemoryOutOfBounds { address: addr })
    }

    pub fn write(&mut self, addr: usize, byte: u8) -> Result<()> {
        let cell = self
            .bytes
            .get_mut(addr)
            .ok_or(Chip8Error::MemoryOutOfBounds { address: addr })?;
        *cell = byte;
        Ok(())
    }

    /// Reads the big-endian 16-bit word at `addr..addr + 2`.
    /// Opcodes are 16 bits but memory is stored as bytes, so we combine two subsequent bytes.
    pub fn word(&self, addr: usize) -> Result<u16> {
        let high = u16::from(self.read(addr)?);
        let low = u16::from(self.read(addr + 1)?);
        Ok(high << 8 | low)
    }

    /// Borrows `len` bytes starting at `addr`
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8]> {
        self.check_range(addr, len)?;
        Ok(&self.bytes[addr..addr + len])
    }

    /// Writes all of `data` starting at `base`.
    /// Memory is left untouched if any of it wouldn't fit.
    pub fn load(&mut self, base: usize, data: &[u8]) -> Result<()> {
        self.check_range(base, data.len())?;
        self.bytes[base..base + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Fails with the first out of range address in `addr..addr + len`
    fn check_range(&self, addr: usize, len: usize) -> Result<()> {
        // An empty range may sit at the very end of memory but never past it
        if addr > MEMORY_SIZE || (addr == MEMORY_SIZE && len > 0) {
            return Err(Chip8Error::MemoryOutOfBounds { address: addr });
        }
        if len > MEMORY_SIZE - addr {
            return Err(Chip8Error::MemoryOutOfBounds {
                address: MEMORY_SIZE,
            });
        }
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_memory {
    use super::*;
    use crate::constants::PROGRAM_START;

    #[test]
    fn test_font_installed() {
        let memory = Memory::new();
        assert_eq!(memory.slice(0x50, 80).unwrap(), &FONT[..]);
    }

    #[test]
    fn test_program_region_zeroed() {
        let memory = Memory::new();
        let start = PROGRAM_START as usize;
        assert!(memory
            .slice(start, MEMORY_SIZE - start)
            .unwrap()
            .iter()
            .all(|&b| b == 0));
    }

    #[test]
    fn test_read_write() {
        let mut memory = Memory::new();
        memory.write(0xFFF, 0xAB).unwrap();
        assert_eq!(memory.read(0xFFF), Ok(0xAB));
    }

    #[test]
    fn test_read_out_of_bounds() {
        let memory = Memory::new();
        assert_eq!(
            memory.read(0x1000),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_write_out_of_bounds() {
        let mut memory = Memory::new();
        assert_eq!(
            memory.write(0x1234, 0x1),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1234 })
        );
    }

    #[test]
    fn test_word_is_big_endian() {
        let mut memory = Memory::new();
        memory.load(0x200, &[0xAA, 0xBB]).unwrap();
        assert_eq!(memory.word(0x200), Ok(0xAABB));
    }

    #[test]
    fn test_word_straddling_end() {
        let memory = Memory::new();
        assert_eq!(
            memory.word(0xFFF),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_load() {
        let mut memory = Memory::new();
        memory.load(0x8, &[0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(
            memory.slice(0x0, 16).unwrap(),
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn test_load_too_much_leaves_memory_untouched() {
        let mut memory = Memory::new();
        assert_eq!(
            memory.load(4089, &[0xFF; 8]),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        );
        assert!(memory.slice(4089, 7).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_empty_slice_anywhere() {
        let memory = Memory::new();
        assert_eq!(memory.slice(0x0, 0), Ok(&[][..]));
        assert_eq!(memory.slice(0x1000, 0), Ok(&[][..]));
    }

    #[test]
    fn test_empty_slice_past_end() {
        let memory = Memory::new();
        assert_eq!(
            memory.slice(0x1234, 0),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1234 })
        );
    }
}
