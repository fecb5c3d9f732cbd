/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, fetched big-endian. They are decoded on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within the `8xy_` category
/// - `(_, _, n, n)` specific behavior within the `0___`, `Ex__` and `Fx__` categories
///
/// Nibbles not used to select the operation carry its operands:
/// - `nnn` `(_, n, n, n)` a 12-bit address
/// - `kk`  `(_, _, n, n)` a byte that is assigned to and/or compared with Vx
/// - `x`   `(_, n, _, _)` the register Vx or the range of registers V0..=Vx
/// - `y`   `(_, _, n, _)` the register Vy
/// - `n`   `(_, _, _, n)` a sprite height
pub trait Opcode {
    /// The Opcode's component nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[x___]`
    fn top(&self) -> u8;

    /// `[_x__]` as a register index
    fn x(&self) -> usize;

    /// `[__y_]` as a register index
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.top(), self.x() as u8, self.y() as u8, self.n())
    }

    fn top(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> usize {
        ((self & 0x0F00) >> 8) as usize
    }

    fn y(&self) -> usize {
        ((self & 0x00F0) >> 4) as usize
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
