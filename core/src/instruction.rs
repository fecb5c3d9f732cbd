use std::fmt;

use rand::Rng;

use crate::error::{Chip8Error, Result};
use crate::opcode::Opcode;
use crate::operations as ops;
use crate::state::State;

/// A decoded Chip-8 instruction along with its operands.
///
/// `x` and `y` are register indices, `kk` an immediate byte, `addr` a 12-bit address and `n` a
/// sprite height in rows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    SkipEqByte { x: usize, kk: u8 },
    /// 4xkk
    SkipNeByte { x: usize, kk: u8 },
    /// 5xy0
    SkipEqReg { x: usize, y: usize },
    /// 6xkk
    LoadByte { x: usize, kk: u8 },
    /// 7xkk
    AddByte { x: usize, kk: u8 },
    /// 8xy0
    Move { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    AddReg { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6
    ShiftRight { x: usize },
    /// 8xy7
    SubN { x: usize, y: usize },
    /// 8xyE
    ShiftLeft { x: usize },
    /// 9xy0
    SkipNeReg { x: usize, y: usize },
    /// Annn
    LoadIndex { addr: u16 },
    /// Bnnn
    JumpOffset { addr: u16 },
    /// Cxkk
    Random { x: usize, kk: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E
    SkipKeyPressed { x: usize },
    /// ExA1
    SkipKeyReleased { x: usize },
    /// Fx07
    LoadDelay { x: usize },
    /// Fx0A
    WaitKey { x: usize },
    /// Fx15
    SetDelay { x: usize },
    /// Fx18
    SetSound { x: usize },
    /// Fx1E
    AddIndex { x: usize },
    /// Fx29
    LoadFont { x: usize },
    /// Fx33
    StoreBcd { x: usize },
    /// Fx55
    StoreRegisters { x: usize },
    /// Fx65
    LoadRegisters { x: usize },
}

impl Instruction {
    /// Selects the Instruction for a given opcode.
    ///
    /// The match below is the decode table: the top nibble picks a category and, for `0___`,
    /// `8xy_`, `Ex__` and `Fx__`, the low nibble or byte picks the operation within it.
    pub fn decode(op: u16) -> Result<Instruction> {
        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.nnn());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Ret,
            (0x1, ..) => Instruction::Jump { addr },
            (0x2, ..) => Instruction::Call { addr },
            (0x3, ..) => Instruction::SkipEqByte { x, kk },
            (0x4, ..) => Instruction::SkipNeByte { x, kk },
            (0x5, .., 0x0) => Instruction::SkipEqReg { x, y },
            (0x6, ..) => Instruction::LoadByte { x, kk },
            (0x7, ..) => Instruction::AddByte { x, kk },
            (0x8, .., 0x0) => Instruction::Move { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddReg { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::ShiftRight { x },
            (0x8, .., 0x7) => Instruction::SubN { x, y },
            (0x8, .., 0xE) => Instruction::ShiftLeft { x },
            (0x9, .., 0x0) => Instruction::SkipNeReg { x, y },
            (0xA, ..) => Instruction::LoadIndex { addr },
            (0xB, ..) => Instruction::JumpOffset { addr },
            (0xC, ..) => Instruction::Random { x, kk },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Instruction::SkipKeyPressed { x },
            (0xE, _, 0xA, 0x1) => Instruction::SkipKeyReleased { x },
            (0xF, _, 0x0, 0x7) => Instruction::LoadDelay { x },
            (0xF, _, 0x0, 0xA) => Instruction::WaitKey { x },
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, _, 0x1, 0x8) => Instruction::SetSound { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex { x },
            (0xF, _, 0x2, 0x9) => Instruction::LoadFont { x },
            (0xF, _, 0x3, 0x3) => Instruction::StoreBcd { x },
            (0xF, _, 0x5, 0x5) => Instruction::StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => Instruction::LoadRegisters { x },
            _ => return Err(Chip8Error::UnknownOpcode { opcode: op }),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`.
    ///
    /// The program counter has already been advanced past this instruction, so jumps and skips
    /// only ever overwrite or bump it.
    pub fn execute<R: Rng>(self, state: &mut State, rng: &mut R) -> Result<()> {
        match self {
            Instruction::Cls => ops::clr(state),
            Instruction::Ret => ops::rts(state)?,
            Instruction::Jump { addr } => ops::jump(state, addr),
            Instruction::Call { addr } => ops::call(state, addr)?,
            Instruction::SkipEqByte { x, kk } => ops::ske(state, x, kk),
            Instruction::SkipNeByte { x, kk } => ops::skne(state, x, kk),
            Instruction::SkipEqReg { x, y } => ops::skre(state, x, y),
            Instruction::LoadByte { x, kk } => ops::load(state, x, kk),
            Instruction::AddByte { x, kk } => ops::add(state, x, kk),
            Instruction::Move { x, y } => ops::mv(state, x, y),
            Instruction::Or { x, y } => ops::or(state, x, y),
            Instruction::And { x, y } => ops::and(state, x, y),
            Instruction::Xor { x, y } => ops::xor(state, x, y),
            Instruction::AddReg { x, y } => ops::addr(state, x, y),
            Instruction::Sub { x, y } => ops::sub(state, x, y),
            Instruction::ShiftRight { x } => ops::shr(state, x),
            Instruction::SubN { x, y } => ops::subn(state, x, y),
            Instruction::ShiftLeft { x } => ops::shl(state, x),
            Instruction::SkipNeReg { x, y } => ops::skrne(state, x, y),
            Instruction::LoadIndex { addr } => ops::loadi(state, addr),
            Instruction::JumpOffset { addr } => ops::jumpi(state, addr)?,
            Instruction::Random { x, kk } => ops::rnd(state, x, kk, rng.random()),
            Instruction::Draw { x, y, n } => ops::draw(state, x, y, n)?,
            Instruction::SkipKeyPressed { x } => ops::skpr(state, x),
            Instruction::SkipKeyReleased { x } => ops::skup(state, x),
            Instruction::LoadDelay { x } => ops::moved(state, x),
            Instruction::WaitKey { x } => ops::keyd(state, x),
            Instruction::SetDelay { x } => ops::loads(state, x),
            Instruction::SetSound { x } => ops::ld(state, x),
            Instruction::AddIndex { x } => ops::addi(state, x)?,
            Instruction::LoadFont { x } => ops::ldspr(state, x),
            Instruction::StoreBcd { x } => ops::bcd(state, x)?,
            Instruction::StoreRegisters { x } => ops::stor(state, x)?,
            Instruction::LoadRegisters { x } => ops::read(state, x)?,
        }
        Ok(())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Cls => write!(f, "CLS"),
            Instruction::Ret => write!(f, "RET"),
            Instruction::Jump { addr } => write!(f, "JP {:#05X}", addr),
            Instruction::Call { addr } => write!(f, "CALL {:#05X}", addr),
            Instruction::SkipEqByte { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SkipNeByte { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LoadByte { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::AddByte { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight { x } => write!(f, "SHR V{:X}", x),
            Instruction::SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft { x } => write!(f, "SHL V{:X}", x),
            Instruction::SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LoadIndex { addr } => write!(f, "LD I, {:#05X}", addr),
            Instruction::JumpOffset { addr } => write!(f, "JP V0, {:#05X}", addr),
            Instruction::Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::SkipKeyPressed { x } => write!(f, "SKP V{:X}", x),
            Instruction::SkipKeyReleased { x } => write!(f, "SKNP V{:X}", x),
            Instruction::LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::WaitKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSound { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadFont { x } => write!(f, "LD F, V{:X}", x),
            Instruction::StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
