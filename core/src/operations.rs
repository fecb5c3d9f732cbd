use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, FONT_START, MEMORY_SIZE};
use crate::error::{Chip8Error, Result};
use crate::state::State;

// Every operation that produces a flag stores its primary result first and writes VF last, so
// that when Vx is VF the flag is what survives.

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<()> {
    state.pc = state.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<()> {
    state.push(state.pc)?;
    state.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: usize, kk: u8) {
    state.skip_if(state.v[x] == kk);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: usize, kk: u8) {
    state.skip_if(state.v[x] != kk);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: usize, y: usize) {
    state.skip_if(state.v[x] == state.v[y]);
}

/// Vx = kk
pub fn load(state: &mut State, x: usize, kk: u8) {
    state.v[x] = kk;
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: usize, kk: u8) {
    state.v[x] = state.v[x].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: usize, y: usize) {
    state.v[x] = state.v[y];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: usize, y: usize) {
    state.v[x] |= state.v[y];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: usize, y: usize) {
    state.v[x] &= state.v[y];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: usize, y: usize) {
    state.v[x] ^= state.v[y];
}

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: usize, y: usize) {
    let (res, over) = state.v[x].overflowing_add(state.v[y]);
    state.v[x] = res;
    state.set_flag(over);
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: usize, y: usize) {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.v[x] = vx.wrapping_sub(vy);
    state.set_flag(vx > vy);
}

/// Vx >>= 1; VF = lsb
pub fn shr(state: &mut State, x: usize) {
    let vx = state.v[x];
    state.v[x] = vx >> 1;
    state.set_flag(vx & 0x1 == 0x1);
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &mut State, x: usize, y: usize) {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.v[x] = vy.wrapping_sub(vx);
    state.set_flag(vy > vx);
}

/// Vx <<= 1; VF = msb
pub fn shl(state: &mut State, x: usize) {
    let vx = state.v[x];
    state.v[x] = vx << 1;
    state.set_flag(vx & 0x80 != 0);
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: usize, y: usize) {
    state.skip_if(state.v[x] != state.v[y]);
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
}

/// PC = V0 + addr
/// The target has to stay inside memory; there's no wrapping back to 0x000
pub fn jumpi(state: &mut State, addr: u16) -> Result<()> {
    let target = addr + u16::from(state.v[0x0]);
    if target as usize >= MEMORY_SIZE {
        return Err(Chip8Error::MemoryOutOfBounds {
            address: target as usize,
        });
    }
    state.pc = target;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rnd(state: &mut State, x: usize, kk: u8, rand_byte: u8) {
    state.v[x] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in memory I..I+n onto the FrameBuffer at (Vx, Vy).
///
/// Each pixel wraps around the edges of the display on its own, so a sprite drawn at x=63 has
/// its second column at x=0. VF is set if any pixel that was on gets turned off.
pub fn draw(state: &mut State, x: usize, y: usize, n: u8) -> Result<()> {
    let origin_x = state.v[x] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[y] as usize % DISPLAY_HEIGHT;
    let sprite = state.memory.slice(state.i as usize, n as usize)?;

    let mut collision = false;
    for (row, byte) in sprite.iter().enumerate() {
        let py = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if (byte >> (7 - bit)) & 0x1 == 0 {
                continue;
            }
            let px = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel = &mut state.frame_buffer[py][px];
            collision |= *pixel == 0x1;
            *pixel ^= 0x1;
        }
    }

    state.draw_flag = true;
    state.set_flag(collision);
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: usize) {
    state.skip_if(state.keypad[usize::from(state.v[x] & 0xF)]);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: usize) {
    state.skip_if(!state.keypad[usize::from(state.v[x] & 0xF)]);
}

/// Vx = DT
pub fn moved(state: &mut State, x: usize) {
    state.v[x] = state.delay_timer;
}

/// await keypress for Vx
pub fn keyd(state: &mut State, x: usize) {
    state.awaiting_key = Some(x as u8);
}

/// DT = Vx
pub fn loads(state: &mut State, x: usize) {
    state.delay_timer = state.v[x];
}

/// ST = Vx
pub fn ld(state: &mut State, x: usize) {
    state.sound_timer = state.v[x];
}

/// I += Vx
pub fn addi(state: &mut State, x: usize) -> Result<()> {
    let target = state.i + u16::from(state.v[x]);
    if target as usize >= MEMORY_SIZE {
        return Err(Chip8Error::MemoryOutOfBounds {
            address: target as usize,
        });
    }
    state.i = target;
    Ok(())
}

/// I = FONT_START + Vx * 5
/// Set I to the memory address of the font glyph for the low nibble of Vx
pub fn ldspr(state: &mut State, x: usize) {
    state.i = FONT_START + u16::from(state.v[x] & 0xF) * FONT_GLYPH_SIZE;
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: usize) -> Result<()> {
    let vx = state.v[x];
    let bcd = [vx / 100, vx / 10 % 10, vx % 10];
    state.memory.load(state.i as usize, &bcd)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: usize) -> Result<()> {
    state.memory.load(state.i as usize, &state.v[..=x])
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: usize) -> Result<()> {
    let bytes = state.memory.slice(state.i as usize, x + 1)?;
    state.v[..=x].copy_from_slice(bytes);
    Ok(())
}
