use chip8vm_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, STACK_DEPTH};
use chip8vm_core::{Chip8, Chip8Error};

fn load(rom: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_seed(0x5EED);
    chip8.load_rom(rom).unwrap();
    chip8
}

fn run(rom: &[u8], cycles: usize) -> Chip8 {
    let mut chip8 = load(rom);
    for _ in 0..cycles {
        chip8.cycle().unwrap();
    }
    chip8
}

fn lit_pixels(chip8: &Chip8) -> usize {
    chip8
        .frame()
        .iter()
        .map(|row| row.iter().filter(|&&p| p == 1).count())
        .sum()
}

/// A chain of `depth` subroutines, each calling the next and returning straight after.
///
/// ```text
/// 0x200  CALL 0x204
/// 0x202  JP 0x202        ; the outermost caller parks here
/// 0x204  CALL 0x208
/// 0x206  RET
/// ...
/// 0x200 + 4 * depth  RET
/// ```
fn nested_calls(depth: usize) -> Vec<u8> {
    let mut rom = Vec::new();
    for level in 0..depth {
        let callee = 0x200 + 4 * (level as u16 + 1);
        rom.extend_from_slice(&[0x20 | (callee >> 8) as u8, callee as u8]);
        if level == 0 {
            rom.extend_from_slice(&[0x12, 0x02]);
        } else {
            rom.extend_from_slice(&[0x00, 0xEE]);
        }
    }
    rom.extend_from_slice(&[0x00, 0xEE]);
    rom
}

#[test]
fn load_then_add() {
    // LD V0, 0x0A; ADD V0, 0x05
    let chip8 = run(&[0x60, 0x0A, 0x70, 0x05], 2);
    assert_eq!(chip8.state().v[0x0], 0x0F);
    assert_eq!(chip8.state().pc, 0x204);
}

#[test]
fn draw_sprite_from_rom_data() {
    // LD I, 0x250; DRW V0, V0, 5 with a 5 byte sprite at 0x250
    let sprite = [0b1000_0001, 0b0100_0010, 0b0011_1100, 0b0100_0010, 0b1000_0001];
    let mut rom = vec![0x00; 0x55];
    rom[..4].copy_from_slice(&[0xA2, 0x50, 0xD0, 0x05]);
    rom[0x50..0x55].copy_from_slice(&sprite);

    let chip8 = run(&rom, 2);
    let frame = chip8.frame();
    for (y, row) in sprite.iter().enumerate() {
        for x in 0..8 {
            let expected = (row >> (7 - x)) & 0x1;
            assert_eq!(frame[y][x], expected, "pixel ({}, {})", x, y);
        }
    }
    assert_eq!(lit_pixels(&chip8), 12);
    assert_eq!(chip8.state().v[0xF], 0x0);
}

#[test]
fn drawing_twice_erases() {
    // CLS; LD I, font 0; DRW V0, V1, 5; DRW V0, V1, 5
    let rom = [0x00, 0xE0, 0xA0, 0x50, 0xD0, 0x15, 0xD0, 0x15];
    let mut chip8 = run(&rom, 3);
    assert_eq!(lit_pixels(&chip8), 14);
    assert_eq!(chip8.state().v[0xF], 0x0);

    chip8.cycle().unwrap();
    assert_eq!(lit_pixels(&chip8), 0);
    assert_eq!(chip8.state().v[0xF], 0x1);
}

#[test]
fn sprite_wraps_horizontally() {
    // LD V0, 63; LD I, 0x208; DRW V0, V1, 1; data 0xC0
    let rom = [0x60, 0x3F, 0xA2, 0x08, 0xD0, 0x11, 0x00, 0x00, 0xC0];
    let chip8 = run(&rom, 3);
    assert_eq!(chip8.frame()[0][DISPLAY_WIDTH - 1], 1);
    assert_eq!(chip8.frame()[0][0], 1);
    assert_eq!(chip8.frame()[0][1], 0);
    assert_eq!(chip8.frame()[DISPLAY_HEIGHT - 1][0], 0);
}

#[test]
fn calls_nest_to_stack_depth_and_return() {
    let mut chip8 = load(&nested_calls(STACK_DEPTH));
    for level in 1..=STACK_DEPTH {
        chip8.cycle().unwrap();
        assert_eq!(chip8.state().sp as usize, level);
    }
    assert_eq!(chip8.state().pc, 0x200 + 4 * STACK_DEPTH as u16);

    for level in (0..STACK_DEPTH).rev() {
        chip8.cycle().unwrap();
        // back just after the CALL made at this level
        assert_eq!(chip8.state().pc, 0x200 + 4 * level as u16 + 2);
        assert_eq!(chip8.state().sp as usize, level);
    }
}

#[test]
fn one_call_too_many_overflows() {
    let mut chip8 = load(&nested_calls(STACK_DEPTH + 1));
    for _ in 0..STACK_DEPTH {
        chip8.cycle().unwrap();
    }
    assert_eq!(chip8.cycle(), Err(Chip8Error::StackOverflow));
}

#[test]
fn return_without_call_underflows() {
    let mut chip8 = load(&[0x00, 0xEE]);
    assert_eq!(chip8.cycle(), Err(Chip8Error::StackUnderflow));
}

#[test]
fn wait_for_key_blocks_until_pressed() {
    // LD V3, K; LD V4, V3
    let mut chip8 = load(&[0xF3, 0x0A, 0x84, 0x30]);
    chip8.cycle().unwrap();
    assert!(chip8.is_awaiting_key());

    chip8.cycle().unwrap();
    chip8.cycle().unwrap();
    assert_eq!(chip8.state().pc, 0x202);

    chip8.key_press(0xB).unwrap();
    chip8.cycle().unwrap();
    assert_eq!(chip8.state().v[0x4], 0xB);
}

#[test]
fn skip_on_key() {
    // LD V0, 0x7; SKP V0; LD V1, 0x1; LD V2, 0x2
    let rom = [0x60, 0x07, 0xE0, 0x9E, 0x61, 0x01, 0x62, 0x02];
    let mut chip8 = load(&rom);
    chip8.key_press(0x7).unwrap();
    for _ in 0..3 {
        chip8.cycle().unwrap();
    }
    assert_eq!(chip8.state().v[0x1], 0x0);
    assert_eq!(chip8.state().v[0x2], 0x2);
}

#[test]
fn delay_timer_round_trip() {
    // LD V0, 0x3; LD DT, V0; LD V1, DT
    let rom = [0x60, 0x03, 0xF0, 0x15, 0xF1, 0x07];
    let mut chip8 = run(&rom, 2);
    chip8.tick_timers();
    chip8.cycle().unwrap();
    assert_eq!(chip8.state().v[0x1], 0x2);
}

#[test]
fn sound_timer_drives_tone() {
    // LD V0, 0x2; LD ST, V0
    let mut chip8 = run(&[0x60, 0x02, 0xF0, 0x18], 2);
    assert!(chip8.is_sound_active());
    chip8.tick_timers();
    chip8.tick_timers();
    assert!(!chip8.is_sound_active());
}

#[test]
fn bcd_then_load_registers() {
    // LD V0, 254; LD I, 0x300; LD B, V0; LD V2, [I]
    let rom = [0x60, 0xFE, 0xA3, 0x00, 0xF0, 0x33, 0xF2, 0x65];
    let chip8 = run(&rom, 4);
    assert_eq!(chip8.state().v[..3], [2, 5, 4]);
    assert_eq!(chip8.state().i, 0x300);
}

#[test]
fn font_lookup_draws_glyph() {
    // LD V0, 0x1; LD F, V0; DRW V2, V2, 5
    let chip8 = run(&[0x60, 0x01, 0xF0, 0x29, 0xD2, 0x25], 3);
    // glyph 1: 0x20 0x60 0x20 0x20 0x70
    assert_eq!(chip8.frame()[0][..4], [0, 0, 1, 0]);
    assert_eq!(chip8.frame()[1][..4], [0, 1, 1, 0]);
    assert_eq!(chip8.frame()[4][..4], [0, 1, 1, 1]);
}

#[test]
fn unknown_opcode_after_valid_ones() {
    // LD V0, 0x1; then 0x0000
    let mut chip8 = load(&[0x60, 0x01, 0x00, 0x00]);
    chip8.cycle().unwrap();
    assert_eq!(
        chip8.cycle(),
        Err(Chip8Error::UnknownOpcode { opcode: 0x0000 })
    );
}

#[test]
fn index_pushed_past_memory_then_drawn() {
    // LD I, 0xFFF; LD V1, 0x10; ADD I, V1; DRW V0, V0, 0
    let mut chip8 = load(&[0xAF, 0xFF, 0x61, 0x10, 0xF1, 0x1E, 0xD0, 0x00]);
    chip8.cycle().unwrap();
    chip8.cycle().unwrap();
    assert_eq!(
        chip8.cycle(),
        Err(Chip8Error::MemoryOutOfBounds { address: 0x100F })
    );
    assert_eq!(chip8.state().i, 0xFFF);
}
