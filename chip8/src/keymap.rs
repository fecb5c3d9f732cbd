use sdl2::keyboard::Keycode;

/// What a host key means to the emulator
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Input {
    /// One of the Chip-8 keys 0..F
    Key(u8),
    /// Run as fast as possible while held
    FastForward,
    /// Step backwards through saved states while held
    Rewind,
    Quit,
}

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
/// Space fast-forwards, Backspace rewinds and Escape quits.
pub fn keymap(key: Keycode) -> Option<Input> {
    let input = match key {
        Keycode::X => Input::Key(0x0),
        Keycode::Num1 => Input::Key(0x1),
        Keycode::Num2 => Input::Key(0x2),
        Keycode::Num3 => Input::Key(0x3),
        Keycode::Q => Input::Key(0x4),
        Keycode::W => Input::Key(0x5),
        Keycode::E => Input::Key(0x6),
        Keycode::A => Input::Key(0x7),
        Keycode::S => Input::Key(0x8),
        Keycode::D => Input::Key(0x9),
        Keycode::Z => Input::Key(0xA),
        Keycode::C => Input::Key(0xB),
        Keycode::Num4 => Input::Key(0xC),
        Keycode::R => Input::Key(0xD),
        Keycode::F => Input::Key(0xE),
        Keycode::V => Input::Key(0xF),
        Keycode::Space => Input::FastForward,
        Keycode::Backspace => Input::Rewind,
        Keycode::Escape => Input::Quit,
        _ => return None,
    };
    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_corners() {
        assert_eq!(keymap(Keycode::Num1), Some(Input::Key(0x1)));
        assert_eq!(keymap(Keycode::Num4), Some(Input::Key(0xC)));
        assert_eq!(keymap(Keycode::Z), Some(Input::Key(0xA)));
        assert_eq!(keymap(Keycode::V), Some(Input::Key(0xF)));
    }

    #[test]
    fn test_controls() {
        assert_eq!(keymap(Keycode::Space), Some(Input::FastForward));
        assert_eq!(keymap(Keycode::Backspace), Some(Input::Rewind));
        assert_eq!(keymap(Keycode::Escape), Some(Input::Quit));
    }

    #[test]
    fn test_unmapped() {
        assert_eq!(keymap(Keycode::P), None);
    }
}
