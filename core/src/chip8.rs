use std::collections::VecDeque;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{KEY_COUNT, MAX_ROM_SIZE, MAX_SAVED_STATES, PROGRAM_START};
use crate::error::{Chip8Error, Result};
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - the random source behind `Cxkk`, seeded once per instance
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
///
/// Nothing here knows about wall-clock time. The host decides how many cycles to run per
/// second and calls `tick_timers` at 60Hz on its own schedule.
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    rng: StdRng,
}

impl Chip8 {
    /// A fresh VM whose random source is seeded by the OS
    pub fn new() -> Self {
        Chip8::with_rng(StdRng::from_os_rng())
    }

    /// A fresh VM whose `Cxkk` results are reproducible from `seed`
    pub fn with_seed(seed: u64) -> Self {
        Chip8::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::with_capacity(MAX_SAVED_STATES),
            rng,
        }
    }

    /// Load a rom into memory at `PROGRAM_START`
    ///
    /// # Arguments
    /// * `rom` raw Chip-8 machine code; there's no header
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        self.state.memory.load(PROGRAM_START as usize, rom)?;
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn, and unsets the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// The current contents of the display, whether or not it changed
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// Whether the host should be playing a tone
    pub fn is_sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Whether execution is stalled on `Fx0A` until a key is pressed
    pub fn is_awaiting_key(&self) -> bool {
        self.state.awaiting_key.is_some()
    }

    /// Read-only access to everything, for debuggers and tests
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) -> Result<()> {
        let slot = Chip8::key_slot(key)?;
        self.state.keypad[slot] = true;
        if let Some(register) = self.state.awaiting_key.take() {
            debug!("key {:X} pressed, resuming with V{:X}", key, register);
            self.state.v[register as usize] = key;
        }
        Ok(())
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) -> Result<()> {
        let slot = Chip8::key_slot(key)?;
        self.state.keypad[slot] = false;
        Ok(())
    }

    fn key_slot(key: u8) -> Result<usize> {
        let slot = key as usize;
        if slot < KEY_COUNT {
            Ok(slot)
        } else {
            Err(Chip8Error::InvalidKey { key })
        }
    }

    /// Advances the CPU by a single cycle
    /// - does nothing if awaiting a keypress
    /// - fetches the opcode at pc, moves pc past it, then decodes and executes it
    ///
    /// Any error is fatal; the state is left as the failing instruction left it, and the state
    /// from before the cycle is still available through `rewind`.
    pub fn cycle(&mut self) -> Result<()> {
        if self.state.awaiting_key.is_some() {
            return Ok(());
        }

        let pc = self.state.pc;
        let op = self.state.memory.word(pc as usize)?;
        self.save_state();
        self.state.pc += 2;

        let instruction = Instruction::decode(op)?;
        trace!(
            "{:04X}: {:04X} {:<16} v{:02X?} i{:04X}",
            pc,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i
        );
        instruction.execute(&mut self.state, &mut self.rng)?;

        if let Instruction::WaitKey { x } = instruction {
            debug!("waiting for a key press to store in V{:X}", x);
        }
        Ok(())
    }

    /// Decrements the delay and sound timers, stopping at 0.
    /// The host calls this at `TIMER_HZ` independently of how fast it cycles the CPU.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    ///
    /// Returns whether anything was restored.
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                self.state.draw_flag = true;
                true
            }
            None => {
                warn!("no earlier state to rewind to");
                false
            }
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already MAX_SAVED_STATES saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.previous_states.len() == MAX_SAVED_STATES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state);
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
