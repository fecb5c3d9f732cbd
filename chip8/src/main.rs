use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use chip8vm_core::constants::DEFAULT_CYCLES_PER_SECOND;

mod audio;
mod keymap;
mod run;

/// Runs a Chip-8 ROM in an SDL2 window.
///
/// Keypad: 1234 / QWER / ASDF / ZXCV. Hold Space to fast-forward, hold Backspace to rewind,
/// Escape quits. Set RUST_LOG=trace to see every executed instruction.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to the ROM to run
    pub rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = DEFAULT_CYCLES_PER_SECOND)]
    pub ips: u32,

    /// On-screen size of each Chip-8 pixel
    #[arg(long, default_value_t = 10)]
    pub scale: u32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Don't play a tone while the sound timer runs
    #[arg(long)]
    pub mute: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(&args)
}
