use std::fs;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{error, info};
use sdl2::event::Event;

use chip8vm_core::constants::TIMER_HZ;
use chip8vm_core::Chip8;
use chip8vm_display::Display;

use crate::audio::Beeper;
use crate::keymap::{keymap, Input};
use crate::Args;

/// Runs a ROM until the window is closed or the VM hits a fatal error.
///
/// The loop is paced in 60Hz frames: each frame handles input, runs `ips / 60` cycles, ticks the
/// timers once and then sleeps off whatever is left of the frame.
pub fn run(args: &Args) -> Result<()> {
    let rom = fs::read(&args.rom)
        .with_context(|| format!("unable to read ROM {}", args.rom.display()))?;
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };
    chip8.load_rom(&rom).context("unable to load ROM")?;
    info!("loaded {} ({} bytes)", args.rom.display(), rom.len());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, args.scale)?;
    let mut beeper = if args.mute {
        None
    } else {
        Some(Beeper::new(&sdl)?)
    };
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    // Set initial timing
    let frame_time = Duration::from_secs(1) / TIMER_HZ;
    let cycles_per_frame = (args.ips / TIMER_HZ).max(1);

    // Whether or not the frame pacing should be respected
    let mut fast_forward = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind = false;

    display.render(chip8.frame())?;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match keymap(key) {
                    Some(Input::Key(kc)) => chip8.key_press(kc)?,
                    Some(Input::FastForward) => fast_forward = true,
                    Some(Input::Rewind) => rewind = true,
                    Some(Input::Quit) => break 'event,
                    None => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match keymap(key) {
                    Some(Input::Key(kc)) => chip8.key_release(kc)?,
                    Some(Input::FastForward) => fast_forward = false,
                    Some(Input::Rewind) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if rewind {
            for _ in 0..cycles_per_frame {
                if !chip8.rewind() {
                    break;
                }
            }
        } else {
            for _ in 0..cycles_per_frame {
                if let Err(e) = chip8.cycle() {
                    error!("halting at {:#05X}: {}", chip8.state().pc, e);
                    return Err(e.into());
                }
            }
            chip8.tick_timers();
        }

        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }
        if let Some(beeper) = beeper.as_mut() {
            beeper.set_playing(chip8.is_sound_active() && !rewind);
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if !fast_forward {
            if let Some(remaining) = frame_time.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }
    }

    Ok(())
}
