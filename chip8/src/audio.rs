use anyhow::Result;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.2;

struct SquareWave {
    phase_inc: f32,
    phase: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 { VOLUME } else { -VOLUME };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
/// Plays a square wave tone for as long as the sound timer is non-zero.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self> {
        let audio = sdl.audio().map_err(anyhow::Error::msg)?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio
            .open_playback(None, &desired, |spec| SquareWave {
                phase_inc: TONE_HZ / spec.freq as f32,
                phase: 0.0,
            })
            .map_err(anyhow::Error::msg)?;

        Ok(Beeper {
            device,
            playing: false,
        })
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing == self.playing {
            return;
        }
        if playing {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = playing;
    }
}
