use sdl2::pixels::PixelFormatEnum;
use thiserror::Error;

use chip8vm_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8vm_core::FrameBuffer;

/// SDL2 reports its failures as plain strings
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("sdl2 error: {0}")]
    Sdl(String),
}

fn sdl_err<E: ToString>(e: E) -> DisplayError {
    DisplayError::Sdl(e.to_string())
}

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each Chip-8 pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video().map_err(sdl_err)?;
        let window = video_subsystem
            .window(
                "chip8vm",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(sdl_err)?;
        let canvas = window.into_canvas().build().map_err(sdl_err)?;

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&pixel| std::iter::repeat(pixel * 255).take(3))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(sdl_err)?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // rows may be padded past width * 3 bytes
                for (y, row) in pixels.chunks(DISPLAY_WIDTH * 3).enumerate() {
                    buffer[y * pitch..y * pitch + row.len()].copy_from_slice(row);
                }
            })
            .map_err(sdl_err)?;

        self.canvas.copy(&texture, None, None).map_err(sdl_err)?;
        self.canvas.present();
        Ok(())
    }
}
