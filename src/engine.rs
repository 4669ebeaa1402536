use raylib::prelude::*;
use crate::slideshow::placement::Size;
use crate::sound::SoundBank;

/// Everything the scenes share, built once in `main` and handed down by reference.
pub struct Stage<'aud> {
    pub bounds: Size,
    pub sounds: SoundBank<'aud>,
    pub show_graphs: bool,
}

impl<'aud> Stage<'aud> {
    pub fn new(bounds: Size, sounds: SoundBank<'aud>) -> Self {
        Self { bounds, sounds, show_graphs: false }
    }
}

pub trait Engine {
    /// Advances the scene by one frame.
    fn update(&mut self, stage: &mut Stage);
    fn draw(&self, stage: &Stage, d: &mut RaylibDrawHandle);
}

// Text horizontally centered on `center_x`, vertically centered on `center_y`
pub fn draw_text_centered(d: &mut RaylibDrawHandle, text: &str, center_x: i32, center_y: i32, font_size: i32, color: Color) {
    let width = d.measure_text(text, font_size);
    d.draw_text(text, center_x - width / 2, center_y - font_size / 2, font_size, color);
}
