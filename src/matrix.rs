use rand::Rng;
use raylib::prelude::*;
use crate::constants::*;
use crate::engine::{Engine, Stage};
use crate::slideshow::placement::Size;

const HIGHLIGHT: Color = Color::new(50, 255, 50, 255);
const FONT_SIZE: i32 = 20;

struct Column {
    x: i32,
    y: i32,
    speed: i32,
    chars: Vec<char>,
    highlight: usize,
}

impl Column {
    fn new<R: Rng + ?Sized>(rng: &mut R, bounds: Size) -> Self {
        let len = rng.random_range(10..=30);
        Self {
            x: rng.random_range(0..=bounds.width.max(0)),
            y: rng.random_range(-500..=0),
            speed: rng.random_range(1..=3),
            chars: (0..len).map(|_| char::from(rng.random_range(33u8..=126))).collect(),
            highlight: 0,
        }
    }

    fn fall<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Size) {
        self.y += self.speed;
        self.highlight = (self.highlight + 1) % self.chars.len();

        // Respawn above the screen once the head leaves the bottom
        if self.y > bounds.height {
            self.y = rng.random_range(-500..=-100);
            self.x = rng.random_range(0..=bounds.width.max(0));
        }
    }
}

/// Matrix style falling characters.
pub struct MatrixRain {
    columns: Vec<Column>,
    bounds: Size,
}

impl MatrixRain {
    pub fn new(bounds: Size) -> Self {
        let mut rng = rand::rng();
        let columns = (0..MATRIX_COLUMNS).map(|_| Column::new(&mut rng, bounds)).collect();
        Self { columns, bounds }
    }

    fn fall(&mut self) {
        let mut rng = rand::rng();
        for column in self.columns.iter_mut() {
            column.fall(&mut rng, self.bounds);
        }
    }
}

impl Engine for MatrixRain {
    fn update(&mut self, _stage: &mut Stage) {
        self.fall();
    }

    fn draw(&self, _stage: &Stage, d: &mut RaylibDrawHandle) {
        let mut buffer = [0u8; 4];
        for column in &self.columns {
            for (i, ch) in column.chars.iter().enumerate() {
                let y = column.y + i as i32 * MATRIX_ROW_SPACING;
                if y < 0 || y > self.bounds.height {
                    continue;
                }

                // Dimmer further down the trail
                let color = if i == column.highlight {
                    HIGHLIGHT
                } else {
                    Color::new(0, 255u8.saturating_sub((i * 15).min(255) as u8), 0, 255)
                };
                d.draw_text(ch.encode_utf8(&mut buffer), column.x, y, FONT_SIZE, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_start_within_ranges() {
        let rain = MatrixRain::new(Size::new(800, 600));
        assert_eq!(rain.columns.len(), MATRIX_COLUMNS);
        for column in &rain.columns {
            assert!((0..=800).contains(&column.x));
            assert!((-500..=0).contains(&column.y));
            assert!((1..=3).contains(&column.speed));
            assert!((10..=30).contains(&column.chars.len()));
            assert!(column.chars.iter().all(|c| ('!'..='~').contains(c)));
        }
    }

    #[test]
    fn columns_respawn_above_the_screen() {
        let bounds = Size::new(320, 240);
        let mut rain = MatrixRain::new(bounds);
        // Slowest column needs (240 + 500) / 1 frames to fall off
        for _ in 0..800 {
            rain.fall();
            for column in &rain.columns {
                assert!(column.y <= bounds.height);
                assert!((0..=bounds.width).contains(&column.x));
                assert!(column.highlight < column.chars.len());
            }
        }
    }
}
