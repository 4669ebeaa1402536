use rand::Rng;
use raylib::prelude::*;
use tracing::info;
use crate::constants::*;
use crate::engine::{Engine, Stage, draw_text_centered};
use crate::sound::Tone;

const PHRASES: [&str; 6] = [
    "Initializing hacker mode...",
    "Loading matrix protocols...",
    "Establishing secure connection...",
    "Accessing mainframe...",
    "Decrypting data streams...",
    "System ready. Welcome to the matrix.",
];

const TITLE: &str = "HACKER MODE v1.0.0";
const BAR_WIDTH: i32 = 400;
const BAR_HEIGHT: i32 = 20;
const BRIGHT_GREEN: Color = Color::new(50, 255, 50, 255);
const DARK_GREEN: Color = Color::new(0, 150, 0, 255);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum BootEvent {
    Typed,
    Finished,
}

/// Startup screen typing out a few phrases before the slideshow starts.
pub struct Boot {
    phrase_index: usize,
    typed: usize,
    type_timer: u32,
    hold_timer: u32,
    finished: bool,
}

impl Boot {
    pub fn new() -> Self {
        Self { phrase_index: 0, typed: 0, type_timer: 0, hold_timer: 0, finished: false }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Jumps straight to the end of the boot sequence.
    pub fn skip(&mut self, stage: &Stage) {
        if !self.finished {
            self.finish(stage);
        }
    }

    fn finish(&mut self, stage: &Stage) {
        info!("boot sequence done");
        self.finished = true;
        self.phrase_index = PHRASES.len();
        stage.sounds.play(Tone::Success);
    }

    fn step(&mut self) -> Option<BootEvent> {
        if self.finished {
            return None;
        }
        let Some(phrase) = PHRASES.get(self.phrase_index) else {
            return Some(BootEvent::Finished);
        };

        if self.typed < phrase.len() {
            self.type_timer += 1;
            if self.type_timer >= TYPING_INTERVAL {
                self.type_timer = 0;
                self.typed += 1;
                return Some(BootEvent::Typed);
            }
        } else {
            self.hold_timer += 1;
            if self.hold_timer >= PHRASE_PAUSE {
                self.hold_timer = 0;
                self.typed = 0;
                self.phrase_index += 1;
            }
        }
        None
    }

    fn text(&self) -> &str {
        PHRASES.get(self.phrase_index).map_or("", |phrase| &phrase[..self.typed])
    }

    fn progress(&self) -> f32 {
        (self.phrase_index as f32 / PHRASES.len() as f32).min(1.0)
    }
}

impl Engine for Boot {
    fn update(&mut self, stage: &mut Stage) {
        match self.step() {
            Some(BootEvent::Typed) => {
                if rand::rng().random_bool(0.3) {
                    stage.sounds.play(Tone::Typing);
                }
            }
            Some(BootEvent::Finished) => self.finish(stage),
            None => {}
        }
    }

    fn draw(&self, stage: &Stage, d: &mut RaylibDrawHandle) {
        let center_x = stage.bounds.width / 2;

        draw_text_centered(d, TITLE, center_x, 100, 40, BRIGHT_GREEN);
        draw_text_centered(d, &format!("{}_", self.text()), center_x, 200, 30, Color::GREEN);

        let bar_x = (stage.bounds.width - BAR_WIDTH) / 2;
        let bar_y = 300;
        d.draw_rectangle(bar_x, bar_y, BAR_WIDTH, BAR_HEIGHT, DARK_GREEN);
        d.draw_rectangle(bar_x, bar_y, (BAR_WIDTH as f32 * self.progress()) as i32, BAR_HEIGHT, Color::GREEN);

        let label = format!("Loading... {}%", (self.progress() * 100.0) as i32);
        draw_text_centered(d, &label, center_x, bar_y + 40, 20, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slideshow::placement::Size;
    use crate::sound::SoundBank;

    fn total_frames() -> u32 {
        PHRASES
            .iter()
            .map(|phrase| phrase.len() as u32 * TYPING_INTERVAL + PHRASE_PAUSE)
            .sum::<u32>()
            + 1
    }

    #[test]
    fn types_one_character_per_interval() {
        let mut boot = Boot::new();
        for _ in 0..TYPING_INTERVAL * 4 {
            boot.step();
        }
        assert_eq!(boot.text(), &PHRASES[0][..4]);
        assert_eq!(boot.progress(), 0.0);
    }

    #[test]
    fn holds_then_moves_to_the_next_phrase() {
        let mut boot = Boot::new();
        let typing = PHRASES[0].len() as u32 * TYPING_INTERVAL;
        for _ in 0..typing + PHRASE_PAUSE - 1 {
            boot.step();
        }
        assert_eq!(boot.text(), PHRASES[0]);
        boot.step();
        assert_eq!(boot.text(), "");
        assert_eq!(boot.phrase_index, 1);
    }

    #[test]
    fn finishes_after_every_phrase() {
        let mut stage = Stage::new(Size::new(800, 600), SoundBank::silent());
        let mut boot = Boot::new();
        for _ in 0..total_frames() - 1 {
            boot.update(&mut stage);
        }
        assert!(!boot.is_finished());
        assert_eq!(boot.progress(), 1.0);
        boot.update(&mut stage);
        assert!(boot.is_finished());
        assert_eq!(boot.step(), None);
    }

    #[test]
    fn skip_ends_immediately() {
        let stage = Stage::new(Size::new(800, 600), SoundBank::silent());
        let mut boot = Boot::new();
        boot.skip(&stage);
        assert!(boot.is_finished());
        assert_eq!(boot.progress(), 1.0);
        assert_eq!(boot.text(), "");
    }
}
