use rand::rngs::StdRng;
use raylib::prelude::*;
use tracing::debug;
use crate::constants::*;
use crate::engine::{Engine, Stage, draw_text_centered};
use crate::slideshow::controller::{Controller, PlacedItem};
use crate::slideshow::crash::{CrashLog, HEADLINE, SUBLINE};
use crate::slideshow::placement::Size;
use crate::sound::Tone;
use crate::state::{Phase, Variant};

const BLUE_SCREEN: Color = Color::new(0, 0, 255, 255);

/// Draws whatever the controller says is on screen.
pub struct SlideshowEngine {
    controller: Controller,
    deck: Vec<Texture2D>,
    screens: Vec<Texture2D>,
}

impl SlideshowEngine {
    pub fn new(deck: Vec<Texture2D>, screens: Vec<Texture2D>, bounds: Size, variant: Variant, rng: StdRng) -> Self {
        let sizes = deck.iter().map(|texture| Size::new(texture.width(), texture.height())).collect();
        let controller = Controller::new(sizes, screens.len(), bounds, variant, rng);
        Self { controller, deck, screens }
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn skip_phase(&mut self, stage: &mut Stage) {
        debug!(
            phase = ?self.controller.phase(),
            cursor = self.controller.cursor(),
            deck = self.controller.shuffle_order().len(),
            "skipping phase"
        );
        self.controller.skip_phase();
        stage.sounds.play(Tone::Beep);
    }

    pub fn reset(&mut self, stage: &mut Stage) {
        debug!(on_screen = self.controller.active_items().len(), "manual reset");
        self.controller.reset();
        stage.sounds.play(Tone::Success);
    }

    pub fn background(&self) -> Color {
        match self.controller.phase() {
            Phase::Popup => Color::WHITE,
            Phase::Crash => Color::BLACK,
            Phase::BlueScreen => BLUE_SCREEN,
        }
    }

    fn draw_popup(&self, items: &[PlacedItem], d: &mut RaylibDrawHandle) {
        for item in items {
            let Some(texture) = self.deck.get(item.id) else {
                continue;
            };
            let alpha = (item.age * FADE_IN_STEP).min(255) as u8;
            if alpha == 0 {
                continue;
            }

            d.draw_texture_pro(
                texture,
                Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                Rectangle::new(item.rect.x as f32, item.rect.y as f32, item.rect.width as f32, item.rect.height as f32),
                Vector2::new(0.0, 0.0),
                0.0,
                Color::new(255, 255, 255, alpha),
            );
        }
    }

    fn draw_crash(&self, log: &CrashLog, bounds: Size, d: &mut RaylibDrawHandle) {
        for (i, message) in log.visible().iter().enumerate() {
            d.draw_text(message, 50, 50 + i as i32 * 30, 20, Color::RED);
        }

        if log.show_headline() {
            draw_text_centered(d, HEADLINE, bounds.width / 2, bounds.height / 2, 40, Color::RED);
        }
        if log.show_subline() {
            draw_text_centered(d, SUBLINE, bounds.width / 2, bounds.height / 2 + 50, 30, Color::BLUE);
        }
    }

    fn draw_blue_screen(&self, index: usize, bounds: Size, d: &mut RaylibDrawHandle) {
        match self.screens.get(index) {
            Some(texture) => d.draw_texture_pro(
                texture,
                Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                Rectangle::new(0.0, 0.0, bounds.width as f32, bounds.height as f32),
                Vector2::new(0.0, 0.0),
                0.0,
                Color::WHITE,
            ),
            None => {
                draw_text_centered(d, "BLUE SCREEN OF DEATH", bounds.width / 2, bounds.height / 2, 40, Color::WHITE);
            }
        }
    }
}

impl Engine for SlideshowEngine {
    fn update(&mut self, stage: &mut Stage) {
        self.controller.advance_frame();
        for cue in self.controller.drain_cues() {
            stage.sounds.play(Tone::from(cue));
        }
    }

    fn draw(&self, stage: &Stage, d: &mut RaylibDrawHandle) {
        let snapshot = self.controller.snapshot();
        match snapshot.phase {
            Phase::Popup => self.draw_popup(snapshot.items, d),
            Phase::Crash => {
                if let Some(log) = snapshot.crash {
                    self.draw_crash(log, stage.bounds, d);
                }
            }
            Phase::BlueScreen => self.draw_blue_screen(snapshot.screen_index, stage.bounds, d),
        }
    }
}
