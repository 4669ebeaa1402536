use std::time::Duration;
use anyhow::{Result, bail};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod boot;
mod cli;
mod constants;
mod engine;
mod matrix;
mod monitor;
mod slideshow;
mod sound;
mod state;
mod texture_loader;

use crate::boot::Boot;
use crate::cli::Cli;
use crate::constants::*;
use crate::engine::{Engine, Stage};
use crate::matrix::MatrixRain;
use crate::monitor::SystemMonitor;
use crate::slideshow::engine::SlideshowEngine;
use crate::slideshow::placement::Size;
use crate::sound::{SoundBank, Tone};
use crate::state::Phase;
use crate::texture_loader::{load_sorted_image_paths, load_texture};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut builder = raylib::init();
    builder.size(cli.width, cli.height).title("System.exe - Running...").vsync();
    if !cli.windowed {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    if !cli.windowed {
        rl.hide_cursor();
    }

    let bounds = Size::new(rl.get_screen_width(), rl.get_screen_height());
    info!(width = bounds.width, height = bounds.height, "screen ready");

    // --- Load Popup Images ---
    let image_paths = match load_sorted_image_paths(&cli.images) {
        Ok(paths) => paths,
        Err(e) => {
            show_error(&mut rl, &thread, &format!("Error: {}", e));
            return Err(e);
        }
    };

    let popup_size = Size::new(POPUP_MAX_SIZE, POPUP_MAX_SIZE);
    let mut deck = Vec::new();
    for path in &image_paths {
        let max_size = if cli.keeps_size(path) { None } else { Some(popup_size) };
        match load_texture(&mut rl, &thread, path, max_size) {
            Ok(texture) => deck.push(texture),
            Err(e) => warn!("skipping {}: {:#}", path.display(), e),
        }
    }

    if deck.is_empty() {
        show_error(&mut rl, &thread, "Error: No images loaded.");
        bail!("no popup image could be loaded from {}", cli.images.display());
    }

    // --- Load Blue Screen Images ---
    let mut screens = Vec::new();
    for path in &cli.screens {
        match load_texture(&mut rl, &thread, path, None) {
            Ok(texture) => screens.push(texture),
            Err(e) => warn!("skipping blue screen {}: {:#}", path.display(), e),
        }
    }
    info!(popups = deck.len(), screens = screens.len(), "images loaded");

    // --- Audio ---
    let audio = match RaylibAudio::init_audio_device() {
        Ok(audio) => Some(audio),
        Err(e) => {
            warn!("could not open audio device: {:?}", e);
            None
        }
    };

    let mut stage = Stage::new(bounds, SoundBank::new(audio.as_ref(), cli.mute));
    let mut matrix = MatrixRain::new(bounds);
    let mut monitor = SystemMonitor::new();
    let mut boot = (!cli.skip_boot).then(Boot::new);
    let mut slideshow = SlideshowEngine::new(deck, screens, bounds, cli.variant, cli.rng());

    // --- Main Loop ---
    while !rl.window_should_close() {
        if rl.is_key_pressed(KeyboardKey::KEY_F11) {
            break;
        }

        // --- Input ---
        match boot.as_mut() {
            Some(b) => {
                if rl.is_key_pressed(KeyboardKey::KEY_ENTER) {
                    b.skip(&stage);
                }
            }
            None => {
                if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
                    slideshow.skip_phase(&mut stage);
                }
                if rl.is_key_pressed(KeyboardKey::KEY_R) {
                    slideshow.reset(&mut stage);
                }
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_G) {
            stage.show_graphs = !stage.show_graphs;
            stage.sounds.play(Tone::Beep);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_S) {
            let enabled = stage.sounds.toggle();
            info!(enabled, "sound toggled");
            stage.sounds.play(Tone::Beep);
        }

        // --- Update Logic ---
        matrix.update(&mut stage);
        monitor.update(&mut stage);
        let booting = match boot.as_mut() {
            Some(b) => {
                b.update(&mut stage);
                !b.is_finished()
            }
            None => {
                slideshow.update(&mut stage);
                false
            }
        };
        if !booting {
            boot = None;
        }

        // --- Draw ---
        let mut d = rl.begin_drawing(&thread);
        match &boot {
            Some(b) => {
                d.clear_background(Color::BLACK);
                matrix.draw(&stage, &mut d);
                b.draw(&stage, &mut d);
            }
            None => {
                let phase = slideshow.phase();
                d.clear_background(slideshow.background());
                if phase == Phase::Crash {
                    matrix.draw(&stage, &mut d);
                }
                slideshow.draw(&stage, &mut d);
                if phase != Phase::BlueScreen {
                    monitor.draw(&stage, &mut d);
                }
            }
        }
    }

    info!("terminated");
    Ok(())
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// Leaves a startup error on screen for a moment before quitting
fn show_error(rl: &mut RaylibHandle, thread: &RaylibThread, message: &str) {
    let mut d = rl.begin_drawing(thread);
    d.clear_background(Color::BLACK);
    d.draw_text(message, 20, 20, 20, Color::RED);
    drop(d);
    std::thread::sleep(Duration::from_secs(5));
}
