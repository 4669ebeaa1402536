use std::f32::consts::TAU;
use rand::Rng;
use raylib::prelude::*;
use tracing::{debug, warn};
use crate::constants::*;
use crate::state::Cue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Typing,  // Short noisy click
    Beep,    // Fading beep
    Error,   // Low wobbling buzz
    Success, // Rising chirp
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Typing, Tone::Beep, Tone::Error, Tone::Success];

    fn duration_ms(self) -> u32 {
        match self {
            Tone::Typing => 100,
            Tone::Beep => 200,
            Tone::Error => 300,
            Tone::Success => 400,
        }
    }

    pub fn frame_count(self) -> usize {
        (SAMPLE_RATE * self.duration_ms() / 1000) as usize
    }

    /// 16 bit mono samples at `SAMPLE_RATE`.
    pub fn samples(self) -> Vec<i16> {
        let frames = self.frame_count();
        let mut rng = rand::rng();

        (0..frames)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let progress = i as f32 / frames as f32;
                let wave = match self {
                    Tone::Typing => {
                        TONE_AMPLITUDE * (TAU * 800.0 * t).sin() + rng.random_range(-200.0..=200.0)
                    }
                    Tone::Beep => TONE_AMPLITUDE * (1.0 - progress) * (TAU * 1000.0 * t).sin(),
                    Tone::Error => {
                        TONE_AMPLITUDE * (TAU * 200.0 * t).sin() * (TAU * 10.0 * t).sin()
                    }
                    Tone::Success => {
                        let frequency = 400.0 + 400.0 * progress;
                        TONE_AMPLITUDE * (TAU * frequency * t).sin()
                    }
                };
                wave as i16
            })
            .collect()
    }
}

impl From<Cue> for Tone {
    fn from(cue: Cue) -> Self {
        match cue {
            Cue::Popup => Tone::Beep,
            Cue::ErrorLine => Tone::Typing,
            Cue::Crash | Cue::BlueScreen => Tone::Error,
            Cue::Restart => Tone::Success,
        }
    }
}

// --- Wrap PCM samples in a minimal RIFF/WAVE container ---
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());       // fmt chunk size
    bytes.extend_from_slice(&1u16.to_le_bytes());        // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes());        // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes());        // block align
    bytes.extend_from_slice(&16u16.to_le_bytes());       // bits per sample

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Synthesized sound effects.
///
/// Every sound is optional: when the audio device or a sound could not be
/// set up it stays `None` for the rest of the run and playing it does nothing.
pub struct SoundBank<'aud> {
    typing: Option<Sound<'aud>>,
    beep: Option<Sound<'aud>>,
    error: Option<Sound<'aud>>,
    success: Option<Sound<'aud>>,
    enabled: bool,
}

impl<'aud> SoundBank<'aud> {
    pub fn new(audio: Option<&'aud RaylibAudio>, muted: bool) -> Self {
        let mut bank = Self::silent();
        bank.enabled = !muted;

        let Some(audio) = audio else {
            warn!("audio device unavailable, running silent");
            return bank;
        };

        for tone in Tone::ALL {
            let sound = synthesize(audio, tone);
            match tone {
                Tone::Typing => bank.typing = sound,
                Tone::Beep => bank.beep = sound,
                Tone::Error => bank.error = sound,
                Tone::Success => bank.success = sound,
            }
        }
        bank
    }

    /// A bank without any sound, used when there is no audio device at all.
    pub fn silent() -> Self {
        Self { typing: None, beep: None, error: None, success: None, enabled: false }
    }

    pub fn play(&self, tone: Tone) {
        if !self.enabled {
            return;
        }
        let sound = match tone {
            Tone::Typing => &self.typing,
            Tone::Beep => &self.beep,
            Tone::Error => &self.error,
            Tone::Success => &self.success,
        };
        if let Some(sound) = sound {
            sound.play();
        }
    }

    /// Flips the user mute switch. Returns whether sound is now on.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

fn synthesize<'aud>(audio: &'aud RaylibAudio, tone: Tone) -> Option<Sound<'aud>> {
    let wav = encode_wav(&tone.samples(), SAMPLE_RATE);
    let sound = audio
        .new_wave_from_memory(".wav", &wav)
        .and_then(|wave| audio.new_sound_from_wave(&wave));

    match sound {
        Ok(sound) => {
            debug!(?tone, "sound ready");
            Some(sound)
        }
        Err(e) => {
            warn!(?tone, "could not create sound: {}", e);
            None
        }
    }
}
