use rand::Rng;
use rand::seq::IndexedRandom;
use crate::constants::*;

enum Slot {
    Address,
    Number,
    None,
}

static TEMPLATES: [(&str, Slot); 15] = [
    ("ERROR: Memory access violation at {}", Slot::Address),
    ("CRITICAL: Stack overflow detected", Slot::None),
    ("FATAL: Null pointer dereference", Slot::None),
    ("ERROR: Division by zero exception", Slot::None),
    ("CRITICAL: Buffer overflow in module {}", Slot::Number),
    ("FATAL: Access violation reading {}", Slot::Address),
    ("ERROR: Invalid instruction at {}", Slot::Address),
    ("CRITICAL: Heap corruption detected", Slot::None),
    ("FATAL: Unhandled exception in thread {}", Slot::Number),
    ("ERROR: Stack corruption at {}", Slot::Address),
    ("CRITICAL: Memory leak detected ({} bytes)", Slot::Number),
    ("FATAL: System call failed: {}", Slot::Number),
    ("ERROR: Invalid memory address {}", Slot::Address),
    ("CRITICAL: Deadlock detected in thread pool", Slot::None),
    ("FATAL: Corrupted heap block at {}", Slot::Address),
];

pub const HEADLINE: &str = "SYSTEM CRASH DETECTED";
pub const SUBLINE: &str = "Initiating Blue Screen of Death...";

/// The fake error log shown during the crash phase.
#[derive(Debug, Clone)]
pub struct CrashLog {
    messages: Vec<String>,
    timer: u32,
}

impl CrashLog {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let messages = (0..CRASH_MESSAGE_COUNT)
            .map(|_| {
                let (template, slot) = TEMPLATES.choose(&mut *rng).unwrap_or(&TEMPLATES[0]);
                match slot {
                    Slot::Address => {
                        let address: u32 = rng.random_range(0x1000_0000..=0xFFFF_FFFF);
                        template.replace("{}", &format!("0x{:08X}", address))
                    }
                    Slot::Number => {
                        let number: u32 = rng.random_range(1000..=99999);
                        template.replace("{}", &number.to_string())
                    }
                    Slot::None => template.to_string(),
                }
            })
            .collect();

        Self { messages, timer: 0 }
    }

    /// Advances the crash clock by one frame. Returns true when a new line shows up.
    pub fn tick(&mut self) -> bool {
        let before = self.visible_count();
        self.timer += 1;
        self.visible_count() > before
    }

    pub fn is_over(&self) -> bool {
        self.timer > CRASH_DURATION
    }

    pub fn visible_count(&self) -> usize {
        self.messages.len().min((self.timer / CRASH_REVEAL_INTERVAL) as usize)
    }

    pub fn visible(&self) -> &[String] {
        &self.messages[..self.visible_count()]
    }

    pub fn show_headline(&self) -> bool {
        self.timer > CRASH_HEADLINE_AT
    }

    pub fn show_subline(&self) -> bool {
        self.timer > CRASH_SUBLINE_AT
    }
}
