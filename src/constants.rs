pub const RENDER_WIDTH: i32 = 1920;           // Default window width when not fullscreen
pub const RENDER_HEIGHT: i32 = 1080;          // Default window height when not fullscreen
pub const FPS: u32 = 60;                      // Frames per second, every timer below counts frames

// --- Popup phase ---
pub const SPAWN_INTERVAL: u32 = 30;           // Frames between two popups
pub const CAPACITY: usize = 10;               // Max popups on screen at once
pub const DISPLAY_DURATION: u32 = 360;        // Frames a popup stays on screen
pub const PLACEMENT_ATTEMPTS: u32 = 50;       // Tries before giving up on non-overlap
pub const POPUP_TIMEOUT: u32 = 1200;          // Popup phase ends after this many frames anyway
pub const POPUP_MAX_SIZE: i32 = 400;          // Popup images are scaled to fit a square this big
pub const FADE_IN_STEP: u32 = 5;              // Alpha gained per frame while a popup fades in

// --- Crash phase ---
pub const CRASH_MESSAGE_COUNT: usize = 20;    // Error lines generated per crash
pub const CRASH_REVEAL_INTERVAL: u32 = 30;    // Frames between two error lines
pub const CRASH_HEADLINE_AT: u32 = 600;       // "SYSTEM CRASH DETECTED"
pub const CRASH_SUBLINE_AT: u32 = 900;        // "Initiating Blue Screen of Death..."
pub const CRASH_DURATION: u32 = 1200;         // Crash phase hands over to the blue screen

// --- Blue screen phase ---
pub const SCREEN_DWELL: u32 = 300;            // Frames each blue screen image is shown

// --- Decorations ---
pub const MATRIX_COLUMNS: usize = 50;         // Falling character columns
pub const MATRIX_ROW_SPACING: i32 = 20;       // Vertical distance between two characters
pub const GRAPH_SAMPLES: usize = 100;         // Samples kept per monitor graph
pub const GRAPH_TOGGLE_INTERVAL: u32 = 300;   // Frames between automatic graph show/hide

// --- Boot sequence ---
pub const TYPING_INTERVAL: u32 = 3;           // Frames per typed character
pub const PHRASE_PAUSE: u32 = 60;             // Frames to hold a finished phrase

// --- Audio ---
pub const SAMPLE_RATE: u32 = 22050;           // Synthesized tone sample rate
pub const TONE_AMPLITUDE: f32 = 4096.0;       // Peak sample value of synthesized tones
