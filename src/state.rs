#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Popup,      // Images popping up at random spots
    Crash,      // Fake error log scrolling in
    BlueScreen, // Terminal screens, then start over
}

/// Which way the popup phase ends.
#[derive(Debug, PartialEq, Eq, Clone, Copy, clap::ValueEnum)]
pub enum Variant {
    /// Popups go straight to the blue screen
    Direct,
    /// Popups are followed by a fake crash log first
    Crash,
}

/// Something the host may want to make a noise about.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Cue {
    Popup,      // A new image appeared
    ErrorLine,  // A crash message was revealed
    Crash,      // Crash phase started
    BlueScreen, // Blue screen phase started
    Restart,    // Back to the popup phase
}
