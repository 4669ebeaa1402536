use std::path::{Path, PathBuf};
use clap::{ArgAction, Parser};
use rand::SeedableRng;
use rand::rngs::StdRng;
use crate::constants::*;
use crate::state::Variant;

#[derive(Parser, Debug)]
#[command(name = "hackermode")]
#[command(author, version, about = "Fake hacker screensaver: popups, crash, blue screen, repeat")]
#[command(long_about = "Fake hacker screensaver.\n\n\
    Images from a directory pop up at random spots, then the system \"crashes\"\n\
    and shows blue screen images before starting over.\n\n\
    Keys:\n  \
    SPACE       Skip to the next phase\n  \
    R           Restart the popup phase\n  \
    G           Toggle the system monitor\n  \
    S           Toggle sound\n  \
    ENTER       Skip the boot sequence\n  \
    ESC / F11   Quit")]
pub struct Cli {
    /// Directory holding the popup images
    pub images: PathBuf,

    /// Blue screen image, repeat to show several in order
    #[arg(long = "screen", value_name = "FILE")]
    pub screens: Vec<PathBuf>,

    /// How the popup phase ends
    #[arg(long, value_enum, default_value_t = Variant::Direct)]
    pub variant: Variant,

    /// Launch in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Window width in pixels
    #[arg(long, default_value_t = RENDER_WIDTH)]
    pub width: i32,

    /// Window height in pixels
    #[arg(long, default_value_t = RENDER_HEIGHT)]
    pub height: i32,

    /// Seed for the shuffle order and popup positions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with sound switched off
    #[arg(long)]
    pub mute: bool,

    /// Go straight to the slideshow
    #[arg(long)]
    pub skip_boot: bool,

    /// Popup image file name to show at its own size instead of scaling it
    #[arg(long = "keep-size", value_name = "NAME")]
    pub keep_size: Vec<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn keeps_size(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.keep_size.iter().any(|keep| keep == name))
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rand::Rng;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["hackermode", "logos"]).unwrap();
        assert_eq!(cli.images, PathBuf::from("logos"));
        assert_eq!(cli.variant, Variant::Direct);
        assert_eq!((cli.width, cli.height), (RENDER_WIDTH, RENDER_HEIGHT));
        assert!(cli.screens.is_empty());
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn repeated_options_collect() {
        let cli = Cli::try_parse_from([
            "hackermode", "logos", "--screen", "a.png", "--screen", "b.jpg",
            "--keep-size", "big.jpg", "--variant", "crash", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.screens, [PathBuf::from("a.png"), PathBuf::from("b.jpg")]);
        assert_eq!(cli.variant, Variant::Crash);
        assert!(cli.keeps_size(Path::new("logos/big.jpg")));
        assert!(!cli.keeps_size(Path::new("logos/small.jpg")));
        assert_eq!(cli.log_filter(), "trace");
    }

    #[test]
    fn seed_makes_runs_repeatable() {
        let cli = Cli::try_parse_from(["hackermode", "logos", "--seed", "7"]).unwrap();
        let a: u64 = cli.rng().random();
        let b: u64 = cli.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn image_directory_is_required() {
        assert!(Cli::try_parse_from(["hackermode"]).is_err());
    }
}
