use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_FIELD: i32 = 800;
pub const DEFAULT_CELLS: u16 = 10;
pub const DEFAULT_STEPS_PER_SECOND: u32 = 60;
pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const DEFAULT_MOVE_DELAY: u32 = 7;
pub const DEFAULT_BURST: usize = 20;

/// Background flash colours, one picked at random per pickup.
pub const FLASH_PALETTE: [[u8; 3]; 4] = [
    [0x89, 0xb4, 0xfa],
    [0xf3, 0x8b, 0xa8],
    [0xa6, 0xe3, 0xa1],
    [0xf9, 0xe2, 0xaf],
];

#[derive(Parser, Debug)]
#[command(name = "snake-rs")]
#[command(version, about = "Grid snake in the terminal")]
pub struct Cli {
    /// Cells along each side of the square field
    #[arg(long, default_value_t = DEFAULT_CELLS, value_parser = clap::value_parser!(u16).range(2..=80))]
    cells: u16,

    /// Logical field size; rounded down to a multiple of the cell count
    #[arg(long, default_value_t = DEFAULT_FIELD, value_parser = clap::value_parser!(i32).range(80..=10_000))]
    field: i32,

    /// Simulation steps per second
    #[arg(long, default_value_t = DEFAULT_STEPS_PER_SECOND, value_parser = clap::value_parser!(u32).range(1..=1000))]
    steps_per_second: u32,

    /// Frames drawn per second
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE, value_parser = clap::value_parser!(u32).range(1..=240))]
    frame_rate: u32,

    /// Steps skipped between two grid moves
    #[arg(long, default_value_t = DEFAULT_MOVE_DELAY)]
    move_delay: u32,

    /// Particles spawned per pickup
    #[arg(long, default_value_t = DEFAULT_BURST)]
    burst: usize,

    /// File holding the max score
    #[arg(long, default_value = ".snake_max_score")]
    score_file: PathBuf,

    /// Keep the max score in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Draw plain shapes instead of glyph sprites
    #[arg(long)]
    plain: bool,

    /// Disable the background flash on pickup
    #[arg(long)]
    no_flash: bool,

    /// Ring the terminal bell on pickup and game over
    #[arg(long)]
    bell: bool,

    /// Seed for food placement and particles
    #[arg(long)]
    seed: Option<u64>,

    /// Log destination
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub cells: i32,
    pub field: i32,
    pub steps_per_second: u32,
    pub frame_rate: u32,
    pub move_delay: u32,
    pub burst: usize,
    pub sprites: bool,
    pub flash_palette: Vec<[u8; 3]>,
    pub bell: bool,
    pub seed: Option<u64>,
    pub score_file: Option<PathBuf>,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cells: DEFAULT_CELLS as i32,
            field: DEFAULT_FIELD,
            steps_per_second: DEFAULT_STEPS_PER_SECOND,
            frame_rate: DEFAULT_FRAME_RATE,
            move_delay: DEFAULT_MOVE_DELAY,
            burst: DEFAULT_BURST,
            sprites: true,
            flash_palette: FLASH_PALETTE.to_vec(),
            bell: false,
            seed: None,
            score_file: Some(PathBuf::from(".snake_max_score")),
            log_file: PathBuf::from("snake.log"),
            verbose: false,
        }
    }
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Settings {
            cells: cli.cells as i32,
            field: cli.field,
            steps_per_second: cli.steps_per_second,
            frame_rate: cli.frame_rate,
            move_delay: cli.move_delay,
            burst: cli.burst,
            sprites: !cli.plain,
            flash_palette: if cli.no_flash {
                Vec::new()
            } else {
                FLASH_PALETTE.to_vec()
            },
            bell: cli.bell,
            seed: cli.seed,
            score_file: (!cli.ephemeral).then_some(cli.score_file),
            log_file: cli.log_file,
            verbose: cli.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Settings {
        let argv = std::iter::once("snake-rs").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().into()
    }

    #[test]
    fn test_defaults_match_settings_default() {
        assert_eq!(parse(&[]), Settings::default());
    }

    #[test]
    fn test_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.cells, 10);
        assert_eq!(settings.field, 800);
        assert_eq!(settings.steps_per_second, 60);
        assert_eq!(settings.move_delay, 7);
        assert_eq!(settings.burst, 20);
        assert!(settings.sprites);
    }

    #[test]
    fn test_flags() {
        let settings = parse(&[
            "--cells", "20", "--plain", "--no-flash", "--ephemeral", "--seed", "42", "--bell",
        ]);
        assert_eq!(settings.cells, 20);
        assert!(!settings.sprites);
        assert!(settings.flash_palette.is_empty());
        assert_eq!(settings.score_file, None);
        assert_eq!(settings.seed, Some(42));
        assert!(settings.bell);
    }

    #[test]
    fn test_cells_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["snake-rs", "--cells", "1"]).is_err());
        assert!(Cli::try_parse_from(["snake-rs", "--cells", "500"]).is_err());
    }
}
