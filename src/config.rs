use std::{path::PathBuf, time::Duration};

use anyhow::{Result, bail};
use clap::Parser;

use crate::generators::{Generator, MazeRequest};

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;
pub const DEFAULT_DELAY_SECS: f64 = 0.02;

/// Draw a perfect maze in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Width of the maze in cells
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Height of the maze in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Seed for the random generator; a random one is drawn and reported when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Carving algorithm
    #[arg(short, long, value_enum, default_value_t = Generator::Backtracker)]
    pub algorithm: Generator,

    /// Animate the carving step by step
    #[arg(long)]
    pub animate: bool,

    /// Pause between animation frames, in seconds
    #[arg(short, long, default_value_t = DEFAULT_DELAY_SECS)]
    pub delay: f64,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Maximum log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub request: MazeRequest,
    pub animate: bool,
    pub delay: Duration,
    pub log_file: Option<PathBuf>,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.width < 1 || args.height < 1 {
            bail!(
                "width and height must be at least 1 (got {}x{})",
                args.width,
                args.height
            );
        }
        let delay = match Duration::try_from_secs_f64(args.delay) {
            Ok(delay) => delay,
            Err(e) => bail!("invalid animation delay {}: {}", args.delay, e),
        };
        Ok(Config {
            request: MazeRequest {
                width: args.width,
                height: args.height,
                seed: args.seed,
                generator: args.algorithm,
            },
            animate: args.animate,
            delay,
            log_file: args.log_file,
            log_level: args.log_level,
        })
    }
}
