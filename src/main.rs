use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use ascii_mazes::{
    app::{App, RunOutcome},
    config::{Args, Config},
};

/// Install the global subscriber. Logs go to the file if one is given,
/// otherwise to stderr so they stay out of the drawn maze.
fn init_tracing(config: &Config) -> Result<WorkerGuard> {
    let (writer, guard) = match &config.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(config.log_file.is_none())
        .with_max_level(config.log_level)
        .init();
    Ok(guard)
}

fn main() -> Result<()> {
    let config = Config::from_args(Args::parse())?;
    let guard = init_tracing(&config)?;

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let app = App::new(config, program);
    let outcome = app.run(&mut std::io::stdout())?;
    // Flush pending log lines before a possible early exit
    drop(guard);
    if let RunOutcome::Cancelled = outcome {
        std::process::exit(130);
    }
    Ok(())
}
