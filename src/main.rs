//! tagedit - tag autocomplete for image caption files
//!
//! This is the main entry point. It parses CLI arguments, sets up logging
//! and delegates to the runner for the chosen subcommand.

mod cli;
mod run;

use clap::Parser;
use tagedit::config::Config;
use tagedit::user_config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    // Load configuration
    let mut config = Config::default();
    user_config::configure(&mut config);

    // Apply CLI overrides
    cli.apply_to_config(&mut config);

    match &cli.command {
        cli::Command::Suggest { word } => run::run_suggest(&config, word)?,
        cli::Command::Complete { line, column, pick } => {
            run::run_complete(&config, line, *column, *pick)?
        }
        cli::Command::Pairs { dir } => run::run_pairs(&config, dir.as_deref())?,
        cli::Command::Edit { path, image } => {
            run::run_terminal_mode(&config, path.as_deref(), *image)?
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for results. `RUST_LOG` wins over
/// `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "tagedit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
