//! mainframe CLI
//!
//! Loads settings, sets up file logging, and runs the menu TUI.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mainframe::config::ConfigFile;
use mainframe::logging;
use mainframe::tui;

#[derive(Parser)]
#[command(name = "mainframe")]
#[command(about = "An immersive terminal-based learning environment")]
#[command(version)]
struct Cli {
    /// Settings file (default: ~/.mainframe/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let file = match cli.config {
        Some(path) => ConfigFile::at(path),
        None => ConfigFile::default_location(),
    };

    let (config, load_error) = file.load_or_default();

    // Logging depends on the loaded flags, so load errors are reported after.
    logging::init(&config, &file.log_dir());
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "using default settings for this session");
    }

    match tui::run::run(config, file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "terminal failure");
            eprintln!("Error starting app: {}", e);
            ExitCode::FAILURE
        }
    }
}
