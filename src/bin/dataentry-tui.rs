// Dataentry TUI
// Dashboard host for the entry context

use std::path::PathBuf;

use clap::Parser;

use dataentry_core::Config;

#[path = "../keys.rs"]
mod keys;
#[path = "../tui/mod.rs"]
mod tui;

/// Terminal dashboard for interactive data entry
#[derive(Parser, Debug)]
#[command(name = "dataentry-tui")]
#[command(author = "dataentry contributors")]
#[command(version)]
#[command(about = "Terminal dashboard for interactive data entry", long_about = None)]
struct Args {
    /// TOML configuration file (defaults to ~/.config/dataentry/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write debug logs to stderr (redirect it away from the terminal)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    }

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default()?,
    };

    tui::run(config, args.config)?;
    Ok(())
}
