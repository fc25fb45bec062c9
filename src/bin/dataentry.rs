// Dataentry CLI
// Terminal host for the entry context: keys become controls, variables print on change

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use dataentry_core::{default_config_content, Config, DataEntry, Snapshot};

#[path = "../keys.rs"]
mod keys;

use keys::control_id;

/// How often the loop polls keys and the inactivity timer
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Interactive text-entry accumulator
#[derive(Parser, Debug)]
#[command(name = "dataentry")]
#[command(author = "dataentry contributors")]
#[command(version)]
#[command(about = "Accumulate typed entries and commit them by rule", long_about = None)]
struct Args {
    /// TOML configuration file (defaults to ~/.config/dataentry/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Print a commented default config and exit
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default()?,
    };
    Ok(config)
}

/// Main application state
struct Application {
    entry: DataEntry,
    /// Flag to signal the loop to stop
    running: Arc<AtomicBool>,
    last_printed: Option<Snapshot>,
}

impl Application {
    fn new(config: Config) -> Self {
        Self {
            entry: DataEntry::new(config),
            running: Arc::new(AtomicBool::new(true)),
            last_printed: None,
        }
    }

    fn install_signal_handler(&self) {
        use signal_hook::iterator::Signals;
        let running = self.running.clone();

        std::thread::spawn(move || {
            if let Ok(mut signals) =
                Signals::new([signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM])
            {
                if signals.forever().next().is_some() {
                    running.store(false, Ordering::SeqCst);
                }
            }
        });
    }

    /// Print the variable line if anything changed since the last print
    fn print_changes(&mut self, out: &mut impl Write) -> io::Result<()> {
        let snapshot = self.entry.snapshot();
        if self.last_printed.as_ref() == Some(&snapshot) {
            return Ok(());
        }
        if let Some(previous) = &self.last_printed {
            if previous.counter != snapshot.counter {
                write!(out, "entered #{}: {:?}\r\n", snapshot.counter, snapshot.last)?;
            }
        }
        write!(out, "{}\r\n", snapshot.variable_line())?;
        out.flush()?;
        self.last_printed = Some(snapshot);
        Ok(())
    }

    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.install_signal_handler();

        enable_raw_mode()?;
        let result = self.event_loop();
        disable_raw_mode()?;
        self.entry.shutdown();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();
        write!(stdout, "Type to enter data, Ctrl-C to quit\r\n")?;
        self.print_changes(&mut stdout)?;

        while self.running.load(Ordering::SeqCst) {
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                        break;
                    }
                    if let Some(id) = control_id(key.code) {
                        let outcome = self.entry.on_control_pressed(&id, None);
                        self.entry.on_control_released(&id);
                        log::debug!("Control '{}': {}", id, outcome);
                    }
                }
            }

            self.entry.poll_timeout(Instant::now());
            self.print_changes(&mut stdout)?;
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.print_default_config {
        print!("{}", default_config_content());
        return Ok(());
    }

    let config = load_config(args.config.as_ref())?;

    if args.check_config {
        println!("Configuration is valid");
        return Ok(());
    }

    Application::new(config).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["dataentry", "--config", "/tmp/test.toml"]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
        assert!(!args.verbose);
        assert!(!args.check_config);
        assert!(!args.print_default_config);
    }

    #[test]
    fn test_args_check_config() {
        let args = Args::parse_from(["dataentry", "-c", "/tmp/test.toml", "--check-config", "-v"]);

        assert!(args.check_config);
        assert!(args.verbose);
    }

    #[test]
    fn test_print_changes_only_on_change() {
        let mut app = Application::new(Config::default());
        let mut out = Vec::new();
        app.print_changes(&mut out).unwrap();
        let first = out.len();
        assert!(first > 0);

        app.print_changes(&mut out).unwrap();
        assert_eq!(out.len(), first);

        app.entry.on_control_pressed("5", None);
        app.entry.enter(None);
        app.print_changes(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("entered #1: \"5\""));
    }
}
