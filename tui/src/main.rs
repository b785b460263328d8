//! Stepper TUI Entry Point
//!
//! Launches a row of wizard steps whose status visuals can be driven from
//! the keyboard.
//!
//! # Usage
//!
//! ```bash
//! # Four waiting steps
//! stepper-tui
//!
//! # Start from a given set of statuses
//! stepper-tui --status success,working,waiting
//!
//! # Custom color and config, logging to a file
//! stepper-tui --color '#f472b6' --config ./status-visual.toml --log-file /tmp/stepper.log
//!
//! # No animations
//! stepper-tui --reduced-motion
//! ```

use std::fs::File;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use status_visual_core::{default_config_path, load_config_from_path, ConfigSource, Status};
use stepper_tui::app::initial_statuses;
use stepper_tui::App;

/// Stepper TUI - animated step status visuals in the terminal
#[derive(Parser, Debug)]
#[command(name = "stepper-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of steps
    #[arg(short = 'n', long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..=12))]
    steps: u16,

    /// Initial statuses, comma separated (waiting, prompting, working, success, error)
    #[arg(long, value_delimiter = ',', value_name = "LIST")]
    status: Vec<Status>,

    /// Step color (#rrggbb, #rgb or a color name)
    #[arg(long, env = "STEPPER_COLOR", default_value = "#2dd4bf")]
    color: String,

    /// Configuration file path
    #[arg(short = 'c', long, env = "STEPPER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable all status animations
    #[arg(long)]
    reduced_motion: bool,

    /// Write logs to this file (RUST_LOG sets the filter)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal is in raw mode while running, so logs only go to a file
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config_path = args.config.clone().or_else(default_config_path);
    let mut settings = load_config_from_path(config_path.as_deref())
        .context("Failed to load status visual configuration")?;
    if args.reduced_motion {
        settings.reduced_motion = true;
        settings.set_source(ConfigSource::Cli);
    }
    info!(
        source = %settings.source(),
        reduced_motion = settings.reduced_motion,
        frame_rate = settings.frame_rate,
        "Configuration loaded"
    );

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: stepper-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("Run it interactively, or over SSH with the -t flag.");
        std::process::exit(1);
    }

    let statuses = initial_statuses(usize::from(args.steps), &args.status);
    let mut app = App::new(&statuses, &args.color, settings);

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
