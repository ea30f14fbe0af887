//! victor - a modal vector drawing editor for the terminal
//!
//! This is the main entry point for the application.

#![deny(warnings)]

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use victor::app::App;
use victor::config::{self, Config};
use victor::input;
use victor::ui;

/// Environment variable holding the log filter, e.g. `VICTOR_LOG=debug`
const LOG_ENV: &str = "VICTOR_LOG";

/// victor - modal vector drawing in the terminal
#[derive(Parser, Debug)]
#[command(name = "victor")]
#[command(about = "A vi-style modal vector drawing editor", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/victor/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (default: ~/.config/victor/victor.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        print_completions(shell);
        return Ok(());
    }

    let log_path = cli.log_file.unwrap_or_else(config::default_log_path);
    init_logging(&log_path)?;

    let config = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    run_editor(config)
}

/// Print shell completions
fn print_completions(shell: clap_complete::Shell) {
    clap_complete::generate(shell, &mut Cli::command(), "victor", &mut std::io::stdout());
}

/// Send tracing output to a file; the terminal belongs to the UI
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn run_editor(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Key release events need keyboard enhancement (not supported on all terminals)
    let keyboard_enhancement_enabled = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    tracing::info!(keyboard_enhancement_enabled, "starting");

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    if keyboard_enhancement_enabled {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "editor exited with an error");
    }

    // Propagate any errors
    result
}

/// Main application loop
fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let tick_interval = app.tick_interval();
    let mut last_tick = Instant::now();

    loop {
        // Draw the UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Wait for input until the next tick is due
        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            // Drain all pending events (prevents input queue buildup during slow renders)
            loop {
                if let Event::Key(key_event) = event::read()? {
                    if input::handle_key(key_event, app) {
                        tracing::info!("quit requested");
                        return Ok(());
                    }
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let now = Instant::now();
        let delta = now - last_tick;
        if delta >= tick_interval {
            last_tick = now;
            app.tick(delta);
        }
    }
}
