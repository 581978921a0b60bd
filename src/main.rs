//! Study - terminal client for the topics/cards/progress study backend
//!
//! Pick a topic, add question/answer cards, and review them one at a time
//! while the backend keeps score.

mod api;
mod config;
mod editor;
mod models;
mod session;
mod topics;
mod ui;
mod worker;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use api::{HttpBackend, StudyBackend};
use config::{Config, BACKEND_URL_ENV};
use ui::App;
use worker::Worker;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "study")]
#[command(author, version, about = "Flashcard study client for the study REST backend", long_about = None)]
struct Args {
    /// Backend base URL (overrides STUDY_BACKEND_URL and the config file)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write logs
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = args.log_file.unwrap_or_else(default_log_path);
    init_logging(&log_file)?;

    let config_path = args.config.unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;

    let env_url = std::env::var(BACKEND_URL_ENV).ok();
    let backend_url = config.resolve_backend_url(args.backend_url.as_deref(), env_url.as_deref());
    let backend = HttpBackend::new(&backend_url)
        .with_context(|| format!("Cannot use backend URL {backend_url:?}"))?;

    info!(backend = backend.base_url(), config = ?config_path, "starting study client");
    let worker = Worker::new(backend)?;

    run_tui(App::new(worker, config))
}

fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("study-tui")
        .join("study.log")
}

/// Send tracing output to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run_tui<B: StudyBackend + 'static>(mut app: App<B>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    info!("study client closed");
    Ok(())
}

fn run_app<T: Backend, B: StudyBackend + 'static>(
    terminal: &mut Terminal<T>,
    app: &mut App<B>,
) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events()?;
        app.pump();
    }
    Ok(())
}
