//! statdeck - Main entry point
//!
//! Terminal setup and teardown, CLI dispatch, and logging initialization.
//! The TUI owns stdout, so logs go to a file when --log-file is given and
//! are dropped otherwise.

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::path::Path;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use statdeck::app::App;
use statdeck::cli::{Cli, Commands};
use statdeck::config::DeckConfig;
use statdeck::error;
use statdeck::forms::FormStateStore;
use statdeck::page::Page;

/// Initialize file logging. Returns the writer guard that must stay alive
/// for the duration of the program; `None` disables logging entirely.
fn init_logging(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let path = log_file?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name()?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    let _log_guard = init_logging(cli.log_file.as_deref());
    info!("statdeck starting up");

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            DeckConfig::load_from_file(path)?
        }
        None => DeckConfig::default(),
    };

    match cli.command {
        Some(Commands::Validate { page }) => {
            info!("Validating page document: {:?}", page);
            match Page::load_from_file(&page) {
                Ok(document) => match document.validate() {
                    Ok(_) => {
                        info!("Page validation successful");
                        println!("✓ Page document is valid: {:?}", page);
                    }
                    Err(e) => {
                        error!("Page validation failed: {}", e);
                        eprintln!("✗ Page validation failed: {}", e);
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    error!("Failed to load page document: {}", e);
                    eprintln!("✗ Failed to load page document: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::View { page }) => {
            run_viewer(config, page.as_deref())?;
        }
        None => {
            info!("No command specified, launching viewer with the demo page");
            run_viewer(config, None)?;
        }
    }

    Ok(())
}

/// Run the TUI viewer
fn run_viewer(config: DeckConfig, page_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    // CLI path beats the configured default; the demo page covers the rest.
    let page = match page_path.or(config.page_path.as_deref()) {
        Some(path) => {
            info!("Loading page document: {:?}", path);
            Page::load_from_file(path)?
        }
        None => Page::demo(),
    };

    let forms = config
        .state_path
        .clone()
        .or_else(FormStateStore::default_path)
        .map(FormStateStore::load)
        .unwrap_or_else(FormStateStore::in_memory);

    // Initialize terminal
    enable_raw_mode()
        .map_err(|e| error::general_error(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| error::general_error(format!("Failed to enter alternate screen: {}", e)))?;

    // Create terminal backend
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| error::general_error(format!("Failed to create terminal: {}", e)))?;

    // Create and run application
    let mut app = App::new(page, config, forms);
    let result = app.run(&mut terminal);

    // Cleanup terminal (always attempt cleanup, even if the app failed)
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = disable_raw_mode();

    result.map_err(Into::into)
}
