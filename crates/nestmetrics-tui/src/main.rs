//! NestMetrics TUI - a terminal dashboard for NYC Airbnb market analytics.
//!
//! Every page fetches from the NestMetrics backend and falls back to
//! built-in sample data when the backend cannot be reached.

mod app;
mod forms;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nestmetrics_core::loader::failure_label;
use nestmetrics_core::{ApiClient, Config, Loader, MirrorStore};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const LOG_FILE_PREFIX: &str = "nestmetrics.log";

const USAGE: &str = "\
Usage: nestmetrics [OPTION]

Options:
  --test-connection   Probe every GET endpoint and print a status table
  --dump-listings     Print the listings page's data as JSON
  -h, --help          Show this message

Environment:
  NESTMETRICS_API_URL  Backend base URL (overrides the config file)
  RUST_LOG             Log filter, e.g. RUST_LOG=debug";

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Logging for the command-line modes goes to stderr
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// The terminal is owned by the UI, so the interactive mode logs to a daily
/// file in the data directory. Keep the guard alive until exit.
fn init_tui_tracing(config: &Config) -> Option<WorkerGuard> {
    let log_dir = config.data_dir().ok()?;
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Some(guard)
}

/// Defaults when the config can't be loaded. The error is handed back so it
/// can be logged after the subscriber is installed.
fn config_or_default(loaded: Result<Config>) -> (Config, Option<anyhow::Error>) {
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: failed to load config ({:#}), using defaults", e);
        Config::default()
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--test-connection") => {
            init_cli_tracing();
            return test_connection().await;
        }
        Some("--dump-listings") => {
            init_cli_tracing();
            return dump_listings().await;
        }
        Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown option: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
        None => {}
    }

    // Logging needs the data directory, so the config comes first and any
    // failure to load it is reported once the subscriber exists.
    let (config, config_error) = config_or_default(Config::load());
    let _log_guard = init_tui_tracing(&config);
    info!("NestMetrics TUI starting");
    if let Some(e) = config_error {
        warn!(error = %format!("{:#}", e), "Failed to load config, using defaults");
    }

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.check_connection();
    app.mount_current_tab();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("NestMetrics TUI shutting down");
    Ok(())
}

/// Probe each GET endpoint and print one row per endpoint
async fn test_connection() -> Result<()> {
    let config = load_config();
    let client = ApiClient::new(&config.api_base_url)?;

    eprintln!("Testing endpoints at {}...\n", client.base_url());

    let results = client.probe_all().await;
    let mut failures = 0;
    for probe in &results {
        let status = match probe.result {
            Ok(()) => "✓ ok".to_string(),
            Err(ref e) => {
                failures += 1;
                format!("✗ {}", failure_label(e))
            }
        };
        println!(
            "{:<40} {:<18} {:>6} ms",
            probe.endpoint.to_string(),
            status,
            probe.elapsed.as_millis()
        );
    }

    eprintln!(
        "\n{} of {} endpoints reachable",
        results.len() - failures,
        results.len()
    );
    Ok(())
}

/// Dump the listings page's data to stdout as JSON
async fn dump_listings() -> Result<()> {
    let config = load_config();
    let mirror = MirrorStore::new(config.data_dir()?)?;
    let loader = Loader::new(ApiClient::new(&config.api_base_url)?);

    eprintln!("Fetching up to {} listings...", config.listings_limit);
    let fetched = loader.listings(config.listings_limit, &mirror).await;
    if let Some(reason) = fetched.reason() {
        eprintln!("Backend unavailable ({}), showing sample data", reason);
    }

    let listings = fetched.into_data();
    println!("{}", serde_json::to_string_pretty(&listings)?);
    eprintln!("Done! {} listings exported.", listings.len());
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
