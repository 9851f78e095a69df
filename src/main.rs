use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use counsel::app_state::AppState;
use counsel::client::CompletionClient;
use counsel::constants;
use counsel::{events, ui};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Attach .txt/.pdf files before the first prompt; their extracted
    /// text rides along with every request.
    #[arg(long, value_name = "FILE")]
    attach: Vec<PathBuf>,

    /// Where tracing output goes; the terminal itself belongs to the TUI.
    #[arg(long, default_value = "counsel.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for environment variables like API keys)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log to a file: stdout is the TUI. Level comes from RUST_LOG
    // (e.g. RUST_LOG=counsel=debug).
    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_name = cli
        .log_file
        .file_name()
        .context("--log-file needs a file name")?;
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("counsel=info")),
        )
        .init();

    info!("Counsel starting");

    // The credential is opaque and read once here; absence is not
    // validated, requests simply fail at the endpoint.
    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    let api_base = std::env::var("COUNSEL_API_BASE")
        .unwrap_or_else(|_| constants::DEFAULT_API_BASE.to_string());
    let client = CompletionClient::new(api_base, api_key);

    let mut app = AppState::new();
    if !cli.attach.is_empty() {
        events::spawn_extraction(&mut app, cli.attach);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    client: &CompletionClient,
) -> Result<()> {
    loop {
        // Apply any completion/extraction outcomes queued since last tick
        app.drain_events();

        terminal.draw(|f| ui::draw_ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if events::handle_key_event(app, client, key)? {
                    info!("exit requested");
                    return Ok(());
                }
            }
        }
    }
}
