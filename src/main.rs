use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod handler;
mod insights;
mod outline;
mod storage;
mod tui;
mod ui;

use app::{App, View};

#[derive(Parser)]
#[command(name = "skillforge")]
#[command(about = "Terminal client for the SkillForge learning roadmap generator")]
#[command(version)]
struct Cli {
    /// Topic to pre-fill; generation starts immediately (deep link)
    #[arg(short, long)]
    topic: Option<String>,

    /// Initial view: "outline", anything else means "markdown" (deep link)
    #[arg(long, default_value = "markdown")]
    view: String,

    /// Base URL of the SkillForge server
    #[arg(long, default_value = "http://localhost:5000")]
    server: String,
}

/// Log to a file under the config dir; the terminal owns stderr while the
/// alternate screen is up. The guard must live until exit or buffered
/// lines are lost.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::config_dir()?.join("skillforge").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "skillforge.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    let mut app = App::new(&cli.server, cli.topic, View::parse(&cli.view))?;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();

    let result = run(&mut terminal, &mut events, &mut app).await;
    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut tui::EventHandler, app: &mut App) -> Result<()> {
    // Deep-linked topic generates without waiting for input
    if app.auto_generate {
        app.start_generate();
    }

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }

        app.poll_tasks().await;
    }

    Ok(())
}
