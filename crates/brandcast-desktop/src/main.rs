//! Main entry point for the Brandcast terminal dashboard.

use anyhow::Context;
use brandcast_config::{Config, ConfigLoader};
use brandcast_desktop::{draw_ui, handle_key_event, poll_event, App, Command};
use brandcast_engine::BrandEngine;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to a file; the terminal belongs to the UI.
fn init_file_logging(config: &Config) -> anyhow::Result<WorkerGuard> {
    let path = Path::new(&config.desktop.log_file);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .context("Desktop log file has no file name")?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(config.logging.to_logging_config().env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(guard)
}

fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    let _guard = init_file_logging(&config)?;
    info!("Starting Brandcast desktop dashboard v{}", env!("CARGO_PKG_VERSION"));

    let dataset = config.artifacts.dataset_path();
    let tick_rate = Duration::from_millis(config.desktop.tick_rate_ms);
    let brands = config.brand_list()?;
    let engine = BrandEngine::from_config(config).context("Failed to prepare analysis engine")?;
    if !engine.event_log_loaded() {
        anyhow::bail!(
            "Could not load '{}'. Please ensure it is in the artifact directory.",
            dataset.display()
        );
    }

    let mut app = App::new(brands)?;
    app.execute(Command::Reload, &engine);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &engine, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Desktop dashboard stopped");
    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    engine: &BrandEngine,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| draw_ui(frame, app))?;

        if let Some(Event::Key(key)) = poll_event(tick_rate)? {
            if let Some(command) = handle_key_event(app, key) {
                app.execute(command, engine);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
