mod action;
mod api;
mod app;
mod config;
mod error;
mod event;
mod github;
mod route;
mod screen;
mod store;
mod tui;
mod types;
mod ui;

use std::fs::{File, OpenOptions};
use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::error::AppError;
use crate::event::Event;
use crate::github::GitHub;
use crate::route::Route;
use crate::store::LocalStorage;
use crate::tui::EventHandler;

/// Bookmark GitHub repositories and browse their issues
#[derive(Parser, Debug)]
#[command(name = "repofav", version, about)]
struct Cli {
    /// Route to open: `/` or `/repositorio/<owner%2Fname>`
    #[arg(default_value = "/")]
    route: String,

    /// Open the issues of OWNER/NAME directly
    #[arg(long, value_name = "OWNER/NAME")]
    repo: Option<String>,

    /// Directory holding the bookmark store
    #[arg(long, value_name = "DIR")]
    store_dir: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file (default: <config dir>/repofav/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn initial_route(&self) -> Result<Route, AppError> {
        match &self.repo {
            Some(repo) => Ok(Route::detail(repo.trim())),
            None => Route::parse(&self.route),
        }
    }
}

/// Log file under the cache dir, so log lines never draw over the TUI
fn log_file() -> Option<File> {
    let dir = dirs::cache_dir()?.join("repofav");
    std::fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("repofav.log"))
        .ok()
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file() {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let route = cli.initial_route()?;
    let api_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_url().to_string());
    let store_dir = cli
        .store_dir
        .clone()
        .or_else(|| config.store_dir())
        .ok_or_else(|| AppError::Config("no data directory; pass --store-dir".to_string()))?;

    tracing::info!(%route, %api_url, store = %store_dir.display(), "starting");

    let github = GitHub::new(&api_url)?;
    let store = LocalStorage::new(store_dir);

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(github, store, route, config.notification_duration()).await;

    tui::restore()?;

    result
}

async fn run(
    github: GitHub,
    store: LocalStorage,
    route: Route,
    notification_ttl: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(
        Arc::new(github),
        Box::new(store),
        action_tx.clone(),
        notification_ttl,
        route,
    );

    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
