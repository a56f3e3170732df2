//! Terminal UI for recyclo that shows nearby recycling centers on a map.

mod app;
mod config;
mod fetch;
mod input;
mod logging;
mod opener;
mod ui;

use std::{io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use recyclo_core::{ports::LocationPort, service::RecyclingService};
use recyclo_provider_google::GooglePlacesPort;
use recyclo_provider_ipapi::{FixedLocation, IpApiLocation};
use reqwest::Client;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

use crate::app::{App, AppEvent};
use crate::config::Config;
use crate::fetch::Fetcher;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    let _log_guard = logging::init(config.log_file.as_deref())?;

    // HTTP + service setup
    let client = Client::builder()
        .user_agent(concat!("recyclo/", env!("CARGO_PKG_VERSION")))
        .timeout(config.timeout())
        .build()?;

    let places = GooglePlacesPort::new(client.clone(), config.api_key.as_str())?
        .with_base_url(config.places_base_url.as_str());
    let location: Arc<dyn LocationPort> = match config.fixed_position() {
        Some(position) => Arc::new(FixedLocation::new(position)),
        None => Arc::new(IpApiLocation::new(client, config.locate)),
    };
    let service = Arc::new(RecyclingService::new(Arc::new(places), location));

    // App state
    let app = App::new(config.item.clone());
    info!(item = ?config.item, "starting recyclo");

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut fetcher = Fetcher::new(service, events_tx);
    let res = run(&mut terminal, app, &mut fetcher, events_rx).await;
    fetcher.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    fetcher: &mut Fetcher,
    mut events: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    // Location is acquired once per run
    fetcher.locate();

    loop {
        if let Some(request) = app.sync_route() {
            fetcher.search(request);
        }

        // Fold in finished background work
        while let Ok(event) = events.try_recv() {
            fetcher.settle(&event);
            let effect = app.handle_event(event);
            fetcher.apply(effect);
        }

        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Search(request) => fetcher.search(request),
                Action::Directions(center) => opener::open_directions(&center),
            }
        }

        // Let spawned tasks make progress between frames
        tokio::task::yield_now().await;
    }

    info!("shutting down");
    Ok(())
}
