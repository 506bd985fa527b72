//! TUI runner — main loop that wires everything together.
//!
//! Creates the terminal, starts the refresh schedule, runs the main
//! TEA loop. Fetches run as spawned tasks reporting back over the
//! message channel, so drawing never blocks on the network.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::interval;

use crate::config::UiConfig;
use crate::feed::FeedClient;
use crate::refresh::RefreshTimer;

use super::app::App;
use super::event::AppMessage;
use super::layout;

pub struct RunOptions {
    pub refresh_interval: Duration,
    pub page_size: usize,
    pub export_dir: PathBuf,
}

fn spawn_fetch(client: &FeedClient, tx: &UnboundedSender<AppMessage>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.fetch().await;
        // Receiver gone means the UI is shutting down; nothing to do.
        let _ = tx.send(AppMessage::FeedLoaded(result));
    });
}

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(client: FeedClient, options: RunOptions) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(options.page_size, options.export_dir, UiConfig::load());
    let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();
    let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel::<()>();

    let mut timer = RefreshTimer::start(options.refresh_interval, refresh_tx.clone(), ());
    app.request_refresh(false);

    let mut tick_interval = interval(Duration::from_millis(100)); // debounce + flash expiry
    let mut render_interval = interval(Duration::from_millis(33)); // ~30fps

    loop {
        // Service requests raised by the last update before sleeping.
        if app.take_restart_timer() {
            timer = RefreshTimer::start(options.refresh_interval, refresh_tx.clone(), ());
        }
        if app.take_pending_fetch() {
            app.begin_fetch();
            spawn_fetch(&client, &tx);
        }

        tokio::select! {
            _ = tick_interval.tick() => {
                app.update(AppMessage::Tick);
            }
            _ = render_interval.tick() => {
                terminal.draw(|f| layout::draw(f, &app, client.url()))?;
            }
            Some(msg) = rx.recv() => {
                app.update(msg);
            }
            Some(_) = refresh_rx.recv() => {
                app.update(AppMessage::RefreshDue);
            }
            // Poll crossterm events (non-blocking via tokio::task::spawn_blocking)
            result = tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            }) => {
                if let Ok(Some(Event::Key(key))) = result {
                    app.update(AppMessage::Input(key));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    timer.cancel();

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
