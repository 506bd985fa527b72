//! TUI event types — everything that drives the update loop.
//!
//! The runner multiplexes:
//! - crossterm keyboard events
//! - feed fetch results (spawned tasks report back over mpsc)
//! - refresh-due ticks from the schedule timer
//! - a UI tick (debounce deadlines, flash expiry)
//!
//! All of it flows through a single mpsc channel as AppMessages.

use crossterm::event::KeyEvent;

use crate::feed::FeedError;
use crate::model::ProxyRecord;

/// Messages that drive the TUI update loop.
#[derive(Debug)]
pub enum AppMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// A fetch finished — fully replaces the record set on success.
    FeedLoaded(Result<Vec<ProxyRecord>, FeedError>),
    /// The periodic refresh timer fired.
    RefreshDue,
    /// UI tick: expire the status flash, fire the search debounce.
    Tick,
    /// Quit the TUI.
    Quit,
}
