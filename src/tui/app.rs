//! App — the TEA model.
//!
//! All UI state lives here. Update receives AppMessages, mutates state.
//! View reads state to produce ratatui widgets. No side effects in view.
//!
//! The record set and the `ViewState` are the inputs to the pure
//! pipeline in `crate::view`; `apply_view` recomputes the filtered
//! snapshot in full after every control change.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::config::UiConfig;
use crate::export;
use crate::model::ProxyRecord;
use crate::view::{self, LatencyBucket, SortKey, Stats, ViewState};

use super::event::AppMessage;
use super::input;

/// How long a status flash stays on screen.
const FLASH_TTL: Duration = Duration::from_secs(3);

/// Keystrokes in the search box settle for this long before the view
/// recomputes.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(200);

/// Current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// Keystrokes edit the IP search query.
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Txt,
}

/// The main TUI application state (TEA model).
pub struct App {
    /// Full record set, replaced wholesale on each successful fetch.
    pub records: Vec<ProxyRecord>,
    /// Filtered + sorted snapshot the table renders from.
    pub filtered: Vec<ProxyRecord>,
    /// Sort / page / filter state.
    pub view: ViewState,
    /// Browse or search-input mode.
    pub mode: Mode,
    /// Selected row index within the current page.
    pub selected: usize,
    /// Persisted preferences (theme).
    pub config: UiConfig,
    /// Transient status-bar message.
    pub status_flash: Option<(String, Instant)>,
    /// Last fetch failure, shown as the single in-table error row.
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Local>>,
    /// A fetch task is running.
    pub fetch_in_flight: bool,
    /// Search keystrokes settle until this deadline before refiltering.
    pub search_deadline: Option<Instant>,
    /// Dropdown option lists, rebuilt from each loaded record set.
    pub protocol_options: Vec<String>,
    pub country_options: Vec<String>,
    pub anonymity_options: Vec<String>,
    pub speed_options: Vec<String>,
    /// Summary over the full record set.
    pub stats: Stats,
    pub export_dir: PathBuf,
    pub should_quit: bool,

    // Requests the runner consumes after each update.
    pending_fetch: bool,
    restart_timer: bool,
}

impl App {
    pub fn new(page_size: usize, export_dir: PathBuf, config: UiConfig) -> Self {
        let view = ViewState {
            page_size,
            ..ViewState::default()
        };
        Self {
            records: Vec::new(),
            filtered: Vec::new(),
            view,
            mode: Mode::Browse,
            selected: 0,
            config,
            status_flash: None,
            last_error: None,
            last_updated: None,
            fetch_in_flight: false,
            search_deadline: None,
            protocol_options: Vec::new(),
            country_options: Vec::new(),
            anonymity_options: Vec::new(),
            speed_options: Vec::new(),
            stats: Stats::default(),
            export_dir,
            should_quit: false,
            pending_fetch: false,
            restart_timer: false,
        }
    }

    /// TEA update: one message in, state mutated.
    pub fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Input(key) => input::handle_key(self, key),
            AppMessage::FeedLoaded(Ok(records)) => self.on_feed_loaded(records),
            AppMessage::FeedLoaded(Err(e)) => {
                tracing::warn!("feed fetch failed: {e}");
                self.last_error = Some(e.to_string());
                self.fetch_in_flight = false;
            }
            AppMessage::RefreshDue => {
                // No overlap: a refresh due mid-fetch is skipped.
                if !self.fetch_in_flight {
                    self.pending_fetch = true;
                }
            }
            AppMessage::Tick => self.on_tick(),
            AppMessage::Quit => self.should_quit = true,
        }
    }

    fn on_feed_loaded(&mut self, records: Vec<ProxyRecord>) {
        tracing::info!("feed loaded: {} records", records.len());
        self.records = records;
        self.last_error = None;
        self.last_updated = Some(Local::now());
        self.fetch_in_flight = false;
        self.stats = Stats::compute(&self.records);
        self.protocol_options =
            view::distinct_options(&self.records, |r| Some(r.protocol.as_str()));
        self.country_options = view::distinct_options(&self.records, |r| Some(r.country.as_str()));
        self.anonymity_options = view::distinct_options(&self.records, |r| r.anonymity.as_deref());
        self.speed_options = view::distinct_options(&self.records, |r| Some(r.effective_speed()));
        self.apply_view();
    }

    fn on_tick(&mut self) {
        if let Some((_, shown_at)) = self.status_flash {
            if shown_at.elapsed() > FLASH_TTL {
                self.status_flash = None;
            }
        }
        if let Some(deadline) = self.search_deadline {
            if Instant::now() >= deadline {
                self.search_deadline = None;
                self.apply_view();
            }
        }
    }

    /// Recompute the filtered snapshot: filter → sort → clamp page and
    /// selection. Full recomputation, no incremental update.
    pub fn apply_view(&mut self) {
        self.filtered = view::filter(&self.records, &self.view.filters);
        view::sort(&mut self.filtered, self.view.sort_key, self.view.sort_dir);
        self.view.page =
            view::clamp_page(self.view.page, self.filtered.len(), self.view.page_size);
        let page_len = self.page_records().len();
        self.selected = self.selected.min(page_len.saturating_sub(1));
    }

    pub fn page_records(&self) -> &[ProxyRecord] {
        view::page_slice(&self.filtered, self.view.page_size, self.view.page)
    }

    pub fn selected_record(&self) -> Option<&ProxyRecord> {
        self.page_records().get(self.selected)
    }

    pub fn total_pages(&self) -> usize {
        view::total_pages(self.filtered.len(), self.view.page_size)
    }

    // ---- control changes (dispatched from input) ----

    pub fn move_down(&mut self) {
        let last = self.page_records().len().saturating_sub(1);
        self.selected = (self.selected + 1).min(last);
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        self.view.page = (self.view.page + 1).min(self.total_pages());
        self.selected = 0;
    }

    pub fn prev_page(&mut self) {
        self.view.page = self.view.page.saturating_sub(1).max(1);
        self.selected = 0;
    }

    /// Column-header semantics: same key toggles direction.
    pub fn sort_by(&mut self, key: SortKey) {
        self.view.toggle_sort(key);
        self.apply_view();
    }

    pub fn cycle_protocol(&mut self) {
        self.view.filters.protocol =
            cycle_option(self.view.filters.protocol.take(), &self.protocol_options);
        self.apply_view();
    }

    pub fn cycle_country(&mut self) {
        self.view.filters.country =
            cycle_option(self.view.filters.country.take(), &self.country_options);
        self.apply_view();
    }

    pub fn cycle_anonymity(&mut self) {
        self.view.filters.anonymity =
            cycle_option(self.view.filters.anonymity.take(), &self.anonymity_options);
        self.apply_view();
    }

    pub fn cycle_speed(&mut self) {
        self.view.filters.speed =
            cycle_option(self.view.filters.speed.take(), &self.speed_options);
        self.apply_view();
    }

    pub fn cycle_latency_bucket(&mut self) {
        self.view.filters.latency_bucket = match self.view.filters.latency_bucket {
            None => Some(LatencyBucket::ALL[0]),
            Some(current) => LatencyBucket::ALL
                .iter()
                .position(|b| *b == current)
                .and_then(|i| LatencyBucket::ALL.get(i + 1))
                .copied(),
        };
        self.apply_view();
    }

    pub fn toggle_include_inactive(&mut self) {
        self.view.filters.include_inactive = !self.view.filters.include_inactive;
        self.apply_view();
    }

    /// Drop every constraint; the include-inactive toggle is a display
    /// preference and survives.
    pub fn clear_filters(&mut self) {
        self.view.filters.clear();
        self.apply_view();
    }

    pub fn toggle_theme(&mut self) {
        self.config.theme = self.config.theme.flipped();
        self.config.save();
    }

    // ---- search ----

    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
    }

    pub fn leave_search(&mut self) {
        self.mode = Mode::Browse;
        // Apply whatever settled, debounce or not.
        self.search_deadline = None;
        self.apply_view();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.view.filters.query.push(c);
        self.note_search_edited();
    }

    pub fn pop_search_char(&mut self) {
        self.view.filters.query.pop();
        self.note_search_edited();
    }

    fn note_search_edited(&mut self) {
        self.search_deadline = Some(Instant::now() + SEARCH_DEBOUNCE);
    }

    // ---- actions ----

    /// Copy `protocol://ip[:port]` for the selected row to the system
    /// clipboard.
    pub fn copy_selected(&mut self) {
        let Some(rec) = self.selected_record() else {
            return;
        };
        let endpoint = rec.endpoint_url();
        match copy_to_clipboard(&endpoint) {
            Ok(()) => self.flash(format!("copied {endpoint}")),
            Err(e) => self.flash(format!("clipboard error: {e}")),
        }
    }

    /// Export the currently filtered set (all pages, current order).
    pub fn export(&mut self, format: ExportFormat) {
        let result = match format {
            ExportFormat::Csv => export::write_csv(&self.filtered, &self.export_dir),
            ExportFormat::Txt => export::write_txt(&self.filtered, &self.export_dir),
        };
        match result {
            Ok(path) => self.flash(format!("exported {}", path.display())),
            Err(e) => self.flash(format!("export failed: {e}")),
        }
    }

    /// Ask the runner to fetch. Manual refreshes also restart the
    /// periodic schedule so the next automatic one is a full period out.
    pub fn request_refresh(&mut self, manual: bool) {
        if self.fetch_in_flight {
            return;
        }
        self.pending_fetch = true;
        if manual {
            self.restart_timer = true;
        }
    }

    pub fn flash(&mut self, text: String) {
        self.status_flash = Some((text, Instant::now()));
    }

    // ---- runner handshake ----

    pub fn begin_fetch(&mut self) {
        self.fetch_in_flight = true;
    }

    pub fn take_pending_fetch(&mut self) -> bool {
        std::mem::take(&mut self.pending_fetch)
    }

    pub fn take_restart_timer(&mut self) -> bool {
        std::mem::take(&mut self.restart_timer)
    }
}

/// Advance a dropdown selection: no constraint → first option → ... →
/// last option → no constraint.
fn cycle_option(current: Option<String>, options: &[String]) -> Option<String> {
    match current {
        None => options.first().cloned(),
        Some(value) => options
            .iter()
            .position(|o| *o == value)
            .and_then(|i| options.get(i + 1))
            .cloned(),
    }
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)
}
