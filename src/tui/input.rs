//! Key binding dispatch for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::view::SortKey;

use super::app::{App, ExportFormat, Mode};

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Global bindings
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Search => handle_search_key(app, key),
        Mode::Browse => handle_browse_key(app, key),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.leave_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Selection and paging
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Left | KeyCode::Char('[') => app.prev_page(),
        KeyCode::Right | KeyCode::Char(']') => app.next_page(),

        // Column sort — repeated presses toggle direction
        KeyCode::Char('1') => app.sort_by(SortKey::Ip),
        KeyCode::Char('2') => app.sort_by(SortKey::Port),
        KeyCode::Char('3') => app.sort_by(SortKey::Protocol),
        KeyCode::Char('4') => app.sort_by(SortKey::Country),
        KeyCode::Char('5') => app.sort_by(SortKey::Latency),
        KeyCode::Char('6') => app.sort_by(SortKey::Status),
        KeyCode::Char('7') => app.sort_by(SortKey::Speed),
        KeyCode::Char('8') => app.sort_by(SortKey::Anonymity),

        // Filters
        KeyCode::Char('p') => app.cycle_protocol(),
        KeyCode::Char('c') => app.cycle_country(),
        KeyCode::Char('a') => app.cycle_anonymity(),
        KeyCode::Char('s') => app.cycle_speed(),
        KeyCode::Char('m') => app.cycle_latency_bucket(),
        KeyCode::Char('i') => app.toggle_include_inactive(),
        KeyCode::Char('x') => app.clear_filters(),
        KeyCode::Char('/') => app.enter_search(),

        // Actions
        KeyCode::Char('y') => app.copy_selected(),
        KeyCode::Char('e') => app.export(ExportFormat::Csv),
        KeyCode::Char('t') => app.export(ExportFormat::Txt),
        KeyCode::Char('r') => app.request_refresh(true),
        KeyCode::Char('d') => app.toggle_theme(),

        _ => {}
    }
}
