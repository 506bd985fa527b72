//! proxyscope — terminal viewer for proxy-list feeds.
//!
//! Fetches a JSON proxy list over HTTP and renders it as a filterable,
//! sortable, paginated table with CSV/TXT export. The view pipeline is
//! pure and UI-free; the TUI is a thin TEA shell over it.

pub mod config;
pub mod export;
pub mod feed;
pub mod model;
pub mod refresh;
pub mod tui;
pub mod view;
