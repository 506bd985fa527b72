//! ratatui TUI presentation layer.
//!
//! Renders the proxy table as a terminal dashboard. Read-only over the
//! view pipeline: drawing never mutates records or filters.
//!
//! ## Architecture (TEA)
//!
//! Model (`App`) + Update (message handler) + View (render). Immediate
//! mode, no retained widget state. The pure filter/sort/paginate
//! functions live in `crate::view`; this layer only holds UI state and
//! dispatches control changes into it.

pub mod app;
pub mod event;
pub mod input;
pub mod layout;
pub mod runner;
pub mod theme;
