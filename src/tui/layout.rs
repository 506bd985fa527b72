//! Drawing — the whole screen, top to bottom.
//!
//! ```text
//! ┌ proxyscope  https://…/proxies.json   updated 14:05:33 ┐
//! ├─ Filters ─────────────────────────────────────────────┤
//! │ proto:* country:US speed:* anon:* latency:*           │
//! │ search: 10.    inactive: off                          │
//! ├─ Proxies — 42 of 200 (page 2/3) ──────────────────────┤
//! │  #  IP          Port  Proto  Country  Latency ▲ …     │
//! │ 16  10.0.0.1    8080  HTTP   US        42 ms  Active  │
//! ├────────────────────────────────────────────────────────┤
//! │ total 200 │ active 151 │ avg 243 ms │ 75.5%   page 2/3 │
//! │ q quit  / search  p/c/s/a/m filter  y copy  e/t export │
//! └────────────────────────────────────────────────────────┘
//! ```

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::view::SortKey;

use super::app::{App, Mode};
use super::theme::Theme;

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &App, feed_url: &str) {
    let theme = Theme::for_mode(app.config.theme);

    // Paint the background first; widgets draw over it.
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg)),
        f.area(),
    );

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Length(4), // filter panel
            Constraint::Min(5),    // table
            Constraint::Length(1), // stats + pagination
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    draw_title(f, app, &theme, feed_url, outer[0]);
    draw_filters(f, app, &theme, outer[1]);
    draw_table(f, app, &theme, outer[2]);
    draw_stats(f, app, &theme, outer[3]);
    draw_status(f, app, &theme, outer[4]);
}

fn draw_title(f: &mut Frame, app: &App, theme: &Theme, feed_url: &str, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " proxyscope ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(feed_url, Style::default().fg(theme.dim)),
    ];
    if let Some(updated) = app.last_updated {
        spans.push(Span::styled(
            format!("  updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(theme.fg),
        ));
    }
    if app.fetch_in_flight {
        spans.push(Span::styled(
            "  fetching…",
            Style::default().fg(theme.accent),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// One `name:value` segment of the filter line; highlighted when the
/// constraint is active.
fn filter_span<'a>(theme: &Theme, name: &str, value: Option<&'a str>) -> Vec<Span<'a>> {
    let (text, style) = match value {
        Some(v) => (v.to_string(), Style::default().fg(theme.accent)),
        None => ("*".to_string(), Style::default().fg(theme.dim)),
    };
    vec![
        Span::styled(format!("{name}:"), Style::default().fg(theme.fg)),
        Span::styled(text, style),
        Span::raw("  "),
    ]
}

fn draw_filters(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let filters = &app.view.filters;

    let mut line1: Vec<Span> = Vec::new();
    line1.extend(filter_span(theme, "proto", filters.protocol.as_deref()));
    line1.extend(filter_span(theme, "country", filters.country.as_deref()));
    line1.extend(filter_span(theme, "speed", filters.speed.as_deref()));
    line1.extend(filter_span(theme, "anon", filters.anonymity.as_deref()));
    line1.extend(filter_span(
        theme,
        "latency",
        filters.latency_bucket.map(|b| b.label()),
    ));

    let search_style = if app.mode == Mode::Search {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.fg)
    };
    let cursor = if app.mode == Mode::Search { "▏" } else { "" };
    let line2 = vec![
        Span::styled("search:", Style::default().fg(theme.fg)),
        Span::styled(format!("{}{cursor}", filters.query), search_style),
        Span::raw("  "),
        Span::styled("inactive:", Style::default().fg(theme.fg)),
        Span::styled(
            if filters.include_inactive { "shown" } else { "hidden" },
            if filters.include_inactive {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.dim)
            },
        ),
    ];

    let block = Block::default()
        .title(" Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let paragraph =
        Paragraph::new(vec![Line::from(line1), Line::from(line2)]).block(block);
    f.render_widget(paragraph, area);
}

fn sort_arrow(app: &App, key: SortKey) -> &'static str {
    if app.view.sort_key != key {
        return "";
    }
    match app.view.sort_dir {
        crate::view::SortDirection::Asc => " ▲",
        crate::view::SortDirection::Desc => " ▼",
    }
}

fn draw_table(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(format!(
            " Proxies — {} of {} (page {}/{}) ",
            app.filtered.len(),
            app.records.len(),
            app.view.page,
            app.total_pages(),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    // Fetch failure: the table body is a single error row.
    if let Some(error) = &app.last_error {
        let body = Paragraph::new(Line::from(Span::styled(
            format!("Failed to load proxies: {error}"),
            Style::default().fg(theme.error),
        )))
        .block(block)
        .alignment(Alignment::Center);
        f.render_widget(body, area);
        return;
    }

    let page = app.page_records();
    if page.is_empty() {
        let body = Paragraph::new(Line::from(Span::styled(
            "No proxies found matching your criteria.",
            Style::default().fg(theme.dim),
        )))
        .block(block)
        .alignment(Alignment::Center);
        f.render_widget(body, area);
        return;
    }

    let header_cell = |label: &str, key: SortKey| {
        Cell::from(format!("{label}{}", sort_arrow(app, key))).style(
            Style::default()
                .fg(theme.header_fg)
                .add_modifier(Modifier::BOLD),
        )
    };
    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(theme.header_fg)),
        header_cell("IP", SortKey::Ip),
        header_cell("Port", SortKey::Port),
        header_cell("Proto", SortKey::Protocol),
        header_cell("Country", SortKey::Country),
        header_cell("Latency", SortKey::Latency),
        header_cell("Status", SortKey::Status),
        header_cell("Speed", SortKey::Speed),
        header_cell("Anon", SortKey::Anonymity),
    ]);

    let first_row_number = (app.view.page - 1) * app.view.page_size + 1;
    let rows = page.iter().enumerate().map(|(i, rec)| {
        let status_style = if rec.is_active() {
            Style::default().fg(theme.active)
        } else {
            Style::default().fg(theme.inactive)
        };
        let speed = rec.effective_speed().to_string();
        let speed_style = Style::default().fg(theme.speed_color(&speed));
        Row::new(vec![
            Cell::from(format!("{}", first_row_number + i))
                .style(Style::default().fg(theme.dim)),
            Cell::from(rec.ip.clone()).style(Style::default().fg(theme.fg)),
            Cell::from(rec.port.map(|p| p.to_string()).unwrap_or_default())
                .style(Style::default().fg(theme.fg)),
            Cell::from(rec.protocol.clone()).style(Style::default().fg(theme.fg)),
            Cell::from(rec.country.clone()).style(Style::default().fg(theme.fg)),
            Cell::from(format!("{:.0} ms", rec.display_latency())).style(speed_style),
            Cell::from(rec.status.clone()).style(status_style),
            Cell::from(speed).style(speed_style),
            Cell::from(rec.anonymity.clone().unwrap_or_default())
                .style(Style::default().fg(theme.dim)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(16),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Min(6),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(theme.selection_bg)
            .fg(theme.selection_fg),
    );

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_stats(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(16)])
        .split(area);

    let stats = &app.stats;
    let left = Line::from(vec![
        Span::styled(
            format!(" total {}", stats.total),
            Style::default().fg(theme.fg),
        ),
        Span::styled(" │ ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("active {}", stats.active),
            Style::default().fg(theme.active),
        ),
        Span::styled(" │ ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("avg {:.2} ms", stats.avg_latency_ms),
            Style::default().fg(theme.fg),
        ),
        Span::styled(" │ ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("{:.2}% active", stats.success_rate),
            Style::default().fg(theme.fg),
        ),
    ]);
    f.render_widget(Paragraph::new(left), halves[0]);

    let right = Line::from(Span::styled(
        format!("page {}/{} ", app.view.page, app.total_pages()),
        Style::default().fg(theme.accent),
    ));
    f.render_widget(
        Paragraph::new(right).alignment(Alignment::Right),
        halves[1],
    );
}

fn draw_status(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let text = match &app.status_flash {
        Some((flash, _)) => Line::from(Span::styled(
            format!(" {flash}"),
            Style::default().fg(theme.accent),
        )),
        None => Line::from(Span::styled(
            " q quit  / search  1-8 sort  p/c/s/a/m filter  i inactive  x clear  \
             y copy  e csv  t txt  r refresh  d theme",
            Style::default().fg(theme.dim),
        )),
    };
    f.render_widget(Paragraph::new(text), area);
}
