use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, Tab, ToastKind};

use super::styles;
use super::tabs::{analytics, booking, dashboard, deals, hosts, listings, predictor, travel};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  NestMetrics";
    let backend = format!("{}  ", app.config.api_base_url);
    let help_hint = "[?] Help";

    let mut spans = vec![Span::styled(title, styles::title_style())];
    let mut used = title.len() + backend.len() + help_hint.len() + 4;
    if app.showing_sample_data() {
        let marker = " sample data ";
        spans.push(Span::raw("  "));
        spans.push(Span::styled(marker, styles::sample_marker_style()));
        used += marker.len() + 2;
    }
    let (status, status_style) = match app.backend_online() {
        Some(true) => ("● online  ", styles::success_style()),
        Some(false) => ("● offline  ", styles::error_style()),
        None => ("● checking  ", styles::muted_style()),
    };
    used += status.chars().count();
    spans.push(Span::raw(" ".repeat((area.width as usize).saturating_sub(used))));
    spans.push(Span::styled(status, status_style));
    spans.push(Span::styled(backend, styles::muted_style()));
    spans.push(Span::styled(help_hint, styles::muted_style()));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let label = if app.is_loading(*tab) {
            format!("[{}] {}…", i + 1, tab.title())
        } else {
            format!("[{}] {}", i + 1, tab.title())
        };
        if *tab == app.current_tab {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Dashboard => dashboard::render(frame, app, area),
        Tab::Listings => listings::render(frame, app, area),
        Tab::Hosts => hosts::render(frame, app, area),
        Tab::Deals => deals::render(frame, app, area),
        Tab::Booking => booking::render(frame, app, area),
        Tab::Travel => travel::render(frame, app, area),
        Tab::Predictor => predictor::render(frame, app, area),
        Tab::Analytics => analytics::render(frame, app, area),
    }
}

/// Left side of the status bar: toast, then status message, then mirror age
fn status_left(app: &App) -> (String, Style) {
    if let Some(ref toast) = app.toast {
        let style = match toast.kind {
            ToastKind::Success => styles::success_style(),
            ToastKind::Error => styles::error_style(),
        };
        return (format!(" {} ", toast.message), style);
    }
    if let Some(ref msg) = app.status_message {
        return (format!(" {} ", msg), styles::muted_style());
    }
    match app.mirror_info {
        Some(ref info) => {
            let style = if info.is_stale() {
                styles::highlight_style()
            } else {
                styles::muted_style()
            };
            (
                format!(" {} listings saved locally, {} ", info.data, info.age_display()),
                style,
            )
        }
        None => (" No saved listings ".to_string(), styles::muted_style()),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (left_text, left_style) = status_left(app);
    let shortcuts = match app.state {
        AppState::Searching => "[Enter] keep | [Esc] clear",
        AppState::EditingForm => "[Enter] submit | [Esc] done",
        _ => "[u]pdate | [q]uit",
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_row(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(60, 34, frame.area());

    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  NestMetrics", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(Span::styled(
            "  NYC Airbnb market analytics over the NestMetrics API.",
            styles::muted_style(),
        )),
        Line::from(Span::styled(
            "  Pages fall back to sample data when the API is down.",
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_row("1-8", "Switch tabs"),
        help_row("←/→", "Prev/next tab"),
        help_row("↑/↓", "Navigate list or scroll"),
        help_row("PgUp/PgDn", "Move by a page"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        help_row("u", "Update the current tab"),
        help_row("e", "Edit the tab's form"),
        help_row("Enter", "Submit the form"),
        help_row("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(" Listings Tab", styles::highlight_style())),
        help_row("/", "Search name or host"),
        help_row("n / t", "Cycle neighborhood / room type"),
        help_row("c", "Clear filters"),
        help_row("a / e", "Add / edit listing"),
        help_row("o", "Booking tab: optimize trip only"),
        Line::from(""),
        Line::from(Span::styled(" Forms", styles::highlight_style())),
        help_row("Tab/↑↓", "Next/previous field"),
        help_row("←/→", "Change option"),
        help_row("Esc", "Stop editing"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(40, 7, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed_clamps_to_screen() {
        let screen = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(60, 30, screen), Rect::new(20, 5, 60, 30));
        let small = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect_fixed(60, 30, small), Rect::new(0, 0, 30, 10));
    }

    #[tokio::test]
    async fn test_status_prefers_toast_over_mirror_age() {
        use nestmetrics_core::cache::{CachedData, MirrorStore};
        use nestmetrics_core::Config;

        let dir = tempfile::tempdir().unwrap();
        let mirror = MirrorStore::new(dir.path().to_path_buf()).unwrap();
        let mut app = App::with_parts(Config::default(), mirror).unwrap();

        assert_eq!(status_left(&app).0, " No saved listings ");

        app.mirror_info = Some(CachedData::new(3));
        assert!(status_left(&app).0.starts_with(" 3 listings saved locally"));

        app.show_error("Failed to find deals");
        assert_eq!(status_left(&app).0, " Failed to find deals ");
    }
}
