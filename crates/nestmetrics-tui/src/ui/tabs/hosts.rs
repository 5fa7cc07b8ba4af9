use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use nestmetrics_core::charts;
use nestmetrics_core::models::{BookingScore, HostTier};
use nestmetrics_core::utils::{format_amount, format_optional, format_price, format_value};
use nestmetrics_core::Fetched;

use crate::app::{App, AppState};
use crate::ui::components::{bullet_lines, kv_line, panel, render_bar_chart, render_form, render_placeholder};
use crate::ui::styles;

fn tier_style(tier: HostTier) -> Style {
    match tier {
        HostTier::Superhost => styles::title_style(),
        HostTier::Plus => styles::highlight_style(),
        HostTier::Standard => styles::muted_style(),
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[0]);
    render_host_table(frame, app, left[0]);

    let host_points = app
        .hosts
        .as_ref()
        .map(|h| charts::host_listing_counts(h.data()))
        .unwrap_or_default();
    render_bar_chart(frame, left[1], "Listings per Host", &host_points, format_amount);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(6)])
        .split(columns[1]);
    let editing = app.state == AppState::EditingForm;
    render_form(
        frame,
        right[0],
        "Quick Booking Score",
        &app.host_score_form,
        editing,
        app.is_loading(app.current_tab) && app.hosts.is_some(),
    );
    render_score(frame, app.host_score.as_ref(), right[1]);
}

fn render_host_table(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref hosts) = app.hosts else {
        render_placeholder(frame, area, "Top Hosts", "Loading host insights...");
        return;
    };
    let hosts = hosts.data();

    let rows: Vec<Row> = hosts
        .iter()
        .enumerate()
        .map(|(i, host)| {
            Row::new(vec![
                Cell::from(format!("{:>2}", i + 1)),
                Cell::from(host.host_name.clone()),
                Cell::from(Span::styled(host.tier.to_string(), tier_style(host.tier))),
                Cell::from(host.listings_count.map_or_else(|| "-".to_string(), |c| c.to_string())),
                Cell::from(format_price(host.avg_price)),
                Cell::from(format_value(host.total_reviews, 0)),
                Cell::from(format_value(host.performance_score, 1)),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Fill(3),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(6),
    ];
    let title = match hosts.get(app.host_selection).and_then(|h| h.price_range.as_deref()) {
        Some(range) => format!("Top Hosts ({}) - price range {}", hosts.len(), range),
        None => format!("Top Hosts ({})", hosts.len()),
    };
    let header = Row::new(vec!["#", "Host", "Tier", "Listings", "Avg", "Reviews", "Score"])
        .style(styles::title_style());
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(&title, true))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !hosts.is_empty() {
        state.select(Some(app.host_selection));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// Score breakdown shared with the Booking tab
pub fn score_lines(score: &BookingScore) -> Vec<Line<'static>> {
    let headline = score.booking_score.unwrap_or(0.0);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Booking score: ", styles::highlight_style()),
            Span::styled(format_value(score.booking_score, 1), styles::score_style(headline)),
        ]),
        kv_line("Price competitiveness", format_value(score.price_competitiveness, 0)),
        kv_line("Availability likelihood", format_value(score.availability_likelihood, 0)),
        Line::from(""),
        kv_line("Recommendation", format_optional(score.insights.recommendation.as_deref())),
        kv_line("Best time", format_optional(score.insights.best_booking_time.as_deref())),
        kv_line("Urgency", format_optional(score.insights.booking_urgency.as_deref())),
        kv_line("Vs market", format_optional(score.insights.price_vs_market.as_deref())),
    ];
    if !score.tips.is_empty() {
        lines.push(Line::from(""));
        lines.extend(bullet_lines(&score.tips));
    }
    lines
}

fn render_score(frame: &mut Frame, score: Option<&Fetched<BookingScore>>, area: Rect) {
    let Some(score) = score else {
        render_placeholder(frame, area, "Score", "Press [Enter] to score a price");
        return;
    };
    frame.render_widget(Paragraph::new(score_lines(score.data())).block(panel("Score", false)), area);
}
