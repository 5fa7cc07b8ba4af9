use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use nestmetrics_core::charts;
use nestmetrics_core::models::Stats;
use nestmetrics_core::utils::{format_amount, format_count, format_optional, format_price, format_value};

use crate::app::App;
use crate::ui::components::{kv_line, panel, render_bar_chart, render_placeholder};
use crate::ui::styles;

/// Sample listings shown under the charts
const LISTING_ROWS: usize = 10;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        render_placeholder(frame, area, "Dashboard", "Loading dashboard data...");
        return;
    };
    let data = dashboard.data();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),      // Overview cards
            Constraint::Percentage(50), // Charts
            Constraint::Min(6),         // Trends and listings
        ])
        .split(area);

    render_overview(frame, &data.stats, rows[0]);

    let charts_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_bar_chart(
        frame,
        charts_row[0],
        "Avg Price by Neighborhood",
        &charts::neighborhood_avg_price(&data.stats),
        |v| format!("${}", format_amount(v)),
    );
    render_bar_chart(
        frame,
        charts_row[1],
        "Listings by Neighborhood",
        &charts::neighborhood_listing_counts(&data.stats),
        |v| format_count(Some(v as u64)),
    );

    let bottom_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(20)])
        .split(rows[2]);
    render_trends(frame, &data.stats, bottom_row[0]);

    let listing_rows: Vec<Row> = data
        .listings
        .iter()
        .take(LISTING_ROWS)
        .map(|l| {
            Row::new(vec![
                Cell::from(l.display_name().to_string()),
                Cell::from(format_optional(l.neighbourhood_group.as_deref())),
                Cell::from(format_optional(l.room_type.as_deref())),
                Cell::from(format_price(l.price)),
            ])
            .style(styles::list_item_style())
        })
        .collect();
    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(9),
    ];
    let header = Row::new(vec!["Name", "Area", "Room type", "Price"]).style(styles::title_style());
    let table = Table::new(listing_rows, widths)
        .header(header)
        .block(panel(&format!("Listings ({})", data.listings.len()), false));
    frame.render_widget(table, bottom_row[1]);
}

fn render_overview(frame: &mut Frame, stats: &Stats, area: Rect) {
    let overview = &stats.overview;
    let cards = [
        ("Avg Price", format_price(overview.avg_price)),
        ("Median Price", format_price(overview.median_price)),
        ("Total Listings", format_count(overview.total_listings)),
        ("Active Listings", format_count(overview.active_listings)),
        ("Avg Reviews/mo", format_value(overview.avg_reviews, 2)),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, cards.len() as u32); 5])
        .split(area);

    for ((label, value), column) in cards.into_iter().zip(columns.iter()) {
        let paragraph = Paragraph::new(Line::from(Span::styled(value, styles::highlight_style())))
            .block(panel(label, false));
        frame.render_widget(paragraph, *column);
    }
}

fn render_trends(frame: &mut Frame, stats: &Stats, area: Rect) {
    let mut lines = Vec::new();
    match stats.market_trends {
        Some(ref trends) => {
            lines.push(kv_line("Seasonal factor", format_value(trends.seasonal_factor, 2)));
            lines.push(kv_line("Price growth", format_optional(trends.price_growth.as_deref())));
            lines.push(kv_line("Demand index", format_value(trends.demand_index, 0)));
            lines.push(kv_line("Supply index", format_value(trends.supply_index, 0)));
        }
        None => lines.push(Line::from(Span::styled("No trend data", styles::muted_style()))),
    }
    if let Some(ref tiers) = stats.performance_tiers {
        lines.push(Line::from(""));
        lines.push(kv_line("Premium", tiers.premium.to_string()));
        lines.push(kv_line("Standard", tiers.standard.to_string()));
        lines.push(kv_line("Budget", tiers.budget.to_string()));
    }
    if let Some(ref error) = stats.error {
        lines.push(Line::from(Span::styled(error.clone(), styles::error_style())));
    }

    frame.render_widget(Paragraph::new(lines).block(panel("Market Trends", false)), area);
}
