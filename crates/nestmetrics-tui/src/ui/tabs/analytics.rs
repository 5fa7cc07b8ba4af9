use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use nestmetrics_core::charts;
use nestmetrics_core::models::AdvancedAnalytics;
use nestmetrics_core::utils::{format_amount, format_price, format_value};

use crate::app::App;
use crate::ui::components::{kv_line, panel, render_bar_chart, render_placeholder, section_line};

fn dollars(value: f64) -> String {
    format!("${}", format_amount(value))
}

fn whole(value: f64) -> String {
    format!("{:.0}", value)
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref analytics) = app.analytics else {
        render_placeholder(frame, area, "Analytics", "Loading analytics...");
        return;
    };
    let analytics = analytics.data();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(area);

    let split = |area: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area)
    };

    let top = split(rows[0]);
    render_bar_chart(
        frame,
        top[0],
        "Avg Price by Room Type",
        &charts::analytics_room_type_price(analytics),
        dollars,
    );
    render_distribution(frame, analytics, top[1]);

    let middle = split(rows[1]);
    render_bar_chart(
        frame,
        middle[0],
        "Mean Price by Neighborhood",
        &charts::neighborhood_pricing_mean(analytics),
        dollars,
    );
    render_bar_chart(
        frame,
        middle[1],
        "Listings by Neighborhood",
        &charts::neighborhood_pricing_count(analytics),
        whole,
    );

    let bottom = split(rows[2]);
    render_bar_chart(
        frame,
        bottom[0],
        "Availability (days/yr)",
        &charts::availability_trends(analytics),
        whole,
    );
    render_bar_chart(
        frame,
        bottom[1],
        "Top Hosts by Listings",
        &charts::top_host_listing_counts(analytics),
        whole,
    );
}

fn render_distribution(frame: &mut Frame, analytics: &AdvancedAnalytics, area: Rect) {
    let mut lines = Vec::new();
    if let Some(ref dist) = analytics.price_insights.price_distribution {
        lines.push(section_line("Price Distribution"));
        lines.push(kv_line("25th percentile", format_price(dist.q25)));
        lines.push(kv_line("Median", format_price(dist.median)));
        lines.push(kv_line("75th percentile", format_price(dist.q75)));
        lines.push(kv_line("Mean", format_price(dist.mean)));
        lines.push(Line::from(""));
    }

    let patterns = &analytics.booking_patterns;
    lines.push(kv_line(
        "Instant bookable",
        format!("{}%", format_value(patterns.instant_bookable_ratio, 1)),
    ));
    lines.push(kv_line("Avg minimum nights", format_value(patterns.avg_minimum_nights, 1)));

    if let Some(ref verification) = analytics.host_insights.verified_vs_unverified {
        lines.push(kv_line("Verified hosts", format_price(verification.verified_avg_price)));
        lines.push(kv_line("Unverified hosts", format_price(verification.unverified_avg_price)));
    }

    frame.render_widget(Paragraph::new(lines).block(panel("Insights", false)), area);
}
