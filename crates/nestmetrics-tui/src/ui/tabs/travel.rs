use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use nestmetrics_core::charts;
use nestmetrics_core::models::TravelInsights;
use nestmetrics_core::utils::{format_amount, format_count, format_optional, format_price, format_value};

use crate::app::{App, AppState};
use crate::ui::components::{kv_line, panel, render_bar_chart, render_form, render_placeholder, section_line};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Length(7), Constraint::Min(5)])
        .split(columns[0]);

    let editing = app.state == AppState::EditingForm;
    render_form(
        frame,
        left[0],
        "Trip",
        &app.travel_form,
        editing,
        app.is_loading(app.current_tab),
    );

    match app.travel_stats {
        Some(ref stats) => {
            let stats = stats.data();
            let lines = vec![
                kv_line("City avg", format_price(stats.overview.avg_price)),
                kv_line("Total listings", format_count(stats.overview.total_listings)),
                kv_line(
                    "Price growth",
                    format_optional(stats.market_trends.as_ref().and_then(|t| t.price_growth.as_deref())),
                ),
            ];
            frame.render_widget(Paragraph::new(lines).block(panel("City", false)), left[1]);
        }
        None => render_placeholder(frame, left[1], "City", "Loading..."),
    }

    let Some(ref insights) = app.travel else {
        render_placeholder(frame, left[2], "Stay Types", "Loading...");
        render_placeholder(frame, columns[1], "Travel Insights", "Loading travel insights...");
        return;
    };
    let insights = insights.data();

    render_bar_chart(
        frame,
        left[2],
        "Stay Types (%)",
        &charts::accommodation_types(insights),
        format_amount,
    );
    render_insights(frame, insights, app.scroll, columns[1]);
}

fn render_insights(frame: &mut Frame, insights: &TravelInsights, scroll: u16, area: Rect) {
    let overview = &insights.destination_overview;
    let trends = &insights.booking_trends;
    let tips = &insights.traveler_tips;
    let highlights = &insights.area_highlights;

    let mut lines = vec![
        section_line("Destination"),
        kv_line("Options", format_count(overview.total_options)),
        kv_line("Within budget", format_count(overview.within_budget)),
        kv_line("Average price", format_price(overview.avg_price)),
        kv_line("Budget headroom", format_price(overview.budget_savings)),
        Line::from(""),
        section_line("Booking Trends"),
        kv_line("Peak season", format_optional(trends.peak_season.as_deref())),
        kv_line("Best deals", format_optional(trends.best_deals.as_deref())),
        kv_line("Book", format_optional(trends.booking_window.as_deref())),
        kv_line("Availability", format_optional(trends.availability.as_deref())),
        Line::from(""),
        section_line("Traveler Tips"),
        kv_line("Price range", format_optional(tips.price_range.as_deref())),
        kv_line("Sweet spot", format_optional(tips.sweet_spot.as_deref())),
    ];
    if let Some(ref description) = tips.description {
        lines.push(Line::from(format!("  {}", description)));
    }
    for pick in &tips.value_picks {
        lines.push(Line::from(format!(
            "  • {} · {} · {} reviews/mo",
            format_optional(pick.name.as_deref()),
            format_price(pick.price),
            format_value(pick.reviews_per_month, 2)
        )));
    }

    lines.push(Line::from(""));
    lines.push(section_line("Area"));
    if let Some(ref rooms) = highlights.room_distribution {
        lines.push(kv_line(
            "Rooms",
            format!(
                "{} entire · {} private · {} shared",
                rooms.entire_home, rooms.private_room, rooms.shared_room
            ),
        ));
    }
    lines.push(kv_line(
        "Popular capacity",
        highlights
            .popular_capacity
            .map_or_else(|| "-".to_string(), |c| format!("{} guests", c)),
    ));

    let paragraph = Paragraph::new(lines)
        .block(panel("Travel Insights", false))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
