use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use nestmetrics_core::models::{DealsResponse, Stats};
use nestmetrics_core::utils::{format_count, format_optional, format_price, format_value};

use crate::app::{App, AppState};
use crate::ui::components::{bullet_lines, kv_line, panel, render_form, render_placeholder, section_line};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(5)])
        .split(columns[0]);

    let editing = app.state == AppState::EditingForm;
    render_form(
        frame,
        left[0],
        "Find Deals",
        &app.deal_form,
        editing,
        app.is_loading(app.current_tab),
    );

    let neighborhood = app.deal_form.fields.get(1).map(|f| f.display()).unwrap_or("");
    match app.deal_stats {
        Some(ref stats) => render_market(frame, stats.data(), neighborhood, left[1]),
        None => render_placeholder(frame, left[1], "Market", "Loading market stats..."),
    }

    match app.deals {
        Some(ref deals) => render_deals(frame, deals.data(), app.scroll, columns[1]),
        None => render_placeholder(frame, columns[1], "Deals", "Press [Enter] to search for deals"),
    }
}

fn render_market(frame: &mut Frame, stats: &Stats, neighborhood: &str, area: Rect) {
    let mut lines = vec![
        kv_line("Market avg", format_price(stats.overview.avg_price)),
        kv_line(
            &format!("{} avg", neighborhood),
            format_price(stats.neighborhood_avg_price(neighborhood)),
        ),
        kv_line("Active listings", format_count(stats.overview.active_listings)),
    ];
    if !stats.room_types.is_empty() {
        lines.push(Line::from(""));
        for (room_type, room) in stats.room_types.iter() {
            lines.push(kv_line(room_type, format_price(room.avg_price)));
        }
    }
    frame.render_widget(Paragraph::new(lines).block(panel("Market", false)), area);
}

fn render_deals(frame: &mut Frame, deals: &DealsResponse, scroll: u16, area: Rect) {
    let mut lines = Vec::new();

    if deals.has_deals() {
        lines.push(Line::from(Span::styled(
            format!("{} deals found", deals.deals_found),
            styles::success_style(),
        )));
        lines.push(kv_line("Average price", format_price(deals.avg_price)));
        lines.push(kv_line("You save", format_price(deals.price_savings)));
        lines.push(Line::from(""));
        lines.push(section_line("Best Deals"));
        for (i, deal) in deals.best_deals.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), styles::muted_style()),
                Span::raw(format_optional(deal.name.as_deref())),
            ]));
            lines.push(Line::from(Span::styled(
                format!(
                    "    {} / night · {} reviews/mo · value {}",
                    format_price(deal.price),
                    format_value(deal.reviews_per_month, 2),
                    format_value(deal.value_score, 1)
                ),
                styles::muted_style(),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            format_optional(deals.message.as_deref()),
            styles::highlight_style(),
        )));
        if let Some(ref suggestions) = deals.suggestions {
            lines.push(Line::from(""));
            if !suggestions.nearby_areas.is_empty() {
                lines.push(kv_line("Try nearby", suggestions.nearby_areas.join(", ")));
            }
            lines.push(kv_line("Suggested budget", format_price(suggestions.budget_recommendation)));
        }
    }

    if !deals.booking_tips.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_line("Booking Tips"));
        lines.extend(bullet_lines(&deals.booking_tips));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel("Deals", false))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
