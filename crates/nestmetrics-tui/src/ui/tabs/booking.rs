use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use nestmetrics_core::models::{BookingAnalysis, BookingOptimization};
use nestmetrics_core::utils::{format_optional, format_price};

use super::hosts::score_lines;
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
        .constraints([Constraint::Length(10), Constraint::Min(5)])
        .split(columns[0]);

    let editing = app.state == AppState::EditingForm;
    render_form(
        frame,
        left[0],
        "Booking Analysis",
        &app.booking_form,
        editing,
        app.is_loading(app.current_tab),
    );

    match app.booking {
        Some(ref analysis) => render_score(frame, analysis.data(), left[1]),
        None => render_placeholder(
            frame,
            left[1],
            "Score",
            "Press [Enter] to analyze, [o] to optimize the trip only",
        ),
    }

    match app.trip_plan {
        Some(ref plan) => render_plan(frame, plan.data(), app.scroll, columns[1]),
        None => render_placeholder(frame, columns[1], "Trip Plan", "No optimizer results yet"),
    }
}

fn render_score(frame: &mut Frame, analysis: &BookingAnalysis, area: Rect) {
    let mut lines = Vec::new();
    if let Some(ref connection) = analysis.connection {
        let style = if connection.is_ok() {
            styles::success_style()
        } else {
            styles::error_style()
        };
        lines.push(Line::from(Span::styled(
            format_optional(connection.message.as_deref()),
            style,
        )));
        lines.push(Line::from(""));
    }
    lines.extend(score_lines(&analysis.score));

    let paragraph = Paragraph::new(lines)
        .block(panel("Score", false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_plan(frame: &mut Frame, plan: &BookingOptimization, scroll: u16, area: Rect) {
    let mut lines = Vec::new();

    if let Some(ref budget) = plan.budget_optimization {
        lines.push(section_line("Budget"));
        lines.push(kv_line("Daily limit", format_price(budget.daily_limit)));
        lines.push(kv_line("Total budget", format_price(budget.total_budget)));
        lines.push(kv_line(
            "Options found",
            budget.options_found.map_or_else(|| "-".to_string(), |n| n.to_string()),
        ));
        lines.push(kv_line("Avg savings", format_price(budget.avg_savings)));
        lines.push(Line::from(""));
    }

    if let Some(ref timing) = plan.booking_timing {
        lines.push(section_line("Timing"));
        lines.push(kv_line("Book", format_optional(timing.optimal_window.as_deref())));
        lines.push(kv_line("Price trend", format_optional(timing.price_trend.as_deref())));
        lines.push(kv_line("Best days", format_optional(timing.best_days.as_deref())));
        lines.push(kv_line("Avoid", format_optional(timing.avoid_dates.as_deref())));
        lines.push(Line::from(""));
    }

    if let Some(ref recs) = plan.value_recommendations {
        let picks = recs.best_value.iter().chain(recs.budget_picks.iter());
        let mut any = false;
        for pick in picks {
            if !any {
                lines.push(section_line("Value Picks"));
                any = true;
            }
            lines.push(Line::from(format!(
                "  {} · {}",
                format_optional(pick.name.as_deref()),
                format_price(pick.price)
            )));
        }
        if !recs.alternative_areas.is_empty() {
            lines.push(kv_line("Also consider", recs.alternative_areas.join(", ")));
        }
        lines.push(Line::from(""));
    }

    if !plan.booking_tips.is_empty() {
        lines.push(section_line("Tips"));
        lines.extend(bullet_lines(&plan.booking_tips));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel("Trip Plan", false))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
