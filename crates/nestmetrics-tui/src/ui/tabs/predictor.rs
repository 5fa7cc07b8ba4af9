use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use nestmetrics_core::models::MlPrediction;
use nestmetrics_core::utils::{format_amount, format_optional, format_price, MISSING};

use crate::app::{App, AppState};
use crate::ui::components::{kv_line, panel, render_form, render_placeholder};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let editing = app.state == AppState::EditingForm;
    let form_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(columns[0]);
    render_form(
        frame,
        form_area[0],
        "Price Prediction",
        &app.predict_form,
        editing,
        app.is_loading(app.current_tab),
    );

    match app.prediction {
        Some(ref prediction) => render_prediction(frame, prediction.data(), columns[1]),
        None => render_placeholder(frame, columns[1], "Prediction", "Press [Enter] to predict a nightly price"),
    }
}

fn render_prediction(frame: &mut Frame, prediction: &MlPrediction, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled("Predicted nightly price", styles::muted_style())),
        Line::from(Span::styled(format_price(prediction.predicted_price), styles::title_style())),
        Line::from(""),
    ];

    match prediction.confidence_interval {
        Some(ref interval) => {
            lines.push(kv_line(
                "Confidence interval",
                format!("${} - ${}", format_amount(interval.lower), format_amount(interval.upper)),
            ));
            lines.push(kv_line("Interval width", format!("${}", format_amount(interval.width()))));
        }
        None => lines.push(kv_line("Confidence interval", MISSING)),
    }
    lines.push(kv_line("Model", format_optional(prediction.model_accuracy.as_deref())));
    lines.push(kv_line("Similar listings", prediction.similar_listings_count.to_string()));

    frame.render_widget(Paragraph::new(lines).block(panel("Prediction", false)), area);
}
