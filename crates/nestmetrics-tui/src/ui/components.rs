//! Widgets shared by several tabs.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use nestmetrics_core::charts::{max_value, ChartPoint};
use nestmetrics_core::utils::truncate_string;

use crate::forms::Form;

use super::styles;

/// Width reserved for a bar's label column
const LABEL_WIDTH: usize = 16;

/// Width reserved for the value printed after each bar
const VALUE_WIDTH: usize = 10;

pub fn panel(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused))
}

/// `label: value` with the label highlighted
pub fn kv_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), styles::highlight_style()),
        Span::raw(value.into()),
    ])
}

pub fn section_line(title: &str) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), styles::title_style()))
}

pub fn bullet_lines(items: &[String]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| Line::from(format!("  • {}", item)))
        .collect()
}

/// Placeholder shown while a tab has nothing to display yet
pub fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), styles::muted_style())))
        .block(panel(title, false));
    frame.render_widget(paragraph, area);
}

/// Number of cells a bar occupies, scaled against the largest value
pub fn bar_cells(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let cells = (value / max * width as f64).round() as usize;
    cells.clamp(1, width)
}

/// Horizontal bar chart as text lines, one bar per point
pub fn bar_lines(points: &[ChartPoint], width: usize, format: fn(f64) -> String) -> Vec<Line<'static>> {
    let max = max_value(points);
    let bar_width = width.saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 2).max(1);

    points
        .iter()
        .map(|point| {
            let cells = bar_cells(point.value, max, bar_width);
            Line::from(vec![
                Span::styled(
                    format!("{:<w$} ", truncate_string(&point.name, LABEL_WIDTH), w = LABEL_WIDTH),
                    styles::list_item_style(),
                ),
                Span::styled("█".repeat(cells), styles::bar_style()),
                Span::styled(format!(" {}", format(point.value)), styles::muted_style()),
            ])
        })
        .collect()
}

pub fn render_bar_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    points: &[ChartPoint],
    format: fn(f64) -> String,
) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = if points.is_empty() {
        vec![Line::from(Span::styled("No data", styles::muted_style()))]
    } else {
        bar_lines(points, inner_width, format)
    };
    frame.render_widget(Paragraph::new(lines).block(panel(title, false)), area);
}

/// Form fields, one per line. The focused field shows a cursor while editing.
pub fn form_lines(form: &Form, editing: bool) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = editing && i == form.focus;
            let value = if field.is_choice() {
                format!("◀ {} ▶", field.display())
            } else if focused {
                format!("{}▌", field.display())
            } else {
                field.display().to_string()
            };
            let value_style = if focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            Line::from(vec![
                Span::styled(format!("{:>14}: ", field.label), styles::field_style(focused)),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    let hint = if editing {
        "[Tab/↑↓] field  [←/→] option  [Enter] submit  [Esc] done"
    } else {
        "[e] edit form  [Enter] submit"
    };
    lines.push(Line::from(Span::styled(hint, styles::muted_style())));
    lines
}

pub fn render_form(frame: &mut Frame, area: Rect, title: &str, form: &Form, editing: bool, busy: bool) {
    let mut lines = form_lines(form, editing);
    if busy {
        lines.push(Line::from(Span::styled("Working...", styles::highlight_style())));
    }
    let paragraph = Paragraph::new(lines)
        .block(panel(title, editing))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms;

    #[test]
    fn test_bar_cells_scale_to_max() {
        assert_eq!(bar_cells(200.0, 200.0, 40), 40);
        assert_eq!(bar_cells(100.0, 200.0, 40), 20);
        assert_eq!(bar_cells(0.1, 200.0, 40), 1);
        assert_eq!(bar_cells(0.0, 200.0, 40), 0);
        assert_eq!(bar_cells(5.0, 0.0, 40), 0);
    }

    #[test]
    fn test_bar_lines_one_per_point() {
        let points = vec![ChartPoint::new("Manhattan", 200.0), ChartPoint::new("Bronx", 0.0)];
        let lines = bar_lines(&points, 60, |v| format!("{:.0}", v));
        assert_eq!(lines.len(), 2);
        let text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("Bronx"));
        assert!(!text.contains('█'));
        assert!(text.ends_with(" 0"));
    }

    #[test]
    fn test_form_lines_mark_focused_field() {
        let form = forms::travel_form();
        let lines = form_lines(&form, true);
        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(first.contains("◀ Manhattan ▶"));
        let second: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(second.ends_with("200"));
    }
}
