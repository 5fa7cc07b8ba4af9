use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use nestmetrics_core::models::Listing;
use nestmetrics_core::utils::{format_optional, format_price, MISSING};

use crate::app::{App, AppState, MAX_VISIBLE_LISTINGS};
use crate::ui::components::{kv_line, panel, render_form, render_placeholder};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_filter_bar(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_table(frame, app, body[0]);

    match app.listing_edit {
        Some(ref edit) => {
            let title = if edit.editing.is_some() { "Edit Listing" } else { "Add Listing" };
            let editing = app.state == AppState::EditingForm;
            render_form(frame, body[1], title, &edit.form, editing, false);
        }
        None => render_detail(frame, app.selected_listing(), body[1]),
    }
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.state == AppState::Searching;
    let mut spans = vec![Span::styled(app.filter.describe(), styles::list_item_style())];
    if searching {
        spans = vec![
            Span::styled("Search: ", styles::search_style()),
            Span::styled(format!("{}▌", app.filter.search), styles::search_style()),
        ];
    }
    spans.push(Span::styled(
        "   [/] search [n]eighborhood [t]ype [c]lear [a]dd [e]dit",
        styles::muted_style(),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(panel("Filters", searching));
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    if app.listings.is_empty() {
        let message = if app.is_loading(app.current_tab) {
            "Loading listings..."
        } else {
            "No listings. Press [a] to add one."
        };
        render_placeholder(frame, area, "Listings", message);
        return;
    }

    let visible = app.visible_listings();
    let rows: Vec<Row> = visible
        .iter()
        .map(|l| {
            Row::new(vec![
                Cell::from(l.display_name().to_string()),
                Cell::from(format_optional(l.host_name.as_deref())),
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
        Constraint::Fill(2),
        Constraint::Length(9),
    ];

    let filtered = app.filtered_count();
    let title = if filtered > MAX_VISIBLE_LISTINGS {
        format!("Listings ({} of {} shown, {} total)", visible.len(), filtered, app.listings.len())
    } else {
        format!("Listings ({} of {})", filtered, app.listings.len())
    };

    let header = Row::new(vec!["Name", "Host", "Area", "Room type", "Price"])
        .style(styles::title_style())
        .height(1);
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(&title, app.listing_edit.is_none()))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !visible.is_empty() {
        state.select(Some(app.listing_selection));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn count(value: Option<i64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn render_detail(frame: &mut Frame, listing: Option<&Listing>, area: Rect) {
    let Some(listing) = listing else {
        render_placeholder(frame, area, "Details", "No listing selected");
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(listing.display_name().to_string(), styles::highlight_style())),
        Line::from(""),
        kv_line("ID", listing.id.to_string()),
        kv_line("Host", format_optional(listing.host_name.as_deref())),
        kv_line("Neighborhood", format_optional(listing.neighbourhood_group.as_deref())),
        kv_line("Room type", format_optional(listing.room_type.as_deref())),
        kv_line("Price", format_price(listing.price)),
        kv_line("Minimum nights", count(listing.minimum_nights)),
        kv_line("Availability", count(listing.availability_365)),
        kv_line("Reviews", count(listing.number_of_reviews)),
    ];

    if !listing.extra.is_empty() {
        lines.push(Line::from(""));
        for (key, value) in &listing.extra {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => MISSING.to_string(),
                other => other.to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", key), styles::muted_style()),
                Span::raw(value),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(panel("Details", false))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
