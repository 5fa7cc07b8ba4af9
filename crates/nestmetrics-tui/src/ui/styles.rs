use ratatui::style::{Color, Modifier, Style};

// Palette, coral on charcoal
pub const CORAL: Color = Color::Rgb(255, 90, 95);
pub const TEAL: Color = Color::Rgb(0, 166, 153);
pub const AMBER: Color = Color::Rgb(252, 176, 64);
pub const ERROR: Color = Color::Rgb(200, 60, 60);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const SELECTION_BG: Color = Color::Rgb(48, 48, 64);
const STATUS_BG: Color = Color::Rgb(32, 32, 40);

pub fn title_style() -> Style {
    Style::default().fg(CORAL).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(SELECTION_BG).add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(AMBER)
}

pub fn success_style() -> Style {
    Style::default().fg(TEAL)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(CORAL)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(CORAL)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn search_style() -> Style {
    Style::default().fg(AMBER)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(STATUS_BG).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

/// Bars in chart panels
pub fn bar_style() -> Style {
    Style::default().fg(TEAL)
}

/// "sample data" marker on pages showing fallback literals
pub fn sample_marker_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(AMBER)
        .add_modifier(Modifier::BOLD)
}

/// Field label style, brighter when the field has focus
pub fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Color for a 0-100 score: green when strong, amber when middling
pub fn score_style(score: f64) -> Style {
    if score >= 75.0 {
        success_style()
    } else if score >= 50.0 {
        highlight_style()
    } else {
        error_style()
    }
}
