//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, Tab, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            Ok(false)
        }
        AppState::ConfirmingQuit => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                Ok(true)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
                Ok(false)
            }
            _ => Ok(false),
        },
        AppState::Searching => {
            handle_search_input(app, key);
            Ok(false)
        }
        AppState::EditingForm => {
            handle_form_input(app, key);
            Ok(false)
        }
        AppState::Normal | AppState::Quitting => {
            handle_normal_input(app, key);
            Ok(false)
        }
    }
}

fn handle_normal_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return;
        }
        KeyCode::Char(c @ '1'..='8') => {
            if let Some(tab) = c.to_digit(10).and_then(Tab::from_number) {
                app.switch_tab(tab);
            }
            return;
        }
        KeyCode::Left => {
            app.switch_tab(app.current_tab.prev());
            return;
        }
        KeyCode::Right => {
            app.switch_tab(app.current_tab.next());
            return;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection(-1);
            return;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection(1);
            return;
        }
        KeyCode::PageUp => {
            app.move_selection(-(PAGE_SCROLL_SIZE as isize));
            return;
        }
        KeyCode::PageDown => {
            app.move_selection(PAGE_SCROLL_SIZE as isize);
            return;
        }
        KeyCode::Char('u') => {
            app.refresh_current_tab();
            return;
        }
        _ => {}
    }

    if app.current_tab == Tab::Listings {
        handle_listings_keys(app, key);
    } else if app.current_tab.has_form() {
        match key.code {
            KeyCode::Char('e') | KeyCode::Char('i') => {
                if let Some(form) = app.active_form_mut() {
                    form.focus = 0;
                }
                app.state = AppState::EditingForm;
            }
            KeyCode::Enter => app.submit_form(),
            KeyCode::Char('o') if app.current_tab == Tab::Booking => app.plan_trip(),
            _ => {}
        }
    }
}

fn handle_listings_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
        }
        KeyCode::Char('n') => {
            app.filter.cycle_neighborhood();
            app.listing_selection = 0;
        }
        KeyCode::Char('t') => {
            app.filter.cycle_room_type();
            app.listing_selection = 0;
        }
        KeyCode::Char('c') => {
            app.filter.clear();
            app.listing_selection = 0;
        }
        KeyCode::Char('a') => app.open_add_listing(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_listing(),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.filter.search.clear();
            app.clamp_listing_selection();
        }
        KeyCode::Enter => {
            // Keep the search active
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            app.filter.search.pop();
            app.listing_selection = 0;
        }
        KeyCode::Char(c) => {
            app.filter.search.push(c);
            app.listing_selection = 0;
        }
        _ => {}
    }
}

fn handle_form_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        if app.current_tab == Tab::Listings {
            app.cancel_listing_edit();
        } else {
            app.state = AppState::Normal;
        }
        return;
    }

    if key.code == KeyCode::Enter {
        app.submit_form();
        if app.current_tab != Tab::Listings {
            app.state = AppState::Normal;
        }
        return;
    }

    let Some(form) = app.active_form_mut() else {
        app.state = AppState::Normal;
        return;
    };
    let changed = match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.next_field();
            false
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.prev_field();
            false
        }
        KeyCode::Left => form.cycle(false),
        KeyCode::Right => form.cycle(true),
        KeyCode::Backspace => {
            form.backspace();
            true
        }
        KeyCode::Char(c) => {
            form.input_char(c);
            true
        }
        _ => false,
    };
    if changed {
        app.form_changed();
    }
}
