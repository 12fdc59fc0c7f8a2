//! Keyboard input dispatch: global keys first, then the focused control.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use placeorder_core::domain::OrderSide;

use crate::app::{AppState, Focus};
use crate::field::FieldOutcome;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Global keys (always available).
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => app.running = false,
            KeyCode::Char('t') => app.toggle_take_profit(),
            KeyCode::Char('a') => app.add_target(),
            KeyCode::Char('d') => app.remove_focused_target(),
            KeyCode::Char('s') => app.submit(),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.focus_next();
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_prev();
            return;
        }
        _ => {}
    }

    // 2. Focused control.
    match app.focus {
        Focus::Side => handle_side_key(app, key),
        Focus::TakeProfit => {
            if is_activate(key) {
                app.toggle_take_profit();
            }
        }
        Focus::AddTarget => {
            if is_activate(key) {
                app.add_target();
            }
        }
        Focus::Submit => {
            if is_activate(key) {
                app.submit();
            }
        }
        focus => handle_field_key(app, focus, key),
    }
}

fn is_activate(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

fn handle_side_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('b') => app.set_side(OrderSide::Buy),
        KeyCode::Char('s') => app.set_side(OrderSide::Sell),
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => {
            app.set_side(app.form.side().opposite());
        }
        _ => {}
    }
}

fn handle_field_key(app: &mut AppState, focus: Focus, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.focus_next();
        return;
    }
    let Some(field) = app.field_mut(focus) else {
        return;
    };
    match field.handle_key(key) {
        FieldOutcome::Edited(commit) => app.commit(focus, commit),
        FieldOutcome::Rejected(rejection) => app.set_warning(rejection.to_string()),
        FieldOutcome::Moved | FieldOutcome::Ignored => {}
    }
}
