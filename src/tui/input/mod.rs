mod navigate;
mod popups;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use navigate::handle_navigate;
use popups::{handle_form, handle_view};
use search::handle_search;

use super::app::{App, Mode};
use crate::ops::load::LoadStatus;
use crate::ops::mutation::Selection;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Until the list is loaded the only thing to do is leave
    if *app.loader.status() != LoadStatus::Ready {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.should_quit = true;
        }
        return;
    }

    match app.controller.selection() {
        Selection::Viewing(_) => handle_view(app, key),
        Selection::Adding(_) | Selection::Editing { .. } => handle_form(app, key),
        Selection::None => match app.mode {
            Mode::Navigate => handle_navigate(app, key),
            Mode::Search => handle_search(app, key),
        },
    }
}
