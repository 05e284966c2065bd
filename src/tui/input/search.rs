use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel search and clear the filter
        (_, KeyCode::Esc) => {
            app.mode = Mode::Navigate;
            app.query.clear();
            app.cursor = 0;
        }

        // Keep the filter and go back to the table
        (_, KeyCode::Enter) => {
            app.mode = Mode::Navigate;
        }

        (_, KeyCode::Backspace) => {
            app.query.pop();
            app.cursor = 0;
        }

        // Type character
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.query.push(c);
            app.cursor = 0;
        }

        _ => {}
    }
}
