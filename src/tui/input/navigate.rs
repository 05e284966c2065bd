use crossterm::event::{KeyCode, KeyEvent};

use crate::model::user::UserField;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status_message = None;
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Cursor movement
        KeyCode::Down | KeyCode::Char('j') => {
            let len = app.visible_users().len();
            if app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Home | KeyCode::Char('g') => app.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => {
            app.cursor = app.visible_users().len().saturating_sub(1);
        }

        // Search
        KeyCode::Char('/') => app.mode = Mode::Search,
        KeyCode::Esc => {
            app.query.clear();
            app.clamp_cursor();
        }

        // Record actions
        KeyCode::Enter | KeyCode::Char('v') => {
            if let Some(user) = app.selected_user().cloned() {
                app.controller.view(&user);
            }
        }
        KeyCode::Char('e') => {
            if let Some(user) = app.selected_user().cloned() {
                app.controller.begin_edit(&user);
                app.form_field = UserField::Name;
            }
        }
        KeyCode::Char('a') => {
            app.controller.begin_add();
            app.form_field = UserField::Name;
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_user().map(|u| u.id) {
                app.controller.delete(&mut app.store, id);
                app.clamp_cursor();
                app.status_message = Some(format!("Deleted user {}", id));
            }
        }

        _ => {}
    }
}
