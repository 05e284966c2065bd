use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::ops::mutation::Selection;
use crate::tui::app::App;

/// Read-only user popup: any close key dismisses it
pub(super) fn handle_view(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('v')
    ) {
        app.controller.dismiss();
    }
}

/// Add / edit form: edits go to the open draft, Enter commits, Esc cancels
pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.controller.cancel(),

        (_, KeyCode::Enter) => {
            let adding = matches!(app.controller.selection(), Selection::Adding(_));
            match app.controller.commit(&mut app.store) {
                Ok(id) => {
                    app.status_message = Some(if adding {
                        format!("Added user {}", id)
                    } else {
                        format!("Updated user {}", id)
                    });
                    app.clamp_cursor();
                }
                // The form stays open; Esc still cancels
                Err(e) => app.status_message = Some(e.to_string()),
            }
        }

        (_, KeyCode::Tab | KeyCode::Down) => app.form_field = app.form_field.next(),
        (_, KeyCode::BackTab | KeyCode::Up) => app.form_field = app.form_field.prev(),

        (_, KeyCode::Backspace) => edit_focused(app, |value| {
            let mut graphemes: Vec<&str> = value.graphemes(true).collect();
            graphemes.pop();
            graphemes.concat()
        }),

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            edit_focused(app, |value| format!("{}{}", value, c))
        }

        _ => {}
    }
}

/// Replace the focused field of the open draft with `edit(current value)`
fn edit_focused(app: &mut App, edit: impl FnOnce(&str) -> String) {
    let field = app.form_field;
    let Some(value) = app.controller.draft().map(|d| edit(d.field(field))) else {
        return;
    };
    if let Err(e) = app.controller.set_field(field, value) {
        debug!(error = %e, %field, "form edit dropped");
    }
}
