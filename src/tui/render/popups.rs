use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::centered_rect;
use crate::model::user::{UserField, UserRecord};
use crate::ops::mutation::Draft;
use crate::tui::app::App;

const POPUP_WIDTH: u16 = 60;
/// Five field rows, a blank line, the hint line, and the border
const POPUP_HEIGHT: u16 = 9;

/// Width of the widest label plus ": "
fn label_width() -> usize {
    UserField::ALL
        .iter()
        .map(|f| f.label().width())
        .max()
        .unwrap_or(0)
        + 2
}

fn popup_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    let bg = app.theme.background;
    Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg))
}

/// Render the read-only "View User" popup
pub fn render_view_popup(frame: &mut Frame, app: &App, user: &UserRecord, area: Rect) {
    let bg = app.theme.background;
    let popup_area = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, " View User ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let label_w = label_width();
    let mut lines: Vec<Line> = UserField::ALL
        .iter()
        .map(|&field| {
            let label = format!("{:<width$}", format!("{}:", field.label()), width = label_w);
            Line::from(vec![
                Span::styled(
                    label,
                    Style::default()
                        .fg(app.theme.text_bright)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    user.field(field).to_string(),
                    Style::default().fg(app.theme.text).bg(bg),
                ),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Esc close",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

/// Render the add/edit form with the focused field highlighted and the
/// terminal cursor placed at the end of its value
pub fn render_form_popup(frame: &mut Frame, app: &App, title: &str, draft: &Draft, area: Rect) {
    let bg = app.theme.background;
    let popup_area = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, title);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let label_w = label_width();
    let mut cursor = None;
    let mut lines: Vec<Line> = Vec::with_capacity(UserField::ALL.len() + 2);
    for (row, &field) in UserField::ALL.iter().enumerate() {
        let focused = field == app.form_field;
        let label_style = if focused {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        let value_style = if focused {
            Style::default().fg(app.theme.text_bright).bg(app.theme.selection_bg)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let value = draft.field(field);
        let label = format!("{:<width$}", format!("{}:", field.label()), width = label_w);

        if focused {
            let x = inner.x + (label_w + value.width()) as u16;
            cursor = Some((x.min(inner.x + inner.width.saturating_sub(1)), inner.y + row as u16));
        }
        lines.push(Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(value.to_string(), value_style),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter save  Esc cancel  Tab next field",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);

    if let Some(pos) = cursor
        && pos.1 < inner.y + inner.height
    {
        frame.set_cursor_position(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn view_popup_lists_fields() {
        let app = ready_app();
        let user = app.store.get(1).unwrap().clone();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_view_popup(frame, &app, &user, area);
        });
        assert!(output.contains("View User"));
        assert!(output.contains("Name:"));
        assert!(output.contains("Leanne Graham"));
        assert!(output.contains("Email Address:"));
        assert!(output.contains("Sincere@april.biz"));
        assert!(output.contains("hildegard.org"));
    }

    #[test]
    fn add_popup_starts_blank() {
        let mut app = ready_app();
        app.controller.begin_add();
        let draft = app.controller.draft().unwrap().clone();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_form_popup(frame, &app, " Add New User ", &draft, area);
        });
        assert!(output.contains("Add New User"));
        assert!(output.contains("Website:"));
        assert!(!output.contains("Leanne"));
    }

    #[test]
    fn edit_popup_shows_draft_values() {
        let mut app = ready_app();
        let user = app.store.get(2).unwrap().clone();
        app.controller.begin_edit(&user);
        app.controller.update_field("name", "Ervin H.").unwrap();
        let draft = app.controller.draft().unwrap().clone();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_form_popup(frame, &app, " Edit User ", &draft, area);
        });
        assert!(output.contains("Edit User"));
        assert!(output.contains("Ervin H."));
        assert!(output.contains("Antonette"));
    }
}
