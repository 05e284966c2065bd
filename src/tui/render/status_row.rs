use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::mutation::Selection;
use crate::tui::app::{App, Mode};

/// Key hints for the current state
fn hints(app: &App) -> &'static str {
    match app.controller.selection() {
        Selection::Viewing(_) => "Esc close",
        Selection::Adding(_) | Selection::Editing { .. } => {
            "Enter save  Esc cancel  Tab/↑↓ field"
        }
        Selection::None => match app.mode {
            Mode::Search => "type to filter  Enter keep  Esc clear",
            Mode::Navigate => "/ search  v view  e edit  a add  d delete  q quit",
        },
    }
}

/// Render the bottom status row: feedback message on the left, match count
/// and key hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let shown = app.visible_users().len();
    let total = app.store.len();

    let mut spans = Vec::new();
    if let Some(msg) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.green).bg(bg),
        ));
        spans.push(Span::styled("  ", Style::default().bg(bg)));
    }
    let count = if shown == total {
        format!(" {} users", total)
    } else {
        format!(" {}/{} users", shown, total)
    };
    spans.push(Span::styled(count, Style::default().fg(app.theme.text).bg(bg)));
    spans.push(Span::styled(
        format!("  {}", hints(app)),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
