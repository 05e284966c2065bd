pub mod popups;
pub mod status_row;
pub mod table_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use regex::Regex;

use super::app::App;
use crate::ops::load::LoadStatus;
use crate::ops::mutation::Selection;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    match app.loader.status().clone() {
        LoadStatus::Loading => {
            render_message(frame, app, area, &[("Loading...", false)]);
            return;
        }
        LoadStatus::Failed(reason) => {
            render_message(
                frame,
                app,
                area,
                &[
                    ("Error fetching user data. Please try again later.", false),
                    (reason.as_str(), true),
                    ("", true),
                    ("press q to quit", true),
                ],
            );
            return;
        }
        LoadStatus::Ready => {}
    }

    // Layout: title (1 row) | search bar (3 rows) | table | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        " Welcome to roster",
        Style::default()
            .fg(app.theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )))
    .style(bg_style);
    frame.render_widget(title, chunks[0]);

    table_view::render_search_bar(frame, app, chunks[1]);
    table_view::render_table(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    // Popups (rendered on top of the table)
    match app.controller.selection().clone() {
        Selection::None => {}
        Selection::Viewing(user) => popups::render_view_popup(frame, app, &user, area),
        Selection::Adding(draft) => {
            popups::render_form_popup(frame, app, " Add New User ", &draft, area)
        }
        Selection::Editing { draft, .. } => {
            popups::render_form_popup(frame, app, " Edit User ", &draft, area)
        }
    }
}

/// Centered lines of text, used for the loading and failure screens.
/// The bool marks a line as secondary (dim).
fn render_message(frame: &mut Frame, app: &App, area: Rect, lines: &[(&str, bool)]) {
    let bg = app.theme.background;
    let height = lines.len() as u16;
    let top = area.y + area.height.saturating_sub(height) / 2;
    let message_area = Rect::new(area.x, top, area.width, height.min(area.height));

    let text: Vec<Line> = lines
        .iter()
        .map(|(text, dim)| {
            let fg = if *dim { app.theme.dim } else { app.theme.text_bright };
            Line::from(Span::styled(text.to_string(), Style::default().fg(fg).bg(bg)))
        })
        .collect();
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, message_area);
}

/// Centered popup rectangle of at most `width` x `height`
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if !has_match {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
