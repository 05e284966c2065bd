use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use super::push_highlighted_spans;
use crate::model::user::UserField;
use crate::tui::app::{App, Mode};

/// Render the bordered search input above the table
pub fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = app.mode == Mode::Search;
    let border_color = if active { app.theme.highlight } else { app.theme.dim };

    let content = if app.query.is_empty() && !active {
        Span::styled(
            "Search users...",
            Style::default().fg(app.theme.dim).bg(bg),
        )
    } else {
        Span::styled(
            app.query.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    if active {
        let x = inner.x + (unicode_width::UnicodeWidthStr::width(app.query.as_str()) as u16);
        frame.set_cursor_position((x.min(inner.x + inner.width.saturating_sub(1)), inner.y));
    }
}

/// Render the filtered user table with the cursor row highlighted
pub fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let match_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let re = app.query_re();

    let header = Row::new(
        UserField::ALL
            .iter()
            .map(|f| Cell::from(Span::styled(f.label(), header_style))),
    )
    .style(header_style);

    let users = app.visible_users();
    let empty = users.is_empty();
    let rows: Vec<Row> = users
        .iter()
        .map(|user| {
            Row::new(UserField::ALL.iter().map(|&field| {
                let mut spans = Vec::new();
                push_highlighted_spans(
                    &mut spans,
                    user.field(field),
                    text_style,
                    match_style,
                    re.as_ref(),
                );
                Cell::from(Line::from(spans))
            }))
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Fill(3),
        Constraint::Fill(2),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .style(text_style)
        .row_highlight_style(
            Style::default()
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌")
        .column_spacing(1);

    if empty {
        app.table_state.select(None);
    } else {
        app.table_state.select(Some(app.cursor));
    }
    frame.render_stateful_widget(table, area, &mut app.table_state);

    if empty && area.height > 2 {
        let msg = if app.query.is_empty() {
            "No users.".to_string()
        } else {
            format!("No users match \"{}\".", app.query)
        };
        let msg_area = Rect::new(area.x, area.y + 2, area.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(msg, Style::default().fg(app.theme.dim).bg(bg))),
            msg_area,
        );
    }
}
