use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::model::user::{UserField, UserRecord};
use crate::ops::filter::matched_fields;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct UserListJson<'a> {
    pub count: usize,
    pub users: Vec<&'a UserRecord>,
}

#[derive(Serialize)]
pub struct SearchHitJson<'a> {
    #[serde(flatten)]
    pub user: &'a UserRecord,
    pub matched: Vec<UserField>,
}

#[derive(Serialize)]
pub struct SearchJson<'a> {
    pub query: &'a str,
    pub hits: Vec<SearchHitJson<'a>>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn users_to_json<'a>(users: &[&'a UserRecord]) -> UserListJson<'a> {
    UserListJson {
        count: users.len(),
        users: users.to_vec(),
    }
}

pub fn search_to_json<'a>(query: &'a str, users: &[&'a UserRecord]) -> SearchJson<'a> {
    SearchJson {
        query,
        hits: users
            .iter()
            .map(|u| SearchHitJson {
                user: u,
                matched: matched_fields(u, query),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Render users as an aligned table with an ID column followed by the five
/// text fields. Returns just the header when `users` is empty.
pub fn format_user_table(users: &[&UserRecord]) -> Vec<String> {
    let mut header: Vec<String> = vec!["ID".to_string()];
    header.extend(UserField::ALL.iter().map(|f| f.label().to_string()));

    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            let mut row = vec![u.id.to_string()];
            row.extend(UserField::ALL.iter().map(|&f| u.field(f).to_string()));
            row
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| format_row(row, &widths))
        .collect()
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        if i + 1 < cells.len() {
            line.push_str(&" ".repeat(widths[i].saturating_sub(cell.width())));
        }
    }
    line
}

/// One `Label: value` line per field, preceded by the id
pub fn format_user_detail(user: &UserRecord) -> Vec<String> {
    let mut lines = vec![format!("ID: {}", user.id)];
    for field in UserField::ALL {
        lines.push(format!("{}: {}", field.label(), user.field(field)));
    }
    lines
}
