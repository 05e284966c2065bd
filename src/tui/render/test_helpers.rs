use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::source::{RecordSource, SourceError};
use crate::model::config::Config;
use crate::model::user::UserRecord;
use crate::ops::load::build_runtime;
use crate::tui::app::App;
use crate::tui::input::handle_key;

pub const TERM_W: u16 = 100;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Serves a fixed list
pub struct FixedSource(pub Vec<UserRecord>);

#[async_trait]
impl RecordSource for FixedSource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, SourceError> {
        Ok(self.0.clone())
    }
}

/// Always fails as if the host refused the connection
pub struct FailingSource;

#[async_trait]
impl RecordSource for FailingSource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, SourceError> {
        Err(SourceError::Transport("connection refused".into()))
    }
}

pub fn sample_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: 1,
            name: "Leanne Graham".into(),
            username: "Bret".into(),
            email: "Sincere@april.biz".into(),
            phone: "1-770-736-8031 x56442".into(),
            website: "hildegard.org".into(),
        },
        UserRecord {
            id: 2,
            name: "Ervin Howell".into(),
            username: "Antonette".into(),
            email: "Shanna@melissa.tv".into(),
            phone: "010-692-6593 x09125".into(),
            website: "anastasia.net".into(),
        },
        UserRecord {
            id: 3,
            name: "Clementine Bauch".into(),
            username: "Samantha".into(),
            email: "Nathan@yesenia.net".into(),
            phone: "1-463-123-4447".into(),
            website: "ramiro.info".into(),
        },
    ]
}

/// App that has not finished its initial load
pub fn loading_app() -> App {
    App::new(&Config::default())
}

/// App whose initial load succeeded with [`sample_users`]
pub fn ready_app() -> App {
    let mut app = App::new(&Config::default());
    let runtime = build_runtime().unwrap();
    app.load_from(&runtime, &FixedSource(sample_users()));
    app
}

/// App whose initial load failed
pub fn failed_app() -> App {
    let mut app = App::new(&Config::default());
    let runtime = build_runtime().unwrap();
    app.load_from(&runtime, &FailingSource);
    app
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Feed each character of `text` as a key press
pub fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        handle_key(app, key(KeyCode::Char(c)));
    }
}
