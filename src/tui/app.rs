use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::widgets::TableState;
use regex::Regex;
use tracing::info;

use crate::io::source::{HttpSource, RecordSource};
use crate::model::config::Config;
use crate::model::user::{UserField, UserRecord};
use crate::ops::filter::filter;
use crate::ops::load::{LoadCoordinator, LoadStatus, build_runtime};
use crate::ops::mutation::MutationController;
use crate::ops::store::RecordStore;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode of the table screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
}

/// Main application state
pub struct App {
    pub store: RecordStore,
    pub loader: LoadCoordinator,
    pub controller: MutationController,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Live search text; the table is refiltered from it on every draw
    pub query: String,
    /// Cursor index into the filtered list
    pub cursor: usize,
    /// Ratatui table state (selection + scroll offset)
    pub table_state: TableState,
    /// Field with input focus while an add/edit form is open
    pub form_field: UserField,
    /// One-line feedback shown in the status row
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            store: RecordStore::new(),
            loader: LoadCoordinator::new(Duration::from_secs(config.source.timeout_secs)),
            controller: MutationController::new(),
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            query: String::new(),
            cursor: 0,
            table_state: TableState::default(),
            form_field: UserField::Name,
            status_message: None,
        }
    }

    /// Records matching the current query, in store order.
    ///
    /// Derived from (store, query) on every call, so any mutation or query
    /// change is reflected the next time it is read.
    pub fn visible_users(&self) -> Vec<&UserRecord> {
        filter(self.store.all(), &self.query)
    }

    /// The record under the cursor
    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.visible_users().get(self.cursor).copied()
    }

    /// Keep the cursor within the filtered list
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_users().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Case-insensitive literal regex for highlighting the current query
    pub fn query_re(&self) -> Option<Regex> {
        if self.query.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(&self.query))).ok()
    }

    /// Run the initial fetch, blocking until it completes.
    pub fn load_from(
        &mut self,
        runtime: &tokio::runtime::Runtime,
        source: &dyn RecordSource,
    ) -> &LoadStatus {
        // The status carries the failure; nothing else to do with the error here
        let _ = runtime.block_on(self.loader.load(source, &mut self.store));
        self.loader.status()
    }
}

/// Run the TUI application
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = build_runtime()?;
    let source = HttpSource::new(
        &config.source.url,
        Duration::from_secs(config.source.timeout_secs),
    )?;
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_session(&mut terminal, &mut app, &runtime, &source);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Show the loading screen, block on the fetch, then hand over to the event loop
fn run_session<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runtime: &tokio::runtime::Runtime,
    source: &dyn RecordSource,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|frame| render::render(frame, app))?;
    let status = app.load_from(runtime, source);
    info!(?status, "initial load finished");
    run_event_loop(terminal, app)
}

fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
