//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! `Driver` owns the `App`; this module only reads it to draw and feeds it
//! actions.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (a fetch or scan in flight): redraws every ~80ms so the
//!   spinner moves.
//! - **Idle**: sleeps up to 250ms and redraws on input or when a background
//!   action arrived. Timers (notices, highlights) land within that window.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{info, warn};

use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::search;
use crate::core::state::App;
use crate::driver::Driver;
use crate::gateway::{BibleApiGateway, ContentGateway};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ChapterViewState, PickerEvent, PickerItem, PickerState, SearchBox, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// What keyboard input currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Reading,
    Search,
    Translations,
    Books,
    Chapters,
    Results,
}

/// TUI-specific presentation state (not part of core reading state)
pub struct TuiState {
    pub mode: Mode,
    pub chapter_view: ChapterViewState,
    pub search: SearchBox,
    /// Overlay for every picker mode. `None` in Reading and Search.
    pub picker: Option<PickerState>,
    /// Book and chapter on screen last frame, to reset scroll on change.
    shown: Option<(String, u32)>,
    pub spinner_frame: usize,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Reading,
            chapter_view: ChapterViewState::new(),
            search: SearchBox::new(),
            picker: None,
            shown: None,
            spinner_frame: 0,
        }
    }

    fn open_picker(&mut self, mode: Mode, picker: PickerState) {
        self.mode = mode;
        self.picker = Some(picker);
    }

    fn close_overlay(&mut self) {
        self.mode = Mode::Reading;
        self.picker = None;
    }
}

fn translation_picker(app: &App) -> PickerState {
    let items = app
        .translations
        .iter()
        .map(|t| {
            let detail = if t.language.is_empty() {
                t.id.clone()
            } else {
                format!("{} ({})", t.id, t.language)
            };
            PickerItem::new(t.name.clone())
                .detail(detail)
                .active(t.id == app.selection.translation)
        })
        .collect();
    PickerState::new("Translations", items)
}

fn book_picker(app: &App) -> PickerState {
    let items = app
        .books
        .iter()
        .map(|b| {
            PickerItem::new(b.name.clone())
                .detail(b.abbreviation.clone())
                .active(b.abbreviation == app.selection.book)
        })
        .collect();
    PickerState::new("Books", items)
}

fn chapter_picker(app: &App, count: u32) -> PickerState {
    let items = (1..=count)
        .map(|n| PickerItem::new(format!("Chapter {n}")).active(n == app.selection.chapter))
        .collect();
    PickerState::new(format!("{} chapters", app.selection.book_name), items)
}

fn results_picker(app: &App) -> PickerState {
    let items = app
        .matches
        .iter()
        .map(|m| {
            PickerItem::new(format!("{} {}:{}", m.book_name, m.chapter, m.verse))
                .detail(m.text.clone())
        })
        .collect();
    PickerState::new(format!("{} result(s)", app.matches.len()), items)
}

/// Translate a terminal event into an action, updating presentation state
/// along the way.
pub fn route_event(tui: &mut TuiState, app: &App, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if matches!(event, TuiEvent::Resize) {
        return None;
    }

    match tui.mode {
        Mode::Reading => route_reading(tui, app, event),
        Mode::Search => match tui.search.handle_event(event)? {
            SearchEvent::ContentChanged => {
                let names = search::book_suggestions(&app.books, &tui.search.buffer)
                    .into_iter()
                    .map(|b| b.name.clone())
                    .collect();
                tui.search.set_suggestions(names);
                None
            }
            SearchEvent::Submit(query) => {
                tui.mode = Mode::Reading;
                tui.search.clear();
                let verse_search = search::book_suggestions(&app.books, &query).is_empty();
                Some(Action::Search {
                    query,
                    verse_search,
                })
            }
            SearchEvent::Dismiss => {
                tui.mode = Mode::Reading;
                tui.search.clear();
                None
            }
        },
        mode => {
            let picked = tui.picker.as_mut()?.handle_event(event)?;
            tui.close_overlay();
            match picked {
                PickerEvent::Dismiss if mode == Mode::Chapters => Some(Action::CloseChapterPicker),
                PickerEvent::Dismiss => None,
                PickerEvent::Select(i) => match mode {
                    Mode::Translations => app
                        .translations
                        .get(i)
                        .map(|t| Action::ChangeTranslation(t.id.clone())),
                    Mode::Books => app
                        .books
                        .get(i)
                        .map(|b| Action::SelectBook(b.abbreviation.clone())),
                    Mode::Chapters => Some(Action::ConfirmChapter(i as u32 + 1)),
                    Mode::Results => app.matches.get(i).cloned().map(Action::GoToResult),
                    Mode::Reading | Mode::Search => None,
                },
            }
        }
    }
}

fn route_reading(tui: &mut TuiState, app: &App, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Char('q') => Some(Action::Quit),
        TuiEvent::Char('/') => {
            tui.search.clear();
            tui.mode = Mode::Search;
            None
        }
        TuiEvent::Char('t') => {
            tui.open_picker(Mode::Translations, translation_picker(app));
            None
        }
        TuiEvent::Char('b') => {
            tui.open_picker(Mode::Books, book_picker(app));
            None
        }
        TuiEvent::Char('c') => match app.chapter_count {
            Some(count) => {
                tui.open_picker(Mode::Chapters, chapter_picker(app, count));
                None
            }
            // Resolves the count, then the picker opens via `sync_with_app`.
            None if app.selection.has_book() => Some(Action::SelectBook(app.selection.book.clone())),
            None => None,
        },
        TuiEvent::Char('r') if !app.matches.is_empty() => {
            tui.open_picker(Mode::Results, results_picker(app));
            None
        }
        TuiEvent::CursorLeft => Some(Action::PreviousChapter),
        TuiEvent::CursorRight => Some(Action::NextChapter),
        _ => {
            tui.chapter_view.handle_event(event);
            None
        }
    }
}

/// Bring presentation state in line with the app after actions were applied.
pub fn sync_with_app(tui: &mut TuiState, app: &App) {
    if app.show_chapter_picker
        && tui.mode != Mode::Chapters
        && let Some(count) = app.chapter_count
    {
        tui.search.clear();
        tui.open_picker(Mode::Chapters, chapter_picker(app, count));
    }

    let shown = app
        .content
        .as_ref()
        .map(|c| (app.selection.book.clone(), c.chapter));
    if shown != tui.shown {
        tui.chapter_view.reset();
        tui.shown = shown;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            Hide,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Build the content gateway from a resolved config.
pub fn build_gateway(config: &ResolvedConfig) -> Arc<dyn ContentGateway> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build HTTP client with timeout: {}", e);
            reqwest::Client::new()
        });
    Arc::new(BibleApiGateway::with_client(
        Some(config.base_url.clone()),
        client,
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let gateway = build_gateway(&config);
    info!(
        "Reading {} from {}",
        config.translation,
        gateway.name()
    );
    let mut driver = Driver::new(App::from_config(gateway, &config));
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    driver.dispatch(Action::Start);

    let start_time = Instant::now();
    let mut needs_redraw = true;

    loop {
        if driver.drain() {
            needs_redraw = true;
        }
        sync_with_app(&mut tui, driver.app());
        if let Some(key) = driver.take_scroll_request() {
            tui.chapter_view.scroll_to(key);
            needs_redraw = true;
        }

        let busy = driver.app().is_loading();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_millis() / 80) as usize;
            terminal.draw(|f| ui::draw_ui(f, driver.app(), &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if busy {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&mut tui, driver.app(), &event) {
                driver.dispatch(action);
            }
            if driver.should_quit() {
                break;
            }
        }

        if driver.should_quit() {
            break;
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}
