//! # Actions
//!
//! Everything that can happen in Lectern becomes an `Action`.
//! User picks a book? That's `Action::SelectBook(abbreviation)`.
//! A chapter arrives? That's `Action::VersesLoaded { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect`s
//! the outside world must carry out (fetches, timers, scrolling).
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effects
//! ```

use std::time::Duration;

use log::{debug, info, warn};

use crate::core::scanner::{ScanReport, SearchMatch};
use crate::core::scroll::{Highlight, VerseKey};
use crate::core::search::{self, Resolution};
use crate::core::state::{App, RequestIds, Selection, default_book};
use crate::gateway::{Book, GatewayError, Translation, VerseContent};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Load translations and the books of the configured translation.
    Start,
    TranslationsLoaded(Result<Vec<Translation>, GatewayError>),
    ChangeTranslation(String),
    BooksLoaded {
        request: u64,
        result: Result<Vec<Book>, GatewayError>,
    },
    SelectBook(String),
    ChapterCountLoaded {
        request: u64,
        book: String,
        show_picker: bool,
        result: Result<u32, GatewayError>,
    },
    ConfirmChapter(u32),
    CloseChapterPicker,
    LoadVerses,
    VersesLoaded {
        request: u64,
        result: Result<VerseContent, GatewayError>,
    },
    PreviousChapter,
    NextChapter,
    Search {
        query: String,
        /// Scan verse text when the query names no book.
        verse_search: bool,
    },
    ScanCompleted {
        request: u64,
        report: ScanReport,
    },
    GoToResult(SearchMatch),
    NoticeExpired(u64),
    HighlightExpired(u64),
    Quit,
}

impl Action {
    /// True for actions that report the end of a gateway request.
    pub fn settles_request(&self) -> bool {
        matches!(
            self,
            Action::TranslationsLoaded(_)
                | Action::BooksLoaded { .. }
                | Action::ChapterCountLoaded { .. }
                | Action::VersesLoaded { .. }
                | Action::ScanCompleted { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Quit,
    FetchTranslations,
    FetchBooks {
        request: u64,
        translation: String,
    },
    FetchChapterCount {
        request: u64,
        translation: String,
        book: String,
        show_picker: bool,
    },
    FetchVerses {
        request: u64,
        translation: String,
        book: String,
        chapter: u32,
    },
    ScanVerses {
        request: u64,
        translation: String,
        books: Vec<Book>,
        term: String,
        depth: u32,
    },
    ExpireNotice {
        generation: u64,
        after: Duration,
    },
    /// Scroll the chapter view to this verse on the next draw.
    ScrollTo(VerseKey),
    ExpireHighlight {
        generation: u64,
        after: Duration,
    },
}

// ============================================================================
// Helpers
// ============================================================================

fn finish_load(app: &mut App) {
    app.pending_loads = app.pending_loads.saturating_sub(1);
}

fn fetch_books(app: &mut App) -> Effect {
    app.pending_loads += 1;
    Effect::FetchBooks {
        request: RequestIds::next(&mut app.requests.books),
        translation: app.selection.translation.clone(),
    }
}

fn fetch_chapter_count(app: &mut App, show_picker: bool) -> Effect {
    app.pending_loads += 1;
    Effect::FetchChapterCount {
        request: RequestIds::next(&mut app.requests.chapters),
        translation: app.selection.translation.clone(),
        book: app.selection.book.clone(),
        show_picker,
    }
}

/// Fetches the current selection's chapter, if a book is selected.
fn load_verses(app: &mut App) -> Vec<Effect> {
    if !app.selection.has_book() {
        return Vec::new();
    }
    app.pending_loads += 1;
    vec![Effect::FetchVerses {
        request: RequestIds::next(&mut app.requests.verses),
        translation: app.selection.translation.clone(),
        book: app.selection.book.clone(),
        chapter: app.selection.chapter,
    }]
}

fn notify(app: &mut App, message: String, after: Duration) -> Effect {
    info!("Notice: {}", message);
    Effect::ExpireNotice {
        generation: app.notice.set(message),
        after,
    }
}

/// Points the selection at `book`/`chapter`. Switching to another book drops
/// the loaded chapter and takes the chapter count from the book list.
fn select(app: &mut App, book: &str, book_name: &str, chapter: u32) {
    if app.selection.book != book {
        app.content = None;
        app.chapter_count = app.find_book(book).and_then(Book::known_chapters);
        app.highlight = None;
    }
    app.selection.book = book.to_string();
    app.selection.book_name = book_name.to_string();
    app.selection.chapter = chapter.max(1);
    app.show_chapter_picker = false;
    app.pending_scroll = None;
}

/// Invalidates any verse scan in flight; its report is dropped when it lands.
fn cancel_scan(app: &mut App) {
    if app.scanning {
        debug!("Cancelling verse scan {}", app.requests.scan);
    }
    RequestIds::next(&mut app.requests.scan);
    app.scanning = false;
}

/// Moves to another chapter of the current book. A scroll target set for the
/// previous chapter no longer applies.
fn change_chapter(app: &mut App, chapter: u32) -> Vec<Effect> {
    app.selection.chapter = chapter;
    app.pending_scroll = None;
    cancel_scan(app);
    load_verses(app)
}

/// Loads the selected chapter, resolving the chapter count in the background
/// when the book list did not carry it.
fn open_selection(app: &mut App) -> Vec<Effect> {
    let mut effects = load_verses(app);
    if app.chapter_count.is_none() && app.selection.has_book() {
        effects.push(fetch_chapter_count(app, false));
    }
    effects
}

// ============================================================================
// Reducer
// ============================================================================

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Start => {
            app.pending_loads += 1;
            vec![Effect::FetchTranslations, fetch_books(app)]
        }

        Action::TranslationsLoaded(result) => {
            finish_load(app);
            match result {
                Ok(translations) => {
                    info!("Loaded {} translations", translations.len());
                    app.translations = translations;
                }
                Err(e) => {
                    warn!("Failed to load translations: {}", e);
                    app.error = Some("Failed to load translations".to_string());
                }
            }
            Vec::new()
        }

        Action::ChangeTranslation(id) => {
            let id = id.trim().to_string();
            if id.is_empty() {
                return Vec::new();
            }
            info!("Changing translation to {}", id);
            app.selection = Selection::new(id);
            app.chapter_count = None;
            app.content = None;
            app.matches.clear();
            app.pending_scroll = None;
            app.highlight = None;
            app.show_chapter_picker = false;
            // In-flight chapters and scans belong to the old translation.
            RequestIds::next(&mut app.requests.verses);
            cancel_scan(app);
            vec![fetch_books(app)]
        }

        Action::BooksLoaded { request, result } => {
            finish_load(app);
            if request != app.requests.books {
                debug!("Dropping stale book list (request {})", request);
                return Vec::new();
            }
            match result {
                Ok(books) => {
                    info!(
                        "Loaded {} books for {}",
                        books.len(),
                        app.selection.translation
                    );
                    app.books = books;
                    app.error = None;
                    let Some(first) = default_book(&app.books).cloned() else {
                        warn!("Translation {} has no books", app.selection.translation);
                        return Vec::new();
                    };
                    select(app, &first.abbreviation, &first.name, 1);
                    open_selection(app)
                }
                Err(e) => {
                    warn!("Failed to load books: {}", e);
                    app.error = Some("Failed to load books".to_string());
                    Vec::new()
                }
            }
        }

        Action::SelectBook(abbreviation) => {
            let Some(book) = app.find_book(&abbreviation).cloned() else {
                debug!("Ignoring unknown book {}", abbreviation);
                return Vec::new();
            };
            app.notice.clear();
            cancel_scan(app);
            select(app, &book.abbreviation, &book.name, 1);
            // Picking a book, even the current one, starts over at its chapter list.
            app.content = None;
            app.highlight = None;
            vec![fetch_chapter_count(app, true)]
        }

        Action::ChapterCountLoaded {
            request,
            book,
            show_picker,
            result,
        } => {
            finish_load(app);
            if request != app.requests.chapters || book != app.selection.book {
                debug!("Dropping stale chapter count for {}", book);
                return Vec::new();
            }
            match result {
                Ok(count) => {
                    debug!("{} has {} chapters", book, count);
                    app.chapter_count = Some(count);
                    if let Some(entry) = app.books.iter_mut().find(|b| b.abbreviation == book) {
                        entry.chapters = count;
                    }
                    if show_picker {
                        app.selection.chapter = 1;
                        app.show_chapter_picker = true;
                    } else {
                        app.selection.chapter = app.selection.chapter.min(count);
                    }
                }
                Err(e) => {
                    warn!("Failed to load chapters for {}: {}", book, e);
                    if show_picker {
                        app.error = Some("Failed to load chapters".to_string());
                    }
                }
            }
            Vec::new()
        }

        Action::ConfirmChapter(chapter) => {
            app.show_chapter_picker = false;
            let in_range = chapter >= 1 && app.chapter_count.is_none_or(|count| chapter <= count);
            if !in_range {
                warn!("Ignoring out-of-range chapter {}", chapter);
                return Vec::new();
            }
            change_chapter(app, chapter)
        }

        Action::CloseChapterPicker => {
            app.show_chapter_picker = false;
            Vec::new()
        }

        Action::LoadVerses => {
            app.pending_scroll = None;
            load_verses(app)
        }

        Action::VersesLoaded { request, result } => {
            finish_load(app);
            if request != app.requests.verses {
                debug!("Dropping stale chapter (request {})", request);
                return Vec::new();
            }
            match result {
                Ok(content) => {
                    debug!(
                        "Loaded {} {} ({} verses)",
                        content.book_name,
                        content.chapter,
                        content.verses.len()
                    );
                    app.content = Some(content);
                    app.error = None;
                    // Taken here so a later load never scrolls again.
                    let Some(verse) = app.pending_scroll.take() else {
                        return Vec::new();
                    };
                    let key = VerseKey::new(app.selection.book.clone(), app.selection.chapter, verse);
                    app.highlight_generation += 1;
                    app.highlight = Some(Highlight {
                        key: key.clone(),
                        generation: app.highlight_generation,
                    });
                    vec![
                        Effect::ScrollTo(key),
                        Effect::ExpireHighlight {
                            generation: app.highlight_generation,
                            after: app.timings.highlight,
                        },
                    ]
                }
                Err(e) => {
                    warn!("Failed to load verses: {}", e);
                    app.error = Some("Failed to load verses".to_string());
                    app.pending_scroll = None;
                    Vec::new()
                }
            }
        }

        Action::PreviousChapter => {
            if app.selection.chapter <= 1 {
                return Vec::new();
            }
            let previous = app.selection.chapter - 1;
            change_chapter(app, previous)
        }

        Action::NextChapter => match app.chapter_count {
            Some(count) if app.selection.chapter < count => {
                let next = app.selection.chapter + 1;
                change_chapter(app, next)
            }
            _ => Vec::new(),
        },

        Action::Search {
            query,
            verse_search,
        } => {
            let resolution = search::resolve(&app.books, &query, verse_search);
            if resolution == Resolution::Empty {
                return Vec::new();
            }
            app.matches.clear();
            match resolution {
                Resolution::Empty => Vec::new(),
                Resolution::Book(book) => {
                    let book = book.clone();
                    info!("Search {:?} matched book {}", query, book.abbreviation);
                    app.notice.clear();
                    cancel_scan(app);
                    select(app, &book.abbreviation, &book.name, 1);
                    open_selection(app)
                }
                Resolution::VerseSearch { term } => {
                    if !app.selection.has_translation() {
                        let after = app.timings.book_notice;
                        return vec![notify(app, search::SELECT_TRANSLATION_NOTICE.to_string(), after)];
                    }
                    app.notice.clear();
                    app.scanning = true;
                    app.status_message = format!("Searching verses for \"{term}\"...");
                    vec![Effect::ScanVerses {
                        request: RequestIds::next(&mut app.requests.scan),
                        translation: app.selection.translation.clone(),
                        books: app.books.clone(),
                        term,
                        depth: app.scan_depth,
                    }]
                }
                Resolution::NoMatch => {
                    warn!("Search term did not match any book: {}", query);
                    let after = app.timings.book_notice;
                    vec![notify(app, search::no_book_notice(&query), after)]
                }
            }
        }

        Action::ScanCompleted { request, report } => {
            if request != app.requests.scan {
                debug!("Dropping stale scan for {:?}", report.term);
                return Vec::new();
            }
            app.scanning = false;
            let after = app.timings.scan_notice;
            let Some(first) = report.first_match().cloned() else {
                app.matches.clear();
                app.status_message = String::new();
                return vec![notify(app, search::no_verses_notice(&report.term), after)];
            };

            let count = report.matches.len();
            app.matches = report.matches;
            app.status_message = format!("{count} result(s)");
            select(app, &first.book, &first.book_name, first.chapter);
            let mut effects = open_selection(app);
            effects.push(notify(app, search::found_notice(count, &report.term), after));
            effects
        }

        Action::GoToResult(found) => {
            info!(
                "Opening result {} {}:{}",
                found.book, found.chapter, found.verse
            );
            app.matches.clear();
            app.notice.clear();
            cancel_scan(app);
            select(app, &found.book, &found.book_name, found.chapter);
            app.pending_scroll = Some(found.verse);
            open_selection(app)
        }

        Action::NoticeExpired(generation) => {
            if app.notice.expire(generation) {
                debug!("Notice {} expired", generation);
            }
            Vec::new()
        }

        Action::HighlightExpired(generation) => {
            if app
                .highlight
                .as_ref()
                .is_some_and(|h| h.generation == generation)
            {
                app.highlight = None;
            }
            Vec::new()
        }

        Action::Quit => vec![Effect::Quit],
    }
}
