//! # Application State
//!
//! Core reading state for Lectern. Domain logic only; presentation state
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── gateway: Arc<dyn ContentGateway>  // content source
//! ├── translations: Vec<Translation>    // fetched once at startup
//! ├── books: Vec<Book>                  // books of the current translation
//! ├── selection: Selection              // translation / book / chapter
//! ├── chapter_count: Option<u32>        // known chapters of the selected book
//! ├── content: Option<VerseContent>     // the loaded chapter
//! ├── pending_loads: usize              // fetches in flight
//! ├── scanning: bool                    // verse search in flight
//! ├── error: Option<String>             // last fetch failure
//! ├── notice: Notice                    // transient message
//! ├── matches: Vec<SearchMatch>         // last verse search results
//! ├── pending_scroll: Option<u32>       // verse to scroll to after next load
//! ├── highlight: Option<Highlight>      // verse highlighted after a jump
//! └── requests: RequestIds              // latest request per fetch kind
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::{ResolvedConfig, Timings};
use crate::core::notice::Notice;
use crate::core::scanner::{DEFAULT_SCAN_DEPTH, SearchMatch};
use crate::core::scroll::Highlight;
use crate::gateway::{Book, ContentGateway, Translation, VerseContent};

/// What is being read right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub translation: String,
    /// Abbreviation. Empty only between a translation change and its default book.
    pub book: String,
    pub book_name: String,
    /// Always at least 1.
    pub chapter: u32,
}

impl Selection {
    pub fn new(translation: String) -> Self {
        Self {
            translation,
            book: String::new(),
            book_name: String::new(),
            chapter: 1,
        }
    }

    pub fn has_translation(&self) -> bool {
        !self.translation.is_empty()
    }

    pub fn has_book(&self) -> bool {
        !self.book.is_empty()
    }
}

/// Id of the most recent request of each kind. Responses carrying an older
/// id are stale and get dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestIds {
    pub books: u64,
    pub chapters: u64,
    pub verses: u64,
    pub scan: u64,
}

impl RequestIds {
    pub fn next(counter: &mut u64) -> u64 {
        *counter += 1;
        *counter
    }
}

/// The book opened when a translation loads: Genesis if present, else the first.
pub fn default_book(books: &[Book]) -> Option<&Book> {
    books
        .iter()
        .find(|b| {
            b.name.to_lowercase().contains("genesis") || b.abbreviation.eq_ignore_ascii_case("gen")
        })
        .or_else(|| books.first())
}

pub struct App {
    pub gateway: Arc<dyn ContentGateway>,
    pub translations: Vec<Translation>,
    pub books: Vec<Book>,
    pub selection: Selection,
    pub chapter_count: Option<u32>,
    pub content: Option<VerseContent>,
    pub pending_loads: usize,
    pub scanning: bool,
    pub error: Option<String>,
    pub notice: Notice,
    pub matches: Vec<SearchMatch>,
    pub pending_scroll: Option<u32>,
    pub highlight: Option<Highlight>,
    pub highlight_generation: u64,
    /// True once a picked book's chapter count arrived; the UI shows a chapter picker.
    pub show_chapter_picker: bool,
    pub status_message: String,
    pub scan_depth: u32,
    pub timings: Timings,
    pub requests: RequestIds,
}

impl App {
    pub fn new(gateway: Arc<dyn ContentGateway>, translation: String) -> Self {
        Self {
            gateway,
            translations: Vec::new(),
            books: Vec::new(),
            selection: Selection::new(translation),
            chapter_count: None,
            content: None,
            pending_loads: 0,
            scanning: false,
            error: None,
            notice: Notice::default(),
            matches: Vec::new(),
            pending_scroll: None,
            highlight: None,
            highlight_generation: 0,
            show_chapter_picker: false,
            status_message: String::from("Welcome to Lectern!"),
            scan_depth: DEFAULT_SCAN_DEPTH,
            timings: Timings::default(),
            requests: RequestIds::default(),
        }
    }

    pub fn from_config(gateway: Arc<dyn ContentGateway>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(gateway, config.translation.clone());
        app.scan_depth = config.scan_depth;
        app.timings = config.timings;
        app
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0 || self.scanning
    }

    pub fn find_book(&self, abbreviation: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.abbreviation == abbreviation)
    }

    /// Display name of the selected translation, falling back to its id.
    pub fn translation_name(&self) -> &str {
        self.translations
            .iter()
            .find(|t| t.id == self.selection.translation)
            .map_or(self.selection.translation.as_str(), |t| t.name.as_str())
    }
}
