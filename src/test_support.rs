//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::state::App;
use crate::gateway::{Book, ContentGateway, GatewayError, Translation, Verse, VerseContent};

pub fn book(abbreviation: &str, name: &str, chapters: u32) -> Book {
    Book {
        abbreviation: abbreviation.to_string(),
        name: name.to_string(),
        chapters,
    }
}

/// A chapter whose verses are numbered from 1.
pub fn content(book_name: &str, chapter: u32, texts: &[&str]) -> VerseContent {
    VerseContent {
        book_name: book_name.to_string(),
        chapter,
        translation_name: "King James Version".to_string(),
        verses: texts
            .iter()
            .enumerate()
            .map(|(i, text)| Verse {
                verse: i as u32 + 1,
                text: text.to_string(),
            })
            .collect(),
    }
}

/// In-memory gateway with per-book latency, injected failures and a call log.
///
/// Verse fetches log `start BOOK N` before any delay and `end BOOK N` once
/// settled. Chapters never registered come back empty.
pub struct FixtureGateway {
    pub translations: Vec<Translation>,
    pub books: Vec<Book>,
    chapters: HashMap<(String, u32), Vec<String>>,
    failures: HashSet<(String, u32)>,
    delays: HashMap<String, Duration>,
    fail_books: bool,
    log: Mutex<Vec<String>>,
}

impl FixtureGateway {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            translations: vec![Translation {
                id: "kjv".to_string(),
                name: "King James Version".to_string(),
                language: "en".to_string(),
            }],
            books,
            chapters: HashMap::new(),
            failures: HashSet::new(),
            delays: HashMap::new(),
            fail_books: false,
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_chapter(mut self, book: &str, chapter: u32, texts: &[&str]) -> Self {
        self.chapters.insert(
            (book.to_string(), chapter),
            texts.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn failing(mut self, book: &str, chapter: u32) -> Self {
        self.failures.insert((book.to_string(), chapter));
        self
    }

    pub fn with_delay(mut self, book: &str, delay: Duration) -> Self {
        self.delays.insert(book.to_string(), delay);
        self
    }

    pub fn failing_books(mut self) -> Self {
        self.fail_books = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// Verse fetches issued so far, as `BOOK N`.
    pub fn verse_fetches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("start ").map(str::to_string))
            .collect()
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }

    fn book_name(&self, abbreviation: &str) -> String {
        self.books
            .iter()
            .find(|b| b.abbreviation == abbreviation)
            .map(|b| b.name.clone())
            .unwrap_or_else(|| abbreviation.to_string())
    }
}

#[async_trait]
impl ContentGateway for FixtureGateway {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn list_translations(&self) -> Result<Vec<Translation>, GatewayError> {
        self.record("translations".to_string());
        Ok(self.translations.clone())
    }

    async fn list_books(&self, translation: &str) -> Result<Vec<Book>, GatewayError> {
        self.record(format!("books {translation}"));
        if self.fail_books {
            return Err(GatewayError::Network("connection refused".to_string()));
        }
        Ok(self.books.clone())
    }

    async fn chapter_count(&self, _translation: &str, book: &str) -> Result<u32, GatewayError> {
        self.record(format!("count {book}"));
        match self.books.iter().find(|b| b.abbreviation == book) {
            Some(b) if b.chapters > 0 => Ok(b.chapters),
            _ => Err(GatewayError::Api {
                status: 404,
                message: format!("unknown book {book}"),
            }),
        }
    }

    async fn get_verses(
        &self,
        _translation: &str,
        book: &str,
        chapter: u32,
    ) -> Result<VerseContent, GatewayError> {
        self.record(format!("start {book} {chapter}"));
        if let Some(delay) = self.delays.get(book) {
            tokio::time::sleep(*delay).await;
        }
        self.record(format!("end {book} {chapter}"));

        if self.failures.contains(&(book.to_string(), chapter)) {
            return Err(GatewayError::Network("connection reset".to_string()));
        }
        let texts: Vec<&str> = self
            .chapters
            .get(&(book.to_string(), chapter))
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default();
        Ok(content(&self.book_name(book), chapter, &texts))
    }
}

/// Creates a test App over the given gateway, with `kjv` selected.
pub fn test_app(gateway: Arc<FixtureGateway>) -> App {
    App::new(gateway, "kjv".to_string())
}
