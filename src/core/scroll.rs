//! # Scroll Targets
//!
//! After a jump to a search result the chapter view scrolls to the chosen
//! verse and highlights it for a moment. The verse is addressed by a
//! `VerseKey`, which the presentation layer uses to find its row.

use std::fmt;

use crate::gateway::VerseContent;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseKey {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseKey {
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
        }
    }

    /// Position of this verse within `content`, if it was loaded.
    pub fn index_in(&self, content: &VerseContent) -> Option<usize> {
        if content.chapter != self.chapter {
            return None;
        }
        content.verses.iter().position(|v| v.verse == self.verse)
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "verse-{}-{}-{}", self.book, self.chapter, self.verse)
    }
}

/// A verse highlighted after a result jump. Removed when the timer carrying
/// the same generation fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub key: VerseKey,
    pub generation: u64,
}
