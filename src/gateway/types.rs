use serde::{Deserialize, Serialize};

/// A distinct rendering of the text, e.g. `kjv`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub language: String,
}

/// A named division of the text, keyed by its abbreviation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub abbreviation: String,
    pub name: String,
    /// Zero until the chapter count has been resolved.
    #[serde(default)]
    pub chapters: u32,
}

impl Book {
    /// Returns the chapter count if the data source provided one.
    pub fn known_chapters(&self) -> Option<u32> {
        (self.chapters > 0).then_some(self.chapters)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub verse: u32,
    pub text: String,
}

/// One loaded chapter. Replaced wholesale on every successful load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VerseContent {
    pub book_name: String,
    pub chapter: u32,
    pub translation_name: String,
    pub verses: Vec<Verse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_without_chapters_field_defaults_to_unknown() {
        let book: Book = serde_json::from_str(r#"{"abbreviation":"GEN","name":"Genesis"}"#).unwrap();
        assert_eq!(book.chapters, 0);
        assert_eq!(book.known_chapters(), None);
    }

    #[test]
    fn test_book_known_chapters() {
        let book = Book {
            abbreviation: "OBA".into(),
            name: "Obadiah".into(),
            chapters: 1,
        };
        assert_eq!(book.known_chapters(), Some(1));
    }

    #[test]
    fn test_translation_language_is_optional() {
        let t: Translation = serde_json::from_str(r#"{"id":"kjv","name":"King James Version"}"#).unwrap();
        assert_eq!(t.id, "kjv");
        assert!(t.language.is_empty());
    }
}
