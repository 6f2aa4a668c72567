//! # Search Resolution
//!
//! Pure matching rules that turn a query into a book, a verse scan, or a
//! notice. The state changes that follow live in `action::update`.

use crate::gateway::Book;

/// What a submitted query resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Query was blank after trimming.
    Empty,
    /// Query names a book, exactly or partially.
    Book(&'a Book),
    /// No book matched; scan verse text for `term`.
    VerseSearch { term: String },
    /// No book matched and no verse search was requested.
    NoMatch,
}

/// Trims and lowercases a raw query.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Finds the book a normalized term refers to.
///
/// An exact name or abbreviation match wins; otherwise the first book (in
/// list order) whose name contains the term.
pub fn find_book<'a>(books: &'a [Book], term: &str) -> Option<&'a Book> {
    if term.is_empty() {
        return None;
    }
    books
        .iter()
        .find(|b| b.name.to_lowercase() == term || b.abbreviation.to_lowercase() == term)
        .or_else(|| books.iter().find(|b| b.name.to_lowercase().contains(term)))
}

pub fn resolve<'a>(books: &'a [Book], query: &str, verse_search: bool) -> Resolution<'a> {
    let term = normalize(query);
    if term.is_empty() {
        return Resolution::Empty;
    }
    match find_book(books, &term) {
        Some(book) => Resolution::Book(book),
        None if verse_search => Resolution::VerseSearch { term },
        None => Resolution::NoMatch,
    }
}

/// Books to suggest while the user types: name or abbreviation contains the query.
pub fn book_suggestions<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    let term = normalize(query);
    if term.is_empty() {
        return Vec::new();
    }
    books
        .iter()
        .filter(|b| {
            b.name.to_lowercase().contains(&term) || b.abbreviation.to_lowercase().contains(&term)
        })
        .collect()
}

pub fn no_book_notice(query: &str) -> String {
    format!("No book found for \"{}\"", query.trim())
}

pub fn found_notice(count: usize, term: &str) -> String {
    format!("Found {count} verse(s) with \"{term}\"")
}

pub fn no_verses_notice(term: &str) -> String {
    format!("No verses found with \"{term}\"")
}

pub const SELECT_TRANSLATION_NOTICE: &str = "Select a translation before searching verses";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::book;

    fn books() -> Vec<Book> {
        vec![
            book("GEN", "Genesis", 50),
            book("EXO", "Exodus", 40),
            book("JHN", "John", 21),
            book("1JN", "1 John", 5),
        ]
    }

    #[test]
    fn test_exact_name_match_is_case_insensitive() {
        let books = books();
        assert_eq!(find_book(&books, "exodus").unwrap().abbreviation, "EXO");
    }

    #[test]
    fn test_exact_abbreviation_match() {
        let books = books();
        assert_eq!(find_book(&books, "gen").unwrap().abbreviation, "GEN");
    }

    #[test]
    fn test_exact_match_beats_earlier_partial_match() {
        // "john" is contained in "John" and "1 John"; exact wins regardless of order.
        let books = vec![book("1JN", "1 John", 5), book("JHN", "John", 21)];
        assert_eq!(find_book(&books, "john").unwrap().abbreviation, "JHN");
    }

    #[test]
    fn test_partial_match_takes_first_in_list_order() {
        let books = books();
        assert_eq!(find_book(&books, "oh").unwrap().abbreviation, "JHN");
    }

    #[test]
    fn test_resolve_blank_query() {
        let books = books();
        assert_eq!(resolve(&books, "   ", true), Resolution::Empty);
    }

    #[test]
    fn test_resolve_falls_through_to_verse_search_when_requested() {
        let books = books();
        assert_eq!(
            resolve(&books, "  Love ", true),
            Resolution::VerseSearch {
                term: "love".to_string()
            }
        );
        assert_eq!(resolve(&books, "love", false), Resolution::NoMatch);
    }

    #[test]
    fn test_book_match_wins_over_verse_search_flag() {
        let books = books();
        assert!(matches!(resolve(&books, "Exodus", true), Resolution::Book(b) if b.abbreviation == "EXO"));
    }

    #[test]
    fn test_suggestions_match_abbreviation_or_name() {
        let books = books();
        let names: Vec<_> = book_suggestions(&books, "jn").iter().map(|b| b.abbreviation.as_str()).collect();
        assert_eq!(names, vec!["1JN"]);
        assert!(book_suggestions(&books, "").is_empty());
    }

    #[test]
    fn test_notice_texts() {
        assert_eq!(no_book_notice(" Zzz "), "No book found for \"Zzz\"");
        assert_eq!(found_notice(2, "love"), "Found 2 verse(s) with \"love\"");
        assert_eq!(no_verses_notice("xyz"), "No verses found with \"xyz\"");
    }
}
