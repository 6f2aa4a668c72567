//! # Cross-Book Verse Scanner
//!
//! Searches verse text across every book without an index: the first few
//! chapters of each book are fetched live and filtered for the term.
//!
//! ```text
//!   books ──┬── GEN: ch1 → ch2 → ch3 ──┐
//!           ├── EXO: ch1 → ch2 → ch3 ──┼── join_all ── ScanReport
//!           └── LEV: ch1 → ch2 → ch3 ──┘
//! ```
//!
//! Books run concurrently, chapters within a book run in order. The join
//! keeps book order, so the report is ordered by (book, chapter, verse)
//! no matter which book finished first.

use futures::future::join_all;
use log::{debug, info};

use crate::gateway::{Book, ContentGateway};

/// How many leading chapters of each book a scan reads.
pub const DEFAULT_SCAN_DEPTH: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub book: String,
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub term: String,
    /// Every match, in (book order, chapter, verse order).
    pub matches: Vec<SearchMatch>,
    pub chapters_scanned: usize,
    /// Chapter fetches that failed and were counted as empty.
    pub chapters_failed: usize,
}

impl ScanReport {
    /// The auto-navigation target.
    pub fn first_match(&self) -> Option<&SearchMatch> {
        self.matches.first()
    }
}

#[derive(Default)]
struct BookScan {
    matches: Vec<SearchMatch>,
    scanned: usize,
    failed: usize,
}

async fn scan_book(
    gateway: &dyn ContentGateway,
    translation: &str,
    book: &Book,
    term: &str,
    depth: u32,
) -> BookScan {
    let limit = book.known_chapters().map_or(depth, |n| n.min(depth));
    let mut scan = BookScan::default();

    for chapter in 1..=limit {
        match gateway
            .get_verses(translation, &book.abbreviation, chapter)
            .await
        {
            Ok(content) => {
                scan.scanned += 1;
                scan.matches.extend(
                    content
                        .verses
                        .into_iter()
                        .filter(|v| v.text.to_lowercase().contains(term))
                        .map(|v| SearchMatch {
                            book: book.abbreviation.clone(),
                            book_name: book.name.clone(),
                            chapter,
                            verse: v.verse,
                            text: v.text,
                        }),
                );
            }
            Err(e) => {
                scan.failed += 1;
                debug!(
                    "Scan skipped {} {} after fetch error: {}",
                    book.abbreviation, chapter, e
                );
            }
        }
    }
    scan
}

/// Scans the first `depth` chapters of every book for `term`
/// (case-insensitive substring). Never fails: chapter fetch errors count as
/// chapters without matches.
pub async fn scan(
    gateway: &dyn ContentGateway,
    translation: &str,
    books: &[Book],
    term: &str,
    depth: u32,
) -> ScanReport {
    let term = term.trim().to_lowercase();
    let mut report = ScanReport {
        term: term.clone(),
        ..Default::default()
    };
    if term.is_empty() {
        return report;
    }

    info!(
        "Scanning {} books (depth {}) for {:?} in {}",
        books.len(),
        depth,
        term,
        translation
    );

    let scans = join_all(
        books
            .iter()
            .map(|book| scan_book(gateway, translation, book, &term, depth)),
    )
    .await;

    for scan in scans {
        report.chapters_scanned += scan.scanned;
        report.chapters_failed += scan.failed;
        report.matches.extend(scan.matches);
    }

    info!(
        "Scan for {:?} done: {} matches, {} chapters read, {} failed",
        report.term,
        report.matches.len(),
        report.chapters_scanned,
        report.chapters_failed
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixtureGateway, book};
    use std::time::Duration;
    use tokio_test::{assert_pending, assert_ready};

    fn two_books() -> FixtureGateway {
        FixtureGateway::new(vec![book("GEN", "Genesis", 50), book("EXO", "Exodus", 40)])
            .with_chapter("GEN", 1, &["In the beginning", "And the earth"])
            .with_chapter("GEN", 2, &["Thus the heavens", "and he did love her"])
            .with_chapter("EXO", 1, &["Now these", "a", "b", "c", "LOVE thy neighbour"])
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_match_follows_book_order_not_completion_order() {
        // GEN is slow, EXO answers immediately.
        let gateway = two_books().with_delay("GEN", Duration::from_millis(50));

        let report = scan(&gateway, "kjv", &gateway.books, "love", DEFAULT_SCAN_DEPTH).await;

        let found: Vec<_> = report
            .matches
            .iter()
            .map(|m| (m.book.as_str(), m.chapter, m.verse))
            .collect();
        assert_eq!(found, vec![("GEN", 2, 2), ("EXO", 1, 5)]);
        let first = report.first_match().unwrap();
        assert_eq!((first.book.as_str(), first.chapter), ("GEN", 2));

        // EXO really did finish before GEN reached chapter 2.
        let calls = gateway.calls();
        let exo_done = calls.iter().position(|c| c == "end EXO 1").unwrap();
        let gen2_done = calls.iter().position(|c| c == "end GEN 2").unwrap();
        assert!(exo_done < gen2_done);
    }

    #[tokio::test]
    async fn test_never_fetches_beyond_depth() {
        let gateway = two_books();
        scan(&gateway, "kjv", &gateway.books, "love", DEFAULT_SCAN_DEPTH).await;

        let starts: Vec<_> = gateway
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("start "))
            .collect();
        assert_eq!(starts.len(), 6);
        assert!(!starts.iter().any(|c| c.ends_with(" 4")));
    }

    #[tokio::test]
    async fn test_depth_is_capped_by_known_chapter_count() {
        let gateway = FixtureGateway::new(vec![book("OBA", "Obadiah", 1), book("JUD", "Jude", 0)])
            .with_chapter("OBA", 1, &["The vision of Obadiah"]);
        let report = scan(&gateway, "kjv", &gateway.books, "vision", 3).await;

        let starts: Vec<_> = gateway
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("start "))
            .collect();
        // Obadiah stops at its single chapter; Jude has no known count and uses the full depth.
        assert_eq!(starts, vec!["start OBA 1", "start JUD 1", "start JUD 2", "start JUD 3"]);
        assert_eq!(report.matches.len(), 1);
    }

    #[tokio::test]
    async fn test_chapters_are_fetched_sequentially_within_a_book() {
        let gateway = two_books();
        scan(&gateway, "kjv", &gateway.books, "love", DEFAULT_SCAN_DEPTH).await;

        let calls = gateway.calls();
        for book in ["GEN", "EXO"] {
            for chapter in 1..3 {
                let end = calls
                    .iter()
                    .position(|c| *c == format!("end {book} {chapter}"))
                    .unwrap();
                let next_start = calls
                    .iter()
                    .position(|c| *c == format!("start {book} {}", chapter + 1))
                    .unwrap();
                assert!(end < next_start, "{book} {chapter} overlapped the next chapter");
            }
        }
    }

    #[tokio::test]
    async fn test_failed_chapter_does_not_abort_the_book() {
        let gateway = two_books().failing("GEN", 1);
        let report = scan(&gateway, "kjv", &gateway.books, "love", DEFAULT_SCAN_DEPTH).await;

        assert_eq!(report.chapters_failed, 1);
        assert_eq!(report.chapters_scanned, 5);
        assert_eq!(report.first_match().unwrap().book, "GEN");
        assert_eq!(report.matches.len(), 2);
    }

    #[tokio::test]
    async fn test_matches_keep_verse_order_within_chapter() {
        let gateway = FixtureGateway::new(vec![book("PSA", "Psalms", 150)])
            .with_chapter("PSA", 1, &["praise", "nothing", "Praise him", "praise again"]);
        let report = scan(&gateway, "kjv", &gateway.books, "PRAISE", 1).await;

        let verses: Vec<_> = report.matches.iter().map(|m| m.verse).collect();
        assert_eq!(verses, vec![1, 3, 4]);
        assert_eq!(report.term, "praise");
    }

    #[tokio::test]
    async fn test_scan_is_idempotent() {
        let gateway = two_books();
        let first = scan(&gateway, "kjv", &gateway.books, "love", DEFAULT_SCAN_DEPTH).await;
        let second = scan(&gateway, "kjv", &gateway.books, "love", DEFAULT_SCAN_DEPTH).await;
        assert_eq!(first, second);
        assert_eq!(first.first_match(), second.first_match());
    }

    #[tokio::test]
    async fn test_blank_term_issues_no_fetch() {
        let gateway = two_books();
        let report = scan(&gateway, "kjv", &gateway.books, "  ", DEFAULT_SCAN_DEPTH).await;
        assert!(report.matches.is_empty());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_waits_for_every_book() {
        let gateway = two_books().with_delay("EXO", Duration::from_secs(1));
        let books = gateway.books.clone();
        let mut fut = tokio_test::task::spawn(scan(&gateway, "kjv", &books, "love", 1));

        // GEN settles immediately, EXO is still sleeping.
        assert_pending!(fut.poll());

        tokio::time::advance(Duration::from_secs(1)).await;
        let report = assert_ready!(fut.poll());
        assert_eq!(report.chapters_scanned, 2);
        assert_eq!(report.matches.len(), 1);
    }
}
