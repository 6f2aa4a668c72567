//! HTTP gateway for bible-api style content services.
//!
//! Endpoints (relative to the base URL):
//! - `GET /translations` → list of translations
//! - `GET /{translation}/books` → list of books
//! - `GET /{translation}/{book}` → chapter count
//! - `GET /{book}/{chapter}?translation={translation}` → one chapter of verses

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::gateway::{Book, ContentGateway, GatewayError, Translation, Verse, VerseContent};

pub const DEFAULT_BASE_URL: &str = "https://bible-api.com";

// ============================================================================
// Wire Types
// ============================================================================

/// The chapter endpoint answers in one of several shapes depending on the source.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ChapterCountBody {
    Count(u32),
    List(Vec<serde_json::Value>),
    Object { chapters: u32 },
}

impl ChapterCountBody {
    fn count(&self) -> u32 {
        match self {
            ChapterCountBody::Count(n) => *n,
            ChapterCountBody::List(items) => saturating_count(items.len()),
            ChapterCountBody::Object { chapters } => *chapters,
        }
    }
}

#[derive(Deserialize, Debug)]
struct PassageBody {
    #[serde(default)]
    translation_name: Option<String>,
    #[serde(default)]
    verses: Vec<PassageVerse>,
}

#[derive(Deserialize, Debug)]
struct PassageVerse {
    #[serde(default)]
    book_name: Option<String>,
    #[serde(default)]
    chapter: Option<u32>,
    verse: u32,
    text: String,
}

fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Converts a passage body into `VerseContent`, falling back to the request
/// values when the body omits them.
fn passage_to_content(
    body: PassageBody,
    translation: &str,
    book: &str,
    chapter: u32,
) -> VerseContent {
    let first = body.verses.first();
    let book_name = first
        .and_then(|v| v.book_name.clone())
        .unwrap_or_else(|| book.to_string());
    let chapter = first.and_then(|v| v.chapter).unwrap_or(chapter);

    VerseContent {
        book_name,
        chapter,
        translation_name: body
            .translation_name
            .unwrap_or_else(|| translation.to_string()),
        verses: body
            .verses
            .into_iter()
            .map(|v| Verse {
                verse: v.verse,
                text: v.text.trim().to_string(),
            })
            .collect(),
    }
}

// ============================================================================
// Gateway Implementation
// ============================================================================

pub struct BibleApiGateway {
    base_url: String,
    client: reqwest::Client,
}

impl BibleApiGateway {
    pub fn new(base_url: Option<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Uses a preconfigured client (timeouts, proxies).
    pub fn with_client(base_url: Option<String>, client: reqwest::Client) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, GatewayError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(GatewayError::Config(format!(
                "base URL must be http(s): {:?}",
                self.base_url
            )));
        }
        debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Content API error: {} - {}", status.as_u16(), message);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ContentGateway for BibleApiGateway {
    fn name(&self) -> &str {
        "bible-api"
    }

    async fn list_translations(&self) -> Result<Vec<Translation>, GatewayError> {
        let translations: Vec<Translation> = self
            .get_json(format!("{}/translations", self.base_url), &[])
            .await?;
        info!("Fetched {} translations", translations.len());
        Ok(translations)
    }

    async fn list_books(&self, translation: &str) -> Result<Vec<Book>, GatewayError> {
        let books: Vec<Book> = self
            .get_json(format!("{}/{}/books", self.base_url, translation), &[])
            .await?;
        info!("Fetched {} books for {}", books.len(), translation);
        Ok(books)
    }

    async fn chapter_count(&self, translation: &str, book: &str) -> Result<u32, GatewayError> {
        let body: ChapterCountBody = self
            .get_json(format!("{}/{}/{}", self.base_url, translation, book), &[])
            .await?;
        match body.count() {
            0 => Err(GatewayError::Parse(format!("{book} has no chapters"))),
            n => Ok(n),
        }
    }

    async fn get_verses(
        &self,
        translation: &str,
        book: &str,
        chapter: u32,
    ) -> Result<VerseContent, GatewayError> {
        let body: PassageBody = self
            .get_json(
                format!("{}/{}/{}", self.base_url, book, chapter),
                &[("translation", translation)],
            )
            .await?;
        debug!(
            "Fetched {} verses for {} {} ({})",
            body.verses.len(),
            book,
            chapter,
            translation
        );
        Ok(passage_to_content(body, translation, book, chapter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_count_accepts_bare_number() {
        let body: ChapterCountBody = serde_json::from_str("50").unwrap();
        assert_eq!(body.count(), 50);
    }

    #[test]
    fn test_chapter_count_accepts_list() {
        let body: ChapterCountBody = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(body.count(), 3);
    }

    #[test]
    fn test_chapter_count_accepts_object() {
        let body: ChapterCountBody = serde_json::from_str(r#"{"chapters": 40}"#).unwrap();
        assert_eq!(body.count(), 40);
    }

    #[test]
    fn test_passage_to_content_trims_text_and_reads_book_name() {
        let body: PassageBody = serde_json::from_str(
            r#"{
                "reference": "John 3",
                "translation_name": "King James Version",
                "verses": [
                    {"book_name": "John", "chapter": 3, "verse": 16, "text": "For God so loved the world,\n"}
                ]
            }"#,
        )
        .unwrap();
        let content = passage_to_content(body, "kjv", "JHN", 3);
        assert_eq!(content.book_name, "John");
        assert_eq!(content.translation_name, "King James Version");
        assert_eq!(content.verses[0].text, "For God so loved the world,");
    }

    #[test]
    fn test_passage_to_content_falls_back_to_request() {
        let body: PassageBody = serde_json::from_str(r#"{"verses": []}"#).unwrap();
        let content = passage_to_content(body, "kjv", "GEN", 2);
        assert_eq!(content.book_name, "GEN");
        assert_eq!(content.chapter, 2);
        assert_eq!(content.translation_name, "kjv");
        assert!(content.verses.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = BibleApiGateway::new(Some("http://localhost:9999/".to_string()));
        assert_eq!(gateway.base_url(), "http://localhost:9999");
    }

    #[tokio::test]
    async fn test_non_http_base_url_is_config_error() {
        let gateway = BibleApiGateway::new(Some("bible-api.com".to_string()));
        let result = gateway.list_translations().await;
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_chapter_list_length_saturates() {
        assert_eq!(saturating_count(4), 4);
        assert_eq!(saturating_count(usize::MAX), u32::MAX);
    }
}
