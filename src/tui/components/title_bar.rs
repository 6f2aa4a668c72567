//! # TitleBar Component
//!
//! Top bar showing what is being read and whether anything is loading.
//!
//! Stateless: every field is a prop copied from `App` each frame.
//!
//! ```text
//! Lectern | King James Version | Genesis 1/50 | Loading...
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct TitleBar {
    pub translation_name: String,
    pub book_name: String,
    pub chapter: u32,
    pub chapter_count: Option<u32>,
    pub status_message: String,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    fn reference(&self) -> Option<String> {
        if self.book_name.is_empty() {
            return None;
        }
        Some(match self.chapter_count {
            Some(count) => format!("{} {}/{}", self.book_name, self.chapter, count),
            None => format!("{} {}", self.book_name, self.chapter),
        })
    }

    fn text(&self) -> String {
        let mut parts = vec![String::from("Lectern")];
        if !self.translation_name.is_empty() {
            parts.push(self.translation_name.clone());
        }
        if let Some(reference) = self.reference() {
            parts.push(reference);
        }
        if self.is_loading {
            parts.push(format!(
                "{} Loading...",
                SPINNER[self.spinner_frame % SPINNER.len()]
            ));
        } else if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        parts.join(" | ")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn title_bar() -> TitleBar {
        TitleBar {
            translation_name: "King James Version".into(),
            book_name: "Genesis".into(),
            chapter: 1,
            chapter_count: Some(50),
            status_message: "Welcome to Lectern!".into(),
            is_loading: false,
            spinner_frame: 0,
        }
    }

    #[test]
    fn test_title_shows_reference_and_status() {
        assert_eq!(
            title_bar().text(),
            "Lectern | King James Version | Genesis 1/50 | Welcome to Lectern!"
        );
    }

    #[test]
    fn test_loading_replaces_status() {
        let mut bar = title_bar();
        bar.is_loading = true;
        bar.chapter_count = None;
        bar.spinner_frame = 5;
        assert_eq!(bar.text(), "Lectern | King James Version | Genesis 1 | / Loading...");
    }

    #[test]
    fn test_no_book_yet() {
        let mut bar = title_bar();
        bar.book_name.clear();
        bar.status_message.clear();
        assert_eq!(bar.text(), "Lectern | King James Version");
    }

    #[test]
    fn test_render_into_buffer() {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        let mut bar = title_bar();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Genesis 1/50"));
    }
}
