//! # ChapterView Component
//!
//! Scrollable view of the loaded chapter.
//!
//! `ChapterView` is a transient component (created each frame) that wraps
//! `&'a mut ChapterViewState` (persistent state) and the chapter content
//! (props). Verse heights depend on the terminal width, so they are cached in
//! a `VerseLayout` and rebuilt only when the chapter or the width changes.
//!
//! Scroll requests arrive as a `VerseKey` between frames. They are parked in
//! the state and resolved during the next render, once the layout for the
//! current width is known.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::scroll::{Highlight, VerseKey};
use crate::gateway::VerseContent;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows above the first verse: chapter heading and a blank line.
const HEADER_ROWS: u16 = 2;
/// Width reserved for the verse number column, e.g. `176 `.
const NUMBER_WIDTH: usize = 4;

/// Persistent scroll and layout state for the chapter view.
#[derive(Default)]
pub struct ChapterViewState {
    pub scroll_state: ScrollViewState,
    pub layout: VerseLayout,
    /// Verse to bring into view on the next render.
    pub pending_target: Option<VerseKey>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl ChapterViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for `key` to be scrolled into view on the next render.
    pub fn scroll_to(&mut self, key: VerseKey) {
        self.pending_target = Some(key);
    }

    /// Back to the top, for a freshly opened chapter.
    pub fn reset(&mut self) {
        self.scroll_state.set_offset(Position { x: 0, y: 0 });
    }

    /// Resolve a parked scroll target against `content`. Returns the row the
    /// view moved to, or `None` when the verse is not part of this chapter.
    fn apply_target(&mut self, book: &str, content: &VerseContent) -> Option<u16> {
        let key = self.pending_target.take()?;
        if key.book != book {
            return None;
        }
        let index = key.index_in(content)?;
        let row = self.layout.row_of(index)?;
        self.scroll_state.set_offset(Position { x: 0, y: row });
        Some(row)
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.layout.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Cached verse heights for one chapter at one width.
#[derive(Debug, Default)]
pub struct VerseLayout {
    pub heights: Vec<u16>,
    /// `prefix_heights[i]` is the sum of heights `0..=i`.
    pub prefix_heights: Vec<u16>,
    cached_for: Option<(String, u32, usize, u16)>,
}

impl VerseLayout {
    /// Rebuild the cache if `content` or `width` changed since the last call.
    pub fn update(&mut self, content: &VerseContent, width: u16) {
        let key = (
            content.book_name.clone(),
            content.chapter,
            content.verses.len(),
            width,
        );
        if self.cached_for.as_ref() == Some(&key) {
            return;
        }
        self.heights = content
            .verses
            .iter()
            .map(|v| wrap_verse(v.verse, &v.text, width).len() as u16)
            .collect();
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, h| {
                *acc = acc.saturating_add(*h);
                Some(*acc)
            })
            .collect();
        self.cached_for = Some(key);
    }

    /// Canvas height including the heading rows.
    pub fn total_height(&self) -> u16 {
        HEADER_ROWS.saturating_add(self.prefix_heights.last().copied().unwrap_or(0))
    }

    /// Canvas row where verse `index` starts.
    pub fn row_of(&self, index: usize) -> Option<u16> {
        if index >= self.heights.len() {
            return None;
        }
        let before = if index == 0 {
            0
        } else {
            self.prefix_heights[index - 1]
        };
        Some(HEADER_ROWS + before)
    }
}

/// Wrap a verse into display lines, number first, continuation lines indented
/// under the text.
fn wrap_verse(number: u32, text: &str, width: u16) -> Vec<String> {
    let width = (width as usize).max(NUMBER_WIDTH + 1);
    let indent = " ".repeat(NUMBER_WIDTH);
    let body = format!("{:<w$}{}", number, text, w = NUMBER_WIDTH);
    let options = textwrap::Options::new(width).subsequent_indent(&indent);
    let lines: Vec<String> = textwrap::wrap(&body, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if lines.is_empty() {
        vec![format!("{number}")]
    } else {
        lines
    }
}

/// Transient view over the loaded chapter.
pub struct ChapterView<'a> {
    pub state: &'a mut ChapterViewState,
    pub content: Option<&'a VerseContent>,
    /// Abbreviation of the book the content belongs to.
    pub book: &'a str,
    pub highlight: Option<&'a Highlight>,
    pub is_loading: bool,
}

impl<'a> ChapterView<'a> {
    pub fn new(
        state: &'a mut ChapterViewState,
        content: Option<&'a VerseContent>,
        book: &'a str,
        highlight: Option<&'a Highlight>,
        is_loading: bool,
    ) -> Self {
        Self {
            state,
            content,
            book,
            highlight,
            is_loading,
        }
    }

    fn highlighted_index(&self, content: &VerseContent) -> Option<usize> {
        let highlight = self.highlight?;
        if highlight.key.book != self.book {
            return None;
        }
        highlight.key.index_in(content)
    }
}

impl<'a> Component for ChapterView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(content) = self.content else {
            let text = if self.is_loading {
                "Loading..."
            } else {
                "Nothing loaded. Press b to pick a book or / to search."
            };
            let placeholder = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, area);
            return;
        };

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        self.state.layout.update(content, content_width);
        self.state.viewport_height = area.height;
        self.state.apply_target(self.book, content);
        self.state.clamp_scroll();

        let highlighted = self.highlighted_index(content);
        let total_height = self.state.layout.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let heading = Line::from(vec![
            Span::styled(
                format!("{} {}", content.book_name, content.chapter),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", content.translation_name),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        scroll_view.render_widget(
            Paragraph::new(heading),
            Rect::new(0, 0, content_width, 1),
        );

        for (i, verse) in content.verses.iter().enumerate() {
            let (Some(row), Some(&height)) =
                (self.state.layout.row_of(i), self.state.layout.heights.get(i))
            else {
                continue;
            };
            let style = if highlighted == Some(i) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            let lines: Vec<Line> = wrap_verse(verse.verse, &verse.text, content_width)
                .into_iter()
                .enumerate()
                .map(|(n, line)| {
                    if n == 0 {
                        let (number, rest) = line.split_at(NUMBER_WIDTH.min(line.len()));
                        Line::from(vec![
                            Span::styled(number.to_string(), style.fg(Color::DarkGray)),
                            Span::styled(rest.to_string(), style),
                        ])
                    } else {
                        Line::from(Span::styled(line, style))
                    }
                })
                .collect();
            scroll_view.render_widget(
                Paragraph::new(lines),
                Rect::new(0, row, content_width, height),
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for ChapterViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
            }
            TuiEvent::Home => self.reset(),
            _ => {}
        }
        None
    }
}
