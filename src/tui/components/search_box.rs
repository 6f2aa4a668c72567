//! # SearchBox Component
//!
//! Single-line query input with live book suggestions underneath.
//!
//! The buffer and cursor are internal state. Suggestions are props refreshed
//! by the adapter from `search::book_suggestions` whenever the buffer
//! changes; Up/Down move through them and Enter submits the chosen name.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MAX_SUGGESTIONS: usize = 6;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// Enter pressed. Carries the highlighted suggestion or the raw query.
    Submit(String),
    ContentChanged,
    Dismiss,
}

#[derive(Default)]
pub struct SearchBox {
    pub buffer: String,
    /// Cursor as a byte offset into `buffer`.
    cursor: usize,
    /// Book names matching the buffer (Prop)
    pub suggestions: Vec<String>,
    pub selected: Option<usize>,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.suggestions.clear();
        self.selected = None;
    }

    pub fn set_suggestions(&mut self, names: Vec<String>) {
        self.suggestions = names;
        self.suggestions.truncate(MAX_SUGGESTIONS);
        self.selected = None;
    }

    /// Rows needed: the input line plus suggestions, inside a border.
    pub fn height(&self) -> u16 {
        3 + self.suggestions.len() as u16
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::Char(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let start = self.prev_boundary();
                self.buffer.replace_range(start..self.cursor, "");
                self.cursor = start;
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::CursorDown if !self.suggestions.is_empty() => {
                let last = self.suggestions.len() - 1;
                self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
                None
            }
            TuiEvent::CursorUp => {
                self.selected = self.selected.and_then(|i| i.checked_sub(1));
                None
            }
            TuiEvent::Submit => {
                let text = self
                    .selected
                    .and_then(|i| self.suggestions.get(i).cloned())
                    .unwrap_or_else(|| self.buffer.clone());
                Some(SearchEvent::Submit(text))
            }
            TuiEvent::Escape => Some(SearchEvent::Dismiss),
            _ => None,
        }
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Search: book name or verse text ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [input_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("/ ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.buffer.as_str()),
            ])),
            input_area,
        );
        let cursor_col = self.buffer[..self.cursor].chars().count() as u16 + 2;
        frame.set_cursor_position(Position {
            x: (input_area.x + cursor_col).min(input_area.right().saturating_sub(1)),
            y: input_area.y,
        });

        let lines: Vec<Line> = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if self.selected == Some(i) {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(Span::styled(format!("  {name}"), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);
    }
}
