//! # Picker Component
//!
//! Centered overlay list used for translations, books, chapters and search
//! results. The adapter maps a `PickerEvent::Select(index)` back to whatever
//! the list was built from.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PickerState` lives in `TuiState`
//! - `Picker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

const PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub label: String,
    pub detail: Option<String>,
    /// The entry currently in use (marked with `*`).
    pub active: bool,
}

impl PickerItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
            active: false,
        }
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// Persistent state for a picker overlay.
pub struct PickerState {
    pub title: String,
    pub items: Vec<PickerItem>,
    pub selected: usize,
    pub list_state: ListState,
}

impl PickerState {
    /// Opens with the cursor on the active item, or the first one.
    pub fn new(title: impl Into<String>, items: Vec<PickerItem>) -> Self {
        let selected = items.iter().position(|i| i.active).unwrap_or(0);
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            title: title.into(),
            items,
            selected,
            list_state,
        }
    }

    fn move_to(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = index.min(self.items.len() - 1);
        self.list_state.select(Some(self.selected));
    }
}

/// Events emitted by a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    Select(usize),
    Dismiss,
}

impl EventHandler for PickerState {
    type Event = PickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.move_to(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.move_to(self.selected + 1);
                None
            }
            TuiEvent::PageUp => {
                self.move_to(self.selected.saturating_sub(PAGE));
                None
            }
            TuiEvent::PageDown => {
                self.move_to(self.selected + PAGE);
                None
            }
            TuiEvent::Home => {
                self.move_to(0);
                None
            }
            TuiEvent::End => {
                self.move_to(usize::MAX);
                None
            }
            TuiEvent::Submit if !self.items.is_empty() => Some(PickerEvent::Select(self.selected)),
            _ => None,
        }
    }
}

/// Transient render wrapper for a picker overlay.
pub struct Picker<'a> {
    state: &'a mut PickerState,
}

impl<'a> Picker<'a> {
    pub fn new(state: &'a mut PickerState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 70, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.state.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.state.items.is_empty() {
            let empty = Paragraph::new("Nothing to choose from yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let inner_width = overlay.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if item.active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let marker = if item.active { " *" } else { "" };
                let mut spans = vec![Span::styled(
                    truncate_str(&item.label, inner_width.saturating_sub(marker.len())),
                    style,
                )];
                if let Some(detail) = &item.detail {
                    let room = inner_width.saturating_sub(item.label.chars().count() + marker.len() + 2);
                    if room > 3 {
                        spans.push(Span::styled(
                            format!("  {}", truncate_str(detail, room)),
                            if i == self.state.selected {
                                style
                            } else {
                                Style::default().fg(Color::DarkGray)
                            },
                        ));
                    }
                }
                spans.push(Span::styled(marker, style));
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
