use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{ChapterView, Picker, TitleBar};
use crate::tui::{Mode, TuiState};

const HELP: &str = "/ search  t translation  b book  c chapter  ←/→ page  r results  q quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};
    let [title_area, main_area, status_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TitleBar {
        translation_name: app.translation_name().to_string(),
        book_name: app.selection.book_name.clone(),
        chapter: app.selection.chapter,
        chapter_count: app.chapter_count,
        status_message: app.status_message.clone(),
        is_loading: app.is_loading(),
        spinner_frame: tui.spinner_frame,
    }
    .render(frame, title_area);

    let reading_area = if app.matches.is_empty() {
        main_area
    } else {
        let [reading, results] =
            Layout::horizontal([Min(0), Percentage(35)]).areas(main_area);
        draw_results(frame, results, app);
        reading
    };

    ChapterView::new(
        &mut tui.chapter_view,
        app.content.as_ref(),
        &app.selection.book,
        app.highlight.as_ref(),
        app.is_loading(),
    )
    .render(frame, reading_area);

    draw_status(frame, status_area, app);

    if tui.mode == Mode::Search {
        let height = tui.search.height().min(main_area.height);
        let area = Rect::new(main_area.x, main_area.y, main_area.width, height);
        tui.search.render(frame, area);
    }
    if let Some(picker) = tui.picker.as_mut() {
        Picker::new(picker).render(frame, main_area);
    }
}

/// Bottom line: the notice wins over an error, which wins over key help.
fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(message) = app.notice.message() {
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(error) = &app.error {
        Line::from(Span::styled(
            format!("Error: {error}"),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray)))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_results(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .matches
        .iter()
        .map(|m| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("{} {}:{}", m.book_name, m.chapter, m.verse),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(Span::styled(
                    m.text.clone(),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Results ({}) r to open ", app.matches.len())),
    );
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scanner::SearchMatch;
    use crate::test_support::{FixtureGateway, content, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn reading_app() -> App {
        let mut app = test_app(Arc::new(FixtureGateway::new(Vec::new())));
        app.selection.book = "GEN".into();
        app.selection.book_name = "Genesis".into();
        app.content = Some(content("Genesis", 1, &["In the beginning"]));
        app
    }

    #[test]
    fn test_draws_chapter_and_help() {
        let app = reading_app();
        let text = render(&app, &mut TuiState::new());
        assert!(text.contains("In the beginning"));
        assert!(text.contains("/ search"));
    }

    #[test]
    fn test_notice_takes_over_status_line() {
        let mut app = reading_app();
        app.error = Some("Failed to load verses".into());
        let text = render(&app, &mut TuiState::new());
        assert!(text.contains("Error: Failed to load verses"));

        app.notice.set("No book found for \"xyz\"");
        let text = render(&app, &mut TuiState::new());
        assert!(text.contains("No book found"));
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn test_results_pane_appears_with_matches() {
        let mut app = reading_app();
        app.matches = vec![SearchMatch {
            book: "GEN".into(),
            book_name: "Genesis".into(),
            chapter: 1,
            verse: 1,
            text: "In the beginning".into(),
        }];
        let text = render(&app, &mut TuiState::new());
        assert!(text.contains("Results (1)"));
        assert!(text.contains("Genesis 1:1"));
    }
}
