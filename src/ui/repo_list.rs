use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::screen::ListScreen;

use super::truncate;

pub fn render(frame: &mut Frame, list: &ListScreen, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_input(frame, list, chunks[0]);
    render_bookmarks(frame, list, chunks[1]);
}

fn render_input(frame: &mut Frame, list: &ListScreen, area: Rect) {
    let (title, border) = if list.is_submitting() {
        (" Adding... ", Style::default().fg(Color::DarkGray))
    } else if list.editing {
        (" Add repository ", Style::default().fg(Color::Yellow))
    } else {
        (" Add repository (a) ", Style::default().fg(Color::DarkGray))
    };

    let content = if list.input.is_empty() && !list.editing {
        Span::styled("owner/name", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(list.input.as_str())
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    frame.render_widget(input, area);

    if list.editing {
        let x = area.x + 1 + list.input.chars().count() as u16;
        frame.set_cursor_position(Position::new(
            x.min(area.right().saturating_sub(2)),
            area.y + 1,
        ));
    }
}

fn render_bookmarks(frame: &mut Frame, list: &ListScreen, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Bookmarks ({}) ", list.bookmarks.len()));

    if list.bookmarks.is_empty() {
        let empty = Paragraph::new("No repositories yet - press a to add one")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let fixed = 36; // marker(2) + name(32) + spaces(2)
    let flex = w.saturating_sub(fixed).max(10);

    let items: Vec<ListItem> = list
        .bookmarks
        .iter()
        .enumerate()
        .map(|(i, bookmark)| {
            let style = if i == list.index && !list.editing {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let line = Line::from(vec![
                Span::styled("✗ ", Style::default().fg(Color::Red)),
                Span::styled(format!("{:<32}", truncate(&bookmark.name, 32)), style),
                Span::raw("  "),
                Span::styled(
                    truncate(&bookmark.url, flex),
                    Style::default().fg(Color::Blue),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(list.index));

    frame.render_stateful_widget(list_widget, area, &mut state);
}
