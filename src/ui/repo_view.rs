use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs};
use ratatui::Frame;

use crate::screen::DetailScreen;
use crate::types::{Issue, IssueFilter, IssueState, RepoDetail};

use super::{format_age, truncate};

pub fn render(frame: &mut Frame, detail: &DetailScreen, area: Rect) {
    let Some(repo) = detail.repo() else {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", detail.full_name));
        let loading = Paragraph::new("Loading... (r: retry, q: back)")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(loading, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_repo_header(frame, repo, chunks[0]);
    render_filters(frame, detail, chunks[1]);
    render_issues(frame, detail, chunks[2]);
    render_pagination(frame, detail, chunks[3]);
}

fn render_repo_header(frame: &mut Frame, repo: &RepoDetail, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            repo.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            repo.description
                .as_deref()
                .unwrap_or("No description provided."),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled(
                format!("@{}", repo.owner.login),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  "),
            Span::styled(
                repo.owner.avatar_url.as_str(),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let header = Paragraph::new(lines).block(
        Block::default().borders(Borders::ALL).title(Span::styled(
            format!(" {} ", repo.full_name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    );

    frame.render_widget(header, area);
}

fn render_filters(frame: &mut Frame, detail: &DetailScreen, area: Rect) {
    let titles: Vec<String> = IssueFilter::ALL
        .iter()
        .enumerate()
        .map(|(i, filter)| format!("[{}] {}", i + 1, filter))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" State "))
        .select(detail.query.filter.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_issues(frame: &mut Frame, detail: &DetailScreen, area: Rect) {
    let issues = detail.issues();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Issues ({}) ", issues.len()));

    if issues.is_empty() {
        let empty = Paragraph::new(format!(
            "No {} issues on this page",
            detail.query.filter.as_api_str()
        ))
        .block(block)
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = issues
        .iter()
        .enumerate()
        .map(|(i, issue)| issue_card(issue, i == detail.issue_index, w))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(detail.issue_index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Three-line card: title, labels, author
fn issue_card(issue: &Issue, selected: bool, width: usize) -> ListItem<'static> {
    let title_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let state_color = match issue.state {
        IssueState::Open => Color::Green,
        IssueState::Closed => Color::Red,
    };

    let mut title_line = vec![Span::styled(
        format!("#{:<6}", issue.number),
        Style::default().fg(Color::Cyan),
    )];
    if issue.is_pull_request() {
        title_line.push(Span::styled("PR ", Style::default().fg(Color::Magenta)));
    }
    title_line.push(Span::styled(
        truncate(&issue.title, width.saturating_sub(12).max(10)),
        title_style,
    ));

    let labels: Vec<Span> = if issue.labels.is_empty() {
        vec![Span::raw("")]
    } else {
        issue
            .labels
            .iter()
            .flat_map(|label| {
                [
                    Span::styled(
                        format!(" {} ", label.name),
                        Style::default().fg(Color::Black).bg(Color::Gray),
                    ),
                    Span::raw(" "),
                ]
            })
            .collect()
    };

    let author_line = Line::from(vec![
        Span::raw("        "),
        Span::styled(
            format!("@{}", issue.user.login),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{}", issue.state),
            Style::default().fg(state_color),
        ),
        Span::raw("  "),
        Span::styled(
            format_age(issue.created_at),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let mut label_line = vec![Span::raw("        ")];
    label_line.extend(labels);

    ListItem::new(vec![
        Line::from(title_line),
        Line::from(label_line),
        author_line,
    ])
}

fn render_pagination(frame: &mut Frame, detail: &DetailScreen, area: Rect) {
    let prev_style = if detail.query.has_previous() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled("‹ prev (h)", prev_style),
        Span::raw("    "),
        Span::styled(
            format!("Page {}", detail.query.page),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("(l) next ›", Style::default().fg(Color::Cyan)),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
