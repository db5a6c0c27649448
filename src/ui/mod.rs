mod popup;
mod repo_list;
mod repo_view;

use chrono::{DateTime, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::ConfirmAction;
use crate::app::{App, NotificationKind, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match &app.screen {
        Screen::List(list) => repo_list::render(frame, list, chunks[1]),
        Screen::Detail(detail) => repo_view::render(frame, detail, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);

    if let Some(ConfirmAction::DeleteBookmark(name)) = &app.confirm {
        popup::render_confirm(frame, "Delete bookmark", &format!("Remove {}?", name));
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match &app.screen {
        Screen::List(_) => "repofav - Favorite repositories".to_string(),
        Screen::Detail(detail) => format!("repofav - {}", detail.full_name),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(app.route().path(), Style::default().fg(Color::Gray)),
    ]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let loading = match &app.screen {
        Screen::List(list) => list.is_submitting(),
        Screen::Detail(detail) => !detail.is_loaded() || detail.fetching,
    };

    let status = if let Some(notification) = &app.notification {
        let color = match notification.kind {
            NotificationKind::Info => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        Line::from(vec![Span::styled(
            notification.message.clone(),
            Style::default().fg(color),
        )])
    } else if loading {
        Line::from(vec![Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )])
    } else {
        let help = match &app.screen {
            Screen::List(list) if list.editing => "Enter: add | Esc: stop typing",
            Screen::List(_) => {
                "a: add | j/k/g/G: nav | Enter: issues | d: delete | o: open | y: yank | q: quit"
            }
            Screen::Detail(_) => {
                "1/2/3 or Tab: filter | h/l: page | j/k: nav | o: open | y: yank | r: reload | q: back"
            }
        };
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

/// Shorten to `max` characters, ending in "..." when cut
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

fn format_age(dt: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(dt);

    if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        "now".to_string()
    }
}
