use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use time::OffsetDateTime;

use crate::paint::GATE_PROMPT;
use crate::refresh::RefreshStatus;
use crate::render::{ItemView, NO_HEADLINES, Page, SectionBody, relative_age};

use super::App;
use super::view::{centered, render_chrome};

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let page = app.desk.page();
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(header_lines(app, &page)), chunks[0]);

    let filter_title = Line::from(Span::styled("Filter", Style::default().fg(Color::Yellow)));
    let filter_inner = render_chrome(frame, filter_title, chunks[1]);
    frame.render_widget(Paragraph::new(app.filter.buf.as_str()), filter_inner);

    let body_title = Line::from(vec![
        Span::styled("Headlines", Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(app.source_label().to_string(), Style::default().fg(Color::Gray)),
    ]);
    let body_inner = render_chrome(frame, body_title, chunks[2]);
    if !page.gate.visible {
        frame.render_widget(
            Paragraph::new(digest_lines(&page))
                .wrap(Wrap { trim: false })
                .scroll((app.scroll, 0)),
            body_inner,
        );
    }

    let hints = if page.gate.visible {
        "enter: unlock  ctrl-r: refresh  esc: quit"
    } else {
        "type to filter  ctrl-s: summaries  ctrl-r: refresh  up/down: scroll  esc: clear/quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))),
        chunks[3],
    );

    if page.gate.visible {
        draw_gate(frame, app, &page);
    }
}

fn header_lines(app: &App, page: &Page) -> Vec<Line<'static>> {
    let status_color = match app.desk.status() {
        RefreshStatus::Updated => Color::Green,
        RefreshStatus::Loading => Color::Yellow,
        RefreshStatus::Failed(_) => Color::Red,
        RefreshStatus::Idle => Color::Gray,
    };

    let mut updated = page.updated.clone();
    let generated_at = app.desk.snapshot().and_then(|s| s.generated_at.as_deref());
    if let Some(age) = relative_age(generated_at, OffsetDateTime::now_utc()) {
        updated.push_str(&format!(" ({})", age));
    }

    let mut first = vec![
        Span::styled("Newsdesk", Style::default().fg(Color::Black).bg(Color::White)),
        Span::raw("  "),
        Span::styled(page.status.clone(), Style::default().fg(status_color)),
    ];
    if let RefreshStatus::Failed(err) = app.desk.status() {
        first.push(Span::raw("  "));
        first.push(Span::styled(err.to_string(), Style::default().fg(Color::DarkGray)));
    }

    let summaries = if app.desk.show_summaries() { "on" } else { "off" };
    let second = Line::from(vec![
        Span::raw(format!("items {}  sources {}", page.items, page.sources)),
        Span::raw(format!("  updated {}  next {}", updated, page.next_update)),
        Span::styled(
            format!("  summaries {}", summaries),
            Style::default().fg(Color::Gray),
        ),
    ]);

    vec![Line::from(first), second]
}

/// Body text for an unlocked page.
pub(super) fn digest_lines(page: &Page) -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    if let Some(highlights) = &page.digest.highlights {
        lines.push(Line::from(Span::styled(
            format!("{} ({})", highlights.title, highlights.total_matches),
            heading.fg(Color::Magenta),
        )));
        push_items(&mut lines, &highlights.items);
        lines.push(Line::default());
    }

    if let Some(placeholder) = page.digest.body.placeholder() {
        lines.push(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::Gray),
        )));
        return lines;
    }

    for section in page.digest.body.sections() {
        let mut spans = vec![
            Span::styled(section.heading.clone(), heading),
            Span::styled(
                format!("  {}", section.item_count),
                Style::default().fg(Color::Gray),
            ),
        ];
        if let Some(url) = &section.feed_url {
            spans.push(Span::styled(
                format!("  {}", url),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
        match &section.body {
            SectionBody::Empty => lines.push(Line::from(Span::styled(
                NO_HEADLINES,
                Style::default().fg(Color::Gray),
            ))),
            SectionBody::Items(items) => push_items(&mut lines, items),
        }
        lines.push(Line::default());
    }
    lines
}

fn push_items(lines: &mut Vec<Line<'static>>, items: &[ItemView]) {
    for item in items {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>3}. ", item.position),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(item.title.clone()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     {}", item.href),
            Style::default().fg(Color::Blue),
        )));
        if let Some(summary) = &item.summary {
            lines.push(Line::from(Span::styled(
                format!("     {}", summary),
                Style::default().fg(Color::Gray),
            )));
        }
    }
}

fn draw_gate(frame: &mut ratatui::Frame, app: &App, page: &Page) {
    let area = centered(frame.area(), 48, 7);
    frame.render_widget(Clear, area);
    let title = Line::from(Span::styled("Locked", Style::default().fg(Color::Yellow)));
    let inner = render_chrome(frame, title, area);

    let mut lines = vec![
        Line::from(GATE_PROMPT),
        Line::default(),
        Line::from(vec![Span::raw("Password: "), Span::raw(app.password.masked())]),
    ];
    if let Some(msg) = &page.gate.message {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
#[path = "../tests/tui_shell/render_tests.rs"]
mod tests;
