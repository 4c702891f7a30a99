// Right panel: session metadata plus the mirrored pane content.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use crate::app::{App, Panel};
use crate::ops;
use crate::store::{Group, Session};
use crate::tmux::session;
use crate::ui::{theme, truncate};

// name, path, age, tags, separator, Status:, Session:
const META_ROWS: usize = 7;

pub fn render_preview(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.mode.is_interact() {
        Style::default().fg(theme::WARNING)
    } else if app.panel == Panel::Preview {
        Style::default().fg(theme::ACCENT)
    } else {
        Style::default().fg(theme::BORDER_DIM)
    };

    let title = if app.mode.is_interact() {
        Line::from(vec![
            Span::styled(" ⚡ LIVE ", Style::default().fg(theme::WARNING).bold()),
            Span::styled(
                " INTERACTIVE ",
                Style::default().fg(Color::Black).bg(theme::WARNING).bold(),
            ),
        ])
    } else if app.panel == Panel::Preview {
        Line::from(Span::styled(" ◎ PREVIEW ", Style::default().fg(theme::ACTIVE).bold()))
    } else {
        Line::from(Span::styled(" ◎ PREVIEW ", Style::default().fg(theme::DIM).bold()))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(title)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = body_lines(app, inner.width as usize, inner.height as usize);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn body_lines(app: &App, width: usize, height: usize) -> Vec<Line<'static>> {
    let groups = &app.store.data.groups;
    let Some(group) = groups.get(app.cursor.group) else {
        return vec![Line::default(), dim_line("  No group selected")];
    };
    let Some(si) = app.cursor.session else {
        return group_summary(app, app.cursor.group, width);
    };
    let Some(sess) = group.sessions.get(si) else {
        return vec![Line::default(), dim_line("  No session selected")];
    };

    let ident = session::session_ident(&group.name, &sess.name);
    let is_running = app.live.contains(&ident);
    let mut lines = meta_header(app, sess, group, is_running, width);

    if !is_running {
        lines.push(Line::default());
        lines.push(dim_line("  ▶ Press Enter to launch tmux session"));
        lines.push(dim_line("    Then press i to interact in-place"));
        return lines;
    }

    lines.push(sep_line(width));

    if app.pane_content.is_empty() {
        lines.push(dim_line("  ⏳ Waiting for output..."));
        return lines;
    }

    // meta block + separator + a row reserved for the overflow marker
    let available = height.saturating_sub(META_ROWS + 2).max(3);
    let (hidden, tail) = clip_tail(&app.pane_content, available);
    if let Some(n) = hidden {
        lines.push(dim_line(format!("  ↑ {} more lines above", n)));
    }
    for raw in tail {
        lines.push(Line::from(Span::styled(
            truncate(raw, width),
            Style::default().fg(theme::TEXT),
        )));
    }
    lines
}

fn meta_header(
    app: &App,
    sess: &Session,
    group: &Group,
    is_running: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let badge = if app.mode.is_interact() {
        Span::styled("● interactive", Style::default().fg(theme::WARNING).bold())
    } else if is_running {
        Span::styled("● connected", Style::default().fg(theme::SUCCESS).bold())
    } else {
        Span::styled("○ stopped", Style::default().fg(theme::DANGER))
    };
    let name_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(sess.name.clone(), Style::default().fg(theme::BRIGHT).bold()),
        Span::raw("  "),
        badge,
    ]);

    let path_display = ops::expand_path(&sess.path).to_string_lossy().into_owned();
    let path_line = Line::from(vec![
        Span::styled("  📁 ", Style::default().fg(theme::DIM)),
        Span::styled(
            truncate(&path_display, width.saturating_sub(8)),
            Style::default().fg(theme::TEXT),
        ),
    ]);

    let age_line = Line::from(vec![
        Span::styled("  ⏰ ", Style::default().fg(theme::DIM)),
        Span::styled(
            relative_age(sess.created_at, Utc::now()),
            Style::default().fg(theme::TEXT),
        ),
    ]);

    let status_line = Line::from(vec![
        Span::styled("  Status:  ", Style::default().fg(theme::DIM)),
        if is_running {
            Span::styled("● Connected", Style::default().fg(theme::SUCCESS).bold())
        } else {
            Span::styled("○ Disconnected", Style::default().fg(theme::DANGER))
        },
    ]);
    let token_line = Line::from(vec![
        Span::styled("  Session: ", Style::default().fg(theme::DIM)),
        Span::styled(sess.resume_token.clone(), Style::default().fg(theme::TEXT)),
    ]);

    vec![
        name_line,
        path_line,
        age_line,
        tag_line(&group.name),
        sep_line(width),
        status_line,
        token_line,
    ]
}

fn group_summary(app: &App, gi: usize, width: usize) -> Vec<Line<'static>> {
    let group = &app.store.data.groups[gi];
    let active = app.active_count_for_group(gi);

    let badge = if active > 0 {
        Span::styled(
            format!("● {} active", active),
            Style::default().fg(theme::SUCCESS).bold(),
        )
    } else {
        Span::styled("○ idle", Style::default().fg(theme::DIM))
    };
    let name_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(group.name.clone(), Style::default().fg(theme::BRIGHT).bold()),
        Span::raw("  "),
        badge,
    ]);
    let count_line = Line::from(vec![
        Span::styled("  📦 ", Style::default().fg(theme::DIM)),
        Span::styled("Sessions ", Style::default().fg(theme::DIM)),
        Span::styled(
            format!("{} total", group.sessions.len()),
            Style::default().fg(theme::TEXT),
        ),
    ]);
    let created_line = Line::from(vec![
        Span::styled("  🕐 ", Style::default().fg(theme::DIM)),
        Span::styled("Created  ", Style::default().fg(theme::DIM)),
        Span::styled(
            group
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            Style::default().fg(theme::TEXT),
        ),
        Span::styled(
            format!("  ({})", relative_age(group.created_at, Utc::now())),
            Style::default().fg(theme::DIM),
        ),
    ]);

    let mut lines = vec![
        name_line,
        count_line,
        created_line,
        tag_line(&group.name),
        sep_line(width),
        Line::default(),
    ];
    if group.sessions.is_empty() {
        lines.push(dim_line("  No sessions yet."));
        lines.push(dim_line("  Press 'n' to add a session."));
    } else {
        lines.push(dim_line("  ↑↓ Navigate sessions • Enter: start • i: interact"));
        lines.push(dim_line("  n: add session • d: delete • r: rename"));
    }
    lines
}

fn tag_line(group_name: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(" claude ", Style::default().fg(Color::White).bg(theme::ACCENT).bold()),
        Span::raw(" "),
        Span::styled(
            format!(" {} ", group_name),
            Style::default().fg(Color::White).bg(theme::INFO),
        ),
    ])
}

fn sep_line(width: usize) -> Line<'static> {
    Line::from(Span::styled("─".repeat(width), Style::default().fg(theme::BORDER)))
}

fn dim_line(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(theme::DIM)))
}

/// Keep the last `available_rows` lines of `content`. Returns how many lines
/// were dropped (for the "more lines above" marker) and the kept tail.
/// Trailing newlines do not count as lines.
pub fn clip_tail(content: &str, available_rows: usize) -> (Option<usize>, Vec<&str>) {
    let lines: Vec<&str> = content.trim_end_matches('\n').split('\n').collect();
    if lines.len() > available_rows {
        let hidden = lines.len() - available_rows;
        (Some(hidden), lines[hidden..].to_vec())
    } else {
        (None, lines)
    }
}

/// Coarse "how long ago" for the metadata header.
pub fn relative_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created).num_seconds().max(0);
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3600 => match s / 60 {
            1 => "1 min ago".to_string(),
            m => format!("{} mins ago", m),
        },
        s if s < 86_400 => match s / 3600 {
            1 => "1 hour ago".to_string(),
            h => format!("{} hours ago", h),
        },
        s => match s / 86_400 {
            1 => "1 day ago".to_string(),
            d => format!("{} days ago", d),
        },
    }
}
