// Layout orchestration

pub mod confirm;
pub mod dialog;
pub mod input;
pub mod preview;
pub mod theme;
pub mod tree;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, DialogKind, Mode, Notice};

/// Center a popup of given size within `area`.
pub fn popup_center(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Truncate to at most `max` chars, ending with an ellipsis when cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, rows[0]);

    let left_width = (area.width / 3).clamp(30, 50);
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(left_width), Constraint::Min(0)])
        .split(rows[1]);

    let flat = crate::model::tree::flatten(&app.store.data.groups, &app.expanded);
    let selected = crate::model::tree::flat_index(&flat, app.cursor);
    let visible = (panels[0].height.saturating_sub(2) as usize).max(1);
    app.tree_scroll = tree::compute_scroll(selected, visible, app.tree_scroll);

    tree::render_tree(frame, panels[0], app, app.tree_scroll);
    preview::render_preview(frame, panels[1], app);
    render_footer(frame, rows[2], app);

    match &app.mode {
        Mode::Dialog(state) => match state.kind {
            DialogKind::ConfirmDelete(target) => {
                let (kind, name) = app.describe_target(target);
                confirm::render_confirm(frame, area, kind, &name);
            }
            _ => dialog::render_dialog(frame, area, state),
        },
        Mode::Help => render_help(frame, area),
        Mode::Normal | Mode::Interact => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(" ◆  Claude Session Manager")
        .style(Style::default().fg(Color::White).bg(theme::ACCENT).bold());
    frame.render_widget(header, area);
}

fn mode_label(mode: &Mode) -> &'static str {
    match mode {
        Mode::Normal => "NORMAL",
        Mode::Dialog(_) => "DIALOG",
        Mode::Interact => "INTERACT",
        Mode::Help => "HELP",
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let badge = format!(" [{}] ", mode_label(&app.mode));
    let badge_style = Style::default().fg(Color::Black).bg(theme::WARNING).bold();

    let (hints, hint_style) = if app.mode.is_interact() {
        (
            " ⚡ LIVE MODE  All keys → Claude  │  Ctrl+Q exit",
            Style::default().fg(theme::WARNING).bold(),
        )
    } else {
        (
            " ↑↓ Navigate  Tab Switch Panel  ↵ Expand/Attach  i Interact  n New  g Group  d Del  r Rename  q Quit",
            Style::default().fg(theme::DIM),
        )
    };

    let mut used = badge.chars().count() + hints.chars().count();
    let mut spans = vec![
        Span::styled(badge, badge_style),
        Span::styled(hints, hint_style),
    ];

    match &app.notice {
        Some(Notice::Error(msg)) => {
            let text = format!("  ✗ {}", msg);
            used += text.chars().count();
            spans.push(Span::styled(text, Style::default().fg(theme::DANGER).bold()));
        }
        Some(Notice::Info(msg)) => {
            let text = format!("  • {}", msg);
            used += text.chars().count();
            spans.push(Span::styled(text, Style::default().fg(theme::DIM)));
        }
        None => {}
    }

    let ver = concat!(" v", env!("CARGO_PKG_VERSION"), " ");
    let pad = (area.width as usize).saturating_sub(used + ver.len());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(ver, Style::default().fg(theme::DIM)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    const ENTRIES: &[&str] = &[
        " Navigation",
        "  ↑/k ↓/j      Move through groups and sessions",
        "  Tab           Switch panel focus",
        "  Enter         Group: expand/collapse  |  Session: preview/attach",
        "",
        " Groups",
        "  g             New group",
        "  r             Rename group (cursor on header)",
        "  d             Delete group and all its sessions",
        "",
        " Sessions",
        "  n             New session in the selected group",
        "  Enter         Attach full-screen (tmux takes the terminal)",
        "  i             Interact in place (keys forward to the session)",
        "  r             Rename session",
        "  d             Delete session",
        "",
        " Interact",
        "  Ctrl+Q        Leave interact mode",
        "",
        " Global",
        "  ?             This help (Esc closes)",
        "  q / Ctrl+C    Quit",
    ];

    let width = area.width.min(64).max(40);
    let height = ((ENTRIES.len() as u16) + 2).min(area.height);
    let popup = popup_center(area, width, height);

    frame.render_widget(Clear, popup);

    let lines: Vec<Line> = ENTRIES.iter().map(|e| Line::from(*e)).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(theme::ACCENT));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate("api", 10), "api");
        assert_eq!(truncate("api", 3), "api");
    }

    #[test]
    fn truncate_cuts_to_max_chars_with_ellipsis() {
        assert_eq!(truncate("api-refactor", 8), "api-ref…");
        assert_eq!(truncate("api-refactor", 8).chars().count(), 8);
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("héllo-wörld", 6), "héllo…");
    }

    #[test]
    fn truncate_handles_zero_width() {
        assert_eq!(truncate("api", 0), "");
    }
}
