// Left panel: the group/session tree as a ratatui List.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Padding},
};

use crate::app::{App, Panel};
use crate::model::tree::{self, Cursor, FlatEntry};
use crate::tmux::session;
use crate::ui::{theme, truncate};

pub fn render_tree(frame: &mut Frame, area: Rect, app: &App, scroll_offset: usize) {
    let groups = &app.store.data.groups;
    let flat = tree::flatten(groups, &app.expanded);

    let mut items: Vec<ListItem> = Vec::new();
    if groups.is_empty() {
        items.push(ListItem::new(""));
        items.push(dim_row("  No groups yet."));
        items.push(dim_row("  Press 'g' to create one."));
    }
    for entry in &flat {
        match *entry {
            FlatEntry::Group { group_idx } => {
                items.push(group_row(app, group_idx));
            }
            FlatEntry::Session { group_idx, session_idx } => {
                items.push(session_row(app, group_idx, session_idx, area.width));
            }
        }
    }

    let tree_focused = app.panel == Panel::Tree;
    let tree_active = tree_focused && !app.mode.is_interact();

    let border_style = if tree_active {
        Style::default().fg(theme::ACCENT)
    } else {
        Style::default().fg(theme::BORDER_DIM)
    };
    let title_style = if tree_focused {
        Style::default().fg(theme::ACTIVE).bold()
    } else {
        Style::default().fg(theme::DIM).bold()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Line::from(Span::styled(" ☰ SESSIONS ", title_style)))
        .padding(Padding::horizontal(1));

    // Focused: white on indigo. Unfocused (or interact): violet text only.
    let highlight = if tree_active {
        Style::default().fg(Color::White).bg(theme::HIGHLIGHT_BG).bold()
    } else {
        Style::default().fg(theme::ACTIVE)
    };

    let mut list_state = ListState::default().with_offset(scroll_offset);
    if !flat.is_empty() {
        list_state.select(Some(tree::flat_index(&flat, app.cursor).min(flat.len() - 1)));
    }

    let list = List::new(items).block(block).highlight_style(highlight);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn dim_row(text: &str) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(theme::DIM),
    )))
}

fn group_row(app: &App, gi: usize) -> ListItem<'static> {
    let group = &app.store.data.groups[gi];
    let caret = if app.expanded.get(gi).copied().unwrap_or(true) { "▾" } else { "▸" };
    let selected = app.cursor == Cursor::group(gi);
    let gutter = if selected { " ›" } else { "  " };

    let mut spans = vec![
        Span::raw(gutter.to_string()),
        Span::styled(format!(" {}.{} ", gi + 1, caret), Style::default().fg(theme::TEXT)),
        Span::styled(group.name.clone(), Style::default().fg(theme::BRIGHT).bold()),
        Span::styled(
            format!(" ({})", group.sessions.len()),
            Style::default().fg(theme::DIM),
        ),
    ];
    let active = app.active_count_for_group(gi);
    if active > 0 {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("● {}", active),
            Style::default().fg(theme::SUCCESS).bold(),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn session_row(app: &App, gi: usize, si: usize, panel_width: u16) -> ListItem<'static> {
    let group = &app.store.data.groups[gi];
    let sess = &group.sessions[si];
    let connector = if si + 1 == group.sessions.len() { "└─" } else { "├─" };
    let ident = session::session_ident(&group.name, &sess.name);
    let selected = app.cursor == Cursor::session(gi, si);

    let (dot, dot_style) = if selected {
        ("●", Style::default().fg(theme::SUCCESS).bold())
    } else if app.live.contains(&ident) {
        ("●", Style::default().fg(theme::DIM))
    } else {
        ("×", Style::default().fg(theme::DANGER))
    };
    let name = truncate(&sess.name, (panel_width as usize).saturating_sub(16));

    ListItem::new(Line::from(vec![
        Span::raw("   "),
        Span::styled(connector, Style::default().fg(theme::BORDER)),
        Span::raw(" "),
        Span::styled(dot, dot_style),
        Span::raw(" "),
        Span::styled(name, Style::default().fg(theme::SESSION_FG)),
        Span::styled(" claude", Style::default().fg(theme::DIM).italic()),
    ]))
}

/// Compute scroll offset to keep the selected row visible.
pub fn compute_scroll(selected: usize, visible_height: usize, current_offset: usize) -> usize {
    if selected < current_offset {
        selected
    } else if selected >= current_offset + visible_height {
        selected.saturating_sub(visible_height - 1)
    } else {
        current_offset
    }
}

#[cfg(test)]
mod tests {
    use super::compute_scroll;

    #[test]
    fn scrolls_up_when_selection_moves_above_the_window() {
        assert_eq!(compute_scroll(2, 5, 4), 2);
    }

    #[test]
    fn scrolls_down_when_selection_moves_below_the_window() {
        assert_eq!(compute_scroll(9, 5, 0), 5);
    }

    #[test]
    fn keeps_offset_while_selection_stays_visible() {
        assert_eq!(compute_scroll(4, 5, 2), 2);
    }
}
