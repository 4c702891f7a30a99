// Input dialogs: new group, new session, rename.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{DialogKind, DialogState};
use crate::ops::Target;
use crate::ui::{popup_center, theme};

pub fn render_dialog(frame: &mut Frame, area: Rect, dialog: &DialogState) {
    let title = match dialog.kind {
        DialogKind::NewGroup => " ✦ New Group ",
        DialogKind::NewSession => " ✦ New Session ",
        DialogKind::Rename(Target::Group(_)) => " ✎ Rename group ",
        DialogKind::Rename(Target::Session(..)) => " ✎ Rename session ",
        // delete confirmation renders through `confirm`
        DialogKind::ConfirmDelete(_) => return,
    };

    let fields = &dialog.fields;
    let hint = if fields.len() > 1 {
        "tab next field  ↵ confirm  esc cancel"
    } else {
        "↵ confirm  esc cancel"
    };

    // label + value per field, a blank between fields, a blank + hint below
    let inner_h = (fields.len() * 3 + 1) as u16;
    let popup = popup_center(area, 55, inner_h + 2);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme::ACCENT));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let label_style = if i == dialog.focus {
            Style::default().fg(theme::ACTIVE).bold()
        } else {
            Style::default().fg(theme::TEXT)
        };
        lines.push(Line::from(Span::styled(field.label.clone(), label_style)));
        if field.buffer.is_empty() && !field.placeholder.is_empty() {
            lines.push(Line::from(Span::styled(
                field.placeholder.clone(),
                Style::default().fg(theme::DIM).italic(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                field.buffer.clone(),
                Style::default().fg(theme::INPUT_FG),
            )));
        }
        if i + 1 < fields.len() {
            lines.push(Line::default());
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(hint, Style::default().fg(theme::DIM))));

    frame.render_widget(Paragraph::new(lines), inner);

    // terminal cursor on the focused value row
    if let Some(field) = fields.get(dialog.focus) {
        let cursor_y = inner.y + (dialog.focus * 3 + 1) as u16;
        let cursor_x = inner.x + field.display_cursor() as u16;
        if cursor_y < inner.y + inner.height {
            frame.set_cursor_position((
                cursor_x.min(inner.x + inner.width.saturating_sub(1)),
                cursor_y,
            ));
        }
    }
}
