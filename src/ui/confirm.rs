// Delete confirmation overlay.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::{popup_center, theme};

/// `kind` is "group" or "session"; `name` is what would be deleted.
pub fn render_confirm(frame: &mut Frame, area: Rect, kind: &str, name: &str) {
    let popup = popup_center(area, 55, 5);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ⚠ Confirm Delete ")
        .border_style(Style::default().fg(theme::DANGER));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let message = Line::from(vec![
        Span::styled(format!("Delete {} ", kind), Style::default().fg(theme::TEXT)),
        Span::styled(format!("'{}'", name), Style::default().fg(theme::BRIGHT).bold()),
        Span::styled(" ?", Style::default().fg(theme::TEXT)),
    ]);
    let hint = Line::from(Span::styled("y yes  n/esc no", Style::default().fg(theme::DIM)));

    let body = Paragraph::new(vec![message, Line::default(), hint]);
    frame.render_widget(body, inner);
}
