use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::labels::badge_label;
use crate::models::BadgeSet;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, badges: &BadgeSet) {
    let block = Block::default()
        .title(Span::styled(format!(" Badges ({}) ", badges.len()), theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let lines: Vec<Line> = if badges.is_empty() {
        vec![Line::from(Span::styled("  No badges yet", theme::dim()))]
    } else {
        // newest first
        let mut lines: Vec<Line> = badges
            .iter()
            .map(|b| Line::from(Span::styled(format!("  {}", badge_label(b)), theme::bold())))
            .collect();
        lines.reverse();
        lines
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
