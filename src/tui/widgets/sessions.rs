use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::labels::session_label;
use crate::models::Session;
use crate::tui::theme;
use crate::utils::format::format_minutes;

pub fn render(frame: &mut Frame, area: Rect, sessions: &[&Session], selected: usize, focused: bool) {
    let block = Block::default()
        .title(Span::styled(" Recent sessions ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    if sessions.is_empty() {
        let empty = List::new(vec![ListItem::new(Line::from(Span::styled(
            "  Nothing yet. Press [n] to log your first session",
            theme::dim(),
        )))])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = sessions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let name_style = if focused && i == selected {
                theme::accent().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };
            let mut spans = vec![
                Span::styled(format!("  {}  ", s.activity_date().format("%d/%m")), theme::dim()),
                Span::styled(format!("{:<20}", session_label(s.kind)), name_style),
                Span::styled(format!("{:>7}", format_minutes(s.duration_min)), theme::dim()),
                Span::styled(format!("  +{} XP", s.xp), theme::green()),
            ];
            if s.has_partner() {
                spans.push(Span::styled("  👥", theme::dim()));
            }
            if s.photo.is_some() {
                spans.push(Span::styled("  📷", theme::dim()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
