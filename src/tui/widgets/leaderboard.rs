use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::leaderboard::RankEntry;
use crate::tui::theme;
use crate::utils::format::pad_display;

pub fn render(frame: &mut Frame, area: Rect, title: &str, entries: &[RankEntry]) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let items: Vec<ListItem> = entries
        .iter()
        .map(|e| {
            let medal = match e.rank {
                1 => "🥇",
                2 => "🥈",
                3 => "🥉",
                _ => "  ",
            };
            let name_style = if e.is_you {
                theme::accent().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("  {} {:>2}. ", medal, e.rank), theme::dim()),
                Span::styled(pad_display(&e.name, 16), name_style),
                Span::styled(format!("Lv {:<3}", e.level), theme::dim()),
                Span::styled(format!("{:>6} XP", e.xp), theme::green()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
