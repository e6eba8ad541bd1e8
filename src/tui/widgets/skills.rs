use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::engine::LevelInfo;
use crate::labels::skill_label;
use crate::models::Skill;
use crate::tui::theme;
use crate::utils::format::{pad_display, progress_bar};

pub fn render(frame: &mut Frame, area: Rect, rows: &[(Skill, u64, LevelInfo)]) {
    let block = Block::default()
        .title(Span::styled(" Skills ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let bar_width = (area.width as usize).saturating_sub(34).clamp(6, 20);
    let lines: Vec<Line> = rows
        .iter()
        .map(|(skill, xp, info)| {
            Line::from(vec![
                Span::styled(format!("  {}", pad_display(skill_label(*skill), 14)), theme::bold()),
                Span::styled(format!("Lv {:<3}", info.level), theme::dim()),
                Span::styled(
                    progress_bar(info.current_in_level, info.next_level_target, bar_width),
                    Style::default().fg(theme::skill_color(*skill)),
                ),
                Span::styled(format!("  {} XP", xp), theme::dim()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
