use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::engine::LevelInfo;
use crate::models::{Player, WeekKey};
use crate::tui::theme;
use crate::utils::format::progress_bar;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    player: &Player,
    level: &LevelInfo,
    total_xp: u64,
    week: Option<WeekKey>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent().add_modifier(Modifier::BOLD))
        .style(theme::base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(0)])
        .split(inner);

    let big = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(theme::accent())
        .lines(vec![format!("Lv{}", level.level).into()])
        .build();
    frame.render_widget(big, columns[0]);

    let club = if player.club.is_empty() {
        "no club"
    } else {
        player.club.as_str()
    };
    let week_str = week.map(|w| w.to_string()).unwrap_or_default();

    let text = vec![
        Line::from(vec![
            Span::styled("🏸 ", theme::accent()),
            Span::styled(&player.name, theme::bold()),
            Span::styled(format!("  ·  {}", club), theme::dim()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                progress_bar(level.current_in_level, level.next_level_target, 24),
                theme::green(),
            ),
            Span::styled(
                format!(
                    "  {}/{} XP  {}%",
                    level.current_in_level, level.next_level_target, level.progress_percent
                ),
                theme::dim(),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("{} XP total", total_xp), theme::amber()),
            Span::styled(format!("  ·  week {}", week_str), theme::dim()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), columns[1]);
}
