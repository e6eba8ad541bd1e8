use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::{WeekKey, WeeklyChallenge};
use crate::tui::theme;
use crate::utils::format::progress_bar;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    challenges: &[WeeklyChallenge],
    week: Option<WeekKey>,
    detailed: bool,
) {
    let title = match week {
        Some(w) => format!(" Challenges · {} ", w),
        None => " Challenges ".to_string(),
    };
    let block = Block::default()
        .title(Span::styled(title, theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(detailed))
        .style(theme::surface());

    let mut lines = Vec::new();
    for c in challenges {
        let (icon, style) = if c.completed {
            ("✓", theme::green())
        } else {
            ("○", theme::dim())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", icon), style),
            Span::styled(c.title.as_str(), theme::bold()),
        ]));
        if detailed {
            lines.push(Line::from(Span::styled(
                format!("    {}", c.description),
                theme::dim(),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled("    ", theme::dim()),
            Span::styled(
                progress_bar(c.progress as u64, c.target as u64, 12),
                if c.completed { theme::green() } else { theme::amber() },
            ),
            Span::styled(
                format!("  {}/{}  {}%", c.progress, c.target, c.progress_percent()),
                theme::dim(),
            ),
            Span::styled(
                format!("  +{} XP", c.reward_xp),
                theme::accent().add_modifier(Modifier::DIM),
            ),
        ]));
        if detailed {
            lines.push(Line::from(""));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
