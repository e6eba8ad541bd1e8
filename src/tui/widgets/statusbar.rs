use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, flash: Option<(&str, bool)>) {
    if let Some((message, is_error)) = flash {
        let style = if is_error { theme::red() } else { theme::green() };
        let paragraph = Paragraph::new(Line::from(Span::styled(message, style)))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let hints = [
        ("[n]", " log session  "),
        ("[c]", " challenges  "),
        ("[l]", " leaderboard  "),
        ("[↑↓]", " sessions  "),
        ("[?]", " help  "),
        ("[Esc]", " quit"),
    ];

    let mut spans = Vec::new();
    for (key, label) in &hints {
        spans.push(Span::styled(*key, theme::accent()));
        spans.push(Span::styled(*label, theme::dim()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
