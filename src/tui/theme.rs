use ratatui::style::{Color, Modifier, Style};

use crate::models::Skill;

// Court at night: deep green floor, white lines, shuttle yellow.
pub const BG: Color = Color::Rgb(12, 20, 17);
pub const SURFACE: Color = Color::Rgb(18, 30, 25);
pub const BORDER: Color = Color::Rgb(40, 62, 52);
pub const BORDER_FOCUS: Color = Color::Rgb(255, 210, 74);
pub const TEXT: Color = Color::Rgb(226, 236, 230);
pub const TEXT_DIM: Color = Color::Rgb(118, 140, 128);
pub const SHUTTLE: Color = Color::Rgb(255, 210, 74);
pub const GREEN: Color = Color::Rgb(96, 196, 128);
pub const AMBER: Color = Color::Rgb(232, 146, 64);
pub const RED: Color = Color::Rgb(214, 88, 76);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn accent() -> Style {
    Style::default().fg(SHUTTLE)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    Style::default().fg(if focused { BORDER_FOCUS } else { BORDER })
}

pub fn skill_color(skill: Skill) -> Color {
    match skill {
        Skill::Technique => Color::Rgb(110, 170, 240),
        Skill::Deplacements => Color::Rgb(96, 196, 128),
        Skill::Tactique => Color::Rgb(190, 140, 230),
        Skill::Physique => Color::Rgb(232, 146, 64),
        Skill::Matchs => SHUTTLE,
    }
}
