use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::AppConfig;
use crate::labels::play_level_label;
use crate::models::PlayLevel;
use crate::tracker::ProfileInput;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::LocalTracker;

// ─── Wizard steps ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Welcome,
    Name,
    Level,
    Frequency,
    Club,
    Demo,
    Confirm,
}

// ─── Wizard state ─────────────────────────────────────────────────────────────

struct SetupWizard {
    step: Step,
    input: String,
    error: Option<String>,

    name: String,
    level_idx: usize,
    weekly_target: u32,
    club: String,
    demo: bool,

    should_quit: bool,
    confirmed: bool,
}

impl SetupWizard {
    fn new(config: &AppConfig, demo: bool) -> Self {
        Self {
            step: Step::Welcome,
            input: String::new(),
            error: None,

            name: String::new(),
            level_idx: 0,
            weekly_target: config.profile.default_weekly_target.max(1),
            club: config.profile.default_club.clone(),
            demo,

            should_quit: false,
            confirmed: false,
        }
    }

    fn step_number(&self) -> usize {
        match self.step {
            Step::Welcome => 0,
            Step::Name => 1,
            Step::Level => 2,
            Step::Frequency => 3,
            Step::Club => 4,
            Step::Demo => 5,
            Step::Confirm => 6,
        }
    }

    const TOTAL_STEPS: usize = 6;

    fn level(&self) -> PlayLevel {
        PlayLevel::all()[self.level_idx]
    }

    fn prefill(&mut self) {
        self.input = match self.step {
            Step::Name => self.name.clone(),
            Step::Frequency => self.weekly_target.to_string(),
            Step::Club => self.club.clone(),
            _ => String::new(),
        };
    }

    fn advance(&mut self) {
        self.error = None;
        self.step = match self.step {
            Step::Welcome => Step::Name,
            Step::Name => Step::Level,
            Step::Level => Step::Frequency,
            Step::Frequency => Step::Club,
            Step::Club => Step::Demo,
            Step::Demo => Step::Confirm,
            Step::Confirm => {
                self.confirmed = true;
                Step::Confirm
            }
        };
        self.prefill();
    }

    fn go_back(&mut self) {
        self.error = None;
        self.step = match self.step {
            Step::Welcome => {
                self.should_quit = true;
                Step::Welcome
            }
            Step::Name => Step::Welcome,
            Step::Level => Step::Name,
            Step::Frequency => Step::Level,
            Step::Club => Step::Frequency,
            Step::Demo => Step::Club,
            Step::Confirm => Step::Demo,
        };
        self.prefill();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.step {
            Step::Welcome => {
                if key.code == KeyCode::Esc {
                    self.should_quit = true;
                } else {
                    self.advance();
                }
            }

            Step::Name => self.handle_text_input(key, |s| {
                if s.is_empty() {
                    Err("Please enter a name".to_string())
                } else {
                    Ok(())
                }
            }),

            Step::Level => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.level_idx = self.level_idx.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.level_idx + 1 < PlayLevel::all().len() {
                        self.level_idx += 1;
                    }
                }
                KeyCode::Char(c @ '1'..='3') => {
                    self.level_idx = c as usize - '1' as usize;
                }
                KeyCode::Enter => self.advance(),
                KeyCode::Esc => self.go_back(),
                _ => {}
            },

            Step::Frequency => self.handle_text_input(key, |s| match s.parse::<u32>() {
                Ok(n) if n >= 1 => Ok(()),
                _ => Err("Enter a whole number of sessions, at least 1".to_string()),
            }),

            Step::Club => self.handle_text_input(key, |_| Ok(())),

            Step::Demo => match key.code {
                KeyCode::Left | KeyCode::Char('1') | KeyCode::Char('h') => self.demo = false,
                KeyCode::Right | KeyCode::Char('2') | KeyCode::Char('l') => self.demo = true,
                KeyCode::Enter => self.advance(),
                KeyCode::Esc => self.go_back(),
                _ => {}
            },

            Step::Confirm => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    self.confirmed = true;
                }
                KeyCode::Esc | KeyCode::Char('n') => self.go_back(),
                _ => {}
            },
        }
    }

    fn handle_text_input<F>(&mut self, key: KeyEvent, validate: F)
    where
        F: Fn(&str) -> std::result::Result<(), String>,
    {
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => {
                let val = self.input.trim().to_string();
                match validate(&val) {
                    Ok(()) => {
                        self.commit_text_input(&val);
                        self.advance();
                    }
                    Err(e) => self.error = Some(e),
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.error = None;
            }
            _ => {}
        }
    }

    fn commit_text_input(&mut self, val: &str) {
        match self.step {
            Step::Name => self.name = val.to_string(),
            Step::Frequency => {
                if let Ok(n) = val.parse() {
                    self.weekly_target = n;
                }
            }
            Step::Club => self.club = val.to_string(),
            _ => {}
        }
    }

    fn profile_input(&self) -> ProfileInput {
        ProfileInput {
            name: self.name.clone(),
            level: self.level(),
            weekly_target: self.weekly_target,
            club: self.club.clone(),
            avatar: None,
        }
    }
}

// ─── Rendering ────────────────────────────────────────────────────────────────

fn draw(frame: &mut Frame, wizard: &SetupWizard) {
    let area = frame.area();
    frame.render_widget(Block::default().style(theme::base()), area);

    let vchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(24),
            Constraint::Min(0),
        ])
        .split(area);
    let hchunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(64),
            Constraint::Min(0),
        ])
        .split(vchunks[1]);

    let box_area = hchunks[1];
    frame.render_widget(Clear, box_area);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent())
        .style(theme::surface())
        .title(Span::styled(
            "  🏸 volant  ·  New player  ",
            theme::accent().add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    frame.render_widget(outer_block, box_area);

    let inner = Rect {
        x: box_area.x + 2,
        y: box_area.y + 1,
        width: box_area.width.saturating_sub(4),
        height: box_area.height.saturating_sub(2),
    };

    match wizard.step {
        Step::Welcome => draw_welcome(frame, inner),
        Step::Level => {
            let options: Vec<&str> = PlayLevel::all().iter().map(|l| play_level_label(*l)).collect();
            draw_choice(
                frame,
                inner,
                "Your level",
                "Where do you start from?",
                &options,
                wizard.level_idx,
                "↑↓  or  1 2 3  choose   ·   Enter  confirm   ·   Esc  back",
            )
        }
        Step::Demo => draw_choice(
            frame,
            inner,
            "Demo progress",
            "Start with a few sample sessions to explore the dashboard?",
            &["Start fresh", "Load demo sessions"],
            usize::from(wizard.demo),
            "←→  or  1 2  choose   ·   Enter  confirm   ·   Esc  back",
        ),
        Step::Confirm => draw_confirm(frame, inner, wizard),
        _ => draw_text_step(frame, inner, wizard),
    }

    draw_progress(frame, inner, wizard.step_number(), SetupWizard::TOTAL_STEPS);
}

fn draw_progress(frame: &mut Frame, area: Rect, current: usize, total: usize) {
    let mut spans = vec![Span::styled("  ", theme::dim())];
    for i in 1..=total {
        let (dot, style) = if i < current {
            ("● ", theme::green())
        } else if i == current {
            ("◉ ", theme::accent())
        } else {
            ("○ ", theme::dim())
        };
        spans.push(Span::styled(dot, style));
    }
    let progress_area = Rect { height: 1, ..area };
    frame.render_widget(Paragraph::new(Line::from(spans)), progress_area);
}

fn content_area(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + 2,
        width: area.width,
        height: area.height.saturating_sub(2),
    }
}

fn draw_welcome(frame: &mut Frame, area: Rect) {
    let bullet = |text: &'static str| {
        Line::from(vec![
            Span::styled("  ●  ", theme::accent()),
            Span::styled(text, theme::dim()),
        ])
    };
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to volant",
            theme::bold().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Log your badminton sessions, earn XP and level up.",
            theme::dim(),
        )),
        Line::from(""),
        Line::from(""),
        bullet("XP per skill for every session"),
        bullet("Badges for milestones"),
        bullet("Three fresh challenges every week"),
        Line::from(""),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press  Enter  to begin  ·  Esc  to cancel",
            theme::dim(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content_area(area),
    );
}

fn draw_text_step(frame: &mut Frame, area: Rect, wizard: &SetupWizard) {
    let (title, subtitle, hint) = match wizard.step {
        Step::Name => (
            "Player name",
            "How should we call you?",
            "Shown on the leaderboard",
        ),
        Step::Frequency => (
            "Weekly goal",
            "How many sessions do you aim for each week?",
            "Sets the target of your weekly session challenge",
        ),
        Step::Club => ("Club", "Which club do you play for?", "Leave empty if none"),
        _ => ("", "", ""),
    };

    let cursor = if wizard.input.chars().count() < 40 { "█" } else { "" };
    let input_style = if wizard.error.is_some() {
        theme::red()
    } else {
        theme::amber()
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(title, theme::accent().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(subtitle, theme::dim())),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}{}  ", wizard.input, cursor),
            input_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    match &wizard.error {
        Some(err) => lines.push(Line::from(Span::styled(format!("  ✗  {}", err), theme::red()))),
        None => lines.push(Line::from(Span::styled(hint, theme::dim()))),
    }
    lines.extend([
        Line::from(""),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("Enter  confirm   ·   Esc  back", theme::dim())),
    ]);

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content_area(area),
    );
}

fn draw_choice(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    subtitle: &str,
    options: &[&str],
    selected: usize,
    footer: &str,
) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, theme::accent().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(subtitle, theme::dim())),
        Line::from(""),
        Line::from(""),
    ];
    for (i, opt) in options.iter().enumerate() {
        if i == selected {
            lines.push(Line::from(vec![
                Span::styled("  ◉  ", theme::accent()),
                Span::styled(*opt, theme::accent().add_modifier(Modifier::BOLD)),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled("  ○  ", theme::dim()),
                Span::styled(*opt, theme::dim()),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(footer, theme::dim())));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content_area(area),
    );
}

fn draw_confirm(frame: &mut Frame, area: Rect, wizard: &SetupWizard) {
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, theme::dim()),
            Span::styled(value, theme::bold()),
        ])
    };
    let club = if wizard.club.is_empty() {
        "none".to_string()
    } else {
        wizard.club.clone()
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Ready to play",
            theme::accent().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Review your profile:", theme::dim())),
        Line::from(""),
        row("  Name         ", wizard.name.clone()),
        row("  Level        ", play_level_label(wizard.level()).to_string()),
        row("  Weekly goal  ", format!("{} sessions", wizard.weekly_target)),
        row("  Club         ", club),
        row(
            "  Demo         ",
            if wizard.demo { "yes" } else { "no" }.to_string(),
        ),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Enter  create profile   ·   Esc  go back",
            theme::dim(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content_area(area),
    );
}

// ─── Public entry point ──────────────────────────────────────────────────────

/// Runs the onboarding wizard and creates the profile on confirm.
/// Returns without changes when the player cancels.
pub fn run_setup_tui(tracker: &mut LocalTracker, config: &AppConfig, demo: bool) -> Result<()> {
    let mut wizard = SetupWizard::new(config, demo);
    let mut terminal = ratatui::init();
    let events = EventHandler::new(100);

    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| draw(frame, &wizard)) {
            break Err(e.into());
        }
        match events.next() {
            Ok(Event::Key(key)) => {
                wizard.handle_key(key);
                if wizard.should_quit {
                    break Ok(None);
                }
                if wizard.confirmed {
                    break Ok(Some((wizard.profile_input(), wizard.demo)));
                }
            }
            Ok(Event::Tick | Event::Resize) => {}
            Err(e) => break Err(anyhow::Error::from(e)),
        }
    };

    ratatui::restore();

    match outcome? {
        Some((input, demo)) => tracker.onboard(input, demo)?,
        None => println!("Setup cancelled."),
    }
    Ok(())
}
