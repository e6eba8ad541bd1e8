use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use std::path::Path;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::AppConfig;
use crate::labels::{badge_label, skill_label};
use crate::leaderboard::{club_board, rank_players};
use crate::media::load_media;
use crate::models::{SessionDraft, SessionKind, Skill};
use crate::ports::{Clock, IdSource, StateStore};
use crate::tracker::{SessionReceipt, Tracker};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{badges, challenges, header, leaderboard, sessions, skills, statusbar};

const RECENT_ON_DASHBOARD: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Challenges,
    Community,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Kind,
    Duration,
    Date,
    Skills,
    Friend,
    Validated,
    Photo,
    Comment,
}

impl FormField {
    const ORDER: [FormField; 8] = [
        FormField::Kind,
        FormField::Duration,
        FormField::Date,
        FormField::Skills,
        FormField::Friend,
        FormField::Validated,
        FormField::Photo,
        FormField::Comment,
    ];

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// The session-log popup.
#[derive(Debug, Clone)]
pub struct SessionForm {
    pub field: FormField,
    pub kind_idx: usize,
    pub duration: String,
    pub date: String,
    pub skill_cursor: usize,
    pub skills: [bool; 5],
    pub friend: String,
    pub validated: bool,
    pub photo: String,
    pub comment: String,
    pub error: Option<String>,
}

impl SessionForm {
    fn new(today: NaiveDate) -> Self {
        Self {
            field: FormField::Kind,
            kind_idx: 0,
            duration: "60".to_string(),
            date: today.format("%Y-%m-%d").to_string(),
            skill_cursor: 0,
            skills: [false; 5],
            friend: String::new(),
            validated: false,
            photo: String::new(),
            comment: String::new(),
            error: None,
        }
    }

    fn kind(&self) -> SessionKind {
        SessionKind::all()[self.kind_idx]
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Duration => Some(&mut self.duration),
            FormField::Date => Some(&mut self.date),
            FormField::Friend => Some(&mut self.friend),
            FormField::Photo => Some(&mut self.photo),
            FormField::Comment => Some(&mut self.comment),
            FormField::Kind | FormField::Skills | FormField::Validated => None,
        }
    }

    /// Parses the typed fields and reads the photo, if one was given. An
    /// unreadable photo keeps the form open. Everything else is checked by
    /// the tracker.
    fn to_draft(&self) -> std::result::Result<SessionDraft, String> {
        let duration_min = self
            .duration
            .trim()
            .parse::<u32>()
            .map_err(|_| "Duration must be a whole number of minutes".to_string())?;
        let performed_on = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "Date must look like 2026-10-19".to_string())?;
        let skills: Vec<Skill> = Skill::all()
            .into_iter()
            .zip(self.skills)
            .filter_map(|(skill, on)| on.then_some(skill))
            .collect();
        let photo = match self.photo.trim() {
            "" => None,
            path => Some(load_media(Path::new(path)).map_err(|e| e.to_string())?),
        };

        Ok(SessionDraft {
            kind: Some(self.kind()),
            duration_min,
            performed_on: Some(performed_on),
            skills,
            comment: Some(self.comment.clone()),
            friend: Some(self.friend.clone()),
            validated: self.validated,
            photo,
        })
    }
}

pub struct App<S: StateStore, C: Clock, I: IdSource> {
    pub tracker: Tracker<S, C, I>,
    pub config: AppConfig,
    pub view: View,
    pub selected: usize,
    pub form: Option<SessionForm>,
    /// Last outcome shown in the status bar; `true` marks an error.
    pub flash: Option<(String, bool)>,
    pub should_quit: bool,
}

impl<S: StateStore, C: Clock, I: IdSource> App<S, C, I> {
    pub fn new(tracker: Tracker<S, C, I>, config: AppConfig) -> Self {
        App {
            tracker,
            config,
            view: View::Dashboard,
            selected: 0,
            form: None,
            flash: None,
            should_quit: false,
        }
    }

    /// Picks up a week change while the dashboard stays open.
    pub fn tick(&mut self) {
        match self.tracker.refresh_challenges() {
            Ok(true) => self.flash = Some(("New week, new challenges".to_string(), false)),
            Ok(false) => {}
            Err(e) => warn!("could not refresh challenges: {}", e),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.form.is_some() {
            self.handle_form_key(key);
            return;
        }
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Challenges | View::Community | View::Help => self.handle_overlay_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.view = View::Help,
            KeyCode::Char('c') => {
                self.tick();
                self.view = View::Challenges;
            }
            KeyCode::Char('l') => self.view = View::Community,
            KeyCode::Char('n') => {
                self.flash = None;
                self.form = Some(SessionForm::new(self.tracker.clock().today()));
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                let shown = self.tracker.state().sessions.len().min(RECENT_ON_DASHBOARD);
                if self.selected + 1 < shown {
                    self.selected += 1;
                }
            }
            _ => {}
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        match (&self.view, key.code) {
            (_, KeyCode::Esc)
            | (View::Help, KeyCode::Char('?'))
            | (View::Challenges, KeyCode::Char('c'))
            | (View::Community, KeyCode::Char('l')) => self.view = View::Dashboard,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                return;
            }
            KeyCode::Enter => {
                self.submit_form();
                return;
            }
            KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
            KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
            KeyCode::Left => match form.field {
                FormField::Kind => {
                    let n = SessionKind::all().len();
                    form.kind_idx = (form.kind_idx + n - 1) % n;
                }
                FormField::Skills => form.skill_cursor = form.skill_cursor.saturating_sub(1),
                _ => {}
            },
            KeyCode::Right => match form.field {
                FormField::Kind => form.kind_idx = (form.kind_idx + 1) % SessionKind::all().len(),
                FormField::Skills => {
                    if form.skill_cursor + 1 < form.skills.len() {
                        form.skill_cursor += 1;
                    }
                }
                _ => {}
            },
            KeyCode::Char(' ') if form.field == FormField::Skills => {
                form.skills[form.skill_cursor] = !form.skills[form.skill_cursor];
            }
            KeyCode::Char(' ') if form.field == FormField::Validated => {
                form.validated = !form.validated;
            }
            KeyCode::Backspace => {
                if let Some(text) = form.text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = form.text_mut() {
                    text.push(c);
                }
            }
            _ => {}
        }
        form.error = None;
    }

    fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                form.error = Some(e);
                return;
            }
        };
        match self.tracker.submit_session(draft) {
            Ok(receipt) => {
                self.flash = Some((self.describe(&receipt), false));
                self.form = None;
                self.selected = 0;
            }
            Err(e) => form.error = Some(e.to_string()),
        }
    }

    fn describe(&self, receipt: &SessionReceipt) -> String {
        let mut msg = format!("✓ +{} XP", receipt.xp);
        for kind in &receipt.completed_challenges {
            if let Some(c) = self.tracker.state().challenges.iter().find(|c| c.id == *kind) {
                msg.push_str(&format!("  ·  ★ {}", c.title));
            }
        }
        for badge in &receipt.new_badges {
            msg.push_str(&format!("  ·  {}", badge_label(badge)));
        }
        msg
    }

    // ─── Drawing ─────────────────────────────────────────────────────────────

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_dashboard(frame);
        match self.view {
            View::Dashboard => {}
            View::Challenges => self.draw_challenges(frame),
            View::Community => self.draw_community(frame),
            View::Help => self.draw_help_overlay(frame),
        }
        if let Some(form) = &self.form {
            draw_form(frame, form);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let state = self.tracker.state();
        if let Some(player) = self.tracker.player() {
            header::render(
                frame,
                outer_chunks[0],
                player,
                &self.tracker.level(),
                self.tracker.total_xp(),
                state.challenge_week,
            );
        }
        statusbar::render(
            frame,
            outer_chunks[2],
            self.flash.as_ref().map(|(m, e)| (m.as_str(), *e)),
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer_chunks[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(columns[0]);
        skills::render(frame, left[0], &self.tracker.skill_levels());
        let recent: Vec<_> = self.tracker.recent_sessions(RECENT_ON_DASHBOARD).collect();
        sessions::render(
            frame,
            left[1],
            &recent,
            self.selected,
            self.view == View::Dashboard,
        );

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(11), Constraint::Min(0)])
            .split(columns[1]);
        challenges::render(frame, right[0], &state.challenges, state.challenge_week, false);
        badges::render(frame, right[1], &state.badges);
    }

    fn draw_challenges(&self, frame: &mut Frame) {
        let popup_area = centered(frame.area(), 70, 16);
        frame.render_widget(Clear, popup_area);
        let state = self.tracker.state();
        challenges::render(frame, popup_area, &state.challenges, state.challenge_week, true);
    }

    fn draw_community(&self, frame: &mut Frame) {
        let Some(player) = self.tracker.player() else {
            return;
        };
        let ranking = rank_players(
            &self.config.community.friends,
            &player.name,
            &player.club,
            self.tracker.total_xp(),
        );
        let board = club_board(&ranking, &player.club);

        let popup_area = centered(frame.area(), 60, (ranking.len() + board.len() + 4) as u16);
        frame.render_widget(Clear, popup_area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(ranking.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(popup_area);
        leaderboard::render(frame, rows[0], "Friends", &ranking);
        leaderboard::render(frame, rows[1], &format!("Club · {}", player.club), &board);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered(frame.area(), 52, 14);
        frame.render_widget(Clear, popup_area);

        let key = |k: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {:<13}", k), theme::accent()),
                Span::styled(what, theme::dim()),
            ])
        };
        let help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            key("[n]", "Log a session"),
            key("[c]", "Weekly challenges"),
            key("[l]", "Friends and club ranking"),
            key("[↑ ↓]", "Browse recent sessions"),
            key("[?]", "Toggle help"),
            key("[Esc] / [q]", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "  In the form: Tab moves, ←→ picks, Space toggles a skill or the partner check",
                theme::dim(),
            )),
        ];

        let block = Block::default()
            .title(Span::styled(" Help ", theme::accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::accent())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

fn draw_form(frame: &mut Frame, form: &SessionForm) {
    let height = if form.error.is_some() { 18 } else { 16 };
    let popup_area = centered(frame.area(), 64, height);
    frame.render_widget(Clear, popup_area);

    let label = |field: FormField, text: &'static str| {
        let style = if form.field == field {
            theme::accent().add_modifier(Modifier::BOLD)
        } else {
            theme::dim()
        };
        Span::styled(format!("  {:<10}", text), style)
    };
    let text_value = |field: FormField, value: &str| {
        let cursor = if form.field == field { "█" } else { "" };
        Span::styled(format!("{}{}", value, cursor), theme::bold())
    };

    let mut skill_spans = vec![label(FormField::Skills, "Skills")];
    for (i, skill) in Skill::all().into_iter().enumerate() {
        let mark = if form.skills[i] { "■" } else { "□" };
        let style = if form.field == FormField::Skills && form.skill_cursor == i {
            theme::accent().add_modifier(Modifier::BOLD)
        } else if form.skills[i] {
            theme::green()
        } else {
            theme::dim()
        };
        skill_spans.push(Span::styled(format!("{} {}  ", mark, skill_label(skill)), style));
    }

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            label(FormField::Kind, "Type"),
            Span::styled("◀ ", theme::dim()),
            Span::styled(crate::labels::session_label(form.kind()), theme::bold()),
            Span::styled(" ▶", theme::dim()),
        ]),
        Line::from(vec![
            label(FormField::Duration, "Minutes"),
            text_value(FormField::Duration, &form.duration),
        ]),
        Line::from(vec![
            label(FormField::Date, "Date"),
            text_value(FormField::Date, &form.date),
        ]),
        Line::from(skill_spans),
        Line::from(vec![
            label(FormField::Friend, "Friend"),
            text_value(FormField::Friend, &form.friend),
        ]),
        Line::from(vec![
            label(FormField::Validated, "Partner"),
            Span::styled(
                if form.validated { "■ validated by a partner" } else { "□ validated by a partner" },
                if form.validated { theme::green() } else { theme::dim() },
            ),
        ]),
        Line::from(vec![
            label(FormField::Photo, "Photo"),
            text_value(FormField::Photo, &form.photo),
        ]),
        Line::from(vec![
            label(FormField::Comment, "Comment"),
            text_value(FormField::Comment, &form.comment),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  [Enter] save  ·  [Tab] next field  ·  [Esc] cancel",
            theme::dim(),
        )),
    ];
    if let Some(err) = &form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
    }

    let border_style = if form.error.is_some() {
        theme::red()
    } else {
        theme::amber()
    };
    let block = Block::default()
        .title(Span::styled(" Log a session ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(theme::surface());
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Run the TUI event loop.
pub fn run<S: StateStore, C: Clock, I: IdSource>(
    tracker: Tracker<S, C, I>,
    config: AppConfig,
) -> Result<()> {
    let mut app = App::new(tracker, config);
    app.tick();

    let mut terminal = ratatui::init();
    let events = EventHandler::new(1000);

    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }
        match events.next() {
            Ok(Event::Key(key)) => {
                app.handle_key(key);
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(Event::Tick) => app.tick(),
            Ok(Event::Resize) => {}
            Err(e) => break Err(anyhow::Error::from(e)),
        }
    };

    ratatui::restore();
    outcome
}
