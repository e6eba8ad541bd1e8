use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::AppConfig;
use crate::labels::{badge_label, play_level_label, session_label, skill_label};
use crate::leaderboard::{club_board, rank_players, RankEntry};
use crate::media::load_media;
use crate::models::{MediaRef, SessionDraft, SessionKind, Skill};
use crate::ports::Clock;
use crate::tracker::ProfileEdit;
use crate::utils::format::{format_date, format_minutes, pad_display, progress_bar};
use crate::LocalTracker;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;255;210;74m";

// ─── Setup ───────────────────────────────────────────────────────────────────

pub fn handle_setup(
    tracker: &mut LocalTracker,
    config: &AppConfig,
    reset: bool,
    demo: bool,
) -> Result<()> {
    if tracker.state().onboarded {
        if !reset {
            println!("Profile already set up. Use --reset to start over.");
            return Ok(());
        }
        tracker.logout().context("Clearing previous progress")?;
    }
    crate::cli::setup_tui::run_setup_tui(tracker, config, demo)?;
    if !AppConfig::config_path()?.exists() {
        config.save().context("Writing default config")?;
        println_colored!(DIM, "  Config written to {}", AppConfig::config_path()?.display());
    }
    if let Some(player) = tracker.player() {
        println_colored!(GREEN, "  ✓ Welcome, {}!", player.name);
    }
    Ok(())
}

// ─── Log session ─────────────────────────────────────────────────────────────

pub struct LogArgs {
    pub kind: String,
    pub minutes: u32,
    pub skills: Vec<String>,
    pub date: Option<String>,
    pub friend: Option<String>,
    pub validated: bool,
    pub photo: Option<PathBuf>,
    pub skip_bad_photo: bool,
    pub comment: Option<String>,
}

pub fn handle_log(tracker: &mut LocalTracker, args: LogArgs) -> Result<()> {
    let kind = SessionKind::from_str(&args.kind)?;
    let skills = args
        .skills
        .iter()
        .map(|s| Skill::from_str(s))
        .collect::<Result<Vec<_>>>()?;
    let performed_on = match &args.date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| anyhow!("Bad date '{}'. Use YYYY-MM-DD", d))?,
        None => tracker.clock().today(),
    };
    let photo = match &args.photo {
        Some(path) => attach_photo(path, args.skip_bad_photo)?,
        None => None,
    };

    let draft = SessionDraft {
        kind: Some(kind),
        duration_min: args.minutes,
        performed_on: Some(performed_on),
        skills,
        comment: args.comment,
        friend: args.friend,
        validated: args.validated,
        photo,
    };
    let receipt = tracker.submit_session(draft)?;

    println_colored!(
        GREEN,
        "  ✓ Session logged: +{} XP  ({} per skill)",
        receipt.xp,
        receipt.per_skill
    );
    for kind in &receipt.completed_challenges {
        if let Some(c) = tracker.state().challenges.iter().find(|c| c.id == *kind) {
            println_colored!(GOLD, "  ★ Challenge complete: {}  +{} XP", c.title, c.reward_xp);
        }
    }
    for badge in &receipt.new_badges {
        println_colored!(GOLD, "  New badge: {}", badge_label(badge));
    }
    let level = tracker.level();
    println_colored!(
        DIM,
        "  Level {}  ·  {}/{} XP to next",
        level.level,
        level.current_in_level,
        level.next_level_target
    );
    Ok(())
}

fn attach_photo(path: &Path, skip_bad_photo: bool) -> Result<Option<MediaRef>> {
    match load_media(path) {
        Ok(media) => Ok(Some(media)),
        Err(e) if skip_bad_photo => {
            warn!("dropping unreadable photo: {}", e);
            println_colored!(AMBER, "  ! Photo skipped: {}", e);
            Ok(None)
        }
        Err(e) => Err(anyhow!(e).context(
            "Photo could not be attached. Nothing was logged; rerun with --skip-bad-photo to log without it",
        )),
    }
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn handle_status(tracker: &LocalTracker) -> Result<()> {
    let player = tracker
        .player()
        .ok_or_else(|| anyhow!("No profile yet. Run `volant setup`"))?;
    let level = tracker.level();

    println!();
    println_colored!(GOLD, "  {}  ·  {}", player.name, player.club);
    println!();
    println_colored!(
        BOLD,
        "  Level {}   {}  {}%   {} XP total",
        level.level,
        progress_bar(level.current_in_level, level.next_level_target, 20),
        level.progress_percent,
        tracker.total_xp()
    );
    println!();

    for (skill, xp, info) in tracker.skill_levels() {
        println!(
            "  {}  Lv {:<3} {}  {} XP",
            pad_display(skill_label(skill), 14),
            info.level,
            progress_bar(info.current_in_level, info.next_level_target, 12),
            xp
        );
    }

    let recent: Vec<_> = tracker.recent_sessions(3).collect();
    if !recent.is_empty() {
        println!();
        println_colored!(DIM, "  Recent sessions");
        for s in recent {
            println!(
                "  {}  {}  +{} XP",
                format_date(s.activity_date()),
                session_label(s.kind),
                s.xp
            );
        }
    }
    println!();
    Ok(())
}

// ─── Challenges ──────────────────────────────────────────────────────────────

pub fn handle_challenges(tracker: &mut LocalTracker) -> Result<()> {
    tracker.refresh_challenges()?;
    let state = tracker.state();

    println!();
    match state.challenge_week {
        Some(week) => println_colored!(GOLD, "  Weekly challenges  ({})", week),
        None => println_colored!(GOLD, "  Weekly challenges"),
    }
    println!();
    for c in &state.challenges {
        let status = if c.completed { "✓ done" } else { "in progress" };
        let color = if c.completed { GREEN } else { AMBER };
        println_colored!(BOLD, "  {}", c.title);
        println_colored!(DIM, "  {}", c.description);
        println_colored!(
            color,
            "  {}  {}/{}  {}  ·  reward {} XP",
            progress_bar(c.progress as u64, c.target as u64, 16),
            c.progress,
            c.target,
            status,
            c.reward_xp
        );
        println!();
    }
    Ok(())
}

// ─── Badges ──────────────────────────────────────────────────────────────────

pub fn handle_badges(tracker: &LocalTracker) -> Result<()> {
    let badges = &tracker.state().badges;
    println!();
    if badges.is_empty() {
        println_colored!(DIM, "  No badges yet. Log a session to earn your first.");
    } else {
        println_colored!(GOLD, "  Badges ({})", badges.len());
        println!();
        for badge in badges.iter() {
            println!("  {}", badge_label(badge));
        }
    }
    println!();
    Ok(())
}

// ─── History ─────────────────────────────────────────────────────────────────

pub fn handle_history(tracker: &LocalTracker, limit: usize) -> Result<()> {
    println!();
    if tracker.state().sessions.is_empty() {
        println_colored!(DIM, "  No sessions logged yet.");
        println!();
        return Ok(());
    }
    for s in tracker.recent_sessions(limit) {
        println_colored!(
            BOLD,
            "  {}  ·  +{} XP",
            session_label(s.kind),
            s.xp
        );
        let skills: Vec<&str> = s.skills.iter().map(|sk| skill_label(*sk)).collect();
        println_colored!(
            DIM,
            "  {}  ·  {}  ·  {}",
            format_date(s.activity_date()),
            format_minutes(s.duration_min),
            skills.join(", ")
        );
        if let Some(friend) = &s.friend {
            println_colored!(DIM, "  with {}", friend);
        }
        if let Some(comment) = &s.comment {
            println!("  \u{201c}{}\u{201d}", comment);
        }
        println!();
    }
    Ok(())
}

// ─── Leaderboard ─────────────────────────────────────────────────────────────

pub fn handle_leaderboard(tracker: &LocalTracker, config: &AppConfig, club_only: bool) -> Result<()> {
    let player = tracker
        .player()
        .ok_or_else(|| anyhow!("No profile yet. Run `volant setup`"))?;
    let ranking = rank_players(
        &config.community.friends,
        &player.name,
        &player.club,
        tracker.total_xp(),
    );

    println!();
    if club_only {
        println_colored!(GOLD, "  Club ranking ({})", player.club);
        println!();
        print_ranking(&club_board(&ranking, &player.club));
    } else {
        println_colored!(GOLD, "  Friends ranking");
        println!();
        print_ranking(&ranking);
    }
    println!();
    Ok(())
}

fn print_ranking(entries: &[RankEntry]) {
    for e in entries {
        let line = format!(
            "  {:>2}. {} Lv {:<3} {} XP",
            e.rank,
            pad_display(&e.name, 16),
            e.level,
            e.xp
        );
        if e.is_you {
            println_colored!(GOLD, "{}  (you)", line);
        } else {
            println!("{}", line);
        }
    }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

pub fn handle_profile(
    tracker: &mut LocalTracker,
    name: Option<String>,
    frequency: Option<u32>,
    club: Option<String>,
    avatar: Option<PathBuf>,
) -> Result<()> {
    let editing = name.is_some() || frequency.is_some() || club.is_some() || avatar.is_some();
    if editing {
        let avatar = match avatar {
            Some(path) => Some(load_media(&path).context("Attaching avatar")?),
            None => None,
        };
        tracker.update_profile(ProfileEdit {
            name,
            weekly_target: frequency,
            club,
            avatar,
        })?;
        println_colored!(GREEN, "  ✓ Profile updated");
    }

    let player = tracker
        .player()
        .ok_or_else(|| anyhow!("No profile yet. Run `volant setup`"))?;
    println!();
    println_colored!(GOLD, "  {}", player.name);
    println!("  Club:          {}", player.club);
    println!("  Started as:    {}", play_level_label(player.initial_level));
    println!("  Weekly target: {} sessions", player.weekly_target);
    if let Some(avatar) = &player.avatar {
        println!("  Avatar:        {}", avatar.path);
    }
    println!();
    Ok(())
}

// ─── Logout ──────────────────────────────────────────────────────────────────

pub fn handle_logout(tracker: &mut LocalTracker, yes: bool) -> Result<()> {
    if !yes {
        let answer = prompt("  This erases all progress on this device. Type 'yes' to confirm: ")?;
        if answer.trim() != "yes" {
            println_colored!(DIM, "  Cancelled");
            return Ok(());
        }
    }
    tracker.logout()?;
    println_colored!(AMBER, "  All progress cleared");
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}
