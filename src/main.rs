use anyhow::{Context, Result};
use clap::Parser;

use volant::cli::args::{Cli, Commands};
use volant::cli::handlers::{self, LogArgs};
use volant::config::AppConfig;
use volant::db::SqliteStore;
use volant::ports::{SystemClock, UuidSource};
use volant::tracker::Tracker;
use volant::LocalTracker;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    let mut tracker = Tracker::open(store, SystemClock, UuidSource, config.tracker_rules())
        .context("Loading saved progress")?;

    match cli.command {
        Some(Commands::Setup { reset, demo }) => {
            handlers::handle_setup(&mut tracker, &config, reset, demo)?;
        }

        Some(Commands::Logout { yes }) => {
            handlers::handle_logout(&mut tracker, yes)?;
        }

        // Everything else needs a profile first
        Some(cmd) => {
            if !ensure_setup(&mut tracker, &config)? {
                return Ok(());
            }
            match cmd {
                Commands::Log {
                    kind,
                    minutes,
                    skills,
                    date,
                    friend,
                    validated,
                    photo,
                    skip_bad_photo,
                    comment,
                } => handlers::handle_log(
                    &mut tracker,
                    LogArgs {
                        kind,
                        minutes,
                        skills,
                        date,
                        friend,
                        validated,
                        photo,
                        skip_bad_photo,
                        comment,
                    },
                )?,
                Commands::Status => handlers::handle_status(&tracker)?,
                Commands::Challenges => handlers::handle_challenges(&mut tracker)?,
                Commands::Badges => handlers::handle_badges(&tracker)?,
                Commands::History { limit } => handlers::handle_history(&tracker, limit)?,
                Commands::Leaderboard { club } => {
                    handlers::handle_leaderboard(&tracker, &config, club)?
                }
                Commands::Profile {
                    name,
                    frequency,
                    club,
                    avatar,
                } => handlers::handle_profile(&mut tracker, name, frequency, club, avatar)?,
                Commands::Setup { .. } | Commands::Logout { .. } => unreachable!(),
            }
        }

        // No subcommand → launch TUI
        None => {
            if ensure_setup(&mut tracker, &config)? {
                volant::tui::run(tracker, config)?;
            }
        }
    }

    Ok(())
}

/// Runs the wizard when no profile exists yet. Returns false if the player
/// backed out of it.
fn ensure_setup(tracker: &mut LocalTracker, config: &AppConfig) -> Result<bool> {
    if !tracker.state().onboarded {
        eprintln!("No profile found. Running setup...");
        eprintln!();
        handlers::handle_setup(tracker, config, false, false)?;
    }
    Ok(tracker.state().onboarded)
}
