use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "volant", version, author, about = "Track badminton practice, XP, badges and weekly challenges")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create your player profile
    Setup {
        /// Clear existing progress and start over
        #[arg(long)]
        reset: bool,
        /// Seed a few demo sessions to explore the dashboard
        #[arg(long)]
        demo: bool,
    },
    /// Log a practice session
    Log {
        /// Session type (training, match_practice, match_official, cardio)
        kind: String,
        /// Duration in minutes (20-240)
        minutes: u32,
        /// Skill worked; repeat for several (technique, deplacements, tactique, physique, matchs)
        #[arg(long = "skill", short = 's')]
        skills: Vec<String>,
        /// Date played, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Friend who played with you
        #[arg(long)]
        friend: Option<String>,
        /// Session was validated by a teammate or club member
        #[arg(long)]
        validated: bool,
        /// Photo to attach
        #[arg(long)]
        photo: Option<PathBuf>,
        /// Log the session without the photo if it cannot be read
        #[arg(long)]
        skip_bad_photo: bool,
        /// Short note (180 characters max)
        #[arg(long)]
        comment: Option<String>,
    },
    /// Show level, XP per skill and recent sessions
    Status,
    /// Show this week's challenges
    Challenges,
    /// List unlocked badges
    Badges,
    /// Show logged sessions, most recent first
    History {
        /// How many sessions to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Friends and club ranking
    Leaderboard {
        /// Only show your club
        #[arg(long)]
        club: bool,
    },
    /// Show or edit your profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        /// Weekly session target (applies from next week's challenges)
        #[arg(long)]
        frequency: Option<u32>,
        #[arg(long)]
        club: Option<String>,
        /// Avatar image
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
    /// Clear all progress on this device
    Logout {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
