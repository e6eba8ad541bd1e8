//! Badminton practice tracker: XP per skill, levels, badges and weekly
//! challenges, stored locally in SQLite.

pub mod cli;
pub mod config;
pub mod db;
pub mod demo;
pub mod engine;
pub mod error;
pub mod labels;
pub mod leaderboard;
pub mod media;
pub mod models;
pub mod ports;
pub mod tracker;
pub mod tui;
pub mod utils;

/// The tracker as the binary runs it: SQLite on disk, wall clock, random ids.
pub type LocalTracker = tracker::Tracker<db::SqliteStore>;
