pub mod badges;
pub mod challenges;
pub mod header;
pub mod leaderboard;
pub mod sessions;
pub mod skills;
pub mod statusbar;
