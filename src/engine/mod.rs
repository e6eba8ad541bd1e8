//! Progression engine.
//!
//! Pure functions over [`AppState`](crate::models::AppState): level curve,
//! session XP, badge unlocking and weekly challenges. Nothing in here reads
//! the clock or touches storage; callers pass dates in and persist after.

pub mod badges;
pub mod challenges;
pub mod level;
pub mod week;
pub mod xp;

pub use badges::evaluate_badges;
pub use challenges::{create_weekly_challenges, evaluate_challenges};
pub use level::{xp_to_level, LevelInfo};
pub use week::{refresh_week, week_key};
pub use xp::{per_skill_award, session_xp, total_xp};
