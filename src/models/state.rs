use serde::{Deserialize, Serialize};

use crate::models::{BadgeSet, Player, Session, SkillLedger, WeekKey, WeeklyChallenge};

/// The whole persisted record. Saved as one document after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub onboarded: bool,
    #[serde(default)]
    pub player: Option<Player>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub skill_xp: SkillLedger,
    #[serde(default)]
    pub badges: BadgeSet,
    #[serde(default)]
    pub challenges: Vec<WeeklyChallenge>,
    #[serde(default)]
    pub challenge_week: Option<WeekKey>,
}
