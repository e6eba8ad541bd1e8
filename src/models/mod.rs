pub mod badge;
pub mod challenge;
pub mod media;
pub mod player;
pub mod session;
pub mod skill;
pub mod state;

pub use badge::{Badge, BadgeSet};
pub use challenge::{ChallengeKind, WeekKey, WeeklyChallenge};
pub use media::MediaRef;
pub use player::{PlayLevel, Player};
pub use session::{Session, SessionDraft, SessionKind};
pub use skill::{Skill, SkillLedger};
pub use state::AppState;
