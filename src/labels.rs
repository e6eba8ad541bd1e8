//! Display text for the closed enums. Kept apart from the engine so wording
//! can change without touching progression rules.

use crate::models::{Badge, PlayLevel, SessionKind, Skill};

pub fn session_label(kind: SessionKind) -> &'static str {
    match kind {
        SessionKind::Training => "Badminton training",
        SessionKind::MatchPractice => "Practice match",
        SessionKind::MatchOfficial => "Official match",
        SessionKind::Cardio => "Physical / cardio",
        SessionKind::Other => "Session",
    }
}

pub fn skill_label(skill: Skill) -> &'static str {
    match skill {
        Skill::Technique => "Technique",
        Skill::Deplacements => "Déplacements",
        Skill::Tactique => "Tactique",
        Skill::Physique => "Physique",
        Skill::Matchs => "Matchs",
    }
}

pub fn play_level_label(level: PlayLevel) -> &'static str {
    match level {
        PlayLevel::Beginner => "Beginner",
        PlayLevel::Intermediate => "Intermediate",
        PlayLevel::Advanced => "Advanced",
    }
}

pub fn badge_label(badge: &Badge) -> String {
    match badge {
        Badge::FirstSession => "🥇 First step: 1 session logged".to_string(),
        Badge::Regular => "🔥 Regular: 10 sessions completed".to_string(),
        Badge::Xp1000 => "💎 1000 XP reached".to_string(),
        Badge::Persistent => "📅 Persistent: 7 days of activity".to_string(),
        Badge::StarterProfile => "🎮 Starter profile unlocked".to_string(),
        Badge::ChallengeCompleted { title } => format!("🏆 Challenge completed: {}", title),
    }
}
