use log::info;

use crate::models::{AppState, Badge, ChallengeKind, SessionKind, Skill, WeeklyChallenge};

pub const CARDIO_TARGET: u32 = 2;
pub const MATCH_TARGET: u32 = 1;
pub const MIN_SESSIONS_TARGET: u32 = 2;

/// How a completed challenge's reward is spread over the ledger.
pub const REWARD_SPLIT: [(Skill, f64); 3] = [
    (Skill::Technique, 0.3),
    (Skill::Physique, 0.3),
    (Skill::Tactique, 0.4),
];

/// A fresh week: three challenges, no progress, nothing completed.
pub fn create_weekly_challenges(weekly_target: u32) -> Vec<WeeklyChallenge> {
    let sessions_target = weekly_target.max(MIN_SESSIONS_TARGET);
    vec![
        WeeklyChallenge {
            id: ChallengeKind::Sessions,
            title: format!("Complete {} sessions this week", sessions_target),
            description: "Log your sessions to keep progressing steadily.".to_string(),
            target: sessions_target,
            progress: 0,
            reward_xp: 80,
            completed: false,
        },
        WeeklyChallenge {
            id: ChallengeKind::Cardio,
            title: "Train cardio twice".to_string(),
            description: "Log 2 physical / cardio sessions.".to_string(),
            target: CARDIO_TARGET,
            progress: 0,
            reward_xp: 60,
            completed: false,
        },
        WeeklyChallenge {
            id: ChallengeKind::Match,
            title: "Play 1 match".to_string(),
            description: "Practice or official match.".to_string(),
            target: MATCH_TARGET,
            progress: 0,
            reward_xp: 50,
            completed: false,
        },
    ]
}

fn progress_for(kind: ChallengeKind, state: &AppState) -> u32 {
    let count = match kind {
        ChallengeKind::Sessions => state.sessions.len(),
        ChallengeKind::Cardio => state
            .sessions
            .iter()
            .filter(|s| s.kind == SessionKind::Cardio)
            .count(),
        ChallengeKind::Match => state.sessions.iter().filter(|s| s.kind.is_match()).count(),
    };
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Recomputes progress for every challenge from the session log. The first
/// time a challenge reaches its target it pays its reward into the ledger
/// and unlocks a badge carrying its title; `completed` then stays set.
/// Returns the challenges completed by this call.
pub fn evaluate_challenges(state: &mut AppState) -> Vec<ChallengeKind> {
    let progress: Vec<u32> = state
        .challenges
        .iter()
        .map(|c| progress_for(c.id, state))
        .collect();

    let mut rewards = Vec::new();
    for (challenge, progress) in state.challenges.iter_mut().zip(progress) {
        challenge.progress = progress;
        if !challenge.completed && progress >= challenge.target {
            challenge.completed = true;
            rewards.push((challenge.id, challenge.reward_xp, challenge.title.clone()));
        }
    }

    let mut completed = Vec::new();
    for (kind, reward_xp, title) in rewards {
        for (skill, share) in REWARD_SPLIT {
            state.skill_xp.add(skill, (reward_xp as f64 * share).round() as u64);
        }
        info!("challenge completed: {} (+{} XP)", title, reward_xp);
        state.badges.unlock(Badge::ChallengeCompleted { title });
        completed.push(kind);
    }
    completed
}
