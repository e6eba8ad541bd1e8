use chrono::Duration;

use crate::models::{AppState, Badge, Session, SessionKind, Skill};
use crate::ports::{Clock, IdSource};

/// Gives a brand new profile something to look at: a preset ledger, three
/// sessions from the last few days and the starter badges. Does nothing if
/// sessions already exist.
pub fn seed_demo_progress(state: &mut AppState, clock: &impl Clock, ids: &impl IdSource) -> bool {
    if !state.sessions.is_empty() {
        return false;
    }

    for (skill, xp) in [
        (Skill::Technique, 420),
        (Skill::Deplacements, 330),
        (Skill::Tactique, 260),
        (Skill::Physique, 390),
        (Skill::Matchs, 280),
    ] {
        state.skill_xp.set(skill, xp);
    }

    let now = clock.now();
    let seeded = [
        (
            1,
            SessionKind::Training,
            75,
            true,
            false,
            "Serve routine + cross-court returns.",
            vec![Skill::Technique, Skill::Deplacements],
            85,
        ),
        (
            2,
            SessionKind::Cardio,
            50,
            false,
            true,
            "Intervals + core work.",
            vec![Skill::Physique],
            70,
        ),
        (
            3,
            SessionKind::MatchPractice,
            90,
            true,
            false,
            "Three-set match against Lucas.",
            vec![Skill::Tactique, Skill::Matchs],
            123,
        ),
    ];

    for (days_ago, kind, duration_min, validated, photo, comment, skills, xp) in seeded {
        let when = now - Duration::days(days_ago);
        state.sessions.push(Session {
            id: ids.next_id(),
            kind,
            duration_min,
            performed_on: Some(when.date()),
            skills,
            xp,
            comment: Some(comment.to_string()),
            friend: None,
            validated,
            photo: photo.then(|| crate::models::MediaRef {
                path: "demo://cardio.jpg".to_string(),
                size_bytes: 0,
            }),
            created_at: when,
        });
    }

    state.badges.unlock(Badge::FirstSession);
    state.badges.unlock(Badge::StarterProfile);
    true
}
