use std::collections::HashSet;

use log::info;

use crate::engine::xp::total_xp;
use crate::models::{AppState, Badge};

pub const REGULAR_SESSIONS: usize = 10;
pub const XP_MILESTONE: u64 = 1000;
pub const PERSISTENT_DAYS: usize = 7;

/// Unlocks every badge whose condition currently holds. Safe to run any
/// number of times: badges already held are skipped, none are removed.
/// Returns the badges unlocked by this call.
pub fn evaluate_badges(state: &mut AppState) -> Vec<Badge> {
    let sessions = state.sessions.len();
    let total = total_xp(&state.skill_xp);
    let active_days = state
        .sessions
        .iter()
        .map(|s| s.activity_date())
        .collect::<HashSet<_>>()
        .len();

    let candidates = [
        (sessions >= 1, Badge::FirstSession),
        (sessions >= REGULAR_SESSIONS, Badge::Regular),
        (total >= XP_MILESTONE, Badge::Xp1000),
        (active_days >= PERSISTENT_DAYS, Badge::Persistent),
    ];

    let mut unlocked = Vec::new();
    for (earned, badge) in candidates {
        if earned && state.badges.unlock(badge.clone()) {
            info!("badge unlocked: {:?}", badge);
            unlocked.push(badge);
        }
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{day, session};
    use crate::models::{SessionKind, Skill};

    #[test]
    fn test_empty_state_unlocks_nothing() {
        let mut state = AppState::default();
        assert!(evaluate_badges(&mut state).is_empty());
        assert!(state.badges.is_empty());
    }

    #[test]
    fn test_first_session_badge() {
        let mut state = AppState::default();
        state.sessions.push(session(SessionKind::Training, day(1)));
        assert_eq!(evaluate_badges(&mut state), vec![Badge::FirstSession]);
        assert!(evaluate_badges(&mut state).is_empty());
    }

    #[test]
    fn test_regular_badge_held_once() {
        let mut state = AppState::default();
        for _ in 0..10 {
            state.sessions.push(session(SessionKind::Cardio, day(5)));
        }
        for _ in 0..5 {
            evaluate_badges(&mut state);
        }
        let regular = state.badges.iter().filter(|b| **b == Badge::Regular).count();
        assert_eq!(regular, 1);
        assert!(!state.badges.contains(&Badge::Persistent));
    }

    #[test]
    fn test_xp_milestone_counts_challenge_bonuses_too() {
        let mut state = AppState::default();
        state.skill_xp.add(Skill::Matchs, 999);
        evaluate_badges(&mut state);
        assert!(!state.badges.contains(&Badge::Xp1000));
        state.skill_xp.add(Skill::Tactique, 1);
        assert_eq!(evaluate_badges(&mut state), vec![Badge::Xp1000]);
    }

    #[test]
    fn test_persistent_needs_seven_distinct_days() {
        let mut state = AppState::default();
        for n in 1..=6 {
            state.sessions.push(session(SessionKind::Training, day(n)));
            state.sessions.push(session(SessionKind::Training, day(n)));
        }
        evaluate_badges(&mut state);
        assert!(!state.badges.contains(&Badge::Persistent));

        let mut undated = session(SessionKind::Training, day(20));
        undated.performed_on = None;
        state.sessions.push(undated);
        evaluate_badges(&mut state);
        assert!(state.badges.contains(&Badge::Persistent));
    }

    #[test]
    fn test_badges_are_never_removed() {
        let mut state = AppState::default();
        state.sessions.push(session(SessionKind::Training, day(1)));
        evaluate_badges(&mut state);
        let before = state.badges.len();
        state.sessions.clear();
        evaluate_badges(&mut state);
        assert_eq!(state.badges.len(), before);
    }
}
