//! End-to-end progression through the tracker with deterministic ports.

use chrono::NaiveDate;

use volant::engine::{week_key, xp_to_level};
use volant::leaderboard::{club_board, default_friends, rank_players};
use volant::models::{
    AppState, Badge, ChallengeKind, MediaRef, PlayLevel, SessionDraft, SessionKind, Skill,
};
use volant::ports::{Clock, FixedClock, MemoryStore, SequentialIds};
use volant::tracker::{ProfileInput, Rules, Tracker};

type TestTracker<'a> = Tracker<&'a MemoryStore, FixedClock, SequentialIds>;

/// Monday 19 October 2026, early evening.
fn monday() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap(),
    )
}

fn profile(weekly_target: u32) -> ProfileInput {
    ProfileInput {
        name: "Alex".to_string(),
        level: PlayLevel::Intermediate,
        weekly_target,
        club: "Aigles de Lyon".to_string(),
        avatar: None,
    }
}

fn onboarded(store: &MemoryStore, weekly_target: u32) -> TestTracker<'_> {
    let mut tracker =
        Tracker::open(store, monday(), SequentialIds::default(), Rules::default()).unwrap();
    tracker.onboard(profile(weekly_target), false).unwrap();
    tracker
}

fn log(tracker: &mut TestTracker<'_>, kind: SessionKind, minutes: u32, skills: &[Skill]) {
    let today = tracker.clock().today();
    tracker
        .submit_session(SessionDraft::new(kind, minutes, today).with_skills(skills))
        .unwrap();
}

fn count_badge(state: &AppState, badge: &Badge) -> usize {
    state.badges.iter().filter(|b| *b == badge).count()
}

#[test]
fn ledger_total_matches_awards_and_rewards() {
    let store = MemoryStore::default();
    let mut tracker = onboarded(&store, 3);
    let today = tracker.clock().today();

    let drafts = vec![
        SessionDraft::new(SessionKind::Training, 40, today)
            .with_skills(&[Skill::Technique, Skill::Deplacements])
            .with_friend("Lucas")
            .with_photo(MediaRef {
                path: "/photos/smash.jpg".into(),
                size_bytes: 2048,
            }),
        SessionDraft::new(SessionKind::MatchOfficial, 95, today)
            .with_skills(&[Skill::Matchs, Skill::Tactique, Skill::Physique]),
        SessionDraft::new(SessionKind::Cardio, 60, today).with_skills(&[Skill::Physique]),
    ];

    let mut awarded = 0;
    let mut rewards = 0;
    for draft in drafts {
        let skills = draft.skills.len() as u64;
        let receipt = tracker.submit_session(draft).unwrap();
        awarded += receipt.per_skill * skills;
        for kind in receipt.completed_challenges {
            let challenge = tracker
                .state()
                .challenges
                .iter()
                .find(|c| c.id == kind)
                .unwrap();
            rewards += challenge.reward_xp;
        }
    }

    // 81 split over 2, 144 over 3, 60 on one skill
    assert_eq!(awarded, 41 * 2 + 48 * 3 + 60);
    // three sessions and one match this week
    assert_eq!(rewards, 80 + 50);
    assert_eq!(tracker.total_xp(), awarded + rewards);
    assert_eq!(tracker.level(), xp_to_level(awarded + rewards));
}

#[test]
fn regular_badge_is_held_once() {
    let store = MemoryStore::default();
    let mut tracker = onboarded(&store, 3);

    for _ in 0..4 {
        for _ in 0..3 {
            log(&mut tracker, SessionKind::Training, 60, &[Skill::Technique]);
        }
        tracker.clock().advance_days(1);
    }

    let state = tracker.state();
    assert_eq!(state.sessions.len(), 12);
    assert_eq!(count_badge(state, &Badge::Regular), 1);
    assert_eq!(count_badge(state, &Badge::FirstSession), 1);
    // four distinct days is not enough for the persistence badge
    assert!(!state.badges.contains(&Badge::Persistent));
}

#[test]
fn seven_active_days_unlock_persistent() {
    let store = MemoryStore::default();
    let mut tracker = onboarded(&store, 3);

    for _ in 0..7 {
        log(&mut tracker, SessionKind::Cardio, 30, &[Skill::Physique]);
        tracker.clock().advance_days(1);
    }
    assert!(tracker.state().badges.contains(&Badge::Persistent));
}

#[test]
fn week_rollover_regenerates_then_rescans_history() {
    let store = MemoryStore::default();
    let mut tracker = onboarded(&store, 3);

    log(&mut tracker, SessionKind::Cardio, 60, &[Skill::Physique]);
    log(&mut tracker, SessionKind::Cardio, 60, &[Skill::Physique]);
    let cardio = tracker
        .state()
        .challenges
        .iter()
        .find(|c| c.id == ChallengeKind::Cardio)
        .unwrap();
    assert!(cardio.completed);
    let cardio_badge = Badge::ChallengeCompleted {
        title: cardio.title.clone(),
    };
    assert!(tracker.state().badges.contains(&cardio_badge));

    tracker.clock().advance_days(7);
    assert!(tracker.refresh_challenges().unwrap());
    let state = tracker.state();
    assert_eq!(state.challenge_week.unwrap().to_string(), "2026-W44");
    assert!(state.challenges.iter().all(|c| c.progress == 0 && !c.completed));
    assert!(!tracker.refresh_challenges().unwrap());

    // The next submission counts every stored session, not only this week's.
    let before = tracker.total_xp();
    let today = tracker.clock().today();
    let receipt = tracker
        .submit_session(
            SessionDraft::new(SessionKind::Training, 60, today).with_skills(&[Skill::Technique]),
        )
        .unwrap();
    assert!(receipt.completed_challenges.contains(&ChallengeKind::Sessions));
    assert!(receipt.completed_challenges.contains(&ChallengeKind::Cardio));
    assert_eq!(tracker.total_xp(), before + 70 + 80 + 60);
    assert_eq!(count_badge(tracker.state(), &cardio_badge), 1);
}

#[test]
fn submission_in_a_new_week_rolls_over_first() {
    let store = MemoryStore::default();
    let mut tracker = onboarded(&store, 5);
    log(&mut tracker, SessionKind::MatchPractice, 60, &[Skill::Matchs]);

    // Sunday still belongs to this week.
    tracker.clock().advance_days(6);
    assert_eq!(
        week_key(tracker.clock().today()),
        tracker.state().challenge_week.unwrap()
    );
    tracker.clock().advance_days(1);
    let today = tracker.clock().today();
    assert_ne!(week_key(today), tracker.state().challenge_week.unwrap());

    log(&mut tracker, SessionKind::Training, 60, &[Skill::Technique]);
    let state = tracker.state();
    assert_eq!(state.challenge_week, Some(week_key(today)));
    let sessions = state
        .challenges
        .iter()
        .find(|c| c.id == ChallengeKind::Sessions)
        .unwrap();
    assert_eq!(sessions.target, 5);
    assert_eq!(sessions.progress, 2);
    let matches = state
        .challenges
        .iter()
        .find(|c| c.id == ChallengeKind::Match)
        .unwrap();
    assert!(matches.completed);
}

#[test]
fn malformed_stored_state_starts_over() {
    let store = MemoryStore::with_raw("{\"onboarded\": tru");
    let tracker =
        Tracker::open(&store, monday(), SequentialIds::default(), Rules::default()).unwrap();
    assert_eq!(tracker.state(), &AppState::default());
    assert!(store.raw().is_none());
}

#[test]
fn unknown_session_types_survive_a_reload() {
    let raw = r#"{
        "onboarded": true,
        "player": {"name": "Alex", "initial_level": "beginner", "weekly_target": 3, "club": ""},
        "sessions": [{
            "id": "old-1", "type": "yoga", "duration_min": 45,
            "skills": ["Physique"], "xp": 50,
            "created_at": "2026-10-12T10:00:00"
        }],
        "skill_xp": {"Physique": 50}
    }"#;
    let store = MemoryStore::with_raw(raw);
    let tracker =
        Tracker::open(&store, monday(), SequentialIds::default(), Rules::default()).unwrap();
    let state = tracker.state();
    assert_eq!(state.sessions[0].kind, SessionKind::Other);
    assert_eq!(state.skill_xp.get(Skill::Technique), 0);
    assert_eq!(tracker.total_xp(), 50);
}

#[test]
fn demo_onboarding_seeds_progress() {
    let store = MemoryStore::default();
    let mut tracker =
        Tracker::open(&store, monday(), SequentialIds::default(), Rules::default()).unwrap();
    tracker.onboard(profile(3), true).unwrap();

    let state = tracker.state();
    assert_eq!(state.sessions.len(), 3);
    // seeded sessions are in the past and do not eat today's allowance
    assert_eq!(tracker.sessions_created_today(), 0);

    let completed: Vec<_> = state
        .challenges
        .iter()
        .filter(|c| c.completed)
        .map(|c| c.id)
        .collect();
    assert_eq!(completed, vec![ChallengeKind::Sessions, ChallengeKind::Match]);
    assert_eq!(tracker.total_xp(), 1680 + 80 + 50);

    assert!(state.badges.contains(&Badge::FirstSession));
    assert!(state.badges.contains(&Badge::StarterProfile));
    assert!(state.badges.contains(&Badge::Xp1000));
    assert_eq!(state.badges.len(), 5);
}

#[test]
fn leaderboard_places_player_among_friends() {
    let friends = default_friends();
    let ranking = rank_players(&friends, "Alex", "Aigles de Lyon", 1500);
    let names: Vec<_> = ranking.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Emma", "Sarah", "Alex", "Lucas", "Yanis"]);
    assert!(ranking[2].is_you);
    assert_eq!(ranking[2].rank, 3);

    let club = club_board(&ranking, "Aigles de Lyon");
    assert_eq!(club.len(), 4);
    assert_eq!(club.iter().find(|e| e.is_you).unwrap().rank, 3);
    assert!(club.iter().all(|e| e.name != "Yanis"));
}
