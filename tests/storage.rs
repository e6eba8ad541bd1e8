//! Progress written to an on-disk database survives a restart.

use chrono::NaiveDate;
use tempfile::TempDir;

use volant::db::SqliteStore;
use volant::models::{AppState, Badge, PlayLevel, SessionDraft, SessionKind, Skill};
use volant::ports::{Clock, FixedClock, SequentialIds, StateStore};
use volant::tracker::{ProfileInput, Rules, Tracker};

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2026, 10, 21)
            .unwrap()
            .and_hms_opt(20, 15, 0)
            .unwrap(),
    )
}

#[test]
fn progress_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("volant.db");

    let saved = {
        let store = SqliteStore::open(&path).unwrap();
        let mut tracker =
            Tracker::open(store, clock(), SequentialIds::default(), Rules::default()).unwrap();
        tracker
            .onboard(
                ProfileInput {
                    name: "Inès".into(),
                    level: PlayLevel::Advanced,
                    weekly_target: 2,
                    club: "Volants 93".into(),
                    avatar: None,
                },
                false,
            )
            .unwrap();
        let today = tracker.clock().today();
        tracker
            .submit_session(
                SessionDraft::new(SessionKind::MatchOfficial, 100, today)
                    .with_skills(&[Skill::Matchs, Skill::Tactique])
                    .with_comment("Won the final in three sets"),
            )
            .unwrap();
        tracker.state().clone()
    };

    let store = SqliteStore::open(&path).unwrap();
    let tracker =
        Tracker::open(store, clock(), SequentialIds::default(), Rules::default()).unwrap();
    assert_eq!(tracker.state(), &saved);

    let state = tracker.state();
    assert_eq!(state.player.as_ref().unwrap().name, "Inès");
    assert_eq!(state.sessions[0].comment.as_deref(), Some("Won the final in three sets"));
    // 120 * 1.2 split over two skills, then the match challenge reward
    assert_eq!(state.skill_xp.get(Skill::Matchs), 72);
    assert_eq!(state.skill_xp.get(Skill::Tactique), 72 + 20);
    assert!(state.badges.contains(&Badge::FirstSession));
}

#[test]
fn logout_persists_empty_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("volant.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        let mut tracker =
            Tracker::open(store, clock(), SequentialIds::default(), Rules::default()).unwrap();
        tracker
            .onboard(
                ProfileInput {
                    name: "Alex".into(),
                    level: PlayLevel::Beginner,
                    weekly_target: 3,
                    club: String::new(),
                    avatar: None,
                },
                true,
            )
            .unwrap();
        tracker.logout().unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.load().unwrap(), Some(AppState::default()));
}
