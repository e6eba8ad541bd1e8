//! Orchestration over the progression engine.
//!
//! The tracker owns the live [`AppState`] and is the only place that calls
//! the store. Every mutating operation validates first, applies its change,
//! runs the evaluations that depend on it and then persists the whole
//! document once.

use log::{debug, info};

use crate::demo::seed_demo_progress;
use crate::engine::{self, LevelInfo};
use crate::error::{ProfileError, SessionError, StoreError};
use crate::models::{
    AppState, Badge, ChallengeKind, MediaRef, PlayLevel, Player, Session, SessionDraft, Skill,
};
use crate::ports::{Clock, IdSource, StateStore, SystemClock, UuidSource};

pub const MIN_DURATION_MIN: u32 = 20;
pub const MAX_DURATION_MIN: u32 = 240;
pub const MAX_COMMENT_CHARS: usize = 180;
pub const DEFAULT_DAILY_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct Rules {
    /// Sessions that may be created on one calendar day.
    pub daily_limit: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            daily_limit: DEFAULT_DAILY_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub name: String,
    pub level: PlayLevel,
    pub weekly_target: u32,
    pub club: String,
    pub avatar: Option<MediaRef>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub weekly_target: Option<u32>,
    pub club: Option<String>,
    pub avatar: Option<MediaRef>,
}

/// What a successful submission changed.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReceipt {
    pub session_id: String,
    pub xp: u64,
    pub per_skill: u64,
    pub new_badges: Vec<Badge>,
    pub completed_challenges: Vec<ChallengeKind>,
}

pub struct Tracker<S: StateStore, C: Clock = SystemClock, I: IdSource = UuidSource> {
    state: AppState,
    store: S,
    clock: C,
    ids: I,
    rules: Rules,
}

impl<S: StateStore, C: Clock, I: IdSource> Tracker<S, C, I> {
    /// Loads stored state, or starts from the empty default when nothing
    /// usable is stored.
    pub fn open(store: S, clock: C, ids: I, rules: Rules) -> Result<Self, StoreError> {
        let state = store.load()?.unwrap_or_default();
        debug!(
            "tracker opened: onboarded={} sessions={}",
            state.onboarded,
            state.sessions.len()
        );
        Ok(Self {
            state,
            store,
            clock,
            ids,
            rules,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn player(&self) -> Option<&Player> {
        self.state.player.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Writes `next` first and only then swaps it in. A failed write leaves
    /// the live state as it was.
    fn commit(&mut self, next: AppState) -> Result<(), StoreError> {
        self.store.save(&next)?;
        self.state = next;
        Ok(())
    }

    // ─── Onboarding & profile ────────────────────────────────────────────────

    pub fn onboard(&mut self, input: ProfileInput, with_demo: bool) -> Result<(), ProfileError> {
        if self.state.onboarded {
            return Err(ProfileError::AlreadyOnboarded);
        }
        let name = validate_name(&input.name)?;
        validate_weekly_target(input.weekly_target)?;

        let mut next = self.state.clone();
        next.onboarded = true;
        next.player = Some(Player {
            name,
            initial_level: input.level,
            weekly_target: input.weekly_target,
            club: input.club.trim().to_string(),
            avatar: input.avatar,
        });
        next.challenges = engine::create_weekly_challenges(input.weekly_target);
        next.challenge_week = Some(engine::week_key(self.clock.today()));

        if with_demo && seed_demo_progress(&mut next, &self.clock, &self.ids) {
            info!("seeded demo progress");
        }
        engine::evaluate_challenges(&mut next);
        engine::evaluate_badges(&mut next);

        self.commit(next)?;
        info!("onboarded player {:?}", self.player().map(|p| p.name.as_str()));
        Ok(())
    }

    /// A new weekly target only shapes the next generated week.
    pub fn update_profile(&mut self, edit: ProfileEdit) -> Result<(), ProfileError> {
        let name = edit.name.as_deref().map(validate_name).transpose()?;
        if let Some(target) = edit.weekly_target {
            validate_weekly_target(target)?;
        }
        let mut next = self.state.clone();
        let player = next.player.as_mut().ok_or(ProfileError::NotOnboarded)?;

        if let Some(name) = name {
            player.name = name;
        }
        if let Some(target) = edit.weekly_target {
            player.weekly_target = target;
        }
        if let Some(club) = edit.club {
            player.club = club.trim().to_string();
        }
        if let Some(avatar) = edit.avatar {
            player.avatar = Some(avatar);
        }
        self.commit(next)?;
        Ok(())
    }

    /// Back to the empty default state, persisted.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.commit(AppState::default())?;
        info!("state cleared");
        Ok(())
    }

    // ─── Sessions ────────────────────────────────────────────────────────────

    pub fn sessions_created_today(&self) -> usize {
        let today = self.clock.today();
        self.state
            .sessions
            .iter()
            .filter(|s| s.created_at.date() == today)
            .count()
    }

    /// Apply a session, evaluate badges, evaluate challenges, persist.
    /// A rejected draft or a failed save leaves state and store untouched.
    pub fn submit_session(&mut self, draft: SessionDraft) -> Result<SessionReceipt, SessionError> {
        let weekly_target = match &self.state.player {
            Some(p) if self.state.onboarded => p.weekly_target,
            _ => return Err(SessionError::NotOnboarded),
        };
        if self.sessions_created_today() >= self.rules.daily_limit {
            return Err(SessionError::DailyLimitReached(self.rules.daily_limit));
        }

        let kind = draft.kind.ok_or(SessionError::MissingKind)?;
        let mut skills: Vec<Skill> = Vec::with_capacity(draft.skills.len());
        for skill in draft.skills {
            if !skills.contains(&skill) {
                skills.push(skill);
            }
        }
        if skills.is_empty() {
            return Err(SessionError::NoSkills);
        }
        let performed_on = draft.performed_on.ok_or(SessionError::MissingDate)?;
        if performed_on > self.clock.today() {
            return Err(SessionError::FutureDate(performed_on));
        }
        if !(MIN_DURATION_MIN..=MAX_DURATION_MIN).contains(&draft.duration_min) {
            return Err(SessionError::DurationOutOfRange(draft.duration_min));
        }
        let comment = draft
            .comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if comment
            .as_ref()
            .is_some_and(|c| c.chars().count() > MAX_COMMENT_CHARS)
        {
            return Err(SessionError::CommentTooLong);
        }
        let friend = draft
            .friend
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());

        let has_partner = friend.is_some() || draft.validated;
        let xp = engine::session_xp(kind, draft.duration_min, has_partner, draft.photo.is_some());
        let per_skill = engine::per_skill_award(xp, skills.len());
        let mut next = self.state.clone();
        for skill in &skills {
            next.skill_xp.add(*skill, per_skill);
        }

        let session = Session {
            id: self.ids.next_id(),
            kind,
            duration_min: draft.duration_min,
            performed_on: Some(performed_on),
            skills,
            xp,
            comment,
            friend,
            validated: draft.validated,
            photo: draft.photo,
            created_at: self.clock.now(),
        };
        let session_id = session.id.clone();
        info!(
            "session {} accepted: {} {}min +{} XP",
            session_id,
            kind.as_str(),
            session.duration_min,
            xp
        );
        next.sessions.push(session);

        let mut new_badges = engine::evaluate_badges(&mut next);
        engine::refresh_week(&mut next, self.clock.today(), weekly_target);
        let badges_before = next.badges.len();
        let completed_challenges = engine::evaluate_challenges(&mut next);
        new_badges.extend(next.badges.iter().skip(badges_before).cloned());

        self.commit(next)?;
        Ok(SessionReceipt {
            session_id,
            xp,
            per_skill,
            new_badges,
            completed_challenges,
        })
    }

    // ─── Challenges ──────────────────────────────────────────────────────────

    /// Regenerates the weekly set if the week changed and persists straight
    /// away. Call before showing challenges.
    pub fn refresh_challenges(&mut self) -> Result<bool, StoreError> {
        let Some(target) = self.state.player.as_ref().map(|p| p.weekly_target) else {
            return Ok(false);
        };
        let mut next = self.state.clone();
        let rolled = engine::refresh_week(&mut next, self.clock.today(), target);
        if rolled {
            self.commit(next)?;
        }
        Ok(rolled)
    }

    // ─── Queries ─────────────────────────────────────────────────────────────

    pub fn total_xp(&self) -> u64 {
        engine::total_xp(&self.state.skill_xp)
    }

    pub fn level(&self) -> LevelInfo {
        engine::xp_to_level(self.total_xp())
    }

    pub fn skill_levels(&self) -> Vec<(Skill, u64, LevelInfo)> {
        self.state
            .skill_xp
            .iter()
            .map(|(s, xp)| (s, xp, engine::xp_to_level(xp)))
            .collect()
    }

    /// Most recent first.
    pub fn recent_sessions(&self, limit: usize) -> impl Iterator<Item = &Session> {
        self.state.sessions.iter().rev().take(limit)
    }
}

fn validate_name(name: &str) -> Result<String, ProfileError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProfileError::EmptyName);
    }
    Ok(name.to_string())
}

fn validate_weekly_target(target: u32) -> Result<(), ProfileError> {
    if target < 1 {
        return Err(ProfileError::WeeklyTargetTooLow);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionKind;
    use crate::ports::{FixedClock, MemoryStore, SequentialIds};
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
        )
    }

    fn profile() -> ProfileInput {
        ProfileInput {
            name: "  Alex ".to_string(),
            level: PlayLevel::Intermediate,
            weekly_target: 3,
            club: "Aigles de Lyon".to_string(),
            avatar: None,
        }
    }

    fn onboarded(store: &MemoryStore) -> Tracker<&MemoryStore, FixedClock, SequentialIds> {
        let mut tracker =
            Tracker::open(store, clock(), SequentialIds::default(), Rules::default()).unwrap();
        tracker.onboard(profile(), false).unwrap();
        tracker
    }

    #[test]
    fn test_onboarding_trims_and_generates_week() {
        let store = MemoryStore::default();
        let tracker = onboarded(&store);
        let state = tracker.state();
        assert!(state.onboarded);
        assert_eq!(state.player.as_ref().unwrap().name, "Alex");
        assert_eq!(state.challenges.len(), 3);
        assert_eq!(state.challenge_week.unwrap().to_string(), "2026-W43");
        assert!(state.badges.is_empty());
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_onboarding_rejects_bad_profiles() {
        let store = MemoryStore::default();
        let mut tracker =
            Tracker::open(&store, clock(), SequentialIds::default(), Rules::default()).unwrap();

        let mut input = profile();
        input.name = "   ".into();
        assert!(matches!(
            tracker.onboard(input, false),
            Err(ProfileError::EmptyName)
        ));

        let mut input = profile();
        input.weekly_target = 0;
        assert!(matches!(
            tracker.onboard(input, false),
            Err(ProfileError::WeeklyTargetTooLow)
        ));
        assert_eq!(store.save_count(), 0);

        tracker.onboard(profile(), false).unwrap();
        assert!(matches!(
            tracker.onboard(profile(), false),
            Err(ProfileError::AlreadyOnboarded)
        ));
    }

    #[test]
    fn test_submission_splits_xp_across_skills() {
        let store = MemoryStore::default();
        let mut tracker = onboarded(&store);
        let today = tracker.clock().today();

        let draft = SessionDraft::new(SessionKind::Training, 40, today)
            .with_skills(&[Skill::Technique, Skill::Deplacements])
            .with_friend("Lucas")
            .with_photo(MediaRef {
                path: "/tmp/p.jpg".into(),
                size_bytes: 10,
            });
        let receipt = tracker.submit_session(draft).unwrap();

        assert_eq!(receipt.xp, 81);
        assert_eq!(receipt.per_skill, 41);
        assert_eq!(receipt.new_badges, vec![Badge::FirstSession]);
        assert!(receipt.completed_challenges.is_empty());
        assert_eq!(tracker.state().skill_xp.get(Skill::Technique), 41);
        assert_eq!(tracker.state().skill_xp.get(Skill::Deplacements), 41);
        assert_eq!(tracker.total_xp(), 82);
        assert_eq!(tracker.state().sessions[0].id, "session-1");
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let store = MemoryStore::default();
        let mut tracker = onboarded(&store);
        let today = tracker.clock().today();
        let before = tracker.state().clone();
        let saves = store.save_count();

        let no_skill = SessionDraft::new(SessionKind::Cardio, 60, today);
        assert!(matches!(
            tracker.submit_session(no_skill),
            Err(SessionError::NoSkills)
        ));

        let future = SessionDraft::new(SessionKind::Cardio, 60, today.succ_opt().unwrap())
            .with_skills(&[Skill::Physique]);
        assert!(matches!(
            tracker.submit_session(future),
            Err(SessionError::FutureDate(_))
        ));

        let mut undated =
            SessionDraft::new(SessionKind::Cardio, 60, today).with_skills(&[Skill::Physique]);
        undated.performed_on = None;
        assert!(matches!(
            tracker.submit_session(undated),
            Err(SessionError::MissingDate)
        ));

        let too_short =
            SessionDraft::new(SessionKind::Cardio, 19, today).with_skills(&[Skill::Physique]);
        assert!(matches!(
            tracker.submit_session(too_short),
            Err(SessionError::DurationOutOfRange(19))
        ));

        let chatty = SessionDraft::new(SessionKind::Cardio, 60, today)
            .with_skills(&[Skill::Physique])
            .with_comment(&"x".repeat(181));
        assert!(matches!(
            tracker.submit_session(chatty),
            Err(SessionError::CommentTooLong)
        ));

        assert_eq!(tracker.state(), &before);
        assert_eq!(store.save_count(), saves);
    }

    #[test]
    fn test_daily_limit() {
        let store = MemoryStore::default();
        let mut tracker = onboarded(&store);
        let today = tracker.clock().today();
        let draft =
            || SessionDraft::new(SessionKind::Training, 60, today).with_skills(&[Skill::Technique]);

        for _ in 0..3 {
            tracker.submit_session(draft()).unwrap();
        }
        assert!(matches!(
            tracker.submit_session(draft()),
            Err(SessionError::DailyLimitReached(3))
        ));

        tracker.clock().advance_days(1);
        assert!(tracker.submit_session(draft()).is_ok());
    }

    #[test]
    fn test_duplicate_skills_count_once() {
        let store = MemoryStore::default();
        let mut tracker = onboarded(&store);
        let today = tracker.clock().today();
        let draft = SessionDraft::new(SessionKind::Cardio, 60, today)
            .with_skills(&[Skill::Physique, Skill::Physique]);
        let receipt = tracker.submit_session(draft).unwrap();
        assert_eq!(receipt.per_skill, 60);
        assert_eq!(tracker.state().sessions[0].skills, vec![Skill::Physique]);
    }

    #[test]
    fn test_failed_save_keeps_state_unchanged() {
        let store = MemoryStore::default();
        let mut tracker = onboarded(&store);
        let today = tracker.clock().today();
        let stored = store.raw();

        store.set_read_only(true);
        let draft =
            SessionDraft::new(SessionKind::Training, 60, today).with_skills(&[Skill::Technique]);
        assert!(matches!(
            tracker.submit_session(draft.clone()),
            Err(SessionError::Store(_))
        ));
        assert!(tracker.state().sessions.is_empty());
        assert_eq!(tracker.total_xp(), 0);
        assert_eq!(store.raw(), stored);

        store.set_read_only(false);
        tracker.submit_session(draft).unwrap();
        assert_eq!(tracker.state().sessions.len(), 1);
        assert_eq!(tracker.total_xp(), 70);
    }

    #[test]
    fn test_profile_edit_and_logout() {
        let store = MemoryStore::default();
        let mut tracker = onboarded(&store);

        tracker
            .update_profile(ProfileEdit {
                weekly_target: Some(5),
                club: Some("Volants 93".into()),
                ..Default::default()
            })
            .unwrap();
        let player = tracker.player().unwrap();
        assert_eq!(player.weekly_target, 5);
        assert_eq!(player.club, "Volants 93");
        // current week keeps its target
        assert_eq!(tracker.state().challenges[0].target, 3);

        assert!(matches!(
            tracker.update_profile(ProfileEdit {
                name: Some(" ".into()),
                ..Default::default()
            }),
            Err(ProfileError::EmptyName)
        ));

        tracker.logout().unwrap();
        assert_eq!(tracker.state(), &AppState::default());
        assert!(matches!(
            tracker.update_profile(ProfileEdit::default()),
            Err(ProfileError::NotOnboarded)
        ));
    }
}
