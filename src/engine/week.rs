use chrono::{Datelike, NaiveDate};
use log::info;

use crate::engine::challenges::create_weekly_challenges;
use crate::models::{AppState, WeekKey};

/// `ceil((days since Jan 1 + weekday of Jan 1) / 7)`, weekday counted from
/// Sunday. Weeks therefore turn over on Monday. When January 1 is a Sunday
/// that day alone lands in week 0.
pub fn week_key(date: NaiveDate) -> WeekKey {
    let jan1_offset = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    WeekKey {
        year: date.year(),
        week: (date.ordinal0() + jan1_offset).div_ceil(7),
    }
}

/// Replaces the challenge set when the stored week is not the current one.
/// Progress starts at zero and is only filled in by the next evaluation.
/// Returns true when the set was regenerated; the caller persists.
pub fn refresh_week(state: &mut AppState, today: NaiveDate, weekly_target: u32) -> bool {
    let current = week_key(today);
    if state.challenge_week == Some(current) {
        return false;
    }
    info!(
        "week rollover {} -> {}",
        state
            .challenge_week
            .map(|k| k.to_string())
            .unwrap_or_else(|| "none".to_string()),
        current
    );
    state.challenges = create_weekly_challenges(weekly_target);
    state.challenge_week = Some(current);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_key_first_week() {
        // 2026-01-01 is a Thursday; the first Monday is the 5th.
        assert_eq!(week_key(date(2026, 1, 1)), WeekKey { year: 2026, week: 1 });
        assert_eq!(week_key(date(2026, 1, 4)), WeekKey { year: 2026, week: 1 });
        assert_eq!(week_key(date(2026, 1, 5)), WeekKey { year: 2026, week: 2 });
    }

    #[test]
    fn test_week_turns_over_on_monday() {
        assert_eq!(week_key(date(2026, 10, 17)).week, 42);
        assert_eq!(week_key(date(2026, 10, 18)).week, 42);
        assert_eq!(week_key(date(2026, 10, 19)).week, 43);
        assert_eq!(week_key(date(2026, 10, 25)).week, 43);
        assert_eq!(week_key(date(2026, 10, 26)).week, 44);
    }

    #[test]
    fn test_week_key_when_year_starts_on_sunday() {
        // 2023-01-01 is a Sunday.
        assert_eq!(week_key(date(2023, 1, 1)).week, 0);
        assert_eq!(week_key(date(2023, 1, 2)).week, 1);
        assert_eq!(week_key(date(2023, 1, 8)).week, 1);
        assert_eq!(week_key(date(2023, 1, 9)).week, 2);
    }

    #[test]
    fn test_week_key_when_year_starts_on_monday() {
        // 2024-01-01 is a Monday.
        assert_eq!(week_key(date(2024, 1, 1)).week, 1);
        assert_eq!(week_key(date(2024, 1, 7)).week, 1);
        assert_eq!(week_key(date(2024, 1, 8)).week, 2);
    }

    #[test]
    fn test_refresh_is_noop_within_the_same_week() {
        let mut state = AppState::default();
        assert!(refresh_week(&mut state, date(2026, 10, 19), 3));
        state.challenges[0].progress = 2;
        assert!(!refresh_week(&mut state, date(2026, 10, 24), 3));
        assert_eq!(state.challenges[0].progress, 2);
    }

    #[test]
    fn test_refresh_resets_on_new_week() {
        let mut state = AppState::default();
        refresh_week(&mut state, date(2026, 10, 19), 3);
        for c in state.challenges.iter_mut() {
            c.progress = c.target;
            c.completed = true;
        }

        assert!(refresh_week(&mut state, date(2026, 10, 26), 4));
        assert_eq!(state.challenge_week, Some(WeekKey { year: 2026, week: 44 }));
        assert_eq!(state.challenges.len(), 3);
        assert!(state.challenges.iter().all(|c| c.progress == 0 && !c.completed));
        assert_eq!(state.challenges[0].target, 4);
    }
}
