use crate::models::{SessionKind, SkillLedger};

pub const SHORT_SESSION_MIN: u32 = 45;
pub const LONG_SESSION_MIN: u32 = 90;
pub const SHORT_SESSION_FACTOR: f64 = 0.8;
pub const LONG_SESSION_FACTOR: f64 = 1.2;
pub const PARTNER_BONUS: f64 = 15.0;
pub const PHOTO_BONUS: f64 = 10.0;

pub fn base_xp(kind: SessionKind) -> f64 {
    match kind {
        SessionKind::Training => 70.0,
        SessionKind::MatchPractice => 90.0,
        SessionKind::MatchOfficial => 120.0,
        SessionKind::Cardio => 60.0,
        SessionKind::Other => 50.0,
    }
}

/// XP recorded on a session: base by kind, scaled by duration bracket, plus
/// flat bonuses for a tagged partner and an attached photo.
pub fn session_xp(kind: SessionKind, duration_min: u32, has_partner: bool, has_photo: bool) -> u64 {
    let mut xp = base_xp(kind);
    if duration_min < SHORT_SESSION_MIN {
        xp *= SHORT_SESSION_FACTOR;
    }
    if duration_min >= LONG_SESSION_MIN {
        xp *= LONG_SESSION_FACTOR;
    }
    if has_partner {
        xp += PARTNER_BONUS;
    }
    if has_photo {
        xp += PHOTO_BONUS;
    }
    xp.round() as u64
}

/// Share of a session's XP credited to each worked skill. Rounded per skill,
/// so the shares need not add back up to the session total.
pub fn per_skill_award(session_xp: u64, skill_count: usize) -> u64 {
    if skill_count == 0 {
        return 0;
    }
    let share = (session_xp as f64 / skill_count as f64).round() as u64;
    share.max(1)
}

pub fn total_xp(ledger: &SkillLedger) -> u64 {
    ledger.total()
}
