/// XP needed to go from level 1 to level 2.
pub const FIRST_LEVEL_XP: u64 = 120;

/// Each level costs this much more than the previous one, rounded per step.
pub const LEVEL_GROWTH: f64 = 1.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub level: u32,
    pub current_in_level: u64,
    pub next_level_target: u64,
    pub progress_percent: u32,
}

/// Walks the threshold curve one level at a time. The threshold is rounded
/// at every step, so boundaries cannot be derived from a closed form.
pub fn xp_to_level(xp: u64) -> LevelInfo {
    let mut level = 1u32;
    let mut remaining = xp;
    let mut threshold = FIRST_LEVEL_XP;

    while remaining >= threshold {
        remaining -= threshold;
        level += 1;
        threshold = (threshold as f64 * LEVEL_GROWTH).round() as u64;
    }

    let pct = (100.0 * remaining as f64 / threshold as f64).round() as u32;
    LevelInfo {
        level,
        current_in_level: remaining,
        next_level_target: threshold,
        progress_percent: pct.min(100),
    }
}
