use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FirstSession,
    Regular,
    Xp1000,
    Persistent,
    StarterProfile,
    ChallengeCompleted { title: String },
}

/// Unlocked badges in unlock order. Never shrinks, never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Badge>", into = "Vec<Badge>")]
pub struct BadgeSet {
    badges: Vec<Badge>,
}

impl BadgeSet {
    /// Returns true when the badge was not held before.
    pub fn unlock(&mut self, badge: Badge) -> bool {
        if self.badges.contains(&badge) {
            return false;
        }
        self.badges.push(badge);
        true
    }

    pub fn contains(&self, badge: &Badge) -> bool {
        self.badges.contains(badge)
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter()
    }
}

impl From<Vec<Badge>> for BadgeSet {
    fn from(stored: Vec<Badge>) -> Self {
        let mut set = BadgeSet::default();
        for badge in stored {
            set.unlock(badge);
        }
        set
    }
}

impl From<BadgeSet> for Vec<Badge> {
    fn from(set: BadgeSet) -> Self {
        set.badges
    }
}
