use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Sessions,
    Cardio,
    Match,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyChallenge {
    pub id: ChallengeKind,
    pub title: String,
    pub description: String,
    pub target: u32,
    pub progress: u32,
    pub reward_xp: u64,
    pub completed: bool,
}

impl WeeklyChallenge {
    pub fn progress_percent(&self) -> u32 {
        if self.target == 0 {
            return 100;
        }
        let pct = (100.0 * self.progress as f64 / self.target as f64).round() as u32;
        pct.min(100)
    }
}

/// Year plus week number; weeks start on Monday and week 1 holds January 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{}", self.year, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, week) = s
            .split_once("-W")
            .ok_or_else(|| anyhow::anyhow!("Bad week key '{}'", s))?;
        Ok(WeekKey {
            year: year.parse()?,
            week: week.parse()?,
        })
    }
}

impl TryFrom<String> for WeekKey {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WeekKey> for String {
    fn from(key: WeekKey) -> Self {
        key.to_string()
    }
}
