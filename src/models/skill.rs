use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Technique,
    #[serde(rename = "Déplacements")]
    Deplacements,
    Tactique,
    Physique,
    Matchs,
}

impl Skill {
    pub fn all() -> [Skill; 5] {
        [
            Skill::Technique,
            Skill::Deplacements,
            Skill::Tactique,
            Skill::Physique,
            Skill::Matchs,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Technique => "technique",
            Skill::Deplacements => "deplacements",
            Skill::Tactique => "tactique",
            Skill::Physique => "physique",
            Skill::Matchs => "matchs",
        }
    }
}

impl FromStr for Skill {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "technique" => Ok(Skill::Technique),
            "deplacements" | "déplacements" | "footwork" => Ok(Skill::Deplacements),
            "tactique" | "tactics" => Ok(Skill::Tactique),
            "physique" | "physical" => Ok(Skill::Physique),
            "matchs" | "matches" => Ok(Skill::Matchs),
            _ => Err(anyhow::anyhow!("Unknown skill: {}", s)),
        }
    }
}

/// Cumulative XP per skill. Every skill is always present, zero included,
/// and values only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Skill, u64>", into = "BTreeMap<Skill, u64>")]
pub struct SkillLedger {
    xp: BTreeMap<Skill, u64>,
}

impl Default for SkillLedger {
    fn default() -> Self {
        Self {
            xp: Skill::all().into_iter().map(|s| (s, 0)).collect(),
        }
    }
}

impl SkillLedger {
    pub fn get(&self, skill: Skill) -> u64 {
        self.xp.get(&skill).copied().unwrap_or(0)
    }

    pub fn add(&mut self, skill: Skill, amount: u64) {
        *self.xp.entry(skill).or_insert(0) += amount;
    }

    /// Overwrite the ledger wholesale. Only the demo bootstrap does this,
    /// on a state that has no sessions yet.
    pub fn set(&mut self, skill: Skill, amount: u64) {
        self.xp.insert(skill, amount);
    }

    /// Every skill in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, u64)> + '_ {
        self.xp.iter().map(|(skill, xp)| (*skill, *xp))
    }

    pub fn total(&self) -> u64 {
        self.xp.values().sum()
    }
}

impl From<BTreeMap<Skill, u64>> for SkillLedger {
    fn from(stored: BTreeMap<Skill, u64>) -> Self {
        let mut ledger = SkillLedger::default();
        for (skill, xp) in stored {
            ledger.set(skill, xp);
        }
        ledger
    }
}

impl From<SkillLedger> for BTreeMap<Skill, u64> {
    fn from(ledger: SkillLedger) -> Self {
        ledger.xp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ledger_has_every_skill_at_zero() {
        let ledger = SkillLedger::default();
        assert_eq!(ledger.iter().count(), 5);
        assert!(ledger.iter().all(|(_, xp)| xp == 0));
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn test_partial_stored_ledger_fills_missing_skills() {
        let json = r#"{"Technique": 40, "Déplacements": 12}"#;
        let ledger: SkillLedger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.get(Skill::Technique), 40);
        assert_eq!(ledger.get(Skill::Deplacements), 12);
        assert_eq!(ledger.get(Skill::Matchs), 0);
        assert_eq!(ledger.iter().count(), 5);
    }

    #[test]
    fn test_iter_follows_skill_order() {
        let mut ledger = SkillLedger::default();
        ledger.add(Skill::Matchs, 30);
        ledger.add(Skill::Technique, 10);
        let skills: Vec<Skill> = ledger.iter().map(|(s, _)| s).collect();
        assert_eq!(skills, Skill::all().to_vec());
        assert_eq!(ledger.iter().map(|(_, xp)| xp).sum::<u64>(), ledger.total());
    }

    #[test]
    fn test_skill_parsing_accepts_accents_and_english() {
        assert_eq!(Skill::from_str("Déplacements").unwrap(), Skill::Deplacements);
        assert_eq!(Skill::from_str("footwork").unwrap(), Skill::Deplacements);
        assert_eq!(Skill::from_str("TACTICS").unwrap(), Skill::Tactique);
        assert!(Skill::from_str("serve").is_err());
    }
}
