use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::{MediaRef, Skill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Training,
    MatchPractice,
    MatchOfficial,
    Cardio,
    /// Anything a newer or older build wrote that this one does not know.
    #[serde(other)]
    Other,
}

impl SessionKind {
    pub fn all() -> [SessionKind; 4] {
        [
            SessionKind::Training,
            SessionKind::MatchPractice,
            SessionKind::MatchOfficial,
            SessionKind::Cardio,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Training => "training",
            SessionKind::MatchPractice => "match_practice",
            SessionKind::MatchOfficial => "match_official",
            SessionKind::Cardio => "cardio",
            SessionKind::Other => "other",
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, SessionKind::MatchPractice | SessionKind::MatchOfficial)
    }
}

impl FromStr for SessionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "training" | "entrainement" => Ok(SessionKind::Training),
            "match_practice" | "practice" => Ok(SessionKind::MatchPractice),
            "match_official" | "official" | "match" => Ok(SessionKind::MatchOfficial),
            "cardio" | "physique" => Ok(SessionKind::Cardio),
            _ => Err(anyhow::anyhow!(
                "Unknown session type: {}. Use: training, match_practice, match_official, cardio",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub duration_min: u32,
    #[serde(default)]
    pub performed_on: Option<NaiveDate>,
    pub skills: Vec<Skill>,
    pub xp: u64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub friend: Option<String>,
    /// Older records carried a peer-validation flag instead of a friend tag.
    #[serde(default)]
    pub validated: bool,
    #[serde(default)]
    pub photo: Option<MediaRef>,
    pub created_at: NaiveDateTime,
}

impl Session {
    /// The calendar day the session counts for.
    pub fn activity_date(&self) -> NaiveDate {
        self.performed_on.unwrap_or_else(|| self.created_at.date())
    }

    pub fn has_partner(&self) -> bool {
        self.friend.is_some() || self.validated
    }
}

/// Everything the player fills in before a session is accepted.
#[derive(Debug, Clone, Default)]
pub struct SessionDraft {
    pub kind: Option<SessionKind>,
    pub duration_min: u32,
    pub performed_on: Option<NaiveDate>,
    pub skills: Vec<Skill>,
    pub comment: Option<String>,
    pub friend: Option<String>,
    pub validated: bool,
    pub photo: Option<MediaRef>,
}

impl SessionDraft {
    pub fn new(kind: SessionKind, duration_min: u32, performed_on: NaiveDate) -> Self {
        Self {
            kind: Some(kind),
            duration_min,
            performed_on: Some(performed_on),
            ..Default::default()
        }
    }

    pub fn with_skills(mut self, skills: &[Skill]) -> Self {
        self.skills = skills.to_vec();
        self
    }

    pub fn with_friend(mut self, friend: &str) -> Self {
        self.friend = Some(friend.to_string());
        self
    }

    pub fn with_photo(mut self, photo: MediaRef) -> Self {
        self.photo = Some(photo);
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_stored_kind_falls_back_to_other() {
        let kind: SessionKind = serde_json::from_str("\"yoga\"").unwrap();
        assert_eq!(kind, SessionKind::Other);
        let kind: SessionKind = serde_json::from_str("\"match_official\"").unwrap();
        assert_eq!(kind, SessionKind::MatchOfficial);
    }

    #[test]
    fn test_match_kinds() {
        assert!(SessionKind::MatchPractice.is_match());
        assert!(SessionKind::MatchOfficial.is_match());
        assert!(!SessionKind::Training.is_match());
        assert!(!SessionKind::Other.is_match());
    }

    #[test]
    fn test_activity_date_falls_back_to_creation_day() {
        let created = NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let mut session = Session {
            id: "a".into(),
            kind: SessionKind::Training,
            duration_min: 60,
            performed_on: None,
            skills: vec![Skill::Technique],
            xp: 70,
            comment: None,
            friend: None,
            validated: false,
            photo: None,
            created_at: created,
        };
        assert_eq!(session.activity_date(), created.date());

        let played = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        session.performed_on = Some(played);
        assert_eq!(session.activity_date(), played);
    }
}
