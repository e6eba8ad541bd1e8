use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::MediaRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl PlayLevel {
    pub fn all() -> [PlayLevel; 3] {
        [
            PlayLevel::Beginner,
            PlayLevel::Intermediate,
            PlayLevel::Advanced,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayLevel::Beginner => "beginner",
            PlayLevel::Intermediate => "intermediate",
            PlayLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for PlayLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" | "debutant" | "débutant" => Ok(PlayLevel::Beginner),
            "intermediate" | "intermediaire" | "intermédiaire" => Ok(PlayLevel::Intermediate),
            "advanced" | "avance" | "avancé" => Ok(PlayLevel::Advanced),
            _ => Err(anyhow::anyhow!(
                "Unknown level: {}. Use: beginner, intermediate, advanced",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub initial_level: PlayLevel,
    pub weekly_target: u32,
    pub club: String,
    #[serde(default)]
    pub avatar: Option<MediaRef>,
}
