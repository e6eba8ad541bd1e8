use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::leaderboard::{default_friends, Friend};
use crate::tracker::{Rules, DEFAULT_DAILY_LIMIT};

fn default_club() -> String {
    "Aigles de Lyon".to_string()
}
fn default_weekly_target() -> u32 {
    3
}
fn default_daily_limit() -> usize {
    DEFAULT_DAILY_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Club suggested by the setup wizard
    #[serde(default = "default_club")]
    pub default_club: String,
    #[serde(default = "default_weekly_target")]
    pub default_weekly_target: u32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            default_club: default_club(),
            default_weekly_target: default_weekly_target(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_daily_limit")]
    pub daily_limit: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            daily_limit: default_daily_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityConfig {
    #[serde(default = "default_friends")]
    pub friends: Vec<Friend>,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            friends: default_friends(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub community: CommunityConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "volant").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("volant.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing config.toml")
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn tracker_rules(&self) -> Rules {
        Rules {
            daily_limit: self.rules.daily_limit,
        }
    }
}
