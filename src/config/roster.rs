use crate::core::{Roster, RosterSource};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 從 JSON 檔案讀取名單（groups.json 格式）
#[derive(Debug, Clone)]
pub struct JsonFileRoster {
    path: PathBuf,
}

impl JsonFileRoster {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RosterSource for JsonFileRoster {
    fn load_roster(&self) -> Result<Roster> {
        tracing::debug!("Reading roster from {}", self.path.display());
        let content = std::fs::read_to_string(&self.path)?;
        let roster = Roster::from_json_str(&content)?;
        roster.validate_structure()?;

        tracing::info!(
            "📋 Loaded {} teams in {} groups",
            roster.team_count(),
            roster.groups.len()
        );
        Ok(roster)
    }
}
