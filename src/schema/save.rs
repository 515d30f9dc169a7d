use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::scene::SceneAddress;

/// Current save format version. Bump on any field change.
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("unsupported save version {found} (expected {SAVE_VERSION})")]
    UnsupportedVersion { found: u32 },
}

/// Everything needed to resume a playthrough: the four counters, both
/// inventories, the remaining scene pool, and the current address.
///
/// The quiz streak and RNG position are deliberately not captured; a
/// restored session starts with a cold streak and continues on the
/// machine's own seed stream. Inventories are stored as sorted pairs so
/// the serialized text is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    #[serde(default)]
    pub version: u32,
    pub lives: i32,
    pub sense: i32,
    pub money: i32,
    pub treasures: i32,
    pub items: Vec<(String, u32)>,
    pub abilities: Vec<(String, u32)>,
    pub pool: Vec<String>,
    pub current: Option<SceneAddress>,
}

impl SaveState {
    /// Parses a save from RON text, rejecting unknown format versions.
    pub fn parse_ron(input: &str) -> Result<SaveState, SaveError> {
        let save: SaveState = ron::from_str(input)?;
        if save.version != SAVE_VERSION {
            return Err(SaveError::UnsupportedVersion { found: save.version });
        }
        Ok(save)
    }

    /// Serializes the save as pretty-printed RON.
    pub fn to_ron(&self) -> Result<String, SaveError> {
        let serialized = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        Ok(serialized)
    }

    /// Loads and version-checks a save file.
    pub fn load_from_ron(path: &Path) -> Result<SaveState, SaveError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Writes the save to a RON file.
    pub fn save_to_ron(&self, path: &Path) -> Result<(), SaveError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_save() -> SaveState {
        SaveState {
            version: SAVE_VERSION,
            lives: 2,
            sense: 3,
            money: 1,
            treasures: 2,
            items: vec![("보석".to_string(), 1), ("지도".to_string(), 2)],
            abilities: vec![("자물쇠 따기".to_string(), 1)],
            pool: vec!["beach".to_string(), "cave".to_string()],
            current: Some(SceneAddress::new("beach", "first")),
        }
    }

    #[test]
    fn ron_round_trip_preserves_everything() {
        let save = make_save();
        let text = save.to_ron().unwrap();
        let loaded = SaveState::parse_ron(&text).unwrap();
        assert_eq!(loaded, save);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut save = make_save();
        save.version = 99;
        let text = save.to_ron().unwrap();
        match SaveState::parse_ron(&text) {
            Err(SaveError::UnsupportedVersion { found }) => assert_eq!(found, 99),
            other => panic!("expected version error, got {:?}", other),
        }
    }

    #[test]
    fn missing_version_reads_as_zero_and_fails() {
        let text = r#"(
            lives: 3,
            sense: 3,
            money: 3,
            treasures: 0,
            items: [],
            abilities: [],
            pool: [],
            current: None,
        )"#;
        match SaveState::parse_ron(text) {
            Err(SaveError::UnsupportedVersion { found }) => assert_eq!(found, 0),
            other => panic!("expected version error, got {:?}", other),
        }
    }

    #[test]
    fn file_round_trip() {
        let save = make_save();
        let path = std::env::temp_dir().join("gamebook_save_test.ron");

        save.save_to_ron(&path).unwrap();
        let loaded = SaveState::load_from_ron(&path).unwrap();
        assert_eq!(loaded, save);

        // Cleanup
        let _ = std::fs::remove_file(&path);
    }
}
