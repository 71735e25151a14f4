//! Server settings.
//!
//! Settings bound the game: how many players may join, hand size, how
//! many points win, and whether the judge rotates. They are loaded once at
//! startup through a [`SettingsSource`] and never change afterwards.
//!
//! There is no safe fallback for these values, so a settings file that is
//! missing, malformed, or inconsistent is an error rather than a default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings file read when none is configured.
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Settings loading errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game server settings.
///
/// Every field is optional in the settings file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name shown on status surfaces.
    pub server_name: String,

    /// Players needed before a round can start.
    pub min_players: usize,

    /// Players allowed to join.
    pub max_players: usize,

    /// Response cards held by each player.
    pub hand_size: usize,

    /// Keep the same judge for every round.
    pub permanent_judge: bool,

    /// Points needed to win the game.
    pub max_points: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_name: "Party Cards Server".to_string(),
            min_players: 3,
            max_players: 10,
            hand_size: 10,
            permanent_judge: false,
            max_points: 10,
        }
    }
}

impl Settings {
    /// Parse and validate a settings document.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse, and validate a settings file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Check that the bounds are consistent.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_players == 0 {
            return Err(SettingsError::Invalid("min_players must be at least 1".into()));
        }
        if self.min_players > self.max_players {
            return Err(SettingsError::Invalid(format!(
                "min_players ({}) exceeds max_players ({})",
                self.min_players, self.max_players
            )));
        }
        if self.hand_size == 0 {
            return Err(SettingsError::Invalid("hand_size must be at least 1".into()));
        }
        if self.max_points == 0 {
            return Err(SettingsError::Invalid("max_points must be at least 1".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    #[must_use]
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_permanent_judge(mut self, permanent: bool) -> Self {
        self.permanent_judge = permanent;
        self
    }

    #[must_use]
    pub fn with_max_points(mut self, points: u32) -> Self {
        self.max_points = points;
        self
    }
}

/// Where settings come from.
pub trait SettingsSource {
    /// Load validated settings.
    fn load(&self) -> Result<Settings, SettingsError>;
}

/// Settings stored in a JSON file.
#[derive(Clone, Debug)]
pub struct JsonSettingsFile {
    path: PathBuf,
}

impl JsonSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonSettingsFile {
    fn default() -> Self {
        Self::new(DEFAULT_SETTINGS_PATH)
    }
}

impl SettingsSource for JsonSettingsFile {
    fn load(&self) -> Result<Settings, SettingsError> {
        Settings::from_file(&self.path)
    }
}

/// In-memory settings, still validated on load.
impl SettingsSource for Settings {
    fn load(&self) -> Result<Settings, SettingsError> {
        self.validate()?;
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings = Settings::from_json(r#"{"server_name": "Friday", "max_points": 5}"#).unwrap();

        assert_eq!(settings.server_name, "Friday");
        assert_eq!(settings.max_points, 5);
        assert_eq!(settings.min_players, 3);
        assert_eq!(settings.max_players, 10);
        assert!(!settings.permanent_judge);
    }

    #[test]
    fn test_builder() {
        let settings = Settings::default()
            .with_server_name("Test")
            .with_players(2, 4)
            .with_hand_size(7)
            .with_permanent_judge(true)
            .with_max_points(3);

        assert_eq!(settings.min_players, 2);
        assert_eq!(settings.max_players, 4);
        assert_eq!(settings.hand_size, 7);
        assert!(settings.permanent_judge);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_inverted_player_bounds_rejected() {
        let err = Settings::from_json(r#"{"min_players": 8, "max_players": 4}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert!(format!("{err}").contains("exceeds"));
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(Settings::default().with_players(0, 4).validate().is_err());
        assert!(Settings::default().with_hand_size(0).validate().is_err());
        assert!(Settings::default().with_max_points(0).validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ nope").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonSettingsFile::new(dir.path().join("settings.json"));
        match source.load() {
            Err(SettingsError::Io { path, .. }) => assert!(path.ends_with("settings.json")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"hand_size": 5}"#).unwrap();

        let settings = JsonSettingsFile::new(&path).load().unwrap();
        assert_eq!(settings.hand_size, 5);
    }

    #[test]
    fn test_in_memory_source_validates() {
        assert!(Settings::default().load().is_ok());
        assert!(Settings::default().with_players(5, 2).load().is_err());
    }

    #[test]
    fn test_default_path() {
        assert_eq!(JsonSettingsFile::default().path(), Path::new(DEFAULT_SETTINGS_PATH));
    }
}
