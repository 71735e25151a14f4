//! Core types shared by the catalog and the engine: settings and players.

pub mod player;
pub mod settings;

pub use player::{join_names, PlayerId, PlayerSummary};
pub use settings::{
    JsonSettingsFile, Settings, SettingsError, SettingsSource, DEFAULT_SETTINGS_PATH,
};
