pub use crate::settings_types::*;
use crate::error::InteractionError;
use crate::storage_dir;
use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

const SETTINGS_FILE: &str = "settings.toml";

impl Settings {
    pub fn path() -> PathBuf {
        storage_dir().join(SETTINGS_FILE)
    }

    pub fn from_toml(content: &str) -> Result<Self, InteractionError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, InteractionError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, InteractionError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), InteractionError> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Reads `settings.toml` from the storage dir, writing defaults on first run.
    /// Unreadable or malformed files fall back to defaults.
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            info!("Creating default settings at {:?}", path);
            let settings = Settings::default();
            settings.save();
            return settings;
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                error!("Failed to load {:?}: {}", path, e);
                Settings::default()
            }
        }
    }

    pub fn save(&self) {
        let path = Self::path();
        match self.save_to(&path) {
            Ok(()) => info!("Saved settings to {:?}", path),
            Err(e) => error!("Failed to save {:?}: {}", path, e),
        }
    }
}

/// Loads [`Settings`] from disk and writes them back one second after the last change.
pub struct SettingsPlugin;

#[derive(Resource)]
struct SettingsSaveTimer(Timer);

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let settings = Settings::load();
        app.insert_resource(settings);
        app.insert_resource(SettingsSaveTimer(Timer::from_seconds(1.0, TimerMode::Once)));
        app.add_systems(Update, save_settings_on_change);
    }
}

fn save_settings_on_change(
    settings: Res<Settings>,
    mut timer: ResMut<SettingsSaveTimer>,
    time: Res<Time>,
) {
    if settings.is_changed() && !settings.is_added() {
        timer.0.reset();
    }

    timer.0.tick(time.delta());

    if timer.0.just_finished() {
        settings.save();
    }
}
