use bevy::prelude::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("action index {index} is out of range (registry has {len} actions)")]
    ActionIndexOutOfRange { index: usize, len: usize },

    #[error("{component} on {entity} has no {reference} assigned")]
    MissingReference {
        component: &'static str,
        entity: Entity,
        reference: &'static str,
    },

    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),

    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
}
