use bevy::prelude::Resource;

pub use vr_types::{
    ActionSettings, ControlBinding, ControlBindings, LocomotionSettings, PointerSettings,
};

#[derive(Resource, serde::Serialize, serde::Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Settings {
    pub pointer: PointerSettings,
    pub locomotion: LocomotionSettings,
    pub actions: ActionSettings,
    pub bindings: ControlBindings,
}
