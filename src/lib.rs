use bevy::prelude::*;

pub mod demo_scene;
pub mod ecs;
pub mod error;
pub mod events;
pub mod plugins;
pub mod scripted_input;
pub mod settings;
pub mod settings_types;

pub use error::InteractionError;
pub use settings_types::Settings;

pub fn storage_dir() -> std::path::PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    path.push("VrInteraction");
    let _ = std::fs::create_dir_all(&path);
    path
}

pub struct CoreEventsPlugin;

impl Plugin for CoreEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<events::PointerEvent>()
            // Feedback events
            .add_message::<events::HighlightChanged>()
            .add_message::<events::MenuVisibilityChanged>()
            // Widget events
            .add_message::<events::ButtonPressed>()
            .add_message::<events::SliderMoved>()
            .add_message::<events::AudioCue>();
    }
}

/// Everything except input backends and settings persistence. Uses default [`Settings`]
/// unless a resource was inserted earlier (for example by
/// [`settings::SettingsPlugin`]).
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Settings>().add_plugins((
            CoreEventsPlugin,
            plugins::input::InputPlugin,
            plugins::pointer_interaction::PointerInteractionPlugin,
            ecs::plugin::InteractionPlugin,
        ));
    }
}
