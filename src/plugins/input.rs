use bevy::prelude::*;
use tracing::info;
use vr_input::{
    ActionBindings, ControllerState, GilrsResource, end_controller_frame,
    gilrs_controller_polling_system,
};

use crate::settings_types::Settings;

/// Controller state, action bindings and the end-of-frame edge bookkeeping. Backends
/// write [`ControllerState`] in `PreUpdate` or [`crate::ecs::InteractionSet::Input`].
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerState>()
            .init_resource::<ActionBindings>()
            .add_systems(Startup, initialize_action_bindings)
            .add_systems(Last, end_controller_frame);
    }
}

/// Drives both virtual controllers from the first connected gamepad.
pub struct GamepadInputPlugin;

impl Plugin for GamepadInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GilrsResource>()
            .add_systems(PreUpdate, gilrs_controller_polling_system);
    }
}

fn initialize_action_bindings(mut commands: Commands, settings: Res<Settings>) {
    let bindings = ActionBindings::from_settings(&settings.bindings);
    info!("Action bindings initialized from settings");
    commands.insert_resource(bindings);
}
