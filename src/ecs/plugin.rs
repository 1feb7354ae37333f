//! Interaction ECS Plugin
//!
//! Registers every interaction system with its [`InteractionSet`]. Pointer raycasting
//! lives in [`crate::plugins::pointer_interaction`] and runs in [`InteractionSet::Pointer`].

use bevy::prelude::*;

use super::systems::{self, InteractionSet};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        // Configure system set ordering
        systems::configure_interaction_sets(app);

        app
            // === Menu Setup ===
            .add_systems(
                Update,
                systems::hide_new_menu_widgets
                    .after(InteractionSet::Input)
                    .before(InteractionSet::Pointer),
            )
            // === Hover Dispatch ===
            .add_systems(
                Update,
                systems::dispatch_pointer_events.in_set(InteractionSet::Hover),
            )
            // === Widget Systems ===
            .add_systems(
                Update,
                (
                    systems::validate_sliders,
                    systems::update_physics_buttons,
                    systems::update_physics_sliders,
                    systems::apply_button_commands,
                    systems::apply_slider_bindings,
                )
                    .chain()
                    .in_set(InteractionSet::Widgets),
            )
            // === Action Systems ===
            .add_systems(
                Update,
                (
                    systems::validate_action_registries,
                    systems::tick_action_registries,
                )
                    .chain()
                    .in_set(InteractionSet::Actions),
            )
            // === Locomotion Systems ===
            .add_systems(
                Update,
                (
                    systems::validate_player_rigs,
                    systems::snap_turn_system,
                    systems::character_motor_system,
                    systems::head_driven_collider_system,
                )
                    .chain()
                    .in_set(InteractionSet::Locomotion),
            )
            // === Feedback Systems ===
            .add_systems(
                Update,
                systems::sync_menu_widgets.in_set(InteractionSet::Feedback),
            );
    }
}
