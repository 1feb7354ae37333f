//! ECS systems organized by domain
//!
//! Systems execute in a fixed order managed by [`InteractionSet`], so every pointer
//! transition written in a frame is consumed by the later sets of the same frame.

mod actions;
mod devices;
mod hover;
mod locomotion;
mod widgets;

pub use actions::*;
pub use devices::*;
pub use hover::*;
pub use locomotion::*;
pub use widgets::*;

use bevy::prelude::*;

/// Interaction loop system sets with explicit ordering.
///
/// The execution order is:
/// 1. **Input** - Feed scripted or emulated controller state
/// 2. **Pointer** - Raycast each pointer, write hover/click transitions
/// 3. **Hover** - Deliver transitions to hover broadcasters and action registries
/// 4. **Widgets** - Physics buttons and sliders, then the commands they trigger
/// 5. **Actions** - Run the enabled action of each registry
/// 6. **Locomotion** - Snap turn, walking, gravity, head-driven collider
/// 7. **Feedback** - Push menu visibility out to the scene
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionSet {
    Input,
    Pointer,
    Hover,
    Widgets,
    Actions,
    Locomotion,
    Feedback,
}

/// Configure the system set ordering for the interaction loop
pub fn configure_interaction_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            InteractionSet::Input,
            InteractionSet::Pointer.after(InteractionSet::Input),
            InteractionSet::Hover.after(InteractionSet::Pointer),
            InteractionSet::Widgets.after(InteractionSet::Hover),
            InteractionSet::Actions.after(InteractionSet::Widgets),
            InteractionSet::Locomotion.after(InteractionSet::Actions),
            InteractionSet::Feedback.after(InteractionSet::Locomotion),
        ),
    );
}
