//! Entity Component System module
//!
//! Contains components, systems, and plugins for pointer interaction, action menus,
//! physics widgets and locomotion. Systems execute in a well-defined order managed by
//! [`systems::InteractionSet`].

pub mod action_menu;
pub mod collision;
pub mod components;
pub mod devices;
pub mod interaction;
pub mod plugin;
pub mod pointer;
pub mod systems;
pub mod widgets;

// Re-export commonly used items
pub use plugin::InteractionPlugin;
pub use systems::InteractionSet;
