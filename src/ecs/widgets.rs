//! Buttons and sliders driven by the pointers' hovered sub-target.

use bevy::prelude::*;

/// What a button does when clicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonCommand {
    ActivateAction { registry: Entity, index: usize },
    DeactivateAllAndClose { registry: Entity },
    CloseMenu { registry: Entity },
    ToggleLamp(Entity),
    ToggleRadio(Entity),
    NextSong(Entity),
    /// Clicks are reported but nothing else happens.
    None,
}

#[derive(Component, Clone, Debug, PartialEq)]
pub struct PhysicsButton {
    pub command: ButtonCommand,
    /// True from the click until the activate signal is released.
    latched: bool,
    /// Drives the hover tint.
    pub hovered: bool,
}

impl PhysicsButton {
    pub fn new(command: ButtonCommand) -> Self {
        Self {
            command,
            latched: false,
            hovered: false,
        }
    }

    /// Advances the button one frame. Returns true exactly once per press while hovered.
    pub fn update(&mut self, hovered: bool, held: bool) -> bool {
        self.hovered = hovered;
        if !hovered || !held {
            self.latched = false;
            return false;
        }
        if self.latched {
            return false;
        }
        self.latched = true;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderBinding {
    LampIntensity(Entity),
    RadioVolume(Entity),
    None,
}

/// A slider whose track is the local X extent of its cuboid [`Collider`](super::collision::Collider).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct PhysicsSlider {
    pub binding: SliderBinding,
    /// Last emitted value, for the fill visual.
    pub fill: f32,
}

impl PhysicsSlider {
    pub fn new(binding: SliderBinding) -> Self {
        Self { binding, fill: 0.0 }
    }
}

/// Maps a local X coordinate onto a track of `width` centered at `center_x`, clamped to
/// `0..=1`. Zero-width tracks map to 0.
pub fn slider_value(local_x: f32, center_x: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    let left_edge = center_x - width / 2.0;
    ((local_x - left_edge) / width).clamp(0.0, 1.0)
}
