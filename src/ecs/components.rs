use bevy::prelude::*;

mod locomotion;

pub use locomotion::{CharacterMotor, HeadDrivenCollider, SnapTurn, planar_direction};

/// Takes an entity out of the scene without despawning it: hidden entities are never hit
/// by pointer rays.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Hidden;

/// Base color of an object, swapped by the color toggle action.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SurfaceColor {
    pub original: [f32; 4],
    pub current: [f32; 4],
}

impl SurfaceColor {
    pub fn new(color: [f32; 4]) -> Self {
        Self {
            original: color,
            current: color,
        }
    }

    pub fn apply(&mut self, color: Option<[f32; 4]>) {
        self.current = color.unwrap_or(self.original);
    }
}

/// The tracked play space. Its `head` is positioned in rig-local space.
#[derive(Component, Clone, Copy, Debug, Default)]
#[require(Transform)]
pub struct PlayerRig {
    pub head: Option<Entity>,
}

/// The headset. Its [`Transform`] is relative to the owning [`PlayerRig`].
#[derive(Component, Clone, Copy, Debug, Default)]
#[require(Transform)]
pub struct HeadAnchor;
