use bevy::prelude::*;
use vr_input::Hand;

use crate::settings::LocomotionSettings;

/// Stick-driven snap turning.
///
/// Pushing past the deadzone turns once; the stick must come back inside half the deadzone
/// before the next turn.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SnapTurn {
    pub hand: Hand,
    pub snap_angle: f32,
    pub deadzone: f32,
    ready: bool,
}

impl SnapTurn {
    pub fn from_settings(settings: &LocomotionSettings) -> Self {
        Self {
            hand: Hand::Right,
            snap_angle: settings.snap_angle,
            deadzone: settings.stick_deadzone,
            ready: true,
        }
    }

    /// Degrees to turn this frame, positive to the right.
    pub fn update(&mut self, stick_x: f32) -> Option<f32> {
        if stick_x.abs() > self.deadzone {
            if !self.ready {
                return None;
            }
            self.ready = false;
            Some(self.snap_angle.copysign(stick_x))
        } else {
            if stick_x.abs() < self.deadzone * 0.5 {
                self.ready = true;
            }
            None
        }
    }
}

/// Walking, jumping and gravity against a flat ground plane.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CharacterMotor {
    pub hand: Hand,
    pub speed: f32,
    pub gravity: f32,
    pub jump_height: f32,
    pub ground_height: f32,
    pub velocity: Vec3,
    pub grounded: bool,
}

impl CharacterMotor {
    pub fn from_settings(settings: &LocomotionSettings) -> Self {
        Self {
            hand: Hand::Left,
            speed: settings.speed,
            gravity: settings.gravity,
            jump_height: settings.jump_height,
            ground_height: settings.ground_height,
            velocity: Vec3::ZERO,
            grounded: false,
        }
    }

    /// Moves `position` by one frame of walking along `planar` (unit-length or shorter),
    /// plus vertical velocity. A jump only starts from the ground.
    pub fn step(&mut self, position: Vec3, planar: Vec3, jump: bool, dt: f32) -> Vec3 {
        if self.grounded && jump {
            self.velocity.y = (self.jump_height * -2.0 * self.gravity).max(0.0).sqrt();
        }

        let mut next = position + planar * self.speed * dt;

        if self.grounded && self.velocity.y < 0.0 {
            self.velocity.y = -2.0;
        }
        self.velocity.y += self.gravity * dt;
        next += self.velocity * dt;

        if next.y <= self.ground_height {
            next.y = self.ground_height;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
        next
    }
}

/// Stick input turned into a horizontal direction relative to where the head looks.
pub fn planar_direction(head_rotation: Quat, stick: Vec2) -> Vec3 {
    let flatten = |v: Vec3| Vec3::new(v.x, 0.0, v.z).normalize_or_zero();
    let forward = flatten(head_rotation * Vec3::NEG_Z);
    let right = flatten(head_rotation * Vec3::X);
    forward * stick.y + right * stick.x
}

/// Body collider center that follows the head horizontally once it leans past
/// `deadzone_radius`. Both are in rig-local space.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct HeadDrivenCollider {
    pub deadzone_radius: f32,
    pub center: Vec3,
}

impl HeadDrivenCollider {
    pub fn from_settings(settings: &LocomotionSettings) -> Self {
        Self {
            deadzone_radius: settings.head_deadzone_radius,
            center: Vec3::ZERO,
        }
    }

    pub fn follow(&mut self, head_local: Vec3) {
        let offset = Vec3::new(head_local.x - self.center.x, 0.0, head_local.z - self.center.z);
        let distance = offset.length();
        if distance > self.deadzone_radius {
            self.center += offset / distance * (distance - self.deadzone_radius);
        }
    }
}
