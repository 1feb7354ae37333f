use bevy::prelude::*;
use tracing::{debug, error};
use vr_input::{ActionBindings, ControllerState, XrAction};

use crate::ecs::components::{
    CharacterMotor, HeadAnchor, HeadDrivenCollider, PlayerRig, SnapTurn, planar_direction,
};
use crate::error::InteractionError;

pub fn validate_player_rigs(
    rigs: Query<(Entity, &PlayerRig), Added<PlayerRig>>,
    heads: Query<(), With<HeadAnchor>>,
) {
    for (entity, rig) in rigs.iter() {
        if !rig.head.is_some_and(|head| heads.contains(head)) {
            error!(
                "{}",
                InteractionError::MissingReference {
                    component: "PlayerRig",
                    entity,
                    reference: "head",
                }
            );
        }
    }
}

pub fn snap_turn_system(
    controls: Res<ControllerState>,
    mut rigs: Query<(&mut Transform, &mut SnapTurn)>,
) {
    for (mut transform, mut turn) in rigs.iter_mut() {
        let stick_x = controls.thumbstick(turn.hand).x;
        if let Some(degrees) = turn.update(stick_x) {
            // Positive degrees turn right, which is clockwise seen from above.
            transform.rotate_y(-degrees.to_radians());
            debug!("Snap turn {} degrees", degrees);
        }
    }
}

pub fn character_motor_system(
    time: Res<Time>,
    controls: Res<ControllerState>,
    bindings: Res<ActionBindings>,
    mut rigs: Query<(&mut Transform, &mut CharacterMotor, &PlayerRig), Without<HeadAnchor>>,
    heads: Query<&Transform, (With<HeadAnchor>, Without<PlayerRig>)>,
) {
    let dt = time.delta_secs();
    let jump = bindings.is_just_pressed(XrAction::Jump, &controls);

    for (mut transform, mut motor, rig) in rigs.iter_mut() {
        let Some(head) = rig.head.and_then(|head| heads.get(head).ok()) else {
            continue;
        };
        let planar = planar_direction(
            transform.rotation * head.rotation,
            controls.thumbstick(motor.hand),
        );
        transform.translation = motor.step(transform.translation, planar, jump, dt);
    }
}

pub fn head_driven_collider_system(
    mut rigs: Query<(&PlayerRig, &mut HeadDrivenCollider)>,
    heads: Query<&Transform, With<HeadAnchor>>,
) {
    for (rig, mut collider) in rigs.iter_mut() {
        let Some(head) = rig.head.and_then(|head| heads.get(head).ok()) else {
            continue;
        };
        collider.follow(head.translation);
    }
}
