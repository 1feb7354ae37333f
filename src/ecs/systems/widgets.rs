use bevy::prelude::*;
use tracing::{error, info};
use vr_input::{ActionBindings, ControllerState, Hand, XrAction};

use crate::ecs::collision::Collider;
use crate::ecs::pointer::{PointerRegistry, PointerState};
use crate::ecs::widgets::{PhysicsButton, PhysicsSlider, slider_value};
use crate::events::{ButtonPressed, SliderMoved};

/// Pointers whose hovered sub-target is `widget`, left hand first.
fn hovering_pointers<'a>(
    registry: &'a PointerRegistry,
    states: &'a Query<&PointerState>,
    widget: Entity,
) -> impl Iterator<Item = (Hand, &'a PointerState)> + 'a {
    registry.iter().filter_map(move |(hand, pointer)| {
        states
            .get(pointer)
            .ok()
            .filter(|state| state.is_hovering_widget(widget))
            .map(|state| (hand, state))
    })
}

/// A slider's track is the X extent of a cuboid collider; anything else cannot be dragged.
pub fn validate_sliders(sliders: Query<(Entity, Option<&Collider>), Added<PhysicsSlider>>) {
    for (entity, collider) in sliders.iter() {
        if collider.and_then(Collider::extent_x).is_none() {
            error!("Slider {:?} needs a cuboid Collider to define its track", entity);
        }
    }
}

pub fn update_physics_buttons(
    controls: Res<ControllerState>,
    bindings: Res<ActionBindings>,
    pointer_registry: Res<PointerRegistry>,
    pointer_states: Query<&PointerState>,
    mut buttons: Query<(Entity, &mut PhysicsButton)>,
    mut pressed_events: MessageWriter<ButtonPressed>,
) {
    for (entity, mut button) in buttons.iter_mut() {
        let mut hovered = false;
        let mut holding = None;
        for (hand, _) in hovering_pointers(&pointer_registry, &pointer_states, entity) {
            hovered = true;
            if holding.is_none() && bindings.is_pressed_by(XrAction::Activate, hand, &controls) {
                holding = Some(hand);
            }
        }

        if button.update(hovered, holding.is_some()) {
            if let Some(hand) = holding {
                info!("Button {:?} pressed: {:?}", entity, button.command);
                pressed_events.write(ButtonPressed {
                    button: entity,
                    hand,
                    command: button.command.clone(),
                });
            }
        }
    }
}

/// Emits the slider value every frame a hovering pointer holds activate.
pub fn update_physics_sliders(
    controls: Res<ControllerState>,
    bindings: Res<ActionBindings>,
    pointer_registry: Res<PointerRegistry>,
    pointer_states: Query<&PointerState>,
    mut sliders: Query<(Entity, &mut PhysicsSlider, &Transform, &Collider)>,
    mut moved_events: MessageWriter<SliderMoved>,
) {
    for (entity, mut slider, transform, collider) in sliders.iter_mut() {
        let Some((center_x, width)) = collider.extent_x() else {
            continue;
        };
        let Some(hit) = hovering_pointers(&pointer_registry, &pointer_states, entity)
            .find(|(hand, _)| bindings.is_pressed_by(XrAction::Activate, *hand, &controls))
            .and_then(|(_, state)| state.last_hit)
        else {
            continue;
        };

        let local = transform
            .compute_affine()
            .inverse()
            .transform_point3(hit.point);
        let value = slider_value(local.x, center_x, width);
        slider.fill = value;
        moved_events.write(SliderMoved {
            slider: entity,
            value,
        });
    }
}
