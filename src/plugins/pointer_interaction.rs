use bevy::math::Ray3d;
use bevy::prelude::*;
use tracing::{debug, info, warn};
use vr_input::{ActionBindings, ControllerState, XrAction};

use crate::ecs::action_menu::ActionRegistry;
use crate::ecs::collision::{RayFilter, SceneRaycast};
use crate::ecs::interaction::HoverBroadcaster;
use crate::ecs::pointer::{Pointer, PointerFrame, PointerRegistry, PointerState};
use crate::ecs::systems::InteractionSet;
use crate::ecs::widgets::{PhysicsButton, PhysicsSlider};
use crate::events::PointerEvent;

pub struct PointerInteractionPlugin;

impl Plugin for PointerInteractionPlugin {
    fn build(&self, app: &mut App) {
        // Note: PointerEvent is registered in CoreEventsPlugin
        app.init_resource::<PointerRegistry>().add_systems(
            Update,
            (sync_pointer_registry, pointer_raycast_system)
                .chain()
                .in_set(InteractionSet::Pointer),
        );
    }
}

/// Tracks the live pointer per hand. A pointer displaced by a newer one for the same
/// hand stops raycasting, so its hover is released here.
fn sync_pointer_registry(
    mut registry: ResMut<PointerRegistry>,
    added: Query<(Entity, &Pointer), Added<Pointer>>,
    mut removed: RemovedComponents<Pointer>,
    mut states: Query<&mut PointerState>,
    mut pointer_events: MessageWriter<PointerEvent>,
) {
    for entity in removed.read() {
        registry.unregister(entity);
        debug!("Pointer {:?} unregistered", entity);
    }

    for (entity, pointer) in added.iter() {
        if let Some(previous) = registry.register(pointer.hand, entity) {
            if previous != entity {
                warn!(
                    "{:?} pointer {:?} replaced {:?}; only one pointer per hand is active",
                    pointer.hand, entity, previous
                );
                if let Ok(mut state) = states.get_mut(previous) {
                    if let Some(exit) = state.release(pointer.hand) {
                        log_pointer_event(&exit);
                        pointer_events.write(exit);
                    }
                }
            }
        } else {
            info!("{:?} pointer registered: {:?}", pointer.hand, entity);
        }
    }
}

/// Raycasts every registered pointer, left hand first, and writes its hover/click
/// transitions.
fn pointer_raycast_system(
    registry: Res<PointerRegistry>,
    controls: Res<ControllerState>,
    bindings: Res<ActionBindings>,
    scene: SceneRaycast,
    hoverables: Query<(), Or<(With<HoverBroadcaster>, With<ActionRegistry>)>>,
    widgets: Query<(), Or<(With<PhysicsButton>, With<PhysicsSlider>)>>,
    mut pointers: Query<(Entity, &Pointer, &Transform, &mut PointerState)>,
    mut pointer_events: MessageWriter<PointerEvent>,
) {
    for (hand, pointer_entity) in registry.iter() {
        let Ok((entity, pointer, transform, mut state)) = pointers.get_mut(pointer_entity) else {
            continue;
        };

        let ray = Ray3d::new(transform.translation, transform.forward());
        let mut excluded = pointer.exclude_entities.clone();
        excluded.push(entity);
        let hit = scene.raycast(
            ray,
            pointer.max_length,
            RayFilter {
                exclude_layers: pointer.exclude_layers,
                exclude_entities: &excluded,
            },
        );

        let frame = PointerFrame {
            hit,
            hoverable: hit
                .map(|h| h.entity)
                .filter(|e| hoverables.contains(*e)),
            widget: hit.map(|h| h.entity).filter(|e| widgets.contains(*e)),
        };
        let click_edge = bindings.is_just_pressed_by(XrAction::PointerClick, hand, &controls);

        for event in state.advance(hand, frame, click_edge) {
            log_pointer_event(&event);
            pointer_events.write(event);
        }

        state.ray_start = ray.origin;
        state.ray_end = hit
            .map(|h| h.point)
            .unwrap_or_else(|| ray.get_point(pointer.max_length));
    }
}

fn log_pointer_event(event: &PointerEvent) {
    let verb = match event {
        PointerEvent::HoverEnter { .. } => "entered",
        PointerEvent::HoverExit { .. } => "left",
        PointerEvent::Click { .. } => "clicked",
    };
    debug!("{} pointer {} {:?}", event.hand().label(), verb, event.target());
}
