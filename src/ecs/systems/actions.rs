use bevy::prelude::*;
use std::collections::HashMap;
use tracing::{error, info, warn};
use vr_input::{ActionBindings, ControllerState, XrAction};

use crate::ecs::action_menu::{ActionEffect, ActionInput, ActionRegistry, InteractionAction, teleport_destination};
use crate::ecs::components::{Hidden, SurfaceColor};
use crate::ecs::pointer::{PointerRegistry, PointerState};
use crate::error::InteractionError;
use crate::events::MenuVisibilityChanged;

/// Reports unset references on newly spawned registries. The affected actions stay inert.
pub fn validate_action_registries(
    registries: Query<(Entity, &ActionRegistry, Has<SurfaceColor>), Added<ActionRegistry>>,
) {
    for (entity, registry, has_color) in registries.iter() {
        for err in registry.missing_references(entity) {
            error!("{}", err);
        }

        let toggles_color = registry
            .slots()
            .iter()
            .any(|slot| matches!(slot.action, InteractionAction::ToggleColor { .. }));
        if toggles_color && !has_color {
            error!(
                "{}",
                InteractionError::MissingReference {
                    component: "ToggleColor",
                    entity,
                    reference: "SurfaceColor",
                }
            );
        }
    }
}

/// Runs the enabled action of every registry the dominant hand's pointer is hovering,
/// while its menu is closed and no pointer is over a widget.
pub fn tick_action_registries(
    mut commands: Commands,
    time: Res<Time>,
    controls: Res<ControllerState>,
    bindings: Res<ActionBindings>,
    pointer_registry: Res<PointerRegistry>,
    pointer_states: Query<&PointerState>,
    mut registries: Query<(Entity, &mut ActionRegistry)>,
    mut transforms: Query<&mut Transform>,
    mut colors: Query<&mut SurfaceColor>,
) {
    let widget_hovered = pointer_registry.iter().any(|(_, pointer)| {
        pointer_states
            .get(pointer)
            .is_ok_and(|state| state.hovered_widget.is_some())
    });
    if widget_hovered {
        return;
    }

    let input = ActionInput {
        held: bindings.is_pressed(XrAction::Manipulate, &controls),
        just_pressed: bindings.is_just_pressed(XrAction::Manipulate, &controls),
        dt: time.delta_secs(),
    };

    for (entity, mut registry) in registries.iter_mut() {
        if registry.is_menu_open() {
            continue;
        }
        let dominant_hovering = pointer_registry
            .get(registry.dominant_hand)
            .and_then(|pointer| pointer_states.get(pointer).ok())
            .is_some_and(|state| state.hovered == Some(entity));
        if !dominant_hovering {
            continue;
        }
        let Some(effect) = registry.tick(&input) else {
            continue;
        };

        match effect {
            ActionEffect::Rotate(rotation) => {
                if let Ok(mut transform) = transforms.get_mut(entity) {
                    transform.rotate(rotation);
                }
            }
            ActionEffect::Translate(delta) => {
                if let Ok(mut transform) = transforms.get_mut(entity) {
                    transform.translation += delta;
                }
            }
            ActionEffect::Scale(step) => {
                if let Ok(mut transform) = transforms.get_mut(entity) {
                    transform.scale += Vec3::splat(step);
                }
            }
            ActionEffect::Recolor(color) => {
                if let Ok(mut surface) = colors.get_mut(entity) {
                    surface.apply(color);
                }
            }
            ActionEffect::Teleport { rig, head } => {
                if teleport(&mut transforms, entity, rig, head) {
                    commands.entity(entity).insert(Hidden);
                    registry.close();
                    registry.deactivate_all();
                }
            }
        }
    }
}

fn teleport(
    transforms: &mut Query<&mut Transform>,
    target: Entity,
    rig: Entity,
    head: Entity,
) -> bool {
    let (Ok(target_transform), Ok(head_transform)) = (transforms.get(target), transforms.get(head))
    else {
        warn!("Teleport from {:?} skipped: target or head is gone", target);
        return false;
    };
    let target_position = target_transform.translation;
    let head_local = head_transform.translation;

    let Ok(mut rig_transform) = transforms.get_mut(rig) else {
        warn!("Teleport from {:?} skipped: rig {:?} is gone", target, rig);
        return false;
    };
    let destination = teleport_destination(target_position, &rig_transform, head_local);
    rig_transform.translation = destination;
    info!("Teleported rig to {:?}", destination);
    true
}

/// Hides the menu widgets of newly spawned registries before any pointer can reach them.
pub fn hide_new_menu_widgets(
    mut commands: Commands,
    registries: Query<&ActionRegistry, Added<ActionRegistry>>,
    hidden: Query<Has<Hidden>>,
) {
    for registry in registries.iter().filter(|r| !r.is_menu_open()) {
        for &widget in &registry.menu_widgets {
            if matches!(hidden.get(widget), Ok(false)) {
                commands.entity(widget).insert(Hidden);
            }
        }
    }
}

/// Hides a registry's menu widgets while its menu is closed and reports visibility
/// changes.
pub fn sync_menu_widgets(
    mut commands: Commands,
    registries: Query<(Entity, &ActionRegistry), Changed<ActionRegistry>>,
    hidden: Query<Has<Hidden>>,
    mut reported: Local<HashMap<Entity, bool>>,
    mut menu_events: MessageWriter<MenuVisibilityChanged>,
) {
    for (entity, registry) in registries.iter() {
        let open = registry.is_menu_open();

        for &widget in &registry.menu_widgets {
            match hidden.get(widget) {
                Ok(true) if open => {
                    commands.entity(widget).remove::<Hidden>();
                }
                Ok(false) if !open => {
                    commands.entity(widget).insert(Hidden);
                }
                Ok(_) => {}
                Err(_) => warn!("Menu widget {:?} of {:?} no longer exists", widget, entity),
            }
        }

        let previous = reported.insert(entity, open).unwrap_or(false);
        if previous != open {
            menu_events.write(MenuVisibilityChanged {
                registry: entity,
                open,
            });
        }
    }
}
