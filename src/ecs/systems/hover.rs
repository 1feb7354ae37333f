use bevy::prelude::*;
use tracing::{debug, info};

use crate::ecs::action_menu::ActionRegistry;
use crate::ecs::interaction::{HoverBroadcaster, Hoverable};
use crate::events::{HighlightChanged, PointerEvent};

fn deliver(target: &mut impl Hoverable, event: &PointerEvent) {
    match *event {
        PointerEvent::HoverEnter { hand, .. } => target.on_hover_enter(hand),
        PointerEvent::HoverExit { hand, .. } => target.on_hover_exit(hand),
        PointerEvent::Click { hand, .. } => target.on_click(hand),
    }
}

/// Hands pointer transitions to the hoverable components on each target, in the order
/// they were written.
pub fn dispatch_pointer_events(
    mut pointer_events: MessageReader<PointerEvent>,
    mut targets: Query<(Option<&mut HoverBroadcaster>, Option<&mut ActionRegistry>)>,
    mut highlight_events: MessageWriter<HighlightChanged>,
) {
    for event in pointer_events.read() {
        let target = event.target();
        let Ok((broadcaster, registry)) = targets.get_mut(target) else {
            debug!("Dropping {:?}: target no longer exists", event);
            continue;
        };

        if let Some(mut broadcaster) = broadcaster {
            let was_highlighted = broadcaster.highlighted();
            deliver(&mut *broadcaster, event);
            let highlighted = broadcaster.highlighted();
            if highlighted != was_highlighted {
                highlight_events.write(HighlightChanged {
                    entity: target,
                    highlighted,
                });
            }
        }

        if let Some(mut registry) = registry {
            let was_open = registry.is_menu_open();
            deliver(&mut *registry, event);
            if registry.is_menu_open() != was_open {
                info!(
                    "Menu on {:?} {}",
                    target,
                    if was_open { "closed" } else { "opened" }
                );
            }
        }
    }
}
