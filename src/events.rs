use bevy::prelude::{Entity, Message};
use vr_input::Hand;

use crate::ecs::widgets::ButtonCommand;

// === Pointer Events ===

/// Hover and click transitions produced by the pointers.
///
/// A single message type keeps the per-frame order intact: when a pointer moves from one
/// target to another, its `HoverExit` is always read before the matching `HoverEnter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Message)]
pub enum PointerEvent {
    HoverEnter { target: Entity, hand: Hand },
    HoverExit { target: Entity, hand: Hand },
    Click { target: Entity, hand: Hand },
}

impl PointerEvent {
    pub fn target(&self) -> Entity {
        match *self {
            PointerEvent::HoverEnter { target, .. }
            | PointerEvent::HoverExit { target, .. }
            | PointerEvent::Click { target, .. } => target,
        }
    }

    pub fn hand(&self) -> Hand {
        match *self {
            PointerEvent::HoverEnter { hand, .. }
            | PointerEvent::HoverExit { hand, .. }
            | PointerEvent::Click { hand, .. } => hand,
        }
    }
}

// === Feedback Events ===

/// Emitted when an object's hover highlight turns on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Message)]
pub struct HighlightChanged {
    pub entity: Entity,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Message)]
pub struct MenuVisibilityChanged {
    pub registry: Entity,
    pub open: bool,
}

// === Widget Events ===

#[derive(Debug, Clone, Message)]
pub struct ButtonPressed {
    pub button: Entity,
    pub hand: Hand,
    pub command: ButtonCommand,
}

/// Emitted every frame a slider is being dragged, with its normalized value in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Message)]
pub struct SliderMoved {
    pub slider: Entity,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, Message)]
pub enum AudioCue {
    Play { source: Entity, clip: String },
    Stop { source: Entity },
    SetVolume { source: Entity, volume: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::World;

    #[test]
    fn pointer_event_accessors() {
        let target = World::new().spawn_empty().id();
        let events = [
            PointerEvent::HoverEnter { target, hand: Hand::Left },
            PointerEvent::HoverExit { target, hand: Hand::Right },
            PointerEvent::Click { target, hand: Hand::Right },
        ];
        let hands: Vec<Hand> = events.iter().map(PointerEvent::hand).collect();
        assert_eq!(hands, vec![Hand::Left, Hand::Right, Hand::Right]);
        assert!(events.iter().all(|e| e.target() == target));
    }
}
