//! Controller pointers: per-hand ray, hover transitions and click edges.

use bevy::ecs::lifecycle::HookContext;
use bevy::ecs::message::Messages;
use bevy::ecs::world::DeferredWorld;
use bevy::prelude::*;
use vr_input::Hand;

use super::collision::RayHit;
use crate::events::PointerEvent;
use crate::settings::PointerSettings;

/// A ray cast from the entity's [`Transform`] along its forward axis every frame.
#[derive(Component, Clone, Debug)]
#[require(Transform, PointerState)]
pub struct Pointer {
    pub hand: Hand,
    pub max_length: f32,
    /// Collision layers the ray passes through.
    pub exclude_layers: u32,
    pub exclude_entities: Vec<Entity>,
}

impl Pointer {
    pub fn new(hand: Hand) -> Self {
        Self::from_settings(hand, &PointerSettings::default())
    }

    pub fn from_settings(hand: Hand, settings: &PointerSettings) -> Self {
        Self {
            hand,
            max_length: settings.max_length,
            exclude_layers: settings.exclude_layers,
            exclude_entities: Vec::new(),
        }
    }

    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude_entities.push(entity);
        self
    }
}

/// What the pointer resolved this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerFrame {
    pub hit: Option<RayHit>,
    /// The hit entity, if it reacts to hover.
    pub hoverable: Option<Entity>,
    /// The hit entity, if it is a button or slider.
    pub widget: Option<Entity>,
}

/// Per-frame scratch state. Only `hovered` carries meaning into the next frame.
///
/// Entity references here are weak: targets may despawn at any time and are simply
/// dropped from hover on the next frame.
#[derive(Component, Clone, Debug, Default, PartialEq)]
#[component(on_remove = release_pointer_hover)]
pub struct PointerState {
    pub hovered: Option<Entity>,
    pub hovered_widget: Option<Entity>,
    pub last_hit: Option<RayHit>,
    pub ray_start: Vec3,
    pub ray_end: Vec3,
}

impl PointerState {
    /// Applies one frame's raycast result and returns the events it produces, in order.
    ///
    /// A change of hover target yields the exit for the old target before the enter for
    /// the new one. A click is reported only on the press edge while something hoverable
    /// is under the ray.
    pub fn advance(&mut self, hand: Hand, frame: PointerFrame, click_edge: bool) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        if frame.hoverable != self.hovered {
            if let Some(target) = self.hovered {
                events.push(PointerEvent::HoverExit { target, hand });
            }
            if let Some(target) = frame.hoverable {
                events.push(PointerEvent::HoverEnter { target, hand });
            }
        }
        self.hovered = frame.hoverable;
        self.hovered_widget = frame.widget;
        self.last_hit = frame.hit;

        if click_edge {
            if let Some(target) = self.hovered {
                events.push(PointerEvent::Click { target, hand });
            }
        }

        events
    }

    /// Drops everything the pointer resolved and returns the exit for its hover target.
    pub fn release(&mut self, hand: Hand) -> Option<PointerEvent> {
        let target = self.hovered.take();
        *self = Self::default();
        target.map(|target| PointerEvent::HoverExit { target, hand })
    }

    pub fn is_hovering_widget(&self, widget: Entity) -> bool {
        self.hovered_widget == Some(widget)
    }
}

fn release_pointer_hover(mut world: DeferredWorld, ctx: HookContext) {
    let entity = ctx.entity;
    let Some(target) = world.get::<PointerState>(entity).and_then(|s| s.hovered) else {
        return;
    };
    let Some(hand) = world.get::<Pointer>(entity).map(|p| p.hand) else {
        return;
    };
    if let Some(mut messages) = world.get_resource_mut::<Messages<PointerEvent>>() {
        messages.write(PointerEvent::HoverExit { target, hand });
    }
}

/// The live pointer entity for each hand.
#[derive(Resource, Debug, Default)]
pub struct PointerRegistry {
    pointers: [Option<Entity>; 2],
}

impl PointerRegistry {
    pub fn get(&self, hand: Hand) -> Option<Entity> {
        self.pointers[hand.index()]
    }

    pub fn register(&mut self, hand: Hand, pointer: Entity) -> Option<Entity> {
        self.pointers[hand.index()].replace(pointer)
    }

    pub fn unregister(&mut self, pointer: Entity) {
        for slot in &mut self.pointers {
            if *slot == Some(pointer) {
                *slot = None;
            }
        }
    }

    /// Registered pointers, left hand first.
    pub fn iter(&self) -> impl Iterator<Item = (Hand, Entity)> + '_ {
        Hand::ALL
            .into_iter()
            .filter_map(|hand| self.get(hand).map(|entity| (hand, entity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    fn hovering(target: Option<Entity>) -> PointerFrame {
        PointerFrame {
            hoverable: target,
            ..Default::default()
        }
    }

    #[test]
    fn unchanged_target_fires_nothing() {
        let e = entities(1);
        let mut state = PointerState::default();
        state.advance(Hand::Right, hovering(Some(e[0])), false);
        assert!(state.advance(Hand::Right, hovering(Some(e[0])), false).is_empty());
    }

    #[test]
    fn exit_precedes_enter_on_switch() {
        let e = entities(2);
        let mut state = PointerState::default();
        assert_eq!(
            state.advance(Hand::Left, hovering(Some(e[0])), false),
            vec![PointerEvent::HoverEnter { target: e[0], hand: Hand::Left }]
        );
        assert_eq!(
            state.advance(Hand::Left, hovering(Some(e[1])), false),
            vec![
                PointerEvent::HoverExit { target: e[0], hand: Hand::Left },
                PointerEvent::HoverEnter { target: e[1], hand: Hand::Left },
            ]
        );
        assert_eq!(
            state.advance(Hand::Left, hovering(None), false),
            vec![PointerEvent::HoverExit { target: e[1], hand: Hand::Left }]
        );
        assert_eq!(state.hovered, None);
    }

    #[test]
    fn click_goes_to_the_new_target() {
        let e = entities(2);
        let mut state = PointerState::default();
        state.advance(Hand::Right, hovering(Some(e[0])), false);
        let events = state.advance(Hand::Right, hovering(Some(e[1])), true);
        assert_eq!(
            events.last(),
            Some(&PointerEvent::Click { target: e[1], hand: Hand::Right })
        );
    }

    #[test]
    fn release_clears_state_and_exits_once() {
        let e = entities(1);
        let mut state = PointerState::default();
        state.advance(Hand::Left, hovering(Some(e[0])), false);
        assert_eq!(
            state.release(Hand::Left),
            Some(PointerEvent::HoverExit { target: e[0], hand: Hand::Left })
        );
        assert_eq!(state, PointerState::default());
        assert_eq!(state.release(Hand::Left), None);
    }

    #[test]
    fn click_without_target_is_dropped() {
        let mut state = PointerState::default();
        assert!(state.advance(Hand::Right, hovering(None), true).is_empty());
    }

    #[test]
    fn widget_tracked_independently_of_hover() {
        let e = entities(1);
        let mut state = PointerState::default();
        let events = state.advance(
            Hand::Right,
            PointerFrame {
                widget: Some(e[0]),
                ..Default::default()
            },
            true,
        );
        assert!(events.is_empty());
        assert!(state.is_hovering_widget(e[0]));
    }

    #[test]
    fn registry_replaces_and_unregisters() {
        let e = entities(2);
        let mut registry = PointerRegistry::default();
        assert_eq!(registry.register(Hand::Right, e[0]), None);
        assert_eq!(registry.register(Hand::Right, e[1]), Some(e[0]));
        registry.register(Hand::Left, e[0]);
        assert_eq!(
            registry.iter().collect::<Vec<_>>(),
            vec![(Hand::Left, e[0]), (Hand::Right, e[1])]
        );
        registry.unregister(e[1]);
        assert_eq!(registry.get(Hand::Right), None);
    }
}
