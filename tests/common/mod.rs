#![allow(dead_code)]

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;
use vr_input::{ControllerButton, ControllerState, Hand};
use vr_interaction::CorePlugin;
use vr_interaction::ecs::action_menu::{ActionRegistry, InteractionAction};
use vr_interaction::ecs::collision::{Collider, CollisionLayers};
use vr_interaction::ecs::interaction::HoverBroadcaster;
use vr_interaction::ecs::pointer::Pointer;
use vr_interaction::ecs::widgets::{ButtonCommand, PhysicsButton, PhysicsSlider, SliderBinding};
use vr_interaction::events::{
    AudioCue, ButtonPressed, HighlightChanged, MenuVisibilityChanged, PointerEvent, SliderMoved,
};

pub const FRAME: Duration = Duration::from_millis(50);

#[derive(Resource)]
struct Recorded<T: Message>(Vec<T>);

fn record<T: Message + Clone>(mut reader: MessageReader<T>, mut recorded: ResMut<Recorded<T>>) {
    recorded.0.extend(reader.read().cloned());
}

pub struct TestScene {
    app: App,
}

impl TestScene {
    pub fn new() -> Self {
        let mut app = App::new();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
        app.add_plugins(MinimalPlugins).add_plugins(CorePlugin);

        let mut scene = Self { app };
        scene.recorder::<PointerEvent>();
        scene.recorder::<HighlightChanged>();
        scene.recorder::<MenuVisibilityChanged>();
        scene.recorder::<ButtonPressed>();
        scene.recorder::<SliderMoved>();
        scene.recorder::<AudioCue>();
        scene
    }

    fn recorder<T: Message + Clone>(&mut self) {
        self.app
            .insert_resource(Recorded::<T>(Vec::new()))
            .add_systems(Last, record::<T>);
    }

    pub fn app(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn get<T: Component>(&self, entity: Entity) -> &T {
        self.world()
            .get::<T>(entity)
            .unwrap_or_else(|| panic!("{entity:?} has no {}", std::any::type_name::<T>()))
    }

    pub fn get_mut<T: Component<Mutability = bevy::ecs::component::Mutable>>(
        &mut self,
        entity: Entity,
    ) -> Mut<'_, T> {
        self.world_mut()
            .get_mut::<T>(entity)
            .expect("component missing")
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.world().get::<T>(entity).is_some()
    }

    /// Drains every message of type `T` recorded since the last call.
    pub fn take<T: Message + Clone>(&mut self) -> Vec<T> {
        std::mem::take(&mut self.world_mut().resource_mut::<Recorded<T>>().0)
    }

    // === Spawning ===

    /// A pointer at `position` aimed at `target`.
    pub fn spawn_pointer(&mut self, hand: Hand, position: Vec3, target: Vec3) -> Entity {
        self.world_mut()
            .spawn((
                Pointer::new(hand),
                Transform::from_translation(position).looking_at(target, Vec3::Y),
            ))
            .id()
    }

    pub fn spawn_hoverable(&mut self, position: Vec3) -> Entity {
        self.world_mut()
            .spawn((
                HoverBroadcaster::highlight_tracking(Hand::Right),
                Collider::cuboid(Vec3::splat(0.25)),
                Transform::from_translation(position),
            ))
            .id()
    }

    /// A hoverable box with an action menu. Menu buttons come from [`Self::spawn_button`]
    /// and are attached with [`Self::attach_menu`].
    pub fn spawn_interactive(&mut self, position: Vec3, actions: Vec<InteractionAction>) -> Entity {
        let entity = self.spawn_hoverable(position);
        self.world_mut()
            .entity_mut(entity)
            .insert(ActionRegistry::new(actions));
        entity
    }

    pub fn attach_menu(&mut self, registry: Entity, widgets: Vec<Entity>) {
        self.get_mut::<ActionRegistry>(registry).menu_widgets = widgets;
    }

    pub fn spawn_button(&mut self, position: Vec3, command: ButtonCommand) -> Entity {
        self.world_mut()
            .spawn((
                PhysicsButton::new(command),
                Collider::cuboid(Vec3::new(0.1, 0.1, 0.02)),
                CollisionLayers::UI,
                Transform::from_translation(position),
            ))
            .id()
    }

    /// A 1m wide slider track centered on `position`.
    pub fn spawn_slider(&mut self, position: Vec3, binding: SliderBinding) -> Entity {
        self.world_mut()
            .spawn((
                PhysicsSlider::new(binding),
                Collider::cuboid(Vec3::new(0.5, 0.05, 0.02)),
                CollisionLayers::UI,
                Transform::from_translation(position),
            ))
            .id()
    }

    // === Driving ===

    pub fn aim(&mut self, pointer: Entity, target: Vec3) {
        let mut transform = self.get_mut::<Transform>(pointer);
        let position = transform.translation;
        *transform = Transform::from_translation(position).looking_at(target, Vec3::Y);
    }

    pub fn set_button(&mut self, hand: Hand, button: ControllerButton, pressed: bool) {
        self.world_mut()
            .resource_mut::<ControllerState>()
            .set_pressed(hand, button, pressed);
    }

    pub fn press(&mut self, hand: Hand, button: ControllerButton) {
        self.set_button(hand, button, true);
    }

    pub fn release(&mut self, hand: Hand, button: ControllerButton) {
        self.set_button(hand, button, false);
    }

    pub fn set_stick(&mut self, hand: Hand, value: Vec2) {
        self.world_mut()
            .resource_mut::<ControllerState>()
            .set_thumbstick(hand, value);
    }

    /// Presses for one frame, then releases for one frame.
    pub fn tap(&mut self, hand: Hand, button: ControllerButton) {
        self.press(hand, button);
        self.step();
        self.release(hand, button);
        self.step();
    }

    pub fn step(&mut self) {
        self.app.update();
    }

    pub fn step_n(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.update();
        }
    }
}
