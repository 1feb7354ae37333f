//! A small room used by the binary: an interactive crate with a full action menu, a lamp,
//! a radio and the player rig.

use bevy::prelude::*;
use tracing::info;
use vr_input::Hand;

use crate::ecs::action_menu::{ActionRegistry, InteractionAction};
use crate::ecs::collision::{Collider, CollisionLayers};
use crate::ecs::components::{
    CharacterMotor, HeadAnchor, HeadDrivenCollider, Hidden, PlayerRig, SnapTurn, SurfaceColor,
};
use crate::ecs::devices::{Lamp, Radio};
use crate::ecs::interaction::HoverBroadcaster;
use crate::ecs::pointer::Pointer;
use crate::ecs::widgets::{ButtonCommand, PhysicsButton, PhysicsSlider, SliderBinding};
use crate::settings_types::Settings;

const BUTTON_HALF_EXTENTS: Vec3 = Vec3::new(0.12, 0.06, 0.02);
const SLIDER_HALF_EXTENTS: Vec3 = Vec3::new(0.4, 0.04, 0.02);

#[derive(Resource, Debug, Clone, Copy)]
pub struct DemoScene {
    pub rig: Entity,
    pub head: Entity,
    pub crate_entity: Entity,
    pub lamp: Entity,
    pub radio: Entity,
}

fn spawn_button(commands: &mut Commands, position: Vec3, command: ButtonCommand) -> Entity {
    commands
        .spawn((
            PhysicsButton::new(command),
            Collider::cuboid(BUTTON_HALF_EXTENTS),
            CollisionLayers::UI,
            Transform::from_translation(position),
        ))
        .id()
}

fn spawn_slider(commands: &mut Commands, position: Vec3, binding: SliderBinding) -> Entity {
    commands
        .spawn((
            PhysicsSlider::new(binding),
            Collider::cuboid(SLIDER_HALF_EXTENTS),
            CollisionLayers::UI,
            Transform::from_translation(position),
        ))
        .id()
}

pub fn spawn_demo_scene(mut commands: Commands, settings: Res<Settings>) {
    let head = commands
        .spawn((HeadAnchor, Transform::from_xyz(0.0, 1.7, 0.0)))
        .id();
    let rig = commands
        .spawn((
            PlayerRig { head: Some(head) },
            SnapTurn::from_settings(&settings.locomotion),
            CharacterMotor::from_settings(&settings.locomotion),
            HeadDrivenCollider::from_settings(&settings.locomotion),
            Transform::default(),
        ))
        .id();

    for (hand, x) in [(Hand::Left, -0.2), (Hand::Right, 0.2)] {
        commands.spawn((
            Pointer::from_settings(hand, &settings.pointer),
            Transform::from_xyz(x, 1.2, -0.2),
        ));
    }

    // Interactive crate and its menu, laid out in a row above it.
    let crate_entity = commands.spawn_empty().id();
    let actions = vec![
        InteractionAction::rotate(&settings.actions),
        InteractionAction::translate(&settings.actions),
        InteractionAction::scale_up(&settings.actions),
        InteractionAction::toggle_color(&settings.actions),
        InteractionAction::teleport(rig, head),
    ];
    let mut commands_row: Vec<ButtonCommand> = (0..actions.len())
        .map(|index| ButtonCommand::ActivateAction {
            registry: crate_entity,
            index,
        })
        .collect();
    commands_row.push(ButtonCommand::DeactivateAllAndClose {
        registry: crate_entity,
    });
    commands_row.push(ButtonCommand::CloseMenu {
        registry: crate_entity,
    });

    let menu_widgets: Vec<Entity> = commands_row
        .into_iter()
        .enumerate()
        .map(|(i, command)| {
            let position = Vec3::new(-0.9 + i as f32 * 0.3, 1.9, -2.6);
            let button = spawn_button(&mut commands, position, command);
            commands.entity(button).insert(Hidden);
            button
        })
        .collect();

    commands.entity(crate_entity).insert((
        ActionRegistry::new(actions).with_menu_widgets(menu_widgets),
        HoverBroadcaster::highlight_tracking(Hand::Right),
        SurfaceColor::new([0.6, 0.4, 0.2, 1.0]),
        Collider::cuboid(Vec3::splat(0.3)),
        Transform::from_xyz(0.0, 1.2, -3.0),
    ));

    // Lamp with power button and intensity slider.
    let lamp = commands
        .spawn((
            Lamp::default(),
            HoverBroadcaster::highlight_tracking(Hand::Right),
            Collider::cuboid(Vec3::new(0.15, 0.4, 0.15)),
            Transform::from_xyz(2.0, 0.8, -3.0),
        ))
        .id();
    spawn_button(&mut commands, Vec3::new(2.0, 1.5, -2.8), ButtonCommand::ToggleLamp(lamp));
    spawn_slider(
        &mut commands,
        Vec3::new(2.0, 1.35, -2.8),
        SliderBinding::LampIntensity(lamp),
    );

    // Radio with power, next-song and volume controls.
    let radio = commands
        .spawn((
            Radio::new(vec!["track_01.ogg".into(), "track_02.ogg".into()]),
            HoverBroadcaster::highlight_tracking(Hand::Right),
            Collider::cuboid(Vec3::new(0.3, 0.2, 0.15)),
            Transform::from_xyz(-2.0, 1.0, -3.0),
        ))
        .id();
    spawn_button(&mut commands, Vec3::new(-2.15, 1.5, -2.8), ButtonCommand::ToggleRadio(radio));
    spawn_button(&mut commands, Vec3::new(-1.85, 1.5, -2.8), ButtonCommand::NextSong(radio));
    spawn_slider(
        &mut commands,
        Vec3::new(-2.0, 1.35, -2.8),
        SliderBinding::RadioVolume(radio),
    );

    info!("Demo scene spawned");
    commands.insert_resource(DemoScene {
        rig,
        head,
        crate_entity,
        lamp,
        radio,
    });
}

/// Logs where everything ended up.
pub fn log_demo_summary(world: &World) {
    let Some(scene) = world.get_resource::<DemoScene>() else {
        return;
    };
    if let Some(transform) = world.get::<Transform>(scene.crate_entity) {
        info!(
            "Crate at {:?}, scale {:?}, hidden: {}",
            transform.translation,
            transform.scale,
            world.get::<Hidden>(scene.crate_entity).is_some()
        );
    }
    if let Some(registry) = world.get::<ActionRegistry>(scene.crate_entity) {
        info!(
            "Crate action: {:?}, menu open: {}",
            registry.active_index(),
            registry.is_menu_open()
        );
    }
    if let Some(color) = world.get::<SurfaceColor>(scene.crate_entity) {
        info!("Crate color {:?}", color.current);
    }
    if let Some(lamp) = world.get::<Lamp>(scene.lamp) {
        info!("Lamp powered: {}, intensity {:.2}", lamp.powered, lamp.intensity);
    }
    if let Some(radio) = world.get::<Radio>(scene.radio) {
        info!(
            "Radio powered: {}, song {:?}, volume {:.2}",
            radio.powered,
            radio.current_song(),
            radio.volume
        );
    }
    if let Some(transform) = world.get::<Transform>(scene.rig) {
        info!("Rig at {:?}", transform.translation);
    }
}
