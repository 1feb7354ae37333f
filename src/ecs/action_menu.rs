//! Per-object action menu: an ordered set of mutually exclusive actions plus menu
//! visibility.
//!
//! The index of each action is what menu buttons refer to, so the order given to
//! [`ActionRegistry::new`] is fixed for the registry's lifetime.

use bevy::prelude::*;
use tracing::{debug, info};
use vr_input::Hand;

use super::interaction::Hoverable;
use crate::error::InteractionError;
use crate::settings::ActionSettings;

/// Controller input handed to the active action each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActionInput {
    pub held: bool,
    pub just_pressed: bool,
    pub dt: f32,
}

/// A mutation requested by an action, applied by the action systems.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActionEffect {
    Rotate(Quat),
    Translate(Vec3),
    Scale(f32),
    /// `Some` switches to the given color, `None` restores the original.
    Recolor(Option<[f32; 4]>),
    Teleport { rig: Entity, head: Entity },
}

pub trait ActionBehavior {
    fn label(&self) -> &'static str;
    fn on_enable(&mut self) {}
    fn on_disable(&mut self) {}
    fn tick(&mut self, input: &ActionInput) -> Option<ActionEffect>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum InteractionAction {
    /// Degrees per second around `axis` while held.
    Rotate { speed_deg: f32, axis: Vec3 },
    /// Units per second along `direction` while held.
    Translate { speed: f32, direction: Vec3 },
    ScaleUp { step: f32 },
    ToggleColor { alternate: [f32; 4], applied: bool },
    /// Moves `rig` so that `head` ends up above this entity.
    Teleport {
        rig: Option<Entity>,
        head: Option<Entity>,
    },
}

impl InteractionAction {
    pub fn rotate(settings: &ActionSettings) -> Self {
        Self::Rotate {
            speed_deg: settings.rotation_speed,
            axis: Vec3::from_array(settings.rotation_axis),
        }
    }

    pub fn translate(settings: &ActionSettings) -> Self {
        Self::Translate {
            speed: settings.move_speed,
            direction: Vec3::from_array(settings.move_direction),
        }
    }

    pub fn scale_up(settings: &ActionSettings) -> Self {
        Self::ScaleUp {
            step: settings.scale_step,
        }
    }

    pub fn toggle_color(settings: &ActionSettings) -> Self {
        Self::ToggleColor {
            alternate: settings.alternate_color,
            applied: false,
        }
    }

    pub fn teleport(rig: Entity, head: Entity) -> Self {
        Self::Teleport {
            rig: Some(rig),
            head: Some(head),
        }
    }

    /// Fires on the press edge rather than continuously while held.
    fn is_press_triggered(&self) -> bool {
        matches!(
            self,
            InteractionAction::ScaleUp { .. }
                | InteractionAction::ToggleColor { .. }
                | InteractionAction::Teleport { .. }
        )
    }
}

impl ActionBehavior for InteractionAction {
    fn label(&self) -> &'static str {
        match self {
            InteractionAction::Rotate { .. } => "Rotate",
            InteractionAction::Translate { .. } => "Translate",
            InteractionAction::ScaleUp { .. } => "ScaleUp",
            InteractionAction::ToggleColor { .. } => "ToggleColor",
            InteractionAction::Teleport { .. } => "Teleport",
        }
    }

    fn tick(&mut self, input: &ActionInput) -> Option<ActionEffect> {
        let fire = if self.is_press_triggered() {
            input.just_pressed
        } else {
            input.held
        };
        if !fire {
            return None;
        }

        match self {
            InteractionAction::Rotate { speed_deg, axis } => {
                let axis = axis.try_normalize().unwrap_or(Vec3::Y);
                Some(ActionEffect::Rotate(Quat::from_axis_angle(
                    axis,
                    speed_deg.to_radians() * input.dt,
                )))
            }
            InteractionAction::Translate { speed, direction } => {
                Some(ActionEffect::Translate(*direction * *speed * input.dt))
            }
            InteractionAction::ScaleUp { step } => Some(ActionEffect::Scale(*step)),
            InteractionAction::ToggleColor { alternate, applied } => {
                *applied = !*applied;
                Some(ActionEffect::Recolor(applied.then_some(*alternate)))
            }
            InteractionAction::Teleport { rig, head } => match (*rig, *head) {
                (Some(rig), Some(head)) => Some(ActionEffect::Teleport { rig, head }),
                _ => None,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionSlot {
    pub action: InteractionAction,
    enabled: bool,
    /// Set on enable; the first press after enabling must start from a released button.
    awaiting_release: bool,
}

impl ActionSlot {
    fn new(action: InteractionAction) -> Self {
        Self {
            action,
            enabled: false,
            awaiting_release: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn enable(&mut self) {
        self.enabled = true;
        self.awaiting_release = true;
        self.action.on_enable();
    }

    fn disable(&mut self) {
        if self.enabled {
            self.enabled = false;
            self.action.on_disable();
        }
    }

    fn tick(&mut self, input: &ActionInput) -> Option<ActionEffect> {
        if self.awaiting_release {
            if input.held {
                return None;
            }
            self.awaiting_release = false;
        }
        self.action.tick(input)
    }
}

#[derive(Component, Clone, Debug)]
pub struct ActionRegistry {
    slots: Vec<ActionSlot>,
    menu_open: bool,
    /// Menu buttons, hidden while the menu is closed.
    pub menu_widgets: Vec<Entity>,
    /// Only this hand's hover lets the active action run.
    pub dominant_hand: Hand,
}

impl ActionRegistry {
    pub fn new(actions: Vec<InteractionAction>) -> Self {
        Self {
            slots: actions.into_iter().map(ActionSlot::new).collect(),
            menu_open: false,
            menu_widgets: Vec::new(),
            dominant_hand: Hand::Right,
        }
    }

    pub fn with_menu_widgets(mut self, widgets: Vec<Entity>) -> Self {
        self.menu_widgets = widgets;
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[ActionSlot] {
        &self.slots
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(ActionSlot::is_enabled)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.slots.iter().position(ActionSlot::is_enabled)
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Makes `index` the only enabled action and closes the menu. An out-of-range index
    /// leaves nothing enabled; the menu still closes.
    pub fn activate(&mut self, index: usize) -> Result<(), InteractionError> {
        self.deactivate_all();

        let len = self.slots.len();
        let result = match self.slots.get_mut(index) {
            Some(slot) => {
                slot.enable();
                info!("Action {} ({}) activated", index, slot.action.label());
                Ok(())
            }
            None => Err(InteractionError::ActionIndexOutOfRange { index, len }),
        };

        self.close();
        result
    }

    pub fn deactivate_all(&mut self) {
        for slot in &mut self.slots {
            slot.disable();
        }
    }

    pub fn open(&mut self) {
        self.menu_open = true;
    }

    pub fn toggle(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close(&mut self) {
        self.menu_open = false;
    }

    /// Runs the enabled action, if any.
    pub fn tick(&mut self, input: &ActionInput) -> Option<ActionEffect> {
        self.slots
            .iter_mut()
            .find(|slot| slot.enabled)
            .and_then(|slot| slot.tick(input))
    }

    /// Unset references that leave an action inert.
    pub fn missing_references(&self, entity: Entity) -> Vec<InteractionError> {
        let mut errors = Vec::new();
        for slot in &self.slots {
            if let InteractionAction::Teleport { rig, head } = &slot.action {
                if rig.is_none() {
                    errors.push(InteractionError::MissingReference {
                        component: "Teleport",
                        entity,
                        reference: "rig",
                    });
                }
                if head.is_none() {
                    errors.push(InteractionError::MissingReference {
                        component: "Teleport",
                        entity,
                        reference: "head",
                    });
                }
            }
        }
        errors
    }
}

impl Hoverable for ActionRegistry {
    fn on_hover_enter(&mut self, _hand: Hand) {}

    fn on_hover_exit(&mut self, _hand: Hand) {}

    fn on_click(&mut self, hand: Hand) {
        self.toggle();
        debug!("Menu toggled by {:?} pointer, open={}", hand, self.menu_open);
    }
}

/// Where the rig must go so the head stands above `target`, keeping the rig's height.
pub fn teleport_destination(target: Vec3, rig: &Transform, head_local: Vec3) -> Vec3 {
    let mut head_offset = rig.rotation * (head_local * rig.scale);
    head_offset.y = 0.0;
    Vec3::new(target.x, rig.translation.y, target.z) - head_offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ActionRegistry {
        let settings = ActionSettings::default();
        ActionRegistry::new(vec![
            InteractionAction::rotate(&settings),
            InteractionAction::translate(&settings),
            InteractionAction::scale_up(&settings),
        ])
    }

    fn press(held: bool, just_pressed: bool) -> ActionInput {
        ActionInput {
            held,
            just_pressed,
            dt: 0.5,
        }
    }

    #[test]
    fn activate_is_a_set_operation() {
        let mut registry = registry();
        registry.activate(0).unwrap();
        registry.activate(2).unwrap();
        assert_eq!(registry.active_index(), Some(2));
        assert_eq!(
            registry.slots().iter().filter(|s| s.is_enabled()).count(),
            1
        );
    }

    #[test]
    fn out_of_range_disables_all_and_closes() {
        let mut registry = registry();
        registry.activate(1).unwrap();
        registry.open();

        let err = registry.activate(7).unwrap_err();
        assert!(matches!(
            err,
            InteractionError::ActionIndexOutOfRange { index: 7, len: 3 }
        ));
        assert_eq!(registry.active_index(), None);
        assert!(!registry.is_menu_open());
    }

    #[test]
    fn menu_visibility_never_touches_actions() {
        let mut registry = registry();
        registry.activate(1).unwrap();
        registry.open();
        registry.toggle();
        registry.toggle();
        registry.close();
        assert_eq!(registry.active_index(), Some(1));
    }

    #[test]
    fn activate_closes_open_menu() {
        let mut registry = registry();
        registry.open();
        registry.activate(0).unwrap();
        assert!(!registry.is_menu_open());
    }

    #[test]
    fn deactivate_all_is_idempotent() {
        let mut registry = registry();
        registry.activate(0).unwrap();
        registry.deactivate_all();
        registry.deactivate_all();
        assert_eq!(registry.active_index(), None);
    }

    #[test]
    fn click_toggles_menu() {
        let mut registry = registry();
        registry.on_click(Hand::Left);
        assert!(registry.is_menu_open());
        registry.on_click(Hand::Right);
        assert!(!registry.is_menu_open());
    }

    #[test]
    fn press_actions_wait_for_release_after_enable() {
        let mut registry = registry();
        registry.activate(2).unwrap();
        // The press that selected the action is still held.
        assert_eq!(registry.tick(&press(true, true)), None);
        assert_eq!(registry.tick(&press(false, false)), None);
        assert_eq!(registry.tick(&press(true, true)), Some(ActionEffect::Scale(0.1)));
        assert_eq!(registry.tick(&press(true, false)), None);
    }

    #[test]
    fn rotate_is_continuous_while_held() {
        let mut action = InteractionAction::Rotate {
            speed_deg: 90.0,
            axis: Vec3::Y,
        };
        let Some(ActionEffect::Rotate(q)) = action.tick(&press(true, false)) else {
            panic!("expected rotation");
        };
        let (axis, angle) = q.to_axis_angle();
        assert!((angle - 45f32.to_radians()).abs() < 1e-5);
        assert!(axis.abs_diff_eq(Vec3::Y, 1e-5));
        assert_eq!(action.tick(&press(false, false)), None);
    }

    #[test]
    fn toggle_color_alternates() {
        let mut action = InteractionAction::toggle_color(&ActionSettings::default());
        assert_eq!(
            action.tick(&press(true, true)),
            Some(ActionEffect::Recolor(Some([0.0, 0.0, 1.0, 1.0])))
        );
        assert_eq!(action.tick(&press(true, true)), Some(ActionEffect::Recolor(None)));
    }

    #[test]
    fn teleport_without_rig_is_inert_and_reported() {
        let mut world = World::new();
        let owner = world.spawn_empty().id();
        let mut registry = ActionRegistry::new(vec![InteractionAction::Teleport {
            rig: None,
            head: None,
        }]);
        assert_eq!(registry.missing_references(owner).len(), 2);

        registry.activate(0).unwrap();
        registry.tick(&press(false, false));
        assert_eq!(registry.tick(&press(true, true)), None);
    }

    #[test]
    fn teleport_removes_horizontal_head_offset() {
        let rig = Transform::from_xyz(1.0, 0.5, 1.0);
        let destination = teleport_destination(
            Vec3::new(4.0, 2.0, -3.0),
            &rig,
            Vec3::new(0.2, 1.7, -0.1),
        );
        assert!(destination.abs_diff_eq(Vec3::new(3.8, 0.5, -2.9), 1e-5));
    }

    #[test]
    fn teleport_offset_follows_rig_rotation() {
        let rig = Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::PI));
        let destination = teleport_destination(Vec3::ZERO, &rig, Vec3::new(0.5, 1.7, 0.0));
        assert!(destination.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-5));
    }
}
