//! Desktop stand-in for touch controllers: a regular gamepad drives both virtual hands.
//!
//! Face buttons map to A/B/X/Y, bumpers to grips, triggers to triggers and each stick to
//! the thumbstick of the matching hand.

use super::{ControllerButton, ControllerState, Hand};
use bevy::prelude::*;
use std::sync::Mutex;

#[derive(Resource)]
pub struct GilrsResource {
    pub gilrs: Mutex<Option<gilrs::Gilrs>>,
    pub active_gamepad: Option<gilrs::GamepadId>,
}

impl Default for GilrsResource {
    fn default() -> Self {
        match gilrs::Gilrs::new() {
            Ok(gilrs) => {
                tracing::info!("Gilrs gamepad backend initialized");
                Self {
                    gilrs: Mutex::new(Some(gilrs)),
                    active_gamepad: None,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to initialize gamepad support: {}", e);
                Self {
                    gilrs: Mutex::new(None),
                    active_gamepad: None,
                }
            }
        }
    }
}

enum GamepadEventData {
    Connected(String),
    Disconnected,
    Button(Hand, ControllerButton, bool),
    Axis(Hand, StickAxis, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickAxis {
    X,
    Y,
}

/// Drains gilrs events into [`ControllerState`]. Only the first connected gamepad is used.
pub fn gilrs_controller_polling_system(
    mut gilrs_res: ResMut<GilrsResource>,
    mut state: ResMut<ControllerState>,
) {
    let mut events_to_process = Vec::new();

    {
        let Ok(mut gilrs_guard) = gilrs_res.gilrs.lock() else {
            return;
        };

        let Some(ref mut gilrs) = *gilrs_guard else {
            return;
        };

        while let Some(gilrs_event) = gilrs.next_event() {
            let event_data = match gilrs_event.event {
                gilrs::EventType::Connected => Some(GamepadEventData::Connected(
                    gilrs.gamepad(gilrs_event.id).name().to_string(),
                )),
                gilrs::EventType::Disconnected => Some(GamepadEventData::Disconnected),
                gilrs::EventType::ButtonPressed(button, _) => map_button(button)
                    .map(|(hand, b)| GamepadEventData::Button(hand, b, true)),
                gilrs::EventType::ButtonReleased(button, _) => map_button(button)
                    .map(|(hand, b)| GamepadEventData::Button(hand, b, false)),
                gilrs::EventType::AxisChanged(axis, value, _) => {
                    map_axis(axis).map(|(hand, a)| GamepadEventData::Axis(hand, a, value))
                }
                _ => None,
            };

            if let Some(event) = event_data {
                events_to_process.push((gilrs_event.id, event));
            }
        }
    }

    for (gamepad_id, event) in events_to_process {
        match event {
            GamepadEventData::Connected(name) => {
                if gilrs_res.active_gamepad.is_none() {
                    gilrs_res.active_gamepad = Some(gamepad_id);
                    tracing::info!("Gamepad connected: {} (emulating touch controllers)", name);
                }
            }
            GamepadEventData::Disconnected => {
                if gilrs_res.active_gamepad == Some(gamepad_id) {
                    gilrs_res.active_gamepad = None;
                    for hand in Hand::ALL {
                        state.release_all(hand);
                    }
                    tracing::info!("Gamepad disconnected");
                }
            }
            _ if gilrs_res.active_gamepad.is_some_and(|id| id != gamepad_id) => {}
            GamepadEventData::Button(hand, button, pressed) => {
                state.set_pressed(hand, button, pressed);
            }
            GamepadEventData::Axis(hand, StickAxis::X, value) => {
                state.set_thumbstick_x(hand, value);
            }
            GamepadEventData::Axis(hand, StickAxis::Y, value) => {
                state.set_thumbstick_y(hand, value);
            }
        }
    }
}

pub fn map_button(button: gilrs::Button) -> Option<(Hand, ControllerButton)> {
    match button {
        gilrs::Button::South => Some((Hand::Right, ControllerButton::Primary)),
        gilrs::Button::East => Some((Hand::Right, ControllerButton::Secondary)),
        gilrs::Button::West => Some((Hand::Left, ControllerButton::Primary)),
        gilrs::Button::North => Some((Hand::Left, ControllerButton::Secondary)),
        gilrs::Button::LeftTrigger => Some((Hand::Left, ControllerButton::Grip)),
        gilrs::Button::RightTrigger => Some((Hand::Right, ControllerButton::Grip)),
        gilrs::Button::LeftTrigger2 => Some((Hand::Left, ControllerButton::Trigger)),
        gilrs::Button::RightTrigger2 => Some((Hand::Right, ControllerButton::Trigger)),
        gilrs::Button::LeftThumb => Some((Hand::Left, ControllerButton::Thumbstick)),
        gilrs::Button::RightThumb => Some((Hand::Right, ControllerButton::Thumbstick)),
        _ => None,
    }
}

pub fn map_axis(axis: gilrs::Axis) -> Option<(Hand, StickAxis)> {
    match axis {
        gilrs::Axis::LeftStickX => Some((Hand::Left, StickAxis::X)),
        gilrs::Axis::LeftStickY => Some((Hand::Left, StickAxis::Y)),
        gilrs::Axis::RightStickX => Some((Hand::Right, StickAxis::X)),
        gilrs::Axis::RightStickY => Some((Hand::Right, StickAxis::Y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_buttons_split_across_hands() {
        assert_eq!(
            map_button(gilrs::Button::South),
            Some((Hand::Right, ControllerButton::Primary))
        );
        assert_eq!(
            map_button(gilrs::Button::North),
            Some((Hand::Left, ControllerButton::Secondary))
        );
        assert_eq!(map_button(gilrs::Button::Start), None);
    }

    #[test]
    fn sticks_map_to_their_hand() {
        assert_eq!(
            map_axis(gilrs::Axis::RightStickX),
            Some((Hand::Right, StickAxis::X))
        );
        assert_eq!(
            map_axis(gilrs::Axis::LeftStickY),
            Some((Hand::Left, StickAxis::Y))
        );
        assert_eq!(map_axis(gilrs::Axis::LeftZ), None);
    }
}
