use bevy::prelude::*;

/// Which physical controller an input or pointer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    pub fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Hand::Left => "Left",
            Hand::Right => "Right",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "Left" | "L" => Some(Hand::Left),
            "Right" | "R" => Some(Hand::Right),
            _ => None,
        }
    }
}

/// Buttons present on each touch controller. `Primary` is A/X, `Secondary` is B/Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    Primary,
    Secondary,
    Trigger,
    Grip,
    Thumbstick,
}

impl ControllerButton {
    pub const ALL: [ControllerButton; 5] = [
        ControllerButton::Primary,
        ControllerButton::Secondary,
        ControllerButton::Trigger,
        ControllerButton::Grip,
        ControllerButton::Thumbstick,
    ];

    fn bit(self) -> u8 {
        match self {
            ControllerButton::Primary => 1 << 0,
            ControllerButton::Secondary => 1 << 1,
            ControllerButton::Trigger => 1 << 2,
            ControllerButton::Grip => 1 << 3,
            ControllerButton::Thumbstick => 1 << 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControllerButton::Primary => "Primary",
            ControllerButton::Secondary => "Secondary",
            ControllerButton::Trigger => "Trigger",
            ControllerButton::Grip => "Grip",
            ControllerButton::Thumbstick => "Thumbstick",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == s)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct HandState {
    held: u8,
    previous: u8,
    thumbstick: Vec2,
}

/// Snapshot of both controllers for the current frame.
///
/// Backends write the held level with [`ControllerState::set_pressed`]. Edges are derived
/// by comparing against the previous frame's bits, which [`end_controller_frame`] records
/// in `Last`, so `just_pressed` is true for exactly one frame per physical press.
#[derive(Resource, Debug, Default, Clone)]
pub struct ControllerState {
    hands: [HandState; 2],
}

impl ControllerState {
    pub fn set_pressed(&mut self, hand: Hand, button: ControllerButton, pressed: bool) {
        let state = &mut self.hands[hand.index()];
        if pressed {
            state.held |= button.bit();
        } else {
            state.held &= !button.bit();
        }
    }

    pub fn set_thumbstick(&mut self, hand: Hand, value: Vec2) {
        self.hands[hand.index()].thumbstick = value.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    pub fn set_thumbstick_x(&mut self, hand: Hand, x: f32) {
        let current = self.thumbstick(hand);
        self.set_thumbstick(hand, Vec2::new(x, current.y));
    }

    pub fn set_thumbstick_y(&mut self, hand: Hand, y: f32) {
        let current = self.thumbstick(hand);
        self.set_thumbstick(hand, Vec2::new(current.x, y));
    }

    pub fn pressed(&self, hand: Hand, button: ControllerButton) -> bool {
        self.hands[hand.index()].held & button.bit() != 0
    }

    pub fn just_pressed(&self, hand: Hand, button: ControllerButton) -> bool {
        let state = &self.hands[hand.index()];
        state.held & button.bit() != 0 && state.previous & button.bit() == 0
    }

    pub fn just_released(&self, hand: Hand, button: ControllerButton) -> bool {
        let state = &self.hands[hand.index()];
        state.held & button.bit() == 0 && state.previous & button.bit() != 0
    }

    pub fn thumbstick(&self, hand: Hand) -> Vec2 {
        self.hands[hand.index()].thumbstick
    }

    pub fn release_all(&mut self, hand: Hand) {
        let state = &mut self.hands[hand.index()];
        state.held = 0;
        state.thumbstick = Vec2::ZERO;
    }

    /// Records this frame's held bits as the baseline for next frame's edges.
    pub fn end_frame(&mut self) {
        for state in &mut self.hands {
            state.previous = state.held;
        }
    }
}

pub fn end_controller_frame(mut state: ResMut<ControllerState>) {
    state.end_frame();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn just_pressed_lasts_one_frame() {
        let mut state = ControllerState::default();
        state.set_pressed(Hand::Right, ControllerButton::Primary, true);
        assert!(state.just_pressed(Hand::Right, ControllerButton::Primary));
        assert!(state.pressed(Hand::Right, ControllerButton::Primary));

        state.end_frame();
        assert!(!state.just_pressed(Hand::Right, ControllerButton::Primary));
        assert!(state.pressed(Hand::Right, ControllerButton::Primary));

        state.set_pressed(Hand::Right, ControllerButton::Primary, false);
        assert!(state.just_released(Hand::Right, ControllerButton::Primary));
        state.end_frame();
        assert!(!state.just_released(Hand::Right, ControllerButton::Primary));
    }

    #[test]
    fn hands_are_independent() {
        let mut state = ControllerState::default();
        state.set_pressed(Hand::Left, ControllerButton::Secondary, true);
        assert!(state.pressed(Hand::Left, ControllerButton::Secondary));
        assert!(!state.pressed(Hand::Right, ControllerButton::Secondary));
        assert!(!state.pressed(Hand::Left, ControllerButton::Primary));
    }

    #[test]
    fn thumbstick_is_clamped() {
        let mut state = ControllerState::default();
        state.set_thumbstick(Hand::Left, Vec2::new(3.0, -2.0));
        assert_eq!(state.thumbstick(Hand::Left), Vec2::new(1.0, -1.0));
        state.set_thumbstick_x(Hand::Left, 0.25);
        assert_eq!(state.thumbstick(Hand::Left), Vec2::new(0.25, -1.0));
    }

    #[test]
    fn hand_labels_round_trip() {
        for hand in Hand::ALL {
            assert_eq!(Hand::from_string(hand.label()), Some(hand));
        }
        for button in ControllerButton::ALL {
            assert_eq!(ControllerButton::from_string(button.label()), Some(button));
        }
    }
}
