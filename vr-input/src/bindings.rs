use super::{ControllerButton, ControllerState, Hand, XrAction};
use bevy::prelude::Resource;
use std::collections::HashMap;
use vr_types::{ControlBinding, ControlBindings};

/// One physical control, written as `"Right.Secondary"` in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonBinding {
    pub hand: Hand,
    pub button: ControllerButton,
}

impl ButtonBinding {
    pub fn new(hand: Hand, button: ControllerButton) -> Self {
        Self { hand, button }
    }

    pub fn is_pressed(&self, state: &ControllerState) -> bool {
        state.pressed(self.hand, self.button)
    }

    pub fn is_just_pressed(&self, state: &ControllerState) -> bool {
        state.just_pressed(self.hand, self.button)
    }

    pub fn from_string(s: &str) -> Option<Self> {
        let (hand, button) = s.split_once('.')?;
        Some(Self {
            hand: Hand::from_string(hand.trim())?,
            button: ControllerButton::from_string(button.trim())?,
        })
    }

    pub fn label(&self) -> String {
        format!("{}.{}", self.hand.label(), self.button.label())
    }
}

#[derive(Resource, Debug, Clone)]
pub struct ActionBindings {
    bindings: HashMap<XrAction, Vec<ButtonBinding>>,
}

impl ActionBindings {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::from_settings(&ControlBindings::default())
    }

    /// Builds bindings from settings strings. Unparsable entries are skipped with a warning;
    /// an action left with nothing falls back to its default binding.
    pub fn from_settings(settings: &ControlBindings) -> Self {
        let defaults = ControlBindings::default();
        let mut bindings = HashMap::new();

        for action in XrAction::all() {
            let configured = parse_binding(*action, binding_for(settings, *action));
            let sources = if configured.is_empty() {
                parse_binding(*action, binding_for(&defaults, *action))
            } else {
                configured
            };
            bindings.insert(*action, sources);
        }

        Self { bindings }
    }

    pub fn get(&self, action: XrAction) -> Option<&[ButtonBinding]> {
        self.bindings.get(&action).map(|v| v.as_slice())
    }

    pub fn add_binding(&mut self, action: XrAction, binding: ButtonBinding) {
        let sources = self.bindings.entry(action).or_default();
        if !sources.contains(&binding) {
            sources.push(binding);
        }
    }

    pub fn set_binding(&mut self, action: XrAction, binding: ButtonBinding) {
        self.bindings.insert(action, vec![binding]);
    }

    pub fn is_pressed(&self, action: XrAction, state: &ControllerState) -> bool {
        self.sources(action).any(|b| b.is_pressed(state))
    }

    pub fn is_just_pressed(&self, action: XrAction, state: &ControllerState) -> bool {
        self.sources(action).any(|b| b.is_just_pressed(state))
    }

    /// Like [`Self::is_pressed`], but only bindings on `hand` count.
    pub fn is_pressed_by(&self, action: XrAction, hand: Hand, state: &ControllerState) -> bool {
        self.sources(action)
            .filter(|b| b.hand == hand)
            .any(|b| b.is_pressed(state))
    }

    pub fn is_just_pressed_by(
        &self,
        action: XrAction,
        hand: Hand,
        state: &ControllerState,
    ) -> bool {
        self.sources(action)
            .filter(|b| b.hand == hand)
            .any(|b| b.is_just_pressed(state))
    }

    fn sources(&self, action: XrAction) -> impl Iterator<Item = &ButtonBinding> {
        self.bindings.get(&action).into_iter().flatten()
    }
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn binding_for(settings: &ControlBindings, action: XrAction) -> &ControlBinding {
    match action {
        XrAction::PointerClick => &settings.pointer_click,
        XrAction::Activate => &settings.activate,
        XrAction::Manipulate => &settings.manipulate,
        XrAction::Jump => &settings.jump,
    }
}

fn parse_binding(action: XrAction, binding: &ControlBinding) -> Vec<ButtonBinding> {
    let mut out = Vec::new();
    for entry in binding.entries() {
        match ButtonBinding::from_string(entry) {
            Some(parsed) if !out.contains(&parsed) => out.push(parsed),
            Some(_) => {}
            None => tracing::warn!("Ignoring invalid binding {:?} for {:?}", entry, action),
        }
    }
    out
}
