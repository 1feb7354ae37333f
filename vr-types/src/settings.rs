use serde::{Deserialize, Serialize};

/// Up to two controller bindings for one action, e.g. `["Right.Secondary", "Left.Secondary"]`.
///
/// Serialized as a bare string when only the first slot is used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlBinding(pub [String; 2]);

impl ControlBinding {
    pub fn single(binding: &str) -> Self {
        Self([binding.to_string(), String::new()])
    }

    pub fn pair(first: &str, second: &str) -> Self {
        Self([first.to_string(), second.to_string()])
    }

    /// Non-empty entries, in order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str).filter(|s| !s.is_empty())
    }
}

impl std::ops::Deref for ControlBinding {
    type Target = [String; 2];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for ControlBinding {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a ControlBinding {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for ControlBinding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.0[1].is_empty() {
            serializer.serialize_str(&self.0[0])
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for ControlBinding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Either {
            Single(String),
            Multiple(Vec<String>),
        }

        match Either::deserialize(deserializer)? {
            Either::Single(s) => Ok(ControlBinding([s, String::new()])),
            Either::Multiple(v) => {
                let mut bindings = [String::new(), String::new()];
                for (i, s) in v.into_iter().enumerate().take(2) {
                    bindings[i] = s;
                }
                Ok(ControlBinding(bindings))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlBindings {
    /// Toggles the action menu of the hovered object. Only the pointer's own hand counts.
    pub pointer_click: ControlBinding,
    /// Presses physics buttons and drags physics sliders.
    pub activate: ControlBinding,
    /// Drives the enabled action (rotate, translate, scale, ...).
    pub manipulate: ControlBinding,
    pub jump: ControlBinding,
}

impl Default for ControlBindings {
    fn default() -> Self {
        Self {
            pointer_click: ControlBinding::pair("Right.Secondary", "Left.Secondary"),
            activate: ControlBinding::pair("Right.Primary", "Left.Primary"),
            manipulate: ControlBinding::single("Right.Primary"),
            jump: ControlBinding::single("Left.Primary"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerSettings {
    /// Ray length when nothing is hit, and the raycast range.
    pub max_length: f32,
    /// Collision layers the pointer ray ignores.
    pub exclude_layers: u32,
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            max_length: 8.0,
            exclude_layers: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    pub speed: f32,
    pub gravity: f32,
    pub jump_height: f32,
    /// Degrees per snap turn.
    pub snap_angle: f32,
    pub stick_deadzone: f32,
    /// Meters the head may lean before it drags the body collider along.
    pub head_deadzone_radius: f32,
    pub ground_height: f32,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            speed: 3.0,
            gravity: -9.81,
            jump_height: 1.2,
            snap_angle: 45.0,
            stick_deadzone: 0.4,
            head_deadzone_radius: 0.25,
            ground_height: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    /// Degrees per second.
    pub rotation_speed: f32,
    pub rotation_axis: [f32; 3],
    pub scale_step: f32,
    pub move_speed: f32,
    pub move_direction: [f32; 3],
    /// Linear RGBA applied by the color toggle.
    pub alternate_color: [f32; 4],
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            rotation_speed: 50.0,
            rotation_axis: [0.0, 1.0, 0.0],
            scale_step: 0.1,
            move_speed: 1.0,
            move_direction: [0.0, 1.0, 0.0],
            alternate_color: [0.0, 0.0, 1.0, 1.0],
        }
    }
}
