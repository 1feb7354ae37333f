//! Timeline of controller input read from JSON, for headless demo runs.
//!
//! ```json
//! { "steps": [
//!     { "duration": 0.5, "aim_right": [0.0, 1.0, -3.0] },
//!     { "duration": 0.1, "aim_right": [0.0, 1.0, -3.0], "right": { "secondary": true } }
//! ] }
//! ```

use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::info;
use vr_input::{ControllerButton, ControllerState, Hand};

use crate::ecs::pointer::{Pointer, PointerRegistry};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScriptedHand {
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub secondary: bool,
    #[serde(default)]
    pub trigger: bool,
    #[serde(default)]
    pub grip: bool,
    #[serde(default)]
    pub stick: [f32; 2],
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScriptedStep {
    pub duration: f32,
    #[serde(default)]
    pub left: ScriptedHand,
    #[serde(default)]
    pub right: ScriptedHand,
    /// World point the left pointer looks at during this step.
    #[serde(default)]
    pub aim_left: Option<[f32; 3]>,
    #[serde(default)]
    pub aim_right: Option<[f32; 3]>,
}

impl ScriptedStep {
    fn hand(&self, hand: Hand) -> &ScriptedHand {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    fn aim(&self, hand: Hand) -> Option<Vec3> {
        match hand {
            Hand::Left => self.aim_left,
            Hand::Right => self.aim_right,
        }
        .map(Vec3::from_array)
    }

    pub fn apply(&self, state: &mut ControllerState) {
        for hand in Hand::ALL {
            let input = self.hand(hand);
            state.set_pressed(hand, ControllerButton::Primary, input.primary);
            state.set_pressed(hand, ControllerButton::Secondary, input.secondary);
            state.set_pressed(hand, ControllerButton::Trigger, input.trigger);
            state.set_pressed(hand, ControllerButton::Grip, input.grip);
            state.set_thumbstick(hand, Vec2::from_array(input.stick));
        }
    }
}

#[derive(Resource, Debug)]
pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    finished: bool,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            finished: false,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn total_duration(&self) -> f32 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Moves the timeline forward and returns the step now in effect. Past the end, the
    /// last step stays in effect and the player reports finished.
    pub fn advance(&mut self, dt: f32) -> &ScriptedStep {
        self.time_in_step += dt;
        while !self.finished && self.time_in_step >= self.steps[self.index].duration {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
            } else {
                self.time_in_step = 0.0;
                self.finished = true;
            }
        }
        &self.steps[self.index]
    }
}

/// Plays the script into [`ControllerState`] and aims the pointers.
pub fn apply_scripted_input(
    time: Res<Time>,
    mut player: ResMut<ScriptedInputPlayer>,
    mut controls: ResMut<ControllerState>,
    registry: Res<PointerRegistry>,
    mut pointers: Query<&mut Transform, With<Pointer>>,
) {
    if player.is_finished() {
        return;
    }
    let step = player.advance(time.delta_secs()).clone();
    step.apply(&mut controls);

    for (hand, entity) in registry.iter() {
        let (Some(target), Ok(mut transform)) = (step.aim(hand), pointers.get_mut(entity)) else {
            continue;
        };
        if target != transform.translation {
            transform.look_at(target, Dir3::Y);
        }
    }

    if player.is_finished() {
        info!("Scripted input finished");
    }
}
