use bevy::prelude::*;
use tracing::{debug, warn};

use crate::ecs::action_menu::ActionRegistry;
use crate::ecs::devices::{Lamp, Radio};
use crate::ecs::widgets::{ButtonCommand, PhysicsSlider, SliderBinding};
use crate::events::{AudioCue, ButtonPressed, SliderMoved};

pub fn apply_button_commands(
    mut pressed_events: MessageReader<ButtonPressed>,
    mut registries: Query<&mut ActionRegistry>,
    mut lamps: Query<&mut Lamp>,
    mut radios: Query<&mut Radio>,
    mut audio_cues: MessageWriter<AudioCue>,
) {
    for event in pressed_events.read() {
        match event.command {
            ButtonCommand::ActivateAction { registry, index } => {
                let Ok(mut registry) = registries.get_mut(registry) else {
                    warn!("Button {:?} targets missing registry", event.button);
                    continue;
                };
                if let Err(e) = registry.activate(index) {
                    warn!("Button {:?}: {}", event.button, e);
                }
            }
            ButtonCommand::DeactivateAllAndClose { registry } => {
                if let Ok(mut registry) = registries.get_mut(registry) {
                    registry.deactivate_all();
                    registry.close();
                }
            }
            ButtonCommand::CloseMenu { registry } => {
                if let Ok(mut registry) = registries.get_mut(registry) {
                    registry.close();
                }
            }
            ButtonCommand::ToggleLamp(lamp) => {
                if let Ok(mut lamp) = lamps.get_mut(lamp) {
                    lamp.toggle_power();
                    debug!("Lamp powered: {}", lamp.powered);
                }
            }
            ButtonCommand::ToggleRadio(radio) => {
                if let Ok(mut state) = radios.get_mut(radio) {
                    if let Some(cue) = state.toggle_power(radio) {
                        audio_cues.write(cue);
                    }
                }
            }
            ButtonCommand::NextSong(radio) => {
                if let Ok(mut state) = radios.get_mut(radio) {
                    if let Some(cue) = state.next_song(radio) {
                        audio_cues.write(cue);
                    }
                }
            }
            ButtonCommand::None => {}
        }
    }
}

pub fn apply_slider_bindings(
    mut moved_events: MessageReader<SliderMoved>,
    sliders: Query<&PhysicsSlider>,
    mut lamps: Query<&mut Lamp>,
    mut radios: Query<&mut Radio>,
    mut audio_cues: MessageWriter<AudioCue>,
) {
    for event in moved_events.read() {
        let Ok(slider) = sliders.get(event.slider) else {
            continue;
        };
        match slider.binding {
            SliderBinding::LampIntensity(lamp) => {
                if let Ok(mut lamp) = lamps.get_mut(lamp) {
                    lamp.set_intensity(event.value);
                }
            }
            SliderBinding::RadioVolume(radio) => {
                if let Ok(mut state) = radios.get_mut(radio) {
                    audio_cues.write(state.set_volume(radio, event.value));
                }
            }
            SliderBinding::None => {}
        }
    }
}
