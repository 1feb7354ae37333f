//! Scene devices that buttons and sliders control.

use bevy::prelude::*;

use crate::events::AudioCue;

/// A light that starts switched off.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Lamp {
    pub powered: bool,
    pub intensity: f32,
}

impl Default for Lamp {
    fn default() -> Self {
        Self {
            powered: false,
            intensity: 1.0,
        }
    }
}

impl Lamp {
    pub fn toggle_power(&mut self) {
        self.powered = !self.powered;
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }
}

/// Looping song player. Every change it makes is reported as an [`AudioCue`].
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Radio {
    pub songs: Vec<String>,
    pub current: usize,
    pub powered: bool,
    pub volume: f32,
}

impl Radio {
    pub fn new(songs: Vec<String>) -> Self {
        Self {
            songs,
            current: 0,
            powered: false,
            volume: 1.0,
        }
    }

    pub fn current_song(&self) -> Option<&str> {
        self.songs.get(self.current).map(String::as_str)
    }

    fn play_cue(&self, source: Entity) -> Option<AudioCue> {
        self.current_song().map(|clip| AudioCue::Play {
            source,
            clip: clip.to_string(),
        })
    }

    pub fn toggle_power(&mut self, source: Entity) -> Option<AudioCue> {
        self.powered = !self.powered;
        if self.powered {
            self.play_cue(source)
        } else {
            Some(AudioCue::Stop { source })
        }
    }

    /// Cues the next song, wrapping to the first. Plays it right away only when powered.
    pub fn next_song(&mut self, source: Entity) -> Option<AudioCue> {
        if self.songs.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.songs.len();
        if self.powered {
            self.play_cue(source)
        } else {
            None
        }
    }

    pub fn set_volume(&mut self, source: Entity, volume: f32) -> AudioCue {
        self.volume = volume.clamp(0.0, 1.0);
        AudioCue::SetVolume {
            source,
            volume: self.volume,
        }
    }
}
