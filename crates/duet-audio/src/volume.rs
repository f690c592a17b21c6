//! Category volume settings.
//!
//! Per-call volumes drive the fade targets; category volumes are the outer
//! mixer knobs the host applies on top when it reads playback snapshots.
//! Settings are serializable so hosts can persist them.

use serde::{Deserialize, Serialize};

/// Volume settings for the audio categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeSettings {
    /// Master volume (0.0-1.0).
    pub master: f32,
    /// Music volume (0.0-1.0).
    pub music: f32,
    /// Sound effects volume (0.0-1.0).
    pub sfx: f32,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            master: 1.0,
            music: 1.0,
            sfx: 1.0,
        }
    }
}

impl VolumeSettings {
    /// Returns the effective volume for music.
    #[must_use]
    pub fn effective_music(&self) -> f32 {
        self.master * self.music
    }

    /// Returns the effective volume for sound effects.
    #[must_use]
    pub fn effective_sfx(&self) -> f32 {
        self.master * self.sfx
    }

    /// Clamp all settings to 0.0-1.0.
    pub fn normalize(&mut self) {
        self.master = self.master.clamp(0.0, 1.0);
        self.music = self.music.clamp(0.0, 1.0);
        self.sfx = self.sfx.clamp(0.0, 1.0);
    }
}
