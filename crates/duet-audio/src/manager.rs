//! The audio manager facade.
//!
//! [`AudioManager`] is the single entry point callers use: play a music
//! track, play a one-shot effect, stop music, and feed it the host's frame
//! clock via [`AudioManager::update`]. It is an explicitly constructed,
//! caller-owned service; construct it at startup, hold it wherever the host
//! keeps its systems, and drop it at shutdown.
//!
//! Scheduling is single-threaded and cooperative: nothing advances between
//! ticks, and every update fully drives all ready fades and effect voices
//! before returning, so no locks are needed.

use serde::{Deserialize, Serialize};

use crate::channel::ChannelSnapshot;
use crate::clip::AudioClip;
use crate::effects::{EffectDispatcher, EffectId};
use crate::music::{MusicDirector, MusicState, MUSIC_FADE_OUT_SECS};
use crate::volume::VolumeSettings;

/// Default fade-in duration for new music tracks, in seconds.
pub const DEFAULT_MUSIC_FADE_SECS: f32 = 1.0;

/// Audio manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Fade-in duration used by the convenience music call.
    pub default_music_fade_secs: f32,
    /// Fade-out duration for displaced and stopped music.
    pub music_fade_out_secs: f32,
    /// Volume used by the convenience play calls.
    pub default_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            default_music_fade_secs: DEFAULT_MUSIC_FADE_SECS,
            music_fade_out_secs: MUSIC_FADE_OUT_SECS,
            default_volume: 1.0,
        }
    }
}

impl AudioConfig {
    /// Set the default music fade-in duration.
    #[must_use]
    pub const fn with_music_fade(mut self, secs: f32) -> Self {
        self.default_music_fade_secs = secs;
        self
    }

    /// Set the music fade-out duration.
    #[must_use]
    pub const fn with_music_fade_out(mut self, secs: f32) -> Self {
        self.music_fade_out_secs = secs;
        self
    }

    /// Set the default play volume.
    #[must_use]
    pub const fn with_volume(mut self, volume: f32) -> Self {
        self.default_volume = volume;
        self
    }
}

/// Music channel state handed to the host mixer each frame.
#[derive(Debug, Clone)]
pub struct MusicPlayback {
    /// Front (incoming/audible) channel, volume scaled by category settings.
    pub front: ChannelSnapshot,
    /// Back (outgoing/standby) channel, volume scaled by category settings.
    pub back: ChannelSnapshot,
    /// Current music state.
    pub state: MusicState,
}

/// One live effect voice's state handed to the host mixer.
#[derive(Debug, Clone)]
pub struct EffectPlayback {
    /// Handle of the effect.
    pub id: EffectId,
    /// Voice channel state, volume scaled by category settings.
    pub channel: ChannelSnapshot,
}

/// Facade over music and effect playback.
#[derive(Debug, Default)]
pub struct AudioManager {
    /// Music state machine and channel pool.
    music: MusicDirector,
    /// Transient effect voices.
    effects: EffectDispatcher,
    /// Category volume settings.
    volumes: VolumeSettings,
    /// Configuration.
    config: AudioConfig,
}

impl AudioManager {
    /// Create a manager with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AudioConfig::default())
    }

    /// Create a manager with the given configuration.
    #[must_use]
    pub fn with_config(config: AudioConfig) -> Self {
        Self {
            music: MusicDirector::with_fade_out(config.music_fade_out_secs),
            effects: EffectDispatcher::new(),
            volumes: VolumeSettings::default(),
            config,
        }
    }

    /// Play a one-shot sound effect at `volume` after `delay_secs`.
    ///
    /// Empty clips schedule nothing and return `None`.
    pub fn play_sound_effect(
        &mut self,
        clip: &AudioClip,
        volume: f32,
        delay_secs: f32,
    ) -> Option<EffectId> {
        self.effects.play_effect(clip, volume, delay_secs)
    }

    /// Play a one-shot sound effect at the default volume with no delay.
    pub fn play_effect(&mut self, clip: &AudioClip) -> Option<EffectId> {
        self.effects
            .play_effect(clip, self.config.default_volume, 0.0)
    }

    /// Play a music track, crossfading from the current one.
    ///
    /// A request for the track already playing is a no-op.
    pub fn play_music_track(
        &mut self,
        clip: &AudioClip,
        volume: f32,
        looping: bool,
        fade_secs: f32,
    ) {
        self.music.play_track(clip, volume, looping, fade_secs);
    }

    /// Play a looping music track with the default volume and fade time.
    pub fn play_music(&mut self, clip: &AudioClip) {
        self.music.play_track(
            clip,
            self.config.default_volume,
            true,
            self.config.default_music_fade_secs,
        );
    }

    /// Fade all music out.
    pub fn stop_music_track(&mut self) {
        self.music.stop_track();
    }

    /// Stop a scheduled effect and release its channel early.
    pub fn stop_effect(&mut self, id: EffectId) -> bool {
        self.effects.stop_effect(id)
    }

    /// Advance all playback by `delta_secs` of host time.
    ///
    /// Call once per frame with the frame's elapsed time. A stalled host
    /// clock simply stalls fade and effect progress.
    pub fn update(&mut self, delta_secs: f32) {
        let delta = delta_secs.max(0.0);
        self.music.tick(delta);
        self.effects.tick(delta);
    }

    /// Get the current music state.
    #[must_use]
    pub const fn music_state(&self) -> MusicState {
        self.music.state()
    }

    /// Get the clip on the front music channel, if any.
    #[must_use]
    pub fn current_music(&self) -> Option<&AudioClip> {
        self.music.current_clip()
    }

    /// Get the number of live effect voices.
    #[must_use]
    pub fn active_effect_count(&self) -> usize {
        self.effects.active_count()
    }

    /// Get the music director (read access, mainly for hosts and tests).
    #[must_use]
    pub const fn music(&self) -> &MusicDirector {
        &self.music
    }

    /// Get the category volume settings.
    #[must_use]
    pub const fn volumes(&self) -> &VolumeSettings {
        &self.volumes
    }

    /// Get the category volume settings mutably.
    pub fn volumes_mut(&mut self) -> &mut VolumeSettings {
        &mut self.volumes
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Capture music channel state for the host mixer.
    ///
    /// Channel volumes are pre-multiplied by the effective music volume so
    /// the mixer can use them directly.
    #[must_use]
    pub fn music_playback(&self) -> MusicPlayback {
        let scale = self.volumes.effective_music();
        let mut front = self.music.front().snapshot();
        let mut back = self.music.back().snapshot();
        front.volume *= scale;
        back.volume *= scale;
        MusicPlayback {
            front,
            back,
            state: self.music.state(),
        }
    }

    /// Capture effect voice state for the host mixer.
    ///
    /// Voice volumes are pre-multiplied by the effective sound-effects
    /// volume, mirroring [`AudioManager::music_playback`].
    #[must_use]
    pub fn effect_playback(&self) -> Vec<EffectPlayback> {
        let scale = self.volumes.effective_sfx();
        self.effects
            .snapshots()
            .into_iter()
            .map(|(id, mut channel)| {
                channel.volume *= scale;
                EffectPlayback { id, channel }
            })
            .collect()
    }
}
