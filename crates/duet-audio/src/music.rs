//! Music playback state machine.
//!
//! [`MusicDirector`] owns the two-channel pool and orchestrates crossfades:
//! when a new track replaces an old one, the pool's roles are swapped, the
//! new front channel ramps up from silence, and the displaced channel ramps
//! down, both audible at once on the same two physical slots. Requests for
//! the track already playing are suppressed by content comparison.
//!
//! The director is driven by the host's frame clock through
//! [`MusicDirector::tick`]; it does no work between ticks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::channel::{Channel, ChannelPool};
use crate::clip::AudioClip;
use crate::fade::Fade;

/// Fade-out duration for displaced and stopped music, in seconds.
pub const MUSIC_FADE_OUT_SECS: f32 = 0.5;

/// Music playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MusicState {
    /// No music.
    #[default]
    Idle,
    /// Front channel audible, back channel silent.
    Playing,
    /// Front channel fading in while the back channel fades out.
    Crossfading,
    /// Both channels fading toward silence after an explicit stop.
    StoppingOut,
}

impl MusicState {
    /// Check whether any channel may be audible.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Check whether fades are in flight.
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        matches!(self, Self::Crossfading | Self::StoppingOut)
    }
}

/// The music half of the audio manager.
#[derive(Debug)]
pub struct MusicDirector {
    /// The two reserved music channels.
    pool: ChannelPool,
    /// Live fades, at most one per physical slot.
    fades: Vec<Fade>,
    /// Current state.
    state: MusicState,
    /// Fade-out duration for displaced and stopped tracks.
    fade_out_secs: f32,
}

impl Default for MusicDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicDirector {
    /// Create an idle director with the default fade-out duration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fade_out(MUSIC_FADE_OUT_SECS)
    }

    /// Create an idle director with a custom fade-out duration.
    #[must_use]
    pub fn with_fade_out(fade_out_secs: f32) -> Self {
        Self {
            pool: ChannelPool::new(),
            fades: Vec::with_capacity(2),
            state: MusicState::Idle,
            fade_out_secs: fade_out_secs.max(0.0),
        }
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> MusicState {
        self.state
    }

    /// Get the channel pool.
    #[must_use]
    pub const fn pool(&self) -> &ChannelPool {
        &self.pool
    }

    /// Get the clip on the front channel, if any.
    #[must_use]
    pub fn current_clip(&self) -> Option<&AudioClip> {
        self.pool.front().clip()
    }

    /// Start playing a music track, crossfading from whatever is playing.
    ///
    /// The displaced channel fades out over the configured fade-out
    /// duration while the new front channel fades in to `volume` over
    /// `fade_secs`. If `clip` has the same sample content as the track
    /// already on the front channel, the call is a no-op; restarting the
    /// current track from a fresh handle is deliberately impossible.
    ///
    /// Requests arriving mid-crossfade win: in-flight fades are cancelled
    /// before the new pair is scheduled, never queued.
    pub fn play_track(&mut self, clip: &AudioClip, volume: f32, looping: bool, fade_secs: f32) {
        if clip.is_empty() {
            debug!("Ignoring play request for empty clip");
            return;
        }
        if self
            .pool
            .front()
            .clip()
            .is_some_and(|current| current.same_content(clip))
        {
            debug!("Track already playing, request suppressed");
            return;
        }

        // Cancel in-flight fades before they can fight the new pair.
        self.fades.clear();
        self.pool.swap();

        let front = self.pool.front_mut();
        front.set_volume(0.0);
        front.assign(clip.clone());
        front.set_looping(looping);
        front.play();

        self.fades
            .push(Fade::new(self.pool.front_slot(), volume, fade_secs));
        self.fades
            .push(Fade::new(self.pool.back_slot(), 0.0, self.fade_out_secs));
        self.state = MusicState::Crossfading;

        debug!(
            "Crossfading to new track over {}s (front slot {})",
            fade_secs,
            self.pool.front_slot()
        );
    }

    /// Fade all music out. No-op when idle.
    pub fn stop_track(&mut self) {
        if self.state == MusicState::Idle {
            return;
        }

        self.fades.clear();
        self.fades.push(Fade::new(0, 0.0, self.fade_out_secs));
        self.fades.push(Fade::new(1, 0.0, self.fade_out_secs));
        self.state = MusicState::StoppingOut;

        debug!("Stopping music over {}s", self.fade_out_secs);
    }

    /// Advance all live fades by `delta` seconds.
    ///
    /// Each live fade advances exactly once per tick; terminated fades are
    /// dropped. When the last fade terminates, a crossfade settles into
    /// [`MusicState::Playing`] and a stop settles into [`MusicState::Idle`].
    pub fn tick(&mut self, delta: f32) {
        let pool = &mut self.pool;
        self.fades
            .retain_mut(|fade| !fade.advance(delta, pool.slot_mut(fade.slot())));

        if self.fades.is_empty() {
            match self.state {
                MusicState::Crossfading => self.state = MusicState::Playing,
                MusicState::StoppingOut => {
                    self.state = MusicState::Idle;
                    debug!("Music stopped");
                }
                MusicState::Idle | MusicState::Playing => {}
            }
        }
    }

    /// Get the front channel.
    #[must_use]
    pub fn front(&self) -> &Channel {
        self.pool.front()
    }

    /// Get the back channel.
    #[must_use]
    pub fn back(&self) -> &Channel {
        self.pool.back()
    }
}
