//! Playback channels and the two-slot music pool.
//!
//! A [`Channel`] is the control-side state of one mixable output slot: the
//! assigned clip, its volume, and loop/playing flags. The actual decode and
//! mixing path is the host's concern; the host mixer reads channel state
//! each frame via snapshots and produces audio from it.
//!
//! [`ChannelPool`] owns the two music channels for the manager's lifetime.
//! "Front" and "back" are role labels over the same two physical slots;
//! [`ChannelPool::swap`] exchanges the labels, never the channels.

use crate::clip::AudioClip;

/// Number of music channels in the pool.
pub const MUSIC_CHANNELS: usize = 2;

/// A single playback slot.
#[derive(Debug, Clone, Default)]
pub struct Channel {
    /// Assigned clip, if any.
    clip: Option<AudioClip>,
    /// Current volume (0.0-1.0).
    volume: f32,
    /// Whether playback loops.
    looping: bool,
    /// Whether the slot is audible.
    playing: bool,
}

impl Channel {
    /// Create a silent, unassigned channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a clip to this channel.
    pub fn assign(&mut self, clip: AudioClip) {
        self.clip = Some(clip);
    }

    /// Remove the assigned clip and stop playback.
    pub fn clear(&mut self) {
        self.clip = None;
        self.playing = false;
    }

    /// Get the assigned clip.
    #[must_use]
    pub fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    /// Get the current volume.
    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the volume, clamped to 0.0-1.0.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Check whether playback loops.
    #[must_use]
    pub const fn looping(&self) -> bool {
        self.looping
    }

    /// Set whether playback loops.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Check whether the slot is audible.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start playback of the assigned clip. No-op without a clip.
    pub fn play(&mut self) {
        if self.clip.is_some() {
            self.playing = true;
        }
    }

    /// Assign `clip` and play it once at `volume`, without looping.
    pub fn play_once(&mut self, clip: AudioClip, volume: f32) {
        self.clip = Some(clip);
        self.looping = false;
        self.set_volume(volume);
        self.playing = true;
    }

    /// Stop playback.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Capture the current state for the host mixer.
    #[must_use]
    pub fn snapshot(&self) -> ChannelSnapshot {
        ChannelSnapshot {
            clip: self.clip.clone(),
            volume: self.volume,
            looping: self.looping,
            playing: self.playing,
        }
    }
}

/// Point-in-time channel state handed to the host mixer.
#[derive(Debug, Clone)]
pub struct ChannelSnapshot {
    /// Assigned clip, if any.
    pub clip: Option<AudioClip>,
    /// Volume after any category scaling (0.0-1.0).
    pub volume: f32,
    /// Whether playback loops.
    pub looping: bool,
    /// Whether the slot is audible.
    pub playing: bool,
}

/// The two reserved music channels plus front/back bookkeeping.
#[derive(Debug, Default)]
pub struct ChannelPool {
    /// The physical channels. Never reallocated.
    channels: [Channel; MUSIC_CHANNELS],
    /// Physical index of the current front channel.
    front: usize,
}

impl ChannelPool {
    /// Create a pool of two silent channels. Slot 0 starts as front.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exchange the front and back roles.
    ///
    /// O(1) bookkeeping only; channel contents are untouched.
    pub fn swap(&mut self) {
        self.front ^= 1;
    }

    /// Get the front (currently audible) channel.
    #[must_use]
    pub fn front(&self) -> &Channel {
        &self.channels[self.front]
    }

    /// Get the front channel mutably.
    pub fn front_mut(&mut self) -> &mut Channel {
        &mut self.channels[self.front]
    }

    /// Get the back (standby) channel.
    #[must_use]
    pub fn back(&self) -> &Channel {
        &self.channels[self.front ^ 1]
    }

    /// Get the back channel mutably.
    pub fn back_mut(&mut self) -> &mut Channel {
        &mut self.channels[self.front ^ 1]
    }

    /// Get the physical slot index currently holding the front role.
    #[must_use]
    pub const fn front_slot(&self) -> usize {
        self.front
    }

    /// Get the physical slot index currently holding the back role.
    #[must_use]
    pub const fn back_slot(&self) -> usize {
        self.front ^ 1
    }

    /// Get a channel by physical slot index.
    #[must_use]
    pub fn slot(&self, index: usize) -> &Channel {
        &self.channels[index]
    }

    /// Get a channel by physical slot index, mutably.
    pub fn slot_mut(&mut self, index: usize) -> &mut Channel {
        &mut self.channels[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_volume_clamped() {
        let mut channel = Channel::new();
        channel.set_volume(1.5);
        assert!((channel.volume() - 1.0).abs() < f32::EPSILON);
        channel.set_volume(-0.2);
        assert!(channel.volume().abs() < f32::EPSILON);
    }

    #[test]
    fn test_channel_play_requires_clip() {
        let mut channel = Channel::new();
        channel.play();
        assert!(!channel.is_playing());

        channel.assign(AudioClip::from_samples(vec![0.0, 0.0], 44100, 2).expect("clip"));
        channel.play();
        assert!(channel.is_playing());

        channel.stop();
        assert!(!channel.is_playing());
    }

    #[test]
    fn test_play_once_overrides_loop_and_volume() {
        let mut channel = Channel::new();
        channel.set_looping(true);
        let clip = AudioClip::from_samples(vec![0.0, 0.0], 44100, 2).expect("clip");
        channel.play_once(clip, 0.7);
        assert!(channel.is_playing());
        assert!(!channel.looping());
        assert!((channel.volume() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pool_swap_exchanges_roles_only() {
        let mut pool = ChannelPool::new();
        pool.front_mut().set_volume(0.8);

        assert_eq!(pool.front_slot(), 0);
        pool.swap();
        assert_eq!(pool.front_slot(), 1);
        assert_eq!(pool.back_slot(), 0);

        // The channel that was front keeps its state under the back label.
        assert!((pool.back().volume() - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pool_double_swap_restores_roles() {
        let mut pool = ChannelPool::new();
        pool.swap();
        pool.swap();
        assert_eq!(pool.front_slot(), 0);
    }
}
