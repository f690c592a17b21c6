//! One-shot sound effect voices.
//!
//! Each effect plays on its own transient [`Channel`], allocated per request
//! and dropped once the clip has run its length, so any number of effects
//! can overlap without touching the two reserved music channels. An optional
//! delay holds the voice silent before playback begins.

use tracing::debug;

use crate::channel::{Channel, ChannelSnapshot};
use crate::clip::AudioClip;

/// Handle to a scheduled one-shot effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(u64);

impl EffectId {
    /// Get the raw ID.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Lifecycle of a transient voice.
#[derive(Debug, Clone, Copy)]
enum VoicePhase {
    /// Holding silent until the delay elapses.
    Waiting {
        /// Delay time left in seconds.
        remaining: f32,
    },
    /// Audible until the clip length elapses.
    Playing {
        /// Play time left in seconds.
        remaining: f32,
    },
    /// Done; the voice is reclaimed on the next tick.
    Finished,
}

/// A transient channel bound to one effect request.
#[derive(Debug)]
struct EffectVoice {
    id: EffectId,
    channel: Channel,
    volume: f32,
    phase: VoicePhase,
}

impl EffectVoice {
    fn advance(&mut self, delta: f32) {
        match &mut self.phase {
            VoicePhase::Waiting { remaining } => {
                *remaining -= delta;
                if *remaining <= 0.0 {
                    if let Some(clip) = self.channel.clip().cloned() {
                        let length = clip.duration_secs();
                        self.channel.play_once(clip, self.volume);
                        self.phase = VoicePhase::Playing { remaining: length };
                    } else {
                        self.phase = VoicePhase::Finished;
                    }
                }
            }
            VoicePhase::Playing { remaining } => {
                *remaining -= delta;
                if *remaining <= 0.0 {
                    self.channel.stop();
                    self.phase = VoicePhase::Finished;
                }
            }
            VoicePhase::Finished => {}
        }
    }

    const fn is_finished(&self) -> bool {
        matches!(self.phase, VoicePhase::Finished)
    }
}

/// The sound-effect half of the audio manager.
#[derive(Debug, Default)]
pub struct EffectDispatcher {
    /// Live voices, in spawn order.
    voices: Vec<EffectVoice>,
    /// Next effect ID.
    next_id: u64,
}

impl EffectDispatcher {
    /// Create a dispatcher with no live voices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a one-shot effect on a fresh transient channel.
    ///
    /// Playback starts once `delay_secs` have elapsed and the channel is
    /// reclaimed after a further clip length. Returns `None` for an empty
    /// clip (nothing is scheduled).
    pub fn play_effect(
        &mut self,
        clip: &AudioClip,
        volume: f32,
        delay_secs: f32,
    ) -> Option<EffectId> {
        if clip.is_empty() {
            debug!("Ignoring effect request for empty clip");
            return None;
        }

        let id = EffectId(self.next_id);
        self.next_id += 1;

        let mut channel = Channel::new();
        channel.assign(clip.clone());
        channel.set_looping(false);

        self.voices.push(EffectVoice {
            id,
            channel,
            volume: volume.clamp(0.0, 1.0),
            phase: VoicePhase::Waiting {
                remaining: delay_secs.max(0.0),
            },
        });

        debug!("Scheduled effect {:?} (delay {}s)", id, delay_secs.max(0.0));
        Some(id)
    }

    /// Release an effect's channel early. Returns whether it was live.
    pub fn stop_effect(&mut self, id: EffectId) -> bool {
        let before = self.voices.len();
        self.voices.retain(|voice| voice.id != id);
        before != self.voices.len()
    }

    /// Check whether an effect's channel is still held.
    #[must_use]
    pub fn is_live(&self, id: EffectId) -> bool {
        self.voices.iter().any(|voice| voice.id == id)
    }

    /// Check whether an effect is currently audible.
    #[must_use]
    pub fn is_audible(&self, id: EffectId) -> bool {
        self.voices
            .iter()
            .any(|voice| voice.id == id && voice.channel.is_playing())
    }

    /// Get the number of live voices (waiting or audible).
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.voices.len()
    }

    /// Capture each live voice's channel state, in spawn order.
    ///
    /// This is what the host mixer renders: delayed voices show up with
    /// `playing` false, audible ones carry their clip and volume.
    #[must_use]
    pub fn snapshots(&self) -> Vec<(EffectId, ChannelSnapshot)> {
        self.voices
            .iter()
            .map(|voice| (voice.id, voice.channel.snapshot()))
            .collect()
    }

    /// Advance all voices by `delta` seconds and reclaim finished channels.
    pub fn tick(&mut self, delta: f32) {
        for voice in &mut self.voices {
            voice.advance(delta);
        }
        let before = self.voices.len();
        self.voices.retain(|voice| !voice.is_finished());
        if before != self.voices.len() {
            debug!("Reclaimed {} effect channel(s)", before - self.voices.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A clip lasting exactly `secs` seconds of mono audio at 100 Hz.
    fn clip(secs: f32) -> AudioClip {
        let frames = (secs * 100.0) as usize;
        AudioClip::from_samples(vec![0.5; frames], 100, 1).expect("clip")
    }

    #[test]
    fn test_effect_plays_and_is_reclaimed() {
        let mut dispatcher = EffectDispatcher::new();
        let id = dispatcher
            .play_effect(&clip(0.5), 1.0, 0.0)
            .expect("should schedule");

        // Inaudible until the first tick starts playback.
        assert!(dispatcher.is_live(id));
        assert!(!dispatcher.is_audible(id));

        dispatcher.tick(0.01);
        assert!(dispatcher.is_audible(id));

        // Audible for the clip length, then reclaimed.
        dispatcher.tick(0.4);
        assert!(dispatcher.is_audible(id));
        dispatcher.tick(0.2);
        dispatcher.tick(0.01);
        assert!(!dispatcher.is_live(id));
        assert_eq!(dispatcher.active_count(), 0);
    }

    #[test]
    fn test_effect_delay_holds_playback() {
        let mut dispatcher = EffectDispatcher::new();
        let id = dispatcher
            .play_effect(&clip(0.2), 0.8, 0.5)
            .expect("should schedule");

        dispatcher.tick(0.3);
        assert!(dispatcher.is_live(id));
        assert!(!dispatcher.is_audible(id));

        dispatcher.tick(0.3);
        assert!(dispatcher.is_audible(id));
    }

    #[test]
    fn test_concurrent_effects_have_independent_channels() {
        let mut dispatcher = EffectDispatcher::new();
        let long = dispatcher
            .play_effect(&clip(1.0), 1.0, 0.0)
            .expect("should schedule");
        let short = dispatcher
            .play_effect(&clip(0.1), 1.0, 0.0)
            .expect("should schedule");
        assert_ne!(long, short);
        assert_eq!(dispatcher.active_count(), 2);

        dispatcher.tick(0.05);
        assert!(dispatcher.is_audible(long));
        assert!(dispatcher.is_audible(short));

        // The short clip ends without disturbing the long one.
        dispatcher.tick(0.1);
        dispatcher.tick(0.01);
        assert!(!dispatcher.is_live(short));
        assert!(dispatcher.is_audible(long));
    }

    #[test]
    fn test_snapshots_expose_voice_state_to_the_mixer() {
        let mut dispatcher = EffectDispatcher::new();
        let delayed = dispatcher
            .play_effect(&clip(0.5), 0.6, 1.0)
            .expect("should schedule");
        let immediate = dispatcher
            .play_effect(&clip(0.5), 0.9, 0.0)
            .expect("should schedule");
        dispatcher.tick(0.01);

        let snapshots = dispatcher.snapshots();
        assert_eq!(snapshots.len(), 2);

        let (_, waiting) = snapshots
            .iter()
            .find(|(id, _)| *id == delayed)
            .expect("delayed voice");
        assert!(!waiting.playing);

        let (_, audible) = snapshots
            .iter()
            .find(|(id, _)| *id == immediate)
            .expect("immediate voice");
        assert!(audible.playing);
        assert!(audible.clip.is_some());
        assert!((audible.volume - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_clip_schedules_nothing() {
        let mut dispatcher = EffectDispatcher::new();
        assert!(dispatcher.play_effect(&AudioClip::empty(), 1.0, 0.0).is_none());
        assert_eq!(dispatcher.active_count(), 0);
    }

    #[test]
    fn test_stop_effect_releases_channel() {
        let mut dispatcher = EffectDispatcher::new();
        let id = dispatcher
            .play_effect(&clip(5.0), 1.0, 0.0)
            .expect("should schedule");
        dispatcher.tick(0.01);

        assert!(dispatcher.stop_effect(id));
        assert!(!dispatcher.is_live(id));
        assert!(!dispatcher.stop_effect(id));
    }
}
