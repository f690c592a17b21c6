//! Per-tick volume ramps.
//!
//! A [`Fade`] is a resumable task: the scheduler calls
//! [`Fade::advance`] once per host tick with the elapsed-time delta, and the
//! fade reports when it has terminated. Fades never block; cancellation is
//! removing the fade from the scheduler's active set before its replacement
//! is added, so no two live fades ever write the same channel's volume.

use crate::channel::Channel;

/// Snap-to-target threshold for fade termination.
pub const FADE_EPSILON: f32 = 0.001;

/// A volume ramp on one physical music slot.
///
/// Volume moves toward the target by exponential smoothing proportional to
/// the elapsed fraction of the remaining duration:
///
/// ```text
/// volume += (target - volume) * (delta / remaining)
/// ```
///
/// The factor saturates at 1, so ticks summing to at least the duration land
/// exactly on the target regardless of tick rate, and the ramp never
/// overshoots.
#[derive(Debug, Clone)]
pub struct Fade {
    /// Physical slot index this fade drives.
    slot: usize,
    /// Target volume (0.0-1.0).
    target: f32,
    /// Total ramp duration in seconds.
    duration: f32,
    /// Time consumed so far.
    elapsed: f32,
}

impl Fade {
    /// Create a fade toward `target` over `duration_secs`.
    ///
    /// A non-positive duration snaps to the target on the first tick.
    #[must_use]
    pub fn new(slot: usize, target: f32, duration_secs: f32) -> Self {
        Self {
            slot,
            target: target.clamp(0.0, 1.0),
            duration: duration_secs.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Get the physical slot index this fade drives.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Get the target volume.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.target
    }

    /// Advance the ramp by `delta` seconds against the slot's channel.
    ///
    /// Returns `true` when the fade has terminated. On termination the
    /// volume is snapped exactly to the target, and a fade to silence also
    /// stops the channel.
    pub fn advance(&mut self, delta: f32, channel: &mut Channel) -> bool {
        let remaining = self.duration - self.elapsed;
        self.elapsed += delta;

        let volume = channel.volume();
        if remaining <= 0.0 || delta >= remaining {
            channel.set_volume(self.target);
        } else {
            channel.set_volume(volume + (self.target - volume) * (delta / remaining));
        }

        if (channel.volume() - self.target).abs() < FADE_EPSILON {
            channel.set_volume(self.target);
            // Only a fade to exact silence stops the channel; a tiny
            // nonzero target leaves it playing quietly.
            if self.target <= 0.0 {
                channel.stop();
            }
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::AudioClip;
    use proptest::prelude::*;

    fn playing_channel(volume: f32) -> Channel {
        let mut channel = Channel::new();
        channel.assign(AudioClip::from_samples(vec![0.0, 0.0], 44100, 2).expect("clip"));
        channel.set_volume(volume);
        channel.play();
        channel
    }

    /// Drive a fade at a fixed tick rate until it reports done.
    fn run_to_completion(fade: &mut Fade, channel: &mut Channel, tick: f32) -> usize {
        let mut ticks = 0;
        while !fade.advance(tick, channel) {
            ticks += 1;
            assert!(ticks < 10_000, "fade failed to terminate");
        }
        ticks
    }

    #[test]
    fn test_fade_in_reaches_exact_target() {
        let mut channel = playing_channel(0.0);
        let mut fade = Fade::new(0, 1.0, 1.0);
        run_to_completion(&mut fade, &mut channel, 1.0 / 60.0);
        assert!((channel.volume() - 1.0).abs() < f32::EPSILON);
        assert!(channel.is_playing());
    }

    #[test]
    fn test_fade_out_stops_channel() {
        let mut channel = playing_channel(1.0);
        let mut fade = Fade::new(0, 0.0, 0.5);
        run_to_completion(&mut fade, &mut channel, 1.0 / 60.0);
        assert!(channel.volume().abs() < f32::EPSILON);
        assert!(!channel.is_playing());
    }

    #[test]
    fn test_tiny_nonzero_target_keeps_channel_playing() {
        let mut channel = playing_channel(1.0);
        let mut fade = Fade::new(0, 0.0005, 0.5);
        run_to_completion(&mut fade, &mut channel, 1.0 / 60.0);
        assert!((channel.volume() - 0.0005).abs() < f32::EPSILON);
        assert!(channel.is_playing());
    }

    #[test]
    fn test_zero_duration_snaps_immediately() {
        let mut channel = playing_channel(0.0);
        let mut fade = Fade::new(0, 0.7, 0.0);
        assert!(fade.advance(0.016, &mut channel));
        assert!((channel.volume() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_oversized_tick_lands_on_target() {
        let mut channel = playing_channel(0.0);
        let mut fade = Fade::new(0, 1.0, 0.25);
        // Single tick longer than the whole ramp.
        assert!(fade.advance(1.0, &mut channel));
        assert!((channel.volume() - 1.0).abs() < f32::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_fade_converges_monotonically(
            start in 0.0f32..=1.0,
            target in 0.0f32..=1.0,
            duration in 0.05f32..5.0,
            tick in 0.004f32..0.05,
        ) {
            let mut channel = playing_channel(start);
            let mut fade = Fade::new(0, target, duration);

            let rising = target >= start;
            let mut previous = channel.volume();
            let mut ticks = 0usize;
            loop {
                let done = fade.advance(tick, &mut channel);
                let volume = channel.volume();
                // Never overshoots, always moves toward the target.
                if rising {
                    prop_assert!(volume >= previous - f32::EPSILON);
                    prop_assert!(volume <= target + FADE_EPSILON);
                } else {
                    prop_assert!(volume <= previous + f32::EPSILON);
                    prop_assert!(volume >= target - FADE_EPSILON);
                }
                previous = volume;
                if done {
                    break;
                }
                ticks += 1;
                prop_assert!(ticks < 10_000, "fade failed to terminate");
            }
            prop_assert!((channel.volume() - fade.target()).abs() < f32::EPSILON);
        }
    }
}
