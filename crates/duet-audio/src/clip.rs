//! Audio clip data and content identity.
//!
//! An [`AudioClip`] is an immutable, cheaply cloneable handle to decoded
//! sample data. The manager never plays two copies of the same music track
//! at once; "same track" is decided by comparing sample content, not handle
//! identity, so a caller replaying the same asset through a freshly loaded
//! clip is still suppressed.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{AudioError, AudioResult};

/// Default sample rate for audio clips.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default number of channels (stereo).
pub const DEFAULT_CHANNELS: u16 = 2;

/// Immutable audio sample data.
///
/// Samples are interleaved `f32` in the range -1.0..=1.0. Cloning shares the
/// underlying allocation.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Interleaved sample data.
    samples: Arc<Vec<f32>>,
    /// Sample rate in Hz.
    sample_rate: u32,
    /// Number of channels (1 = mono, 2 = stereo).
    channels: u16,
}

impl AudioClip {
    /// Create a clip from interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample rate or channel count is zero, or if
    /// the buffer length is not a whole number of frames.
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32, channels: u16) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate);
        }
        if channels == 0 {
            return Err(AudioError::NoChannels);
        }
        if samples.len() % channels as usize != 0 {
            return Err(AudioError::TruncatedSamples {
                len: samples.len(),
                channels,
            });
        }

        Ok(Self {
            samples: Arc::new(samples),
            sample_rate,
            channels,
        })
    }

    /// Create an empty clip.
    ///
    /// Empty clips are the "no sound" sentinel: every play call treats them
    /// as invalid input and does nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            samples: Arc::new(Vec::new()),
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
        }
    }

    /// Check whether the clip holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the interleaved sample data.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get the sample rate in Hz.
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the number of channels.
    #[must_use]
    pub const fn channels(&self) -> u16 {
        self.channels
    }

    /// Get the total sample count across all channels.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Get the number of frames (samples per channel).
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Get the playback length in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f32 {
        self.frame_count() as f32 / self.sample_rate as f32
    }

    /// Get the playback length as a [`Duration`].
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / f64::from(self.sample_rate))
    }

    /// Compare sample content with another clip.
    ///
    /// Two clips are the same sound iff every sample pair matches. Empty
    /// clips never match anything, and a sample-count mismatch is an
    /// immediate "different". Clips sharing one allocation skip the scan.
    /// Samples compare numerically, so `-0.0` matches `0.0`; identical NaN
    /// bit patterns also match rather than poisoning the comparison.
    ///
    /// This is an O(n) scan of the sample data, so it is only run on
    /// music-track-change requests, never per tick.
    #[must_use]
    #[allow(clippy::float_cmp)] // exact sample equality is the contract
    pub fn same_content(&self, other: &AudioClip) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if Arc::ptr_eq(&self.samples, &other.samples) {
            return true;
        }
        if self.samples.len() != other.samples.len() {
            return false;
        }
        self.samples
            .iter()
            .zip(other.samples.iter())
            .all(|(a, b)| a == b || a.to_bits() == b.to_bits())
    }
}
