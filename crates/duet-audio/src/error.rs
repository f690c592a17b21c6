//! Error types for audio operations.
//!
//! Errors only surface from clip construction. Playback calls follow a
//! fail-soft policy: an invalid clip passed to a play call is a guarded
//! no-op, never an error, so a missing sound cannot take down the host.

use thiserror::Error;

/// Audio error types.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Sample rate was zero.
    #[error("sample rate must be non-zero")]
    InvalidSampleRate,

    /// Channel count was zero.
    #[error("channel count must be non-zero")]
    NoChannels,

    /// Sample buffer does not divide evenly into frames.
    #[error("sample buffer length {len} is not divisible by channel count {channels}")]
    TruncatedSamples {
        /// Total sample count of the rejected buffer.
        len: usize,
        /// Channel count the buffer was declared with.
        channels: u16,
    },
}

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;
