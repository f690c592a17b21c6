//! # Duet Audio
//!
//! Crossfading music playback on a fixed pool of two channels, plus
//! one-shot sound effects on transient channels.
//!
//! The crate is the control side of an audio system: it decides what each
//! channel should be doing every frame (assigned clip, volume, loop and
//! playing flags) while the host owns the clock and the decode/mix/output
//! path. Feed [`AudioManager::update`] the per-frame elapsed time and read
//! the channel state back out through snapshots.
//!
//! - Music lives on exactly two channels whose front/back roles swap on
//!   every track change; a crossfade ramps the new front up from silence
//!   while the displaced channel ramps down.
//! - A request for the track that is already playing is suppressed by
//!   comparing sample content, so reloading the same asset does not restart
//!   it.
//! - Effects each get their own transient channel, released once the clip
//!   has run its length after an optional delay.
//!
//! ```
//! use duet_audio::prelude::*;
//!
//! let theme = AudioClip::from_samples(vec![0.1; 8], 44100, 2)?;
//! let mut audio = AudioManager::new();
//!
//! audio.play_music_track(&theme, 1.0, true, 1.0);
//! audio.update(1.0 / 60.0); // once per host frame
//! # Ok::<(), duet_audio::AudioError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod channel;
pub mod clip;
pub mod effects;
pub mod error;
pub mod fade;
pub mod manager;
pub mod music;
pub mod volume;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::channel::{Channel, ChannelPool, ChannelSnapshot};
    pub use crate::clip::AudioClip;
    pub use crate::effects::{EffectDispatcher, EffectId};
    pub use crate::error::{AudioError, AudioResult};
    pub use crate::fade::Fade;
    pub use crate::manager::{AudioConfig, AudioManager, EffectPlayback, MusicPlayback};
    pub use crate::music::{MusicDirector, MusicState};
    pub use crate::volume::VolumeSettings;
}

pub use prelude::*;
