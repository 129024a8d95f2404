//! Media element abstraction for player-overlay
//!
//! The controller never owns playback. It talks to whatever the host
//! provides through [`MediaElement`] and reacts to the [`MediaEvent`]s the
//! host forwards from it.

pub mod headless;

pub use headless::{AutoplayPolicy, HeadlessMedia};

use crate::utils::error::Result;

/// Host-provided playable media
///
/// Durations use `f64` seconds; NaN, infinity and zero all mean the
/// duration is not known yet.
pub trait MediaElement {
    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position
    fn set_current_time(&mut self, seconds: f64);

    /// Media duration in seconds, possibly unknown
    fn duration(&self) -> f64;

    /// Whether playback is paused
    fn is_paused(&self) -> bool;

    /// Whether audio is muted
    fn is_muted(&self) -> bool;

    /// Mute or unmute audio
    fn set_muted(&mut self, muted: bool);

    /// Volume level (0.0 to 1.0)
    fn volume(&self) -> f64;

    /// Set the volume level (0.0 to 1.0)
    fn set_volume(&mut self, volume: f64);

    /// Request playback
    ///
    /// The host may refuse, typically because of its autoplay policy.
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Show or hide the element's built-in controls
    fn set_native_controls(&mut self, visible: bool);

    /// Duration when it is known and usable for arithmetic
    fn known_duration(&self) -> Option<f64> {
        let duration = self.duration();
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }
}

/// Notifications emitted by the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Playback position advanced
    TimeUpdate,

    /// Duration and other metadata became available
    LoadedMetadata,

    /// Playback reached the end of the media
    Ended,
}
