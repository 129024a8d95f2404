//! Player controller module for player-overlay
//!
//! This module keeps the control widgets in step with the media element.
//! Gestures on the widgets become media mutations, and media events
//! refresh what the widgets show.

mod controller;
mod widgets;

pub use controller::PlayerController;
pub use widgets::{Container, ControlWidgetSet, Fill, Label, Overlay, Track, UNMUTED_CLASS};

use std::fmt;

/// Glyph shown on the play button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayGlyph {
    /// Playback is paused; clicking plays
    Play,

    /// Playback is running; clicking pauses
    Pause,
}

impl PlayGlyph {
    pub fn symbol(self) -> &'static str {
        match self {
            PlayGlyph::Play => "▶",
            PlayGlyph::Pause => "⏸",
        }
    }
}

impl fmt::Display for PlayGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Glyph shown on the volume button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeGlyph {
    Muted,
    Unmuted,
}

impl VolumeGlyph {
    pub fn symbol(self) -> &'static str {
        match self {
            VolumeGlyph::Muted => "🔇",
            VolumeGlyph::Unmuted => "🔊",
        }
    }
}

impl fmt::Display for VolumeGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// User gestures on the control widgets
///
/// Track clicks carry the click offset and the track width at the time
/// of the click, both in the same units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    PlayClicked,
    ScrubTrackClicked { offset_x: f64, track_width: f64 },
    VolumeButtonClicked,
    VolumeTrackClicked { offset_x: f64, track_width: f64 },
    FullscreenClicked,
}

/// Actions the hosting UI invokes directly rather than through widget wiring
pub trait OverlayActions {
    /// Unmute at full volume, resume playback and dismiss the unmute overlay
    fn unmute_from_overlay(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs() {
        assert_eq!(PlayGlyph::Play.to_string(), "▶");
        assert_eq!(PlayGlyph::Pause.to_string(), "⏸");
        assert_eq!(VolumeGlyph::Muted.to_string(), "🔇");
        assert_eq!(VolumeGlyph::Unmuted.to_string(), "🔊");
    }
}
