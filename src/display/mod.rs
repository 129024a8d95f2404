//! Display surface abstraction for player-overlay
//!
//! The host document provides two things: lookup of the control widgets
//! by a fixed structural convention, and fullscreen requests that may be
//! reachable through several vendor-specific entry points.

pub mod fullscreen;
pub mod headless;

pub use fullscreen::{FullscreenApi, FullscreenChain, FullscreenTransition};
pub use headless::HeadlessDocument;

use crate::utils::error::{OverlayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every widget the controller knows how to bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetRole {
    Media,
    PlayButton,
    CurrentTime,
    Duration,
    ProgressFill,
    ScrubTrack,
    VolumeButton,
    VolumeFill,
    VolumeTrack,
    FullscreenButton,
    Container,
    UnmuteOverlay,
}

impl WidgetRole {
    pub const ALL: [WidgetRole; 12] = [
        WidgetRole::Media,
        WidgetRole::PlayButton,
        WidgetRole::CurrentTime,
        WidgetRole::Duration,
        WidgetRole::ProgressFill,
        WidgetRole::ScrubTrack,
        WidgetRole::VolumeButton,
        WidgetRole::VolumeFill,
        WidgetRole::VolumeTrack,
        WidgetRole::FullscreenButton,
        WidgetRole::Container,
        WidgetRole::UnmuteOverlay,
    ];

    /// Selector the widget is found by
    pub fn selector(self) -> &'static str {
        match self {
            WidgetRole::Media => "video",
            WidgetRole::PlayButton => ".play-pause-btn",
            WidgetRole::CurrentTime => ".current-time",
            WidgetRole::Duration => ".duration",
            WidgetRole::ProgressFill => ".progress-bar",
            WidgetRole::ScrubTrack => ".progress-container",
            WidgetRole::VolumeButton => ".volume-btn",
            WidgetRole::VolumeFill => ".volume-level",
            WidgetRole::VolumeTrack => ".volume-slider",
            WidgetRole::FullscreenButton => ".fullscreen-btn",
            WidgetRole::Container => ".player-container",
            WidgetRole::UnmuteOverlay => ".unmute-overlay",
        }
    }

    fn name(self) -> &'static str {
        match self {
            WidgetRole::Media => "media",
            WidgetRole::PlayButton => "play-button",
            WidgetRole::CurrentTime => "current-time",
            WidgetRole::Duration => "duration",
            WidgetRole::ProgressFill => "progress-fill",
            WidgetRole::ScrubTrack => "scrub-track",
            WidgetRole::VolumeButton => "volume-button",
            WidgetRole::VolumeFill => "volume-fill",
            WidgetRole::VolumeTrack => "volume-track",
            WidgetRole::FullscreenButton => "fullscreen-button",
            WidgetRole::Container => "container",
            WidgetRole::UnmuteOverlay => "unmute-overlay",
        }
    }
}

impl fmt::Display for WidgetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidgetRole {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        WidgetRole::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| OverlayError::InvalidInput(format!("Unknown widget '{}'", s)))
    }
}

/// Structural lookup of widgets in the host document
pub trait Document {
    /// Whether an element matching `selector` exists
    fn query(&self, selector: &str) -> bool;
}

/// Fullscreen capabilities of the host display
pub trait DisplaySurface {
    /// Whether some element is currently fullscreen
    fn is_fullscreen(&self) -> bool;

    /// Whether `api` can be used to enter fullscreen
    fn can_enter(&self, api: FullscreenApi) -> bool;

    /// Whether `api` can be used to leave fullscreen
    fn can_exit(&self, api: FullscreenApi) -> bool;

    /// Make `target` fullscreen through `api`
    fn request_fullscreen(&mut self, api: FullscreenApi, target: WidgetRole) -> Result<()>;

    /// Leave fullscreen through `api`
    fn exit_fullscreen(&mut self, api: FullscreenApi) -> Result<()>;
}
