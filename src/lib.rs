//! player-overlay: a custom control overlay for an embedded video player
//!
//! [`player::PlayerController`] binds to a media element and a fixed set of
//! control widgets and keeps the two in step. The host provides the media
//! element, widget lookup and fullscreen through the traits in [`media`] and
//! [`display`]; headless implementations of both live alongside them.

pub mod display;
pub mod media;
pub mod player;
pub mod utils;

pub use display::{DisplaySurface, Document, FullscreenApi, FullscreenChain, HeadlessDocument, WidgetRole};
pub use media::{AutoplayPolicy, HeadlessMedia, MediaElement, MediaEvent};
pub use player::{ControlEvent, ControlWidgetSet, OverlayActions, PlayGlyph, PlayerController, VolumeGlyph};
pub use utils::{format_time, Config, OverlayError, Result};
