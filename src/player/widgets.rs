//! Display model of the control widgets
//!
//! Every widget is optional. A widget the document does not contain stays
//! `None` for the controller's whole lifetime, and operations touching it
//! skip it.

use crate::display::{Document, WidgetRole};
use crate::utils::percent;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Instant;

/// Class added to the container once the viewer has unmuted
pub const UNMUTED_CLASS: &str = "video-unmuted";

/// Text-bearing widget: time labels and buttons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Bar whose width shows a fraction: progress and volume level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fill {
    width: String,
}

impl Fill {
    /// Width as rendered, e.g. `"25%"`; empty until first set
    pub fn width(&self) -> &str {
        &self.width
    }

    pub fn set_fraction(&mut self, fraction: f64) {
        self.width = percent(fraction);
    }
}

/// Click target with no visual state of its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Track;

/// The player container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Container {
    classes: BTreeSet<String>,
}

impl Container {
    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// The unmute prompt covering the player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    opacity: f64,
    displayed: bool,
    #[serde(skip)]
    hide_at: Option<Instant>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            displayed: true,
            hide_at: None,
        }
    }
}

impl Overlay {
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Whether the overlay still takes up layout space
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// When a started fade will remove the overlay
    pub fn hide_at(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Turn transparent now and leave layout at `hide_at`
    ///
    /// A fade already under way keeps its original deadline.
    pub(crate) fn fade_out(&mut self, hide_at: Instant) {
        self.opacity = 0.0;
        if self.displayed && self.hide_at.is_none() {
            self.hide_at = Some(hide_at);
        }
    }

    /// Complete a pending fade; returns whether the overlay was removed
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                self.displayed = false;
                true
            }
            _ => false,
        }
    }
}

/// All widgets the controller drives
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ControlWidgetSet {
    pub play_button: Option<Label>,
    pub current_time: Option<Label>,
    pub duration: Option<Label>,
    pub progress_fill: Option<Fill>,
    pub scrub_track: Option<Track>,
    pub volume_button: Option<Label>,
    pub volume_fill: Option<Fill>,
    pub volume_track: Option<Track>,
    pub fullscreen_button: Option<Track>,
    pub container: Option<Container>,
    pub unmute_overlay: Option<Overlay>,
}

impl ControlWidgetSet {
    /// Bind every widget the document contains
    pub fn locate<D: Document + ?Sized>(document: &D) -> Self {
        let found = |role: WidgetRole| document.query(role.selector());

        Self {
            play_button: found(WidgetRole::PlayButton).then(Label::default),
            current_time: found(WidgetRole::CurrentTime).then(Label::default),
            duration: found(WidgetRole::Duration).then(Label::default),
            progress_fill: found(WidgetRole::ProgressFill).then(Fill::default),
            scrub_track: found(WidgetRole::ScrubTrack).then_some(Track),
            volume_button: found(WidgetRole::VolumeButton).then(Label::default),
            volume_fill: found(WidgetRole::VolumeFill).then(Fill::default),
            volume_track: found(WidgetRole::VolumeTrack).then_some(Track),
            fullscreen_button: found(WidgetRole::FullscreenButton).then_some(Track),
            container: found(WidgetRole::Container).then(Container::default),
            unmute_overlay: found(WidgetRole::UnmuteOverlay).then(Overlay::default),
        }
    }

    /// Widget roles that were not bound
    pub fn missing(&self) -> Vec<WidgetRole> {
        let bound = [
            (WidgetRole::PlayButton, self.play_button.is_some()),
            (WidgetRole::CurrentTime, self.current_time.is_some()),
            (WidgetRole::Duration, self.duration.is_some()),
            (WidgetRole::ProgressFill, self.progress_fill.is_some()),
            (WidgetRole::ScrubTrack, self.scrub_track.is_some()),
            (WidgetRole::VolumeButton, self.volume_button.is_some()),
            (WidgetRole::VolumeFill, self.volume_fill.is_some()),
            (WidgetRole::VolumeTrack, self.volume_track.is_some()),
            (WidgetRole::FullscreenButton, self.fullscreen_button.is_some()),
            (WidgetRole::Container, self.container.is_some()),
            (WidgetRole::UnmuteOverlay, self.unmute_overlay.is_some()),
        ];

        bound.into_iter().filter(|(_, present)| !present).map(|(role, _)| role).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::HeadlessDocument;
    use std::time::Duration;

    #[test]
    fn test_locate_all() {
        let widgets = ControlWidgetSet::locate(&HeadlessDocument::complete());
        assert!(widgets.missing().is_empty());
        assert!(widgets.unmute_overlay.unwrap().is_displayed());
    }

    #[test]
    fn test_locate_partial() {
        let doc = HeadlessDocument::complete().without(&[WidgetRole::VolumeFill, WidgetRole::Container]);
        let widgets = ControlWidgetSet::locate(&doc);

        assert!(widgets.volume_fill.is_none());
        assert!(widgets.container.is_none());
        assert_eq!(widgets.missing(), vec![WidgetRole::VolumeFill, WidgetRole::Container]);
    }

    #[test]
    fn test_overlay_fade() {
        let start = Instant::now();
        let mut overlay = Overlay::default();

        overlay.fade_out(start + Duration::from_millis(300));
        assert_eq!(overlay.opacity(), 0.0);
        assert!(overlay.is_displayed());

        assert!(!overlay.tick(start + Duration::from_millis(299)));
        assert!(overlay.is_displayed());

        assert!(overlay.tick(start + Duration::from_millis(300)));
        assert!(!overlay.is_displayed());
        assert_eq!(overlay.hide_at(), None);
    }

    #[test]
    fn test_second_fade_keeps_deadline() {
        let start = Instant::now();
        let mut overlay = Overlay::default();

        overlay.fade_out(start + Duration::from_millis(300));
        overlay.fade_out(start + Duration::from_millis(900));
        assert_eq!(overlay.hide_at(), Some(start + Duration::from_millis(300)));
    }
}
