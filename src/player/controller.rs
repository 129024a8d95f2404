//! Player controller implementation for player-overlay
//!
//! The controller owns the widget display model and borrows nothing: the
//! media element and the display surface are handed over at bind time and
//! exposed again through accessors for the host's event loop.

use crate::display::{Document, DisplaySurface, FullscreenChain, FullscreenTransition, WidgetRole};
use crate::media::{MediaElement, MediaEvent};
use crate::player::widgets::{ControlWidgetSet, Label, UNMUTED_CLASS};
use crate::player::{ControlEvent, OverlayActions, PlayGlyph, VolumeGlyph};
use crate::utils::config::{Config, PlayerConfig};
use crate::utils::{format_time, track_fraction};

use log::{debug, info, warn};
use std::time::Instant;

/// Keeps the control widgets synchronized with a media element
pub struct PlayerController<M: MediaElement, D: DisplaySurface> {
    media: Option<M>,
    display: D,
    widgets: ControlWidgetSet,
    fullscreen: FullscreenChain,
    config: PlayerConfig,

    /// Set the first time the viewer unmutes, never cleared
    has_user_unmuted: bool,
}

impl<M: MediaElement, D: DisplaySurface + Document> PlayerController<M, D> {
    /// Bind to the widgets `display` contains and start muted playback
    ///
    /// `media` is ignored when the document has no media element. Missing
    /// widgets never fail the bind; the operations using them do nothing.
    ///
    /// # Arguments
    ///
    /// * `display` - Host document, used for widget lookup and fullscreen
    /// * `media` - Media element to control, if the host has one
    /// * `config` - Loaded configuration
    ///
    /// # Returns
    ///
    /// The bound controller, already initialized
    pub fn bind(display: D, media: Option<M>, config: &Config) -> Self {
        let widgets = ControlWidgetSet::locate(&display);
        let media = media.filter(|_| display.query(WidgetRole::Media.selector()));

        let missing = widgets.missing();
        if !missing.is_empty() {
            debug!("Control widgets not found: {:?}", missing);
        }
        if media.is_none() {
            debug!("No media element bound, controls are inert");
        }

        let mut controller = Self {
            media,
            display,
            widgets,
            fullscreen: FullscreenChain::new(config.fullscreen.entry_points.clone()),
            config: config.player.clone(),
            has_user_unmuted: false,
        };
        controller.initialize();
        controller
    }
}

impl<M: MediaElement, D: DisplaySurface> PlayerController<M, D> {
    fn initialize(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };

        if self.config.hide_native_controls {
            media.set_native_controls(false);
        }

        if self.config.autoplay_muted {
            media.set_muted(true);
            match media.play() {
                Ok(()) => info!("Autoplay started muted"),
                // Expected under autoplay policies
                Err(e) => info!("Autoplay prevented: {}", e),
            }
        }

        let volume = media.volume();
        if let Some(fill) = self.widgets.volume_fill.as_mut() {
            fill.set_fraction(volume);
        }
    }

    /// Route a widget gesture to its operation
    pub fn dispatch(&mut self, event: ControlEvent) {
        debug!("Control event: {:?}", event);

        match event {
            ControlEvent::PlayClicked if self.widgets.play_button.is_some() => self.toggle_playback(),
            ControlEvent::ScrubTrackClicked { offset_x, track_width } if self.widgets.scrub_track.is_some() => {
                self.seek(offset_x, track_width)
            }
            ControlEvent::VolumeButtonClicked if self.widgets.volume_button.is_some() => self.toggle_mute(),
            ControlEvent::VolumeTrackClicked { offset_x, track_width } if self.widgets.volume_track.is_some() => {
                self.set_volume(offset_x, track_width)
            }
            ControlEvent::FullscreenClicked if self.widgets.fullscreen_button.is_some() => self.toggle_fullscreen(),
            _ => debug!("Ignoring {:?}: its widget is not bound", event),
        }
    }

    /// Route a media notification to its operation
    pub fn dispatch_media(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate => self.refresh_time_display(),
            MediaEvent::LoadedMetadata => self.on_metadata_loaded(),
            MediaEvent::Ended => self.on_playback_ended(),
        }
    }

    /// Complete delayed work that is due by `now`
    pub fn tick(&mut self, now: Instant) {
        if let Some(overlay) = self.widgets.unmute_overlay.as_mut() {
            if overlay.tick(now) {
                debug!("Unmute overlay removed");
            }
        }
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.widgets.unmute_overlay.as_ref().and_then(|overlay| overlay.hide_at())
    }

    /// Play when paused, pause when playing
    pub fn toggle_playback(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };

        let glyph = if media.is_paused() {
            if let Err(e) = media.play() {
                info!("Play request rejected: {}", e);
            }
            PlayGlyph::Pause
        } else {
            media.pause();
            PlayGlyph::Play
        };

        info!("Playback toggled, showing {}", glyph);
        set_text(&mut self.widgets.play_button, glyph.symbol());
    }

    /// Show the current position, the duration and the progress bar
    pub fn refresh_time_display(&mut self) {
        let Some(media) = self.media.as_ref() else {
            return;
        };

        let current = media.current_time();
        set_text(&mut self.widgets.current_time, format_time(current));

        // Duration label and progress wait until the duration is known
        if let Some(duration) = media.known_duration() {
            set_text(&mut self.widgets.duration, format_time(duration));
            if let Some(fill) = self.widgets.progress_fill.as_mut() {
                fill.set_fraction(current / duration);
            }
        }
    }

    /// Jump to the position under a click on the scrub track
    pub fn seek(&mut self, offset_x: f64, track_width: f64) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        let Some(duration) = media.known_duration() else {
            debug!("Seek ignored, duration unknown");
            return;
        };
        let Some(fraction) = track_fraction(offset_x, track_width) else {
            debug!("Seek ignored, scrub track has no width");
            return;
        };

        let target = fraction.clamp(0.0, 1.0) * duration;
        info!("Seeking to {}", format_time(target));
        media.set_current_time(target);
        self.refresh_time_display();
    }

    /// Flip between silent and full volume
    pub fn toggle_mute(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };

        let muted = !media.is_muted();
        media.set_muted(muted);
        media.set_volume(if muted { 0.0 } else { 1.0 });
        info!("Audio {}", if muted { "muted" } else { "unmuted" });

        self.show_volume(if muted { VolumeGlyph::Muted } else { VolumeGlyph::Unmuted }, if muted { 0.0 } else { 1.0 });
        if !muted {
            self.mark_user_unmuted();
        }
    }

    /// Set the volume from a click on the volume track and unmute
    pub fn set_volume(&mut self, offset_x: f64, track_width: f64) {
        let Some(media) = self.media.as_mut() else {
            return;
        };

        let volume = track_fraction(offset_x, track_width).unwrap_or(0.0).clamp(0.0, 1.0);
        media.set_volume(volume);
        media.set_muted(false);
        info!("Volume set to {:.0}%", volume * 100.0);

        self.show_volume(VolumeGlyph::Unmuted, volume);
        self.mark_user_unmuted();
    }

    /// Enter fullscreen on the container, or leave it
    pub fn toggle_fullscreen(&mut self) {
        if self.widgets.container.is_none() {
            debug!("Fullscreen ignored, no container");
            return;
        }

        match self.fullscreen.toggle(&mut self.display, WidgetRole::Container) {
            Ok(FullscreenTransition::Entered(api)) => info!("Entered fullscreen via {}", api),
            Ok(FullscreenTransition::Exited(api)) => info!("Left fullscreen via {}", api),
            Err(e) => warn!("Fullscreen toggle failed: {}", e),
        }
    }

    /// Unmute and dismiss the overlay, fading it out from `now`
    pub fn unmute_from_overlay_at(&mut self, now: Instant) {
        let Some(media) = self.media.as_mut() else {
            return;
        };

        media.set_muted(false);
        media.set_volume(1.0);
        if media.is_paused() {
            if let Err(e) = media.play() {
                info!("Play failed: {}", e);
            }
        }
        info!("Unmuted from overlay");

        self.mark_user_unmuted();
        self.show_volume(VolumeGlyph::Unmuted, 1.0);

        let fade = self.config.overlay_fade();
        if let Some(overlay) = self.widgets.unmute_overlay.as_mut() {
            overlay.fade_out(now + fade);
        }
    }

    /// Reset the play button once playback finishes
    pub fn on_playback_ended(&mut self) {
        debug!("Playback ended");
        set_text(&mut self.widgets.play_button, PlayGlyph::Play.symbol());
    }

    /// Show the duration as soon as it is known
    pub fn on_metadata_loaded(&mut self) {
        let Some(media) = self.media.as_ref() else {
            return;
        };

        if let Some(duration) = media.known_duration() {
            debug!("Metadata loaded, duration {}", format_time(duration));
            set_text(&mut self.widgets.duration, format_time(duration));
        }
        self.refresh_time_display();
    }

    fn show_volume(&mut self, glyph: VolumeGlyph, level: f64) {
        set_text(&mut self.widgets.volume_button, glyph.symbol());
        if let Some(fill) = self.widgets.volume_fill.as_mut() {
            fill.set_fraction(level);
        }
    }

    fn mark_user_unmuted(&mut self) {
        self.has_user_unmuted = true;
        if let Some(container) = self.widgets.container.as_mut() {
            container.add_class(UNMUTED_CLASS);
        }
    }

    pub fn widgets(&self) -> &ControlWidgetSet {
        &self.widgets
    }

    pub fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    /// Mutable media access for the host, e.g. to advance its clock
    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.media.as_mut()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn has_user_unmuted(&self) -> bool {
        self.has_user_unmuted
    }
}

impl<M: MediaElement, D: DisplaySurface> OverlayActions for PlayerController<M, D> {
    fn unmute_from_overlay(&mut self) {
        self.unmute_from_overlay_at(Instant::now());
    }
}

fn set_text(label: &mut Option<Label>, text: impl Into<String>) {
    if let Some(label) = label.as_mut() {
        label.set_text(text);
    }
}
