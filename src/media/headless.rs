//! Headless media element
//!
//! A clock-driven stand-in for a real player. It applies an autoplay
//! policy to play requests, reports its duration only once metadata has
//! "loaded", and emits the same events a real element would.

use crate::media::{MediaElement, MediaEvent};
use crate::utils::error::{OverlayError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// How the host treats playback requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoplayPolicy {
    /// Every request succeeds
    Allow,

    /// Only muted playback may start
    Muted,

    /// Every request is refused
    Blocked,
}

impl FromStr for AutoplayPolicy {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "allow" => Ok(AutoplayPolicy::Allow),
            "muted" => Ok(AutoplayPolicy::Muted),
            "blocked" => Ok(AutoplayPolicy::Blocked),
            other => Err(OverlayError::InvalidInput(format!("Unknown autoplay policy '{}'", other))),
        }
    }
}

/// Simulated media element
#[derive(Debug, Clone)]
pub struct HeadlessMedia {
    current_time: f64,
    real_duration: f64,
    metadata_loaded: bool,
    paused: bool,
    muted: bool,
    volume: f64,
    native_controls: bool,
    policy: AutoplayPolicy,
}

impl HeadlessMedia {
    /// Create media whose metadata has not loaded yet
    pub fn new(duration: f64, policy: AutoplayPolicy) -> Self {
        Self {
            current_time: 0.0,
            real_duration: duration,
            metadata_loaded: false,
            paused: true,
            muted: false,
            volume: 1.0,
            native_controls: true,
            policy,
        }
    }

    /// Create media with metadata already available
    pub fn loaded(duration: f64, policy: AutoplayPolicy) -> Self {
        let mut media = Self::new(duration, policy);
        media.metadata_loaded = true;
        media
    }

    /// Make the duration known
    pub fn load_metadata(&mut self) {
        self.metadata_loaded = true;
    }

    /// Whether the built-in controls are shown
    pub fn native_controls(&self) -> bool {
        self.native_controls
    }

    /// Advance the playback clock and collect the events that produces
    ///
    /// The first call loads metadata. Position only moves while playing;
    /// reaching the end pauses playback and emits [`MediaEvent::Ended`].
    pub fn advance(&mut self, elapsed: Duration) -> Vec<MediaEvent> {
        let mut events = Vec::new();

        if !self.metadata_loaded {
            self.metadata_loaded = true;
            events.push(MediaEvent::LoadedMetadata);
        }

        if self.paused {
            return events;
        }

        self.current_time += elapsed.as_secs_f64();
        match self.known_duration() {
            Some(duration) if self.current_time >= duration => {
                self.current_time = duration;
                self.paused = true;
                events.push(MediaEvent::TimeUpdate);
                events.push(MediaEvent::Ended);
            }
            _ => events.push(MediaEvent::TimeUpdate),
        }

        events
    }
}

impl MediaElement for HeadlessMedia {
    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.current_time = match self.known_duration() {
            Some(duration) => seconds.clamp(0.0, duration),
            None => seconds.max(0.0),
        };
    }

    fn duration(&self) -> f64 {
        if self.metadata_loaded {
            self.real_duration
        } else {
            f64::NAN
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn play(&mut self) -> Result<()> {
        match self.policy {
            AutoplayPolicy::Blocked => return Err(OverlayError::rejected("playback is not allowed")),
            AutoplayPolicy::Muted if !self.muted => {
                return Err(OverlayError::rejected("unmuted playback requires user activation"));
            }
            _ => {}
        }

        // Playing ended media restarts it
        if let Some(duration) = self.known_duration() {
            if self.current_time >= duration {
                self.current_time = 0.0;
            }
        }

        debug!("Headless media playing from {:.2}s", self.current_time);
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn set_native_controls(&mut self, visible: bool) {
        self.native_controls = visible;
    }
}
