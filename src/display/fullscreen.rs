//! Fullscreen entry point fallback
//!
//! Hosts expose fullscreen through a standard entry point and, on older
//! engines, prefixed ones. The chain is plain data: the first supported
//! entry point in order wins, and nothing after it is tried.

use crate::display::{DisplaySurface, WidgetRole};
use crate::utils::error::{OverlayError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fullscreen entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FullscreenApi {
    /// `requestFullscreen` / `exitFullscreen`
    Standard,

    /// `webkitRequestFullscreen` / `webkitExitFullscreen`
    Webkit,

    /// `msRequestFullscreen` / `msExitFullscreen`
    Ms,
}

impl FullscreenApi {
    pub const DEFAULT_ORDER: [FullscreenApi; 3] =
        [FullscreenApi::Standard, FullscreenApi::Webkit, FullscreenApi::Ms];
}

impl fmt::Display for FullscreenApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FullscreenApi::Standard => "standard",
            FullscreenApi::Webkit => "webkit",
            FullscreenApi::Ms => "ms",
        })
    }
}

impl std::str::FromStr for FullscreenApi {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        FullscreenApi::DEFAULT_ORDER
            .into_iter()
            .find(|api| api.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| OverlayError::InvalidInput(format!("Unknown fullscreen entry point '{}'", s)))
    }
}

/// Outcome of a fullscreen toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenTransition {
    Entered(FullscreenApi),
    Exited(FullscreenApi),
}

/// Ordered list of entry points to probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullscreenChain {
    order: Vec<FullscreenApi>,
}

impl Default for FullscreenChain {
    fn default() -> Self {
        Self::new(FullscreenApi::DEFAULT_ORDER.to_vec())
    }
}

impl FullscreenChain {
    pub fn new(order: Vec<FullscreenApi>) -> Self {
        Self { order }
    }

    /// Request fullscreen for `target` through the first supported entry point
    pub fn enter<S: DisplaySurface + ?Sized>(&self, surface: &mut S, target: WidgetRole) -> Result<FullscreenApi> {
        let api = self
            .order
            .iter()
            .copied()
            .find(|&api| surface.can_enter(api))
            .ok_or_else(|| OverlayError::Fullscreen("no supported entry point to enter fullscreen".to_string()))?;

        debug!("Entering fullscreen on {} via {}", target, api);
        surface.request_fullscreen(api, target)?;
        Ok(api)
    }

    /// Leave fullscreen through the first supported entry point
    pub fn exit<S: DisplaySurface + ?Sized>(&self, surface: &mut S) -> Result<FullscreenApi> {
        let api = self
            .order
            .iter()
            .copied()
            .find(|&api| surface.can_exit(api))
            .ok_or_else(|| OverlayError::Fullscreen("no supported entry point to exit fullscreen".to_string()))?;

        debug!("Exiting fullscreen via {}", api);
        surface.exit_fullscreen(api)?;
        Ok(api)
    }

    /// Enter when nothing is fullscreen, exit otherwise
    pub fn toggle<S: DisplaySurface + ?Sized>(&self, surface: &mut S, target: WidgetRole) -> Result<FullscreenTransition> {
        if surface.is_fullscreen() {
            self.exit(surface).map(FullscreenTransition::Exited)
        } else {
            self.enter(surface, target).map(FullscreenTransition::Entered)
        }
    }
}
