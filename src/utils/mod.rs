//! Utility module for player-overlay
//!
//! This module provides common utilities used throughout the crate:
//! - Error handling with custom error types
//! - Configuration management
//! - Time label formatting and click-position helpers

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{Config, FullscreenConfig, GeneralConfig, PlayerConfig};
pub use error::{IntoOverlayError, OverlayError, Result};

/// Load the application configuration
///
/// See [`Config::load`] for the source order.
pub fn load_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    Config::load(explicit)
}

/// Format a position in seconds as `M:SS`
///
/// Seconds are truncated, never rounded, and minutes are unbounded
/// (`3725.0` renders as `62:05`).
///
/// # Arguments
///
/// * `seconds` - Position or duration in seconds
///
/// # Returns
///
/// The formatted label; non-finite and negative inputs render as `0:00`
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.trunc() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Position of a click along a track, as a fraction of the track width
///
/// The result is not clamped; callers decide whether clicks past the edge
/// are meaningful.
///
/// # Arguments
///
/// * `offset_x` - Click offset from the track's left edge
/// * `track_width` - Track width, in the same units as `offset_x`
///
/// # Returns
///
/// The fraction, or `None` when the track has no usable width
pub fn track_fraction(offset_x: f64, track_width: f64) -> Option<f64> {
    if !track_width.is_finite() || track_width <= 0.0 || !offset_x.is_finite() {
        return None;
    }
    Some(offset_x / track_width)
}

/// Render a `[0, 1]` fraction as a CSS-style percentage width
///
/// At most two decimals are kept, so float noise such as
/// `10.000000000000002` renders as `10%`.
pub fn percent(fraction: f64) -> String {
    let hundredths = (fraction * 10_000.0).round() / 100.0;
    format!("{}%", hundredths)
}
