//! Error types for player-overlay
//!
//! None of these errors ever reach the viewer: the controller catches
//! playback and fullscreen failures and logs them. Only configuration
//! loading and the host traits surface them to a caller.

use thiserror::Error;

/// Main error type for player-overlay
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The host refused a playback request (usually autoplay policy)
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// A fullscreen entry point failed
    #[error("Fullscreen error: {0}")]
    Fullscreen(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl OverlayError {
    /// Create a playback rejection from any message
    pub fn rejected<S: Into<String>>(reason: S) -> Self {
        OverlayError::PlaybackRejected(reason.into())
    }
}

/// Convenience type alias for Results in player-overlay
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Extension trait for converting other errors to OverlayError
pub trait IntoOverlayError<T> {
    /// Convert this error into an OverlayError with the given context
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoOverlayError<T> for std::result::Result<T, E> {
    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| OverlayError::Config(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OverlayError::rejected("autoplay blocked");
        assert_eq!(err.to_string(), "Playback rejected: autoplay blocked");

        let err = OverlayError::Fullscreen("no entry point".to_string());
        assert_eq!(err.to_string(), "Fullscreen error: no entry point");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let overlay_err: OverlayError = io_err.into();
        assert!(matches!(overlay_err, OverlayError::FileIO(_)));
    }

    #[test]
    fn test_into_overlay_error_trait() {
        let result: std::result::Result<(), &str> = Err("expected a number");
        match result.config_err("PLAYER_OVERLAY_FADE_MS") {
            Err(OverlayError::Config(msg)) => {
                assert_eq!(msg, "PLAYER_OVERLAY_FADE_MS: expected a number");
            }
            _ => panic!("Expected Config error"),
        }
    }
}
