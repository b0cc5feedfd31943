//! Error types for unicorn-raster operations.

use crate::scene::BallId;
use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing a frame.
///
/// The per-pixel path (tracing, shading, rasterization) never fails; these
/// only surface from setup and output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A tracer was requested for a ball that has not been projected yet.
    #[error("Ball {0} has not been projected")]
    Unprojected(BallId),

    /// A handle does not refer to a ball in the scene.
    #[error("Unknown ball {0}")]
    UnknownBall(BallId),
}

impl From<serde_yaml_ng::Error> for Error {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_unprojected_mentions_ball() {
        let err = Error::Unprojected(BallId::new(7));
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_yaml_error_becomes_config() {
        let parsed: std::result::Result<u32, _> = serde_yaml_ng::from_str("[not a number");
        let err: Error = parsed.unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}
