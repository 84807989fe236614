//! Error types for icon rebranding.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for rebranding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating icons.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Decoding or encoding an image failed
    #[error("Image error on {}: {source}", .path.display())]
    Image {
        /// File being read or written
        path: PathBuf,
        /// Underlying codec error
        #[source]
        source: image::ImageError,
    },

    /// In-memory encoding failed
    #[error("Encoding error: {0}")]
    Encode(#[from] image::ImageError),

    /// I/O error with the affected path
    #[error("I/O error on {}: {source}", .path.display())]
    IoPath {
        /// The path that caused the error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An icon plan manifest could not be read
    #[error("Invalid icon plan: {message}")]
    Plan {
        /// What is wrong with the manifest
        message: String,
    },

    /// Invalid dimensions or arguments
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the problem
        message: String,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates an image error for `path`.
    pub fn image(source: image::ImageError, path: impl AsRef<Path>) -> Self {
        Error::Image {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an I/O error for `path`.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a plan error.
    pub fn plan<S: Into<String>>(message: S) -> Self {
        Error::Plan {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = Error::io_with_path(
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            "/tmp/code.png",
        );
        assert_eq!(err.to_string(), "I/O error on /tmp/code.png: gone");
    }

    #[test]
    fn test_plan_error_display() {
        assert_eq!(
            Error::plan("no targets").to_string(),
            "Invalid icon plan: no targets"
        );
    }
}
