//! Error types for decoding operations.

use std::io;
use thiserror::Error;

/// Decoding error.
#[derive(Debug, Error)]
pub enum IoError {
    /// Stream I/O error, including truncated input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid or corrupted file structure.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Run data does not decode to the requested samples.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Output buffer cannot hold the decoded samples.
    #[error("output buffer too small: need {required} bytes, got {actual}")]
    BufferTooSmall {
        /// Bytes required
        required: usize,
        /// Bytes available
        actual: usize,
    },

    /// Pixel error from plate-core.
    #[error(transparent)]
    Core(#[from] plate_core::Error),
}

impl IoError {
    /// Returns `true` if the stream ended early.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}

/// Result type for decoding operations.
pub type IoResult<T> = Result<T, IoError>;
