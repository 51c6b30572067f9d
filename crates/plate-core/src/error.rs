//! Error types for plate-core operations.
//!
//! Pixel conversion fails loudly: an unsupported pixel combination or a
//! buffer that cannot hold the requested samples is reported to the caller
//! and no partial result is produced.
//!
//! # Usage
//!
//! ```rust
//! use plate_core::{Format, Pixel, SampleType};
//!
//! let err = Pixel::from_parts(Format::L, SampleType::U10).unwrap_err();
//! assert!(err.is_unsupported());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::pixel::Pixel`] - Pixel lookup
//! - [`crate::convert`] - Buffer conversion
//! - `plate-io` - Wrapped by `IoError::Core`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during pixel processing.
///
/// # Categories
///
/// - **Format errors**: [`UnsupportedPixel`](Error::UnsupportedPixel)
/// - **Buffer errors**: [`BufferTooSmall`](Error::BufferTooSmall), [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Parse errors**: [`Parse`](Error::Parse)
#[derive(Debug, Error)]
pub enum Error {
    /// The channel layout and sample type do not name a supported pixel.
    ///
    /// Only the fixed whitelist in [`crate::Pixel`] is supported; for example
    /// 10-bit samples exist only as packed RGB.
    #[error("unsupported pixel combination: {format} {sample_type}")]
    UnsupportedPixel {
        /// Channel layout label
        format: String,
        /// Sample type label
        sample_type: String,
    },

    /// A source or destination buffer is shorter than the conversion needs.
    #[error("{which} buffer too small: need {required} bytes, got {actual}")]
    BufferTooSmall {
        /// "source" or "destination"
        which: &'static str,
        /// Bytes required
        required: usize,
        /// Bytes available
        actual: usize,
    },

    /// Invalid buffer dimensions.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// A label could not be parsed into a pixel type.
    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Creates an [`Error::UnsupportedPixel`] error.
    #[inline]
    pub fn unsupported_pixel(format: impl ToString, sample_type: impl ToString) -> Self {
        Self::UnsupportedPixel {
            format: format.to_string(),
            sample_type: sample_type.to_string(),
        }
    }

    /// Creates an [`Error::BufferTooSmall`] error.
    #[inline]
    pub fn buffer_too_small(which: &'static str, required: usize, actual: usize) -> Self {
        Self::BufferTooSmall {
            which,
            required,
            actual,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is an unsupported pixel error.
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedPixel { .. })
    }

    /// Returns `true` if a buffer was too small.
    #[inline]
    pub fn is_buffer_error(&self) -> bool {
        matches!(self, Self::BufferTooSmall { .. })
    }
}
