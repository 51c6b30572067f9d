//! # plate-core
//!
//! Core pixel types for the plate image pipeline.
//!
//! This crate provides the foundational types used by the other plate crates:
//!
//! - [`Format`], [`SampleType`] - The two axes of a pixel
//! - [`Pixel`] - The supported (format, sample type) combinations
//! - [`Sample`], [`convert`] - Per-sample storage and conversion
//! - [`convert_buffer`] - Buffer conversion between any two pixel types
//! - [`PixelData`] - Owned image buffer of a runtime pixel type
//!
//! ## Crate Structure
//!
//! ```text
//! plate-core (this crate)
//!    ^
//!    |
//!    +-- plate-lut (1D LUTs, Cineon transfer curves)
//!    +-- plate-io (RLA run-length decoding)
//!    +-- plate-cli (command line tool)
//! ```
//!
//! ## Conversion
//!
//! ```rust
//! use plate_core::{convert_sample, SampleType, SampleValue};
//!
//! let v = convert_sample(SampleValue::U8(255), SampleType::U16);
//! assert_eq!(v, SampleValue::U16(65535));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod data;
pub mod error;
pub mod format;
pub mod pixel;
pub mod sample;

pub use convert::{
    ConvertOptions, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R, convert_buffer, luminance_rec709,
};
pub use data::{PixelData, PixelDataInfo};
pub use error::*;
pub use format::*;
pub use pixel::{ChannelMask, Pixel};
pub use sample::{Sample, SampleValue, U10, convert, convert_sample};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use plate_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::convert::{ConvertOptions, convert_buffer};
    pub use crate::data::{PixelData, PixelDataInfo};
    pub use crate::error::{Error, Result};
    pub use crate::format::{Format, SampleType, U10Packing};
    pub use crate::pixel::{ChannelMask, Pixel};
    pub use crate::sample::{Sample, SampleValue, U10, convert, convert_sample};
}
