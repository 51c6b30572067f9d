//! # plate-io
//!
//! Scanline decoders for the plate image pipeline.
//!
//! # Formats
//!
//! - [`rla`] - Wavefront RLA run-length and raw float channel blocks
//!
//! Decoders read from any [`std::io::Read`] and write into caller buffers
//! laid out as [`plate_core::Pixel`] scanlines.
//!
//! # Usage
//!
//! ```rust
//! use plate_io::rla::{RleDecoder, RlaChannels};
//!
//! // two pixels, one 8-bit channel, run "two of 0x80"
//! let stream = [0x00, 0x02, 0x01, 0x80];
//! let mut row = [0u8; 2];
//! RleDecoder::new().read_scanline(&mut &stream[..], &mut row, 2, RlaChannels::int(1, 1))?;
//! assert_eq!(row, [0x80, 0x80]);
//! # Ok::<(), plate_io::IoError>(())
//! ```
//!
//! # Dependencies
//!
//! - [`plate-core`] - Pixel types
//! - [`byteorder`] - Big-endian length prefixes
//! - [`thiserror`] - Error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod endian;
mod error;
pub mod rla;

pub use endian::Endian;
pub use error::{IoError, IoResult};
pub use rla::{RlaChannels, RleDecoder};
