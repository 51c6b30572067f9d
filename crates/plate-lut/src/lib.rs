//! # plate-lut
//!
//! Look-up tables for the plate image pipeline.
//!
//! # Contents
//!
//! - [`Lut1D`] - single-channel 1D lookup table
//! - [`cineon`] - Cineon film print curves and load/save options
//! - [`cache`] - shared memoised film print tables
//! - [`spi`] - `.spi1d` reading and writing
//!
//! # Usage
//!
//! ```rust
//! use plate_lut::cineon::{linear_to_film_print_lut, LinearToFilmPrint};
//!
//! let lut = linear_to_film_print_lut(&LinearToFilmPrint::default());
//! assert_eq!(lut.size(), 1024);
//! // linear 1.0 lands on reference white
//! assert!((lut.apply(1.0) * 1023.0 - 685.0).abs() < 0.01);
//! ```
//!
//! # Feature Flags
//!
//! - `serde` - Serialize/Deserialize for the Cineon parameter types
//!
//! # Dependencies
//!
//! - [`plate-core`] - Pixel buffers
//! - [`thiserror`] - Error handling
//! - [`rayon`] - Parallel application

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod lut1d;
pub mod cache;
pub mod cineon;
pub mod spi;

pub use cache::LutCache;
pub use cineon::{
    CineonOptions, ColorProfile, FilmPrintToLinear, LinearToFilmPrint, film_print_to_linear_lut,
    linear_to_film_print_lut,
};
pub use error::{LutError, LutResult};
pub use lut1d::Lut1D;
pub use spi::{read_spi1d, write_spi1d};
