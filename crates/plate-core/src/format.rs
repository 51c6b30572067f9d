//! Channel layouts and sample types.
//!
//! This module provides the two axes that make up a pixel:
//!
//! - [`Format`] - Channel arrangement (L, LA, RGB, RGBA)
//! - [`SampleType`] - Per-channel storage (U8, U10, U16, F16, F32)
//! - [`U10Packing`] - Byte order of the packed 10-bit RGB word
//!
//! # Usage
//!
//! ```rust
//! use plate_core::format::{Format, SampleType};
//!
//! assert_eq!(Format::Rgba.channels(), 4);
//! assert_eq!(SampleType::F16.byte_width(), 2);
//! assert_eq!(SampleType::int_for_bits(10), Some(SampleType::U10));
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Maximum number of channels in a pixel.
pub const CHANNELS_MAX: usize = 4;

/// Maximum 8-bit code value.
pub const U8_MAX: u32 = 255;
/// Maximum 10-bit code value.
pub const U10_MAX: u32 = 1023;
/// Maximum 16-bit code value.
pub const U16_MAX: u32 = 65535;

/// Channel arrangement of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Luminance.
    L,
    /// Luminance, alpha.
    La,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    #[default]
    Rgba,
}

impl Format {
    /// All formats in channel-count order.
    pub const ALL: [Format; 4] = [Format::L, Format::La, Format::Rgb, Format::Rgba];

    /// Number of channels.
    #[inline]
    pub const fn channels(&self) -> usize {
        match self {
            Self::L => 1,
            Self::La => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Returns the format with the given number of channels.
    #[inline]
    pub const fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(Self::L),
            2 => Some(Self::La),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Whether the format carries an alpha channel.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::La | Self::Rgba)
    }

    /// Whether the format carries separate color channels.
    #[inline]
    pub const fn is_color(&self) -> bool {
        matches!(self, Self::Rgb | Self::Rgba)
    }

    /// Short label.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::L => "L",
            Self::La => "LA",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "LA" => Ok(Self::La),
            "RGB" => Ok(Self::Rgb),
            "RGBA" => Ok(Self::Rgba),
            _ => Err(Error::Parse(format!("unknown pixel format '{s}'"))),
        }
    }
}

/// Per-channel storage type.
///
/// Integer types cover [0, max]; float types use the [0.0, 1.0] domain for
/// the same range.
///
/// | Type | Bits | Bytes | Max |
/// |------|------|-------|-----|
/// | U8 | 8 | 1 | 255 |
/// | U10 | 10 | 2 | 1023 |
/// | U16 | 16 | 2 | 65535 |
/// | F16 | 16 | 2 | 1.0 |
/// | F32 | 32 | 4 | 1.0 |
///
/// U10 samples are held unpacked in 16 bits; the packed RGB_U10 pixel stores
/// three of them in one 32-bit word (see [`crate::Pixel::byte_count`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleType {
    /// 8-bit unsigned.
    #[default]
    U8,
    /// 10-bit unsigned.
    U10,
    /// 16-bit unsigned.
    U16,
    /// 16-bit floating point.
    F16,
    /// 32-bit floating point.
    F32,
}

impl SampleType {
    /// All sample types in precision order.
    pub const ALL: [SampleType; 5] = [
        SampleType::U8,
        SampleType::U10,
        SampleType::U16,
        SampleType::F16,
        SampleType::F32,
    ];

    /// Bytes per unpacked sample.
    #[inline]
    pub const fn byte_width(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U10 | Self::U16 | Self::F16 => 2,
            Self::F32 => 4,
        }
    }

    /// Bits per sample.
    #[inline]
    pub const fn bit_depth(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U10 => 10,
            Self::U16 | Self::F16 => 16,
            Self::F32 => 32,
        }
    }

    /// Maximum value (1 for floating point types).
    #[inline]
    pub const fn max(&self) -> u32 {
        match self {
            Self::U8 => U8_MAX,
            Self::U10 => U10_MAX,
            Self::U16 => U16_MAX,
            Self::F16 | Self::F32 => 1,
        }
    }

    /// Whether this is a floating-point type.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F16 | Self::F32)
    }

    /// Integer type for the given bit depth.
    pub const fn int_for_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::U8),
            10 => Some(Self::U10),
            16 => Some(Self::U16),
            _ => None,
        }
    }

    /// Floating-point type for the given bit depth.
    pub const fn float_for_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(Self::F16),
            32 => Some(Self::F32),
            _ => None,
        }
    }

    /// Short label.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "U8",
            Self::U10 => "U10",
            Self::U16 => "U16",
            Self::F16 => "F16",
            Self::F32 => "F32",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "U8" => Ok(Self::U8),
            "U10" => Ok(Self::U10),
            "U16" => Ok(Self::U16),
            "F16" | "HALF" => Ok(Self::F16),
            "F32" | "FLOAT" => Ok(Self::F32),
            _ => Err(Error::Parse(format!("unknown sample type '{s}'"))),
        }
    }
}

/// Byte order of the packed 10-bit RGB word.
///
/// The word value is always `r << 22 | g << 12 | b << 2` with two bits of
/// padding; the packing only decides how the word's bytes are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum U10Packing {
    /// Most significant byte first.
    Msb,
    /// Least significant byte first.
    Lsb,
}

impl U10Packing {
    /// Packing that matches the build target.
    #[inline]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Msb
        } else {
            Self::Lsb
        }
    }

    /// Packs three 10-bit values into four bytes.
    #[inline]
    pub fn pack(&self, rgb: [u16; 3]) -> [u8; 4] {
        let word = (u32::from(rgb[0] & 0x3FF) << 22)
            | (u32::from(rgb[1] & 0x3FF) << 12)
            | (u32::from(rgb[2] & 0x3FF) << 2);
        match self {
            Self::Msb => word.to_be_bytes(),
            Self::Lsb => word.to_le_bytes(),
        }
    }

    /// Unpacks four bytes into three 10-bit values.
    #[inline]
    pub fn unpack(&self, bytes: [u8; 4]) -> [u16; 3] {
        let word = match self {
            Self::Msb => u32::from_be_bytes(bytes),
            Self::Lsb => u32::from_le_bytes(bytes),
        };
        [
            ((word >> 22) & 0x3FF) as u16,
            ((word >> 12) & 0x3FF) as u16,
            ((word >> 2) & 0x3FF) as u16,
        ]
    }
}

impl Default for U10Packing {
    fn default() -> Self {
        Self::native()
    }
}
