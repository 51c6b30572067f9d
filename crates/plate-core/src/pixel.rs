//! Pixel identifiers and channel masks.
//!
//! A [`Pixel`] is a validated pairing of [`Format`] and [`SampleType`]. Only
//! a fixed whitelist of combinations exists; asking for anything else is an
//! [`Error::UnsupportedPixel`].
//!
//! | Format | U8 | U10 | U16 | F16 | F32 |
//! |--------|----|-----|-----|-----|-----|
//! | L | yes | - | yes | yes | yes |
//! | LA | yes | - | yes | yes | yes |
//! | RGB | yes | packed | yes | yes | yes |
//! | RGBA | yes | - | yes | yes | yes |
//!
//! ```rust
//! use plate_core::{Format, Pixel, SampleType};
//!
//! let pixel = Pixel::from_parts(Format::Rgb, SampleType::U10)?;
//! assert_eq!(pixel.byte_count(), 4);
//! assert!(Pixel::from_parts(Format::Rgba, SampleType::U10).is_err());
//! # Ok::<(), plate_core::Error>(())
//! ```

use crate::format::{CHANNELS_MAX, Format, SampleType};
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Supported pixel layouts.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pixel {
    LU8,
    LU16,
    LF16,
    LF32,
    LaU8,
    LaU16,
    LaF16,
    LaF32,
    RgbU8,
    RgbU10,
    RgbU16,
    RgbF16,
    RgbF32,
    #[default]
    RgbaU8,
    RgbaU16,
    RgbaF16,
    RgbaF32,
}

impl Pixel {
    /// Every supported pixel.
    pub const ALL: [Pixel; 17] = [
        Pixel::LU8,
        Pixel::LU16,
        Pixel::LF16,
        Pixel::LF32,
        Pixel::LaU8,
        Pixel::LaU16,
        Pixel::LaF16,
        Pixel::LaF32,
        Pixel::RgbU8,
        Pixel::RgbU10,
        Pixel::RgbU16,
        Pixel::RgbF16,
        Pixel::RgbF32,
        Pixel::RgbaU8,
        Pixel::RgbaU16,
        Pixel::RgbaF16,
        Pixel::RgbaF32,
    ];

    /// Looks up the pixel for a format and sample type.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedPixel`] when the combination is not in the
    /// whitelist. No substitute is chosen; see [`Pixel::nearest`] for that.
    pub fn from_parts(format: Format, sample_type: SampleType) -> Result<Self> {
        use Format::*;
        use SampleType::*;
        let pixel = match (format, sample_type) {
            (L, U8) => Pixel::LU8,
            (L, U16) => Pixel::LU16,
            (L, F16) => Pixel::LF16,
            (L, F32) => Pixel::LF32,
            (La, U8) => Pixel::LaU8,
            (La, U16) => Pixel::LaU16,
            (La, F16) => Pixel::LaF16,
            (La, F32) => Pixel::LaF32,
            (Rgb, U8) => Pixel::RgbU8,
            (Rgb, U10) => Pixel::RgbU10,
            (Rgb, U16) => Pixel::RgbU16,
            (Rgb, F16) => Pixel::RgbF16,
            (Rgb, F32) => Pixel::RgbF32,
            (Rgba, U8) => Pixel::RgbaU8,
            (Rgba, U16) => Pixel::RgbaU16,
            (Rgba, F16) => Pixel::RgbaF16,
            (Rgba, F32) => Pixel::RgbaF32,
            (format, sample_type) => return Err(Error::unsupported_pixel(format, sample_type)),
        };
        Ok(pixel)
    }

    /// Looks up the pixel, falling back to the next suitable one.
    ///
    /// 10-bit samples only exist as packed RGB; other formats get 16-bit.
    pub fn nearest(format: Format, sample_type: SampleType) -> Self {
        match Self::from_parts(format, sample_type) {
            Ok(pixel) => pixel,
            Err(_) => match format {
                Format::L => Pixel::LU16,
                Format::La => Pixel::LaU16,
                Format::Rgb => Pixel::RgbU16,
                Format::Rgba => Pixel::RgbaU16,
            },
        }
    }

    /// Integer pixel for a channel count and bit depth.
    pub fn int_pixel(channels: usize, bit_depth: u32) -> Result<Self> {
        let format = Format::from_channels(channels)
            .ok_or_else(|| Error::unsupported_pixel(format!("{channels} channels"), "integer"))?;
        let sample_type = SampleType::int_for_bits(bit_depth)
            .ok_or_else(|| Error::unsupported_pixel(format, format!("{bit_depth}-bit integer")))?;
        Self::from_parts(format, sample_type)
    }

    /// Floating-point pixel for a channel count and bit depth.
    pub fn float_pixel(channels: usize, bit_depth: u32) -> Result<Self> {
        let format = Format::from_channels(channels)
            .ok_or_else(|| Error::unsupported_pixel(format!("{channels} channels"), "float"))?;
        let sample_type = SampleType::float_for_bits(bit_depth)
            .ok_or_else(|| Error::unsupported_pixel(format, format!("{bit_depth}-bit float")))?;
        Self::from_parts(format, sample_type)
    }

    /// Channel arrangement.
    pub const fn format(&self) -> Format {
        match self {
            Pixel::LU8 | Pixel::LU16 | Pixel::LF16 | Pixel::LF32 => Format::L,
            Pixel::LaU8 | Pixel::LaU16 | Pixel::LaF16 | Pixel::LaF32 => Format::La,
            Pixel::RgbU8 | Pixel::RgbU10 | Pixel::RgbU16 | Pixel::RgbF16 | Pixel::RgbF32 => {
                Format::Rgb
            }
            Pixel::RgbaU8 | Pixel::RgbaU16 | Pixel::RgbaF16 | Pixel::RgbaF32 => Format::Rgba,
        }
    }

    /// Sample storage type.
    pub const fn sample_type(&self) -> SampleType {
        match self {
            Pixel::LU8 | Pixel::LaU8 | Pixel::RgbU8 | Pixel::RgbaU8 => SampleType::U8,
            Pixel::RgbU10 => SampleType::U10,
            Pixel::LU16 | Pixel::LaU16 | Pixel::RgbU16 | Pixel::RgbaU16 => SampleType::U16,
            Pixel::LF16 | Pixel::LaF16 | Pixel::RgbF16 | Pixel::RgbaF16 => SampleType::F16,
            Pixel::LF32 | Pixel::LaF32 | Pixel::RgbF32 | Pixel::RgbaF32 => SampleType::F32,
        }
    }

    /// Number of channels.
    #[inline]
    pub const fn channels(&self) -> usize {
        self.format().channels()
    }

    /// Bytes per channel (0 for packed pixels).
    #[inline]
    pub const fn channel_byte_count(&self) -> usize {
        if self.is_packed() {
            0
        } else {
            self.sample_type().byte_width()
        }
    }

    /// Bytes per pixel.
    #[inline]
    pub const fn byte_count(&self) -> usize {
        if self.is_packed() {
            4
        } else {
            self.channels() * self.sample_type().byte_width()
        }
    }

    /// Bits per channel.
    #[inline]
    pub const fn bit_depth(&self) -> u32 {
        self.sample_type().bit_depth()
    }

    /// Maximum channel value (1 for floating point).
    #[inline]
    pub const fn max(&self) -> u32 {
        self.sample_type().max()
    }

    /// Whether the channels share a packed word.
    #[inline]
    pub const fn is_packed(&self) -> bool {
        matches!(self, Pixel::RgbU10)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format(), self.sample_type())
    }
}

impl FromStr for Pixel {
    type Err = Error;

    /// Parses labels such as `rgb-u8`, `RGBA F16` or `la_f32`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(|c: char| c == '-' || c == '_' || c.is_whitespace());
        let format = parts.next().unwrap_or_default().parse::<Format>()?;
        let sample_type = parts
            .next()
            .ok_or_else(|| Error::Parse(format!("missing sample type in '{s}'")))?
            .parse::<SampleType>()?;
        Self::from_parts(format, sample_type)
    }
}

/// Per-channel on/off mask.
///
/// Channel order is the pixel's own: L/LA use slots 0 and 1, RGB/RGBA use
/// slots 0..4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelMask(pub [bool; CHANNELS_MAX]);

impl ChannelMask {
    /// Every channel set to `value`.
    pub const fn all(value: bool) -> Self {
        Self([value; CHANNELS_MAX])
    }

    /// Color channels with an alpha flag.
    pub const fn rgb(r: bool, g: bool, b: bool, a: bool) -> Self {
        Self([r, g, b, a])
    }

    /// Whether channel `i` is enabled.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.0.get(i).copied().unwrap_or(false)
    }

    /// Enables or disables channel `i`.
    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        if let Some(slot) = self.0.get_mut(i) {
            *slot = value;
        }
    }
}

impl Default for ChannelMask {
    fn default() -> Self {
        Self::all(true)
    }
}

impl fmt::Display for ChannelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, on) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(if *on { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for ChannelMask {
    type Err = Error;

    /// Parses four flags such as `1 0 1 1` or `1011`.
    fn from_str(s: &str) -> Result<Self> {
        let flags: Vec<bool> = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '1' => Ok(true),
                '0' => Ok(false),
                _ => Err(Error::Parse(format!("bad channel flag '{c}' in '{s}'"))),
            })
            .collect::<Result<_>>()?;
        let flags: [bool; CHANNELS_MAX] = flags
            .try_into()
            .map_err(|_| Error::Parse(format!("expected {CHANNELS_MAX} channel flags in '{s}'")))?;
        Ok(Self(flags))
    }
}
