//! Sample types and per-sample conversion.
//!
//! Every storage type implements [`Sample`], and [`convert`] moves a value
//! between any two of them:
//!
//! - integer to integer: rescale by the ratio of the maxima, rounding to
//!   nearest (`u8 -> u16` is exactly `v * 257`)
//! - integer to float: `v / max`
//! - float to integer: clamp to [0, 1], scale by max, round to nearest
//! - float to half: round to the nearest representable half
//!
//! The runtime counterpart is [`convert_sample`], which works on the tagged
//! [`SampleValue`].
//!
//! ```rust
//! use plate_core::sample::{convert, U10};
//!
//! let wide: u16 = convert(255u8);
//! assert_eq!(wide, 65535);
//!
//! let code: U10 = convert(1.0f32);
//! assert_eq!(code, U10(1023));
//! ```

use crate::format::{SampleType, U10_MAX, U16_MAX};
use half::f16;

/// A 10-bit code value held in 16 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U10(pub u16);

impl U10 {
    /// Largest 10-bit code value.
    pub const MAX: U10 = U10(U10_MAX as u16);

    /// Creates a code value, saturating at 1023.
    #[inline]
    pub fn new(v: u16) -> Self {
        Self(v.min(U10_MAX as u16))
    }
}

/// Trait for pixel sample storage types.
///
/// Implemented for `u8`, [`U10`], `u16`, `f16` and `f32`.
///
/// # Code values
///
/// [`to_code`](Sample::to_code) and [`from_code`](Sample::from_code) expose
/// the integer code value on the type's own scale. Float samples use the
/// 16-bit scale so that the mapping stays monotonic.
pub trait Sample: Copy + Default + Send + Sync + PartialOrd + 'static {
    /// Runtime tag for this type.
    const TYPE: SampleType;

    /// Convert to f32, normalized to [0, 1] for integers.
    fn to_f32(self) -> f32;

    /// Convert from f32, clamping and rounding for integers.
    fn from_f32(v: f32) -> Self;

    /// Integer code value.
    fn to_code(self) -> u32;

    /// From an integer code value.
    fn from_code(v: u32) -> Self;

    /// Zero value.
    fn zero() -> Self;

    /// One value (1.0 for floats, max for integers).
    fn one() -> Self;

    /// Read from native-endian bytes (`TYPE.byte_width()` long).
    fn read_ne(bytes: &[u8]) -> Self;

    /// Write as native-endian bytes (`TYPE.byte_width()` long).
    fn write_ne(self, out: &mut [u8]);
}

#[inline]
fn int_from_f32(v: f32, max: u32) -> u32 {
    // NaN fails both comparisons in clamp and casts to 0
    (v.clamp(0.0, 1.0) * max as f32).round() as u32
}

impl Sample for u8 {
    const TYPE: SampleType = SampleType::U8;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32 / 255.0
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        int_from_f32(v, 255) as u8
    }

    #[inline]
    fn to_code(self) -> u32 {
        u32::from(self)
    }

    #[inline]
    fn from_code(v: u32) -> Self {
        v.min(255) as u8
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        255
    }

    #[inline]
    fn read_ne(bytes: &[u8]) -> Self {
        bytes[0]
    }

    #[inline]
    fn write_ne(self, out: &mut [u8]) {
        out[0] = self;
    }
}

impl Sample for U10 {
    const TYPE: SampleType = SampleType::U10;

    #[inline]
    fn to_f32(self) -> f32 {
        self.0 as f32 / 1023.0
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        U10(int_from_f32(v, U10_MAX) as u16)
    }

    #[inline]
    fn to_code(self) -> u32 {
        u32::from(self.0)
    }

    #[inline]
    fn from_code(v: u32) -> Self {
        U10(v.min(U10_MAX) as u16)
    }

    #[inline]
    fn zero() -> Self {
        U10(0)
    }

    #[inline]
    fn one() -> Self {
        U10::MAX
    }

    #[inline]
    fn read_ne(bytes: &[u8]) -> Self {
        U10::new(u16::from_ne_bytes([bytes[0], bytes[1]]))
    }

    #[inline]
    fn write_ne(self, out: &mut [u8]) {
        out[..2].copy_from_slice(&self.0.to_ne_bytes());
    }
}

impl Sample for u16 {
    const TYPE: SampleType = SampleType::U16;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32 / 65535.0
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        int_from_f32(v, U16_MAX) as u16
    }

    #[inline]
    fn to_code(self) -> u32 {
        u32::from(self)
    }

    #[inline]
    fn from_code(v: u32) -> Self {
        v.min(U16_MAX) as u16
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        65535
    }

    #[inline]
    fn read_ne(bytes: &[u8]) -> Self {
        u16::from_ne_bytes([bytes[0], bytes[1]])
    }

    #[inline]
    fn write_ne(self, out: &mut [u8]) {
        out[..2].copy_from_slice(&self.to_ne_bytes());
    }
}

impl Sample for f16 {
    const TYPE: SampleType = SampleType::F16;

    #[inline]
    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        f16::from_f32(v)
    }

    #[inline]
    fn to_code(self) -> u32 {
        int_from_f32(f16::to_f32(self), U16_MAX)
    }

    #[inline]
    fn from_code(v: u32) -> Self {
        f16::from_f32(v as f32 / 65535.0)
    }

    #[inline]
    fn zero() -> Self {
        f16::ZERO
    }

    #[inline]
    fn one() -> Self {
        f16::ONE
    }

    #[inline]
    fn read_ne(bytes: &[u8]) -> Self {
        f16::from_ne_bytes([bytes[0], bytes[1]])
    }

    #[inline]
    fn write_ne(self, out: &mut [u8]) {
        out[..2].copy_from_slice(&self.to_ne_bytes());
    }
}

impl Sample for f32 {
    const TYPE: SampleType = SampleType::F32;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }

    #[inline]
    fn to_code(self) -> u32 {
        int_from_f32(self, U16_MAX)
    }

    #[inline]
    fn from_code(v: u32) -> Self {
        v as f32 / 65535.0
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn read_ne(bytes: &[u8]) -> Self {
        f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline]
    fn write_ne(self, out: &mut [u8]) {
        out[..4].copy_from_slice(&self.to_ne_bytes());
    }
}

/// Rescales an integer code value between two maxima, rounding to nearest.
#[inline]
const fn rescale(v: u32, from_max: u32, to_max: u32) -> u32 {
    if from_max == to_max {
        v
    } else {
        ((v as u64 * to_max as u64 + from_max as u64 / 2) / from_max as u64) as u32
    }
}

/// Converts a sample between two storage types.
///
/// Integer pairs use exact integer rescaling; any pair involving a float
/// goes through normalized `f32`.
#[inline]
pub fn convert<S: Sample, D: Sample>(v: S) -> D {
    if S::TYPE.is_float() || D::TYPE.is_float() {
        D::from_f32(v.to_f32())
    } else {
        D::from_code(rescale(v.to_code(), S::TYPE.max(), D::TYPE.max()))
    }
}

/// A single sample tagged with its storage type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    /// 8-bit unsigned.
    U8(u8),
    /// 10-bit unsigned.
    U10(U10),
    /// 16-bit unsigned.
    U16(u16),
    /// 16-bit float.
    F16(f16),
    /// 32-bit float.
    F32(f32),
}

impl SampleValue {
    /// Storage type of this value.
    pub const fn sample_type(&self) -> SampleType {
        match self {
            Self::U8(_) => SampleType::U8,
            Self::U10(_) => SampleType::U10,
            Self::U16(_) => SampleType::U16,
            Self::F16(_) => SampleType::F16,
            Self::F32(_) => SampleType::F32,
        }
    }

    /// Normalized value.
    pub fn to_f32(&self) -> f32 {
        match *self {
            Self::U8(v) => v.to_f32(),
            Self::U10(v) => v.to_f32(),
            Self::U16(v) => v.to_f32(),
            Self::F16(v) => Sample::to_f32(v),
            Self::F32(v) => v,
        }
    }

    /// Largest value of the given type.
    pub fn max_of(sample_type: SampleType) -> Self {
        match sample_type {
            SampleType::U8 => Self::U8(u8::one()),
            SampleType::U10 => Self::U10(U10::one()),
            SampleType::U16 => Self::U16(u16::one()),
            SampleType::F16 => Self::F16(f16::one()),
            SampleType::F32 => Self::F32(f32::one()),
        }
    }
}

impl From<u8> for SampleValue {
    fn from(v: u8) -> Self {
        Self::U8(v)
    }
}

impl From<U10> for SampleValue {
    fn from(v: U10) -> Self {
        Self::U10(v)
    }
}

impl From<u16> for SampleValue {
    fn from(v: u16) -> Self {
        Self::U16(v)
    }
}

impl From<f16> for SampleValue {
    fn from(v: f16) -> Self {
        Self::F16(v)
    }
}

impl From<f32> for SampleValue {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

fn convert_to<S: Sample>(v: S, to: SampleType) -> SampleValue {
    match to {
        SampleType::U8 => SampleValue::U8(convert(v)),
        SampleType::U10 => SampleValue::U10(convert(v)),
        SampleType::U16 => SampleValue::U16(convert(v)),
        SampleType::F16 => SampleValue::F16(convert(v)),
        SampleType::F32 => SampleValue::F32(convert(v)),
    }
}

/// Converts a tagged sample to another storage type.
///
/// ```rust
/// use plate_core::{convert_sample, SampleType, SampleValue};
///
/// let v = convert_sample(SampleValue::U8(255), SampleType::F32);
/// assert_eq!(v, SampleValue::F32(1.0));
/// ```
pub fn convert_sample(value: SampleValue, to: SampleType) -> SampleValue {
    match value {
        SampleValue::U8(v) => convert_to(v, to),
        SampleValue::U10(v) => convert_to(v, to),
        SampleValue::U16(v) => convert_to(v, to),
        SampleValue::F16(v) => convert_to(v, to),
        SampleValue::F32(v) => convert_to(v, to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widening() {
        assert_eq!(convert::<u8, u16>(1), 257);
        assert_eq!(convert::<u8, u16>(128), 128 * 257);
        assert_eq!(convert::<u8, U10>(255), U10(1023));
        assert_eq!(convert::<U10, u16>(U10(1023)), 65535);
        assert_eq!(convert::<u8, U10>(0), U10(0));
    }

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(convert::<u16, u8>(65535), 255);
        assert_eq!(convert::<u16, u8>(257), 1);
        assert_eq!(convert::<u16, u8>(128), 0);
        assert_eq!(convert::<u16, u8>(129), 1);
        assert_eq!(convert::<U10, u8>(U10(512)), 128);
        assert_eq!(convert::<u16, U10>(65535), U10(1023));
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(convert::<u8, f32>(255), 1.0);
        assert_eq!(convert::<f32, u8>(0.5), 128);
        assert_eq!(convert::<f32, u8>(1.5), 255);
        assert_eq!(convert::<f32, u8>(-0.5), 0);
        assert_eq!(convert::<f32, u16>(f32::NAN), 0);
        assert_eq!(convert::<f32, f16>(0.5), f16::from_f32(0.5));
        assert_eq!(convert::<f16, f32>(f16::ONE), 1.0);
        // over-range floats survive float to float
        assert_eq!(convert::<f32, f16>(2.0).to_f32(), 2.0);
    }

    #[test]
    fn test_half_rounding() {
        // 1 + 2^-11 sits exactly between two halves and rounds to even
        let v = 1.0 + 2f32.powi(-11);
        assert_eq!(convert::<f32, f16>(v), f16::ONE);
        let v = 1.0 + 3.0 * 2f32.powi(-12);
        assert_eq!(convert::<f32, f16>(v).to_f32(), 1.0 + 2f32.powi(-10));
    }

    #[test]
    fn test_convert_sample() {
        assert_eq!(
            convert_sample(SampleValue::U8(255), SampleType::U16),
            SampleValue::U16(65535)
        );
        assert_eq!(
            convert_sample(SampleValue::U10(U10(1023)), SampleType::F16),
            SampleValue::F16(f16::ONE)
        );
        let v = convert_sample(SampleValue::F32(0.25), SampleType::F32);
        assert_eq!(v, SampleValue::F32(0.25));
        assert_eq!(v.sample_type(), SampleType::F32);
    }

    #[test]
    fn test_byte_io() {
        let mut buf = [0u8; 4];
        1234u16.write_ne(&mut buf);
        assert_eq!(u16::read_ne(&buf), 1234);
        0.75f32.write_ne(&mut buf);
        assert_eq!(f32::read_ne(&buf), 0.75);
        U10(700).write_ne(&mut buf);
        assert_eq!(U10::read_ne(&buf), U10(700));
    }
}
