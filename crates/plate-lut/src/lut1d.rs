//! 1-dimensional lookup table.
//!
//! A 1D LUT applies one transfer function to every sample. Here it mostly
//! carries the 1024-entry Cineon film print curves, indexed by 10-bit code
//! value or by normalized input with linear interpolation.

use crate::{LutError, LutResult};
use plate_core::{Format, PixelData};
use rayon::prelude::*;

/// A single-channel 1-dimensional lookup table.
///
/// # Structure
///
/// - `size` entries, evenly spaced over `[domain_min, domain_max]`
/// - Linear interpolation between entries, clamped at both ends
///
/// # Example
///
/// ```rust
/// use plate_lut::Lut1D;
///
/// let lut = Lut1D::from_data(vec![0.0, 0.25, 1.0], 0.0, 1.0)?;
/// assert_eq!(lut.apply(0.25), 0.125);
/// # Ok::<(), plate_lut::LutError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut1D {
    /// LUT entries.
    pub data: Vec<f32>,
    /// Input domain minimum
    pub domain_min: f32,
    /// Input domain maximum
    pub domain_max: f32,
}

impl Lut1D {
    /// Creates an identity (pass-through) LUT.
    ///
    /// # Arguments
    ///
    /// * `size` - Number of entries (typically 256, 1024, or 4096)
    ///
    /// # Example
    ///
    /// ```rust
    /// use plate_lut::Lut1D;
    ///
    /// let lut = Lut1D::identity(1024);
    /// assert!((lut.apply(0.5) - 0.5).abs() < 1e-6);
    /// ```
    pub fn identity(size: usize) -> Self {
        let last = size.saturating_sub(1).max(1) as f32;
        Self {
            data: (0..size).map(|i| i as f32 / last).collect(),
            domain_min: 0.0,
            domain_max: 1.0,
        }
    }

    /// Creates a LUT from raw entries.
    ///
    /// # Errors
    ///
    /// [`LutError::InvalidSize`] if `data` is empty.
    pub fn from_data(data: Vec<f32>, domain_min: f32, domain_max: f32) -> LutResult<Self> {
        if data.is_empty() {
            return Err(LutError::InvalidSize("LUT size must be > 0".into()));
        }
        Ok(Self {
            data,
            domain_min,
            domain_max,
        })
    }

    /// Returns the number of entries in the LUT.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Applies the LUT to a single value using linear interpolation.
    ///
    /// Inputs outside the domain clamp to the first or last entry.
    pub fn apply(&self, value: f32) -> f32 {
        let size = self.data.len();
        if size == 0 {
            return value;
        }

        let range = self.domain_max - self.domain_min;
        let t = if range.abs() < 1e-10 {
            0.0
        } else {
            ((value - self.domain_min) / range).clamp(0.0, 1.0)
        };

        let idx_f = t * (size - 1) as f32;
        let idx0 = (idx_f.floor() as usize).min(size - 1);
        let idx1 = (idx0 + 1).min(size - 1);
        let frac = idx_f - idx0 as f32;

        self.data[idx0] * (1.0 - frac) + self.data[idx1] * frac
    }

    /// Looks up an integer code value directly.
    ///
    /// Codes past the last entry return the last entry.
    #[inline]
    pub fn apply_code(&self, code: u16) -> f32 {
        match self.data.len() {
            0 => 0.0,
            n => self.data[usize::from(code).min(n - 1)],
        }
    }

    /// Applies the LUT to every value in place, in parallel.
    pub fn apply_slice(&self, values: &mut [f32]) {
        values.par_iter_mut().for_each(|v| *v = self.apply(*v));
    }

    /// Copies the entries into a `size` x 1 L_F32 image.
    pub fn to_pixel_data(&self) -> plate_core::Result<PixelData> {
        PixelData::from_f32(self.size(), 1, Format::L, &self.data)
    }
}
