//! Owned pixel buffers.
//!
//! [`PixelData`] holds a width x height image of a single runtime [`Pixel`]
//! type in row-major order, top-to-bottom:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! Samples are native-endian except packed 10-bit words, whose byte order is
//! recorded in [`PixelDataInfo::packing`].

use crate::convert::{ConvertOptions, convert_buffer};
use crate::format::{Format, SampleType, U10Packing};
use crate::pixel::{ChannelMask, Pixel};
use crate::sample::Sample;
use crate::{Error, Result};
use rayon::prelude::*;

/// Description of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelDataInfo {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Pixel type.
    pub pixel: Pixel,
    /// Color channels are stored blue first.
    pub bgr: bool,
    /// Byte order of packed 10-bit words.
    pub packing: U10Packing,
}

impl PixelDataInfo {
    /// Creates a description with RGB order and native packing.
    pub fn new(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixel,
            bgr: false,
            packing: U10Packing::native(),
        }
    }

    /// Sets the blue-first flag.
    pub fn with_bgr(mut self, bgr: bool) -> Self {
        self.bgr = bgr;
        self
    }

    /// Sets the packed 10-bit byte order.
    pub fn with_packing(mut self, packing: U10Packing) -> Self {
        self.packing = packing;
        self
    }

    /// Bytes per row.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width * self.pixel.byte_count()
    }

    /// Bytes for the whole image.
    #[inline]
    pub fn data_bytes(&self) -> usize {
        self.row_bytes() * self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Whether the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An owned image buffer.
///
/// # Example
///
/// ```rust
/// use plate_core::{Pixel, PixelData, PixelDataInfo};
///
/// let data = PixelData::new(PixelDataInfo::new(4, 2, Pixel::RgbU8));
/// assert_eq!(data.data().len(), 4 * 2 * 3);
///
/// let float = data.convert(Pixel::RgbaF32)?;
/// assert_eq!(float.data().len(), 4 * 2 * 16);
/// # Ok::<(), plate_core::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelData {
    info: PixelDataInfo,
    data: Vec<u8>,
}

impl PixelData {
    /// Creates a zeroed buffer.
    pub fn new(info: PixelDataInfo) -> Self {
        Self {
            info,
            data: vec![0; info.data_bytes()],
        }
    }

    /// Wraps existing bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the length does not match
    /// `info`.
    pub fn from_vec(info: PixelDataInfo, data: Vec<u8>) -> Result<Self> {
        let expected = info.data_bytes();
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                info.width,
                info.height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self { info, data })
    }

    /// Builds an F32 buffer from interleaved normalized samples.
    pub fn from_f32(width: usize, height: usize, format: Format, samples: &[f32]) -> Result<Self> {
        let pixel = Pixel::from_parts(format, SampleType::F32)?;
        let expected = width * height * format.channels();
        if samples.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, samples.len()),
            ));
        }
        let data = samples.iter().flat_map(|v| v.to_ne_bytes()).collect();
        Self::from_vec(PixelDataInfo::new(width, height, pixel), data)
    }

    /// Buffer description.
    #[inline]
    pub fn info(&self) -> &PixelDataInfo {
        &self.info
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.info.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.info.height
    }

    /// Pixel type.
    #[inline]
    pub fn pixel(&self) -> Pixel {
        self.info.pixel
    }

    /// Raw bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.info.height, "row out of bounds");
        let len = self.info.row_bytes();
        &self.data[y * len..(y + 1) * len]
    }

    /// Mutable bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.info.height, "row out of bounds");
        let len = self.info.row_bytes();
        &mut self.data[y * len..(y + 1) * len]
    }

    /// Converts to another pixel type.
    ///
    /// The result is RGB ordered with native packing. Rows are converted in
    /// parallel.
    pub fn convert(&self, pixel: Pixel) -> Result<PixelData> {
        let mut out = PixelData::new(PixelDataInfo::new(self.info.width, self.info.height, pixel));
        if self.info.is_empty() {
            return Ok(out);
        }

        tracing::debug!(
            from = %self.info.pixel,
            to = %pixel,
            width = self.info.width,
            height = self.info.height,
            "converting pixel data"
        );

        let options = ConvertOptions::new(self.info.width)
            .with_bgr(self.info.bgr)
            .with_packing(self.info.packing, out.info.packing);
        let src_pixel = self.info.pixel;
        let src_row = self.info.row_bytes();
        let dst_row = out.info.row_bytes();

        out.data
            .par_chunks_mut(dst_row)
            .zip(self.data.par_chunks(src_row))
            .try_for_each(|(dst, src)| convert_buffer(src, src_pixel, dst, pixel, &options))?;
        Ok(out)
    }

    /// Zeroes every channel whose mask entry is off.
    ///
    /// Mask slots follow the pixel's channel order, so LA uses slots 0 and 1.
    pub fn apply_mask(&mut self, mask: ChannelMask) {
        if mask == ChannelMask::all(true) || self.info.is_empty() {
            return;
        }
        let format = self.info.pixel.format();
        let mut stored: Vec<bool> = (0..format.channels()).map(|i| mask.get(i)).collect();
        // mask slots are logical RGB order
        if self.info.bgr && format.is_color() {
            stored.swap(0, 2);
        }

        let pixel = self.info.pixel;
        if pixel.is_packed() {
            let packing = self.info.packing;
            for px in self.data.chunks_exact_mut(4) {
                let mut rgb = packing.unpack([px[0], px[1], px[2], px[3]]);
                for (v, on) in rgb.iter_mut().zip(&stored) {
                    if !on {
                        *v = 0;
                    }
                }
                px.copy_from_slice(&packing.pack(rgb));
            }
        } else {
            let width = pixel.channel_byte_count();
            for px in self.data.chunks_exact_mut(pixel.byte_count()) {
                for (channel, on) in px.chunks_exact_mut(width).zip(&stored) {
                    if !on {
                        channel.fill(0);
                    }
                }
            }
        }
    }

    /// Interleaved normalized samples in RGB order.
    pub fn to_f32_vec(&self) -> Result<Vec<f32>> {
        let float = Pixel::from_parts(self.info.pixel.format(), SampleType::F32)?;
        let converted = self.convert(float)?;
        Ok(converted.data.chunks_exact(4).map(f32::read_ne).collect())
    }
}

impl std::fmt::Debug for PixelData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelData")
            .field("width", &self.info.width)
            .field("height", &self.info.height)
            .field("pixel", &self.info.pixel)
            .field("bgr", &self.info.bgr)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_vec_checks_length() {
        let info = PixelDataInfo::new(2, 2, Pixel::RgbU8);
        assert!(PixelData::from_vec(info, vec![0; 12]).is_ok());
        assert!(PixelData::from_vec(info, vec![0; 11]).is_err());
    }

    #[test]
    fn test_rows() {
        let info = PixelDataInfo::new(2, 2, Pixel::LU8);
        let mut data = PixelData::from_vec(info, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(data.row(1), &[3, 4]);
        data.row_mut(0).copy_from_slice(&[9, 9]);
        assert_eq!(data.data(), &[9, 9, 3, 4]);
    }

    #[test]
    fn test_convert_bgr_source() {
        let info = PixelDataInfo::new(1, 1, Pixel::RgbU8).with_bgr(true);
        let data = PixelData::from_vec(info, vec![0, 0, 255]).unwrap();
        let out = data.convert(Pixel::RgbU8).unwrap();
        assert_eq!(out.data(), &[255, 0, 0]);
        assert!(!out.info().bgr);
    }

    #[test]
    fn test_convert_rows_in_parallel() {
        let info = PixelDataInfo::new(3, 64, Pixel::LU16);
        let bytes: Vec<u8> = (0..3 * 64u16).flat_map(|v| (v * 100).to_ne_bytes()).collect();
        let data = PixelData::from_vec(info, bytes).unwrap();
        let out = data.convert(Pixel::LF32).unwrap();
        let floats = out.to_f32_vec().unwrap();
        assert_eq!(floats.len(), 3 * 64);
        assert_relative_eq!(floats[10], 1000.0 / 65535.0, epsilon = 1e-6);
    }

    #[test]
    fn test_apply_mask() {
        let info = PixelDataInfo::new(1, 1, Pixel::RgbaU8);
        let mut data = PixelData::from_vec(info, vec![10, 20, 30, 40]).unwrap();
        data.apply_mask(ChannelMask::rgb(true, false, true, false));
        assert_eq!(data.data(), &[10, 0, 30, 0]);
    }

    #[test]
    fn test_apply_mask_packed() {
        let info = PixelDataInfo::new(1, 1, Pixel::RgbU10).with_packing(U10Packing::Msb);
        let bytes = U10Packing::Msb.pack([100, 200, 300]).to_vec();
        let mut data = PixelData::from_vec(info, bytes).unwrap();
        data.apply_mask(ChannelMask::rgb(false, true, true, true));
        assert_eq!(U10Packing::Msb.unpack([data.data()[0], data.data()[1], data.data()[2], data.data()[3]]), [0, 200, 300]);
    }

    #[test]
    fn test_from_f32() {
        let data = PixelData::from_f32(1, 1, Format::La, &[0.25, 1.0]).unwrap();
        assert_eq!(data.pixel(), Pixel::LaF32);
        assert_eq!(data.to_f32_vec().unwrap(), vec![0.25, 1.0]);
        assert!(PixelData::from_f32(2, 1, Format::La, &[0.0]).is_err());
    }

    #[test]
    fn test_empty_convert() {
        let data = PixelData::new(PixelDataInfo::new(0, 5, Pixel::RgbU8));
        let out = data.convert(Pixel::LF16).unwrap();
        assert!(out.data().is_empty());
    }
}
