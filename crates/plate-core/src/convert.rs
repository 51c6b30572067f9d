//! Pixel buffer conversion.
//!
//! [`convert_buffer`] reads pixels of one [`Pixel`] layout and writes them in
//! another. Per-sample conversion follows [`crate::sample::convert`]; when the
//! channel counts differ the following fixed mapping applies:
//!
//! | from \ to | L | LA | RGB | RGBA |
//! |-----------|---|----|-----|------|
//! | L | copy | L, 1 | L, L, L | L, L, L, 1 |
//! | LA | L | copy | L, L, L | L, L, L, A |
//! | RGB | Y | Y, 1 | copy | R, G, B, 1 |
//! | RGBA | Y | Y, A | R, G, B | copy |
//!
//! `Y` is Rec.709 luma computed in `f32`, and `1` is the destination type's
//! opaque maximum.

use crate::format::{Format, U10Packing};
use crate::pixel::Pixel;
use crate::sample::{Sample, U10, convert};
use crate::{Error, Result};
use half::f16;

/// Rec.709 luma coefficient for red.
pub const REC709_LUMA_R: f32 = 0.2126;
/// Rec.709 luma coefficient for green.
pub const REC709_LUMA_G: f32 = 0.7152;
/// Rec.709 luma coefficient for blue.
pub const REC709_LUMA_B: f32 = 0.0722;

/// Rec.709 luma of normalized RGB values.
///
/// ```
/// use plate_core::convert::luminance_rec709;
/// let luma = luminance_rec709([0.5, 0.3, 0.2]);
/// assert!((luma - 0.3353).abs() < 0.0001);
/// ```
#[inline]
pub fn luminance_rec709(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC709_LUMA_R + rgb[1] * REC709_LUMA_G + rgb[2] * REC709_LUMA_B
}

/// Options for [`convert_buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Number of pixels to write.
    pub size: usize,
    /// Source step in pixels between consecutive output pixels.
    pub stride: usize,
    /// Read the source with red and blue exchanged.
    pub bgr: bool,
    /// Word byte order of packed 10-bit source pixels.
    pub src_packing: U10Packing,
    /// Word byte order of packed 10-bit destination pixels.
    pub dst_packing: U10Packing,
}

impl ConvertOptions {
    /// Contiguous conversion of `size` pixels.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            stride: 1,
            bgr: false,
            src_packing: U10Packing::native(),
            dst_packing: U10Packing::native(),
        }
    }

    /// Sets the source stride.
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Sets the red/blue swap.
    pub fn with_bgr(mut self, bgr: bool) -> Self {
        self.bgr = bgr;
        self
    }

    /// Sets the packed 10-bit byte order of both buffers.
    pub fn with_packing(mut self, src: U10Packing, dst: U10Packing) -> Self {
        self.src_packing = src;
        self.dst_packing = dst;
        self
    }

    /// Source bytes needed for `src_pixel`.
    pub fn src_bytes(&self, src_pixel: Pixel) -> usize {
        if self.size == 0 {
            0
        } else {
            ((self.size - 1) * self.stride.max(1) + 1) * src_pixel.byte_count()
        }
    }

    /// Destination bytes needed for `dst_pixel`.
    pub fn dst_bytes(&self, dst_pixel: Pixel) -> usize {
        self.size * dst_pixel.byte_count()
    }
}

/// Converts pixel data between two layouts.
///
/// Writes `options.size` pixels to the start of `dst`.
///
/// # Errors
///
/// [`Error::BufferTooSmall`] when either slice is shorter than the
/// conversion needs. Nothing is written in that case.
///
/// # Example
///
/// ```rust
/// use plate_core::{convert_buffer, ConvertOptions, Pixel};
///
/// let src = [255u8, 0, 128];
/// let mut dst = [0u8; 16];
/// convert_buffer(&src, Pixel::RgbU8, &mut dst, Pixel::RgbaF32, &ConvertOptions::new(1))?;
/// let alpha = f32::from_ne_bytes([dst[12], dst[13], dst[14], dst[15]]);
/// assert_eq!(alpha, 1.0);
/// # Ok::<(), plate_core::Error>(())
/// ```
pub fn convert_buffer(
    src: &[u8],
    src_pixel: Pixel,
    dst: &mut [u8],
    dst_pixel: Pixel,
    options: &ConvertOptions,
) -> Result<()> {
    let src_required = options.src_bytes(src_pixel);
    if src.len() < src_required {
        return Err(Error::buffer_too_small("source", src_required, src.len()));
    }
    let dst_required = options.dst_bytes(dst_pixel);
    if dst.len() < dst_required {
        return Err(Error::buffer_too_small("destination", dst_required, dst.len()));
    }

    tracing::trace!(%src_pixel, %dst_pixel, size = options.size, stride = options.stride, bgr = options.bgr, "convert buffer");

    if src_pixel == dst_pixel
        && options.stride <= 1
        && !options.bgr
        && (!src_pixel.is_packed() || options.src_packing == options.dst_packing)
    {
        dst[..dst_required].copy_from_slice(&src[..dst_required]);
        return Ok(());
    }

    match src_pixel.sample_type() {
        crate::SampleType::U8 => dispatch::<u8>(src, src_pixel, dst, dst_pixel, options),
        crate::SampleType::U10 => dispatch::<U10>(src, src_pixel, dst, dst_pixel, options),
        crate::SampleType::U16 => dispatch::<u16>(src, src_pixel, dst, dst_pixel, options),
        crate::SampleType::F16 => dispatch::<f16>(src, src_pixel, dst, dst_pixel, options),
        crate::SampleType::F32 => dispatch::<f32>(src, src_pixel, dst, dst_pixel, options),
    }
    Ok(())
}

fn dispatch<S: Sample>(
    src: &[u8],
    src_pixel: Pixel,
    dst: &mut [u8],
    dst_pixel: Pixel,
    options: &ConvertOptions,
) {
    match dst_pixel.sample_type() {
        crate::SampleType::U8 => run::<S, u8>(src, src_pixel, dst, dst_pixel, options),
        crate::SampleType::U10 => run::<S, U10>(src, src_pixel, dst, dst_pixel, options),
        crate::SampleType::U16 => run::<S, u16>(src, src_pixel, dst, dst_pixel, options),
        crate::SampleType::F16 => run::<S, f16>(src, src_pixel, dst, dst_pixel, options),
        crate::SampleType::F32 => run::<S, f32>(src, src_pixel, dst, dst_pixel, options),
    }
}

fn run<S: Sample, D: Sample>(
    src: &[u8],
    src_pixel: Pixel,
    dst: &mut [u8],
    dst_pixel: Pixel,
    options: &ConvertOptions,
) {
    let src_bytes = src_pixel.byte_count();
    let dst_bytes = dst_pixel.byte_count();
    let src_step = src_bytes * options.stride.max(1);
    let swap = options.bgr && src_pixel.format().is_color();
    let from = src_pixel.format();
    let to = dst_pixel.format();

    let outputs = dst[..options.size * dst_bytes].chunks_exact_mut(dst_bytes);
    for (i, out) in outputs.enumerate() {
        let offset = i * src_step;
        let mut channels = read_pixel::<S>(&src[offset..offset + src_bytes], src_pixel, options.src_packing);
        if swap {
            channels.swap(0, 2);
        }
        let mapped = map_channels::<S, D>(&channels, from, to);
        write_pixel::<D>(&mapped, out, dst_pixel, options.dst_packing);
    }
}

#[inline]
fn read_pixel<S: Sample>(bytes: &[u8], pixel: Pixel, packing: U10Packing) -> [S; 4] {
    let mut out = [S::zero(); 4];
    if pixel.is_packed() {
        let rgb = packing.unpack([bytes[0], bytes[1], bytes[2], bytes[3]]);
        for (slot, v) in out.iter_mut().zip(rgb) {
            *slot = S::from_code(u32::from(v));
        }
    } else {
        let width = pixel.sample_type().byte_width();
        for (slot, chunk) in out.iter_mut().zip(bytes.chunks_exact(width)) {
            *slot = S::read_ne(chunk);
        }
    }
    out
}

#[inline]
fn write_pixel<D: Sample>(channels: &[D; 4], out: &mut [u8], pixel: Pixel, packing: U10Packing) {
    if pixel.is_packed() {
        let rgb = [
            channels[0].to_code() as u16,
            channels[1].to_code() as u16,
            channels[2].to_code() as u16,
        ];
        out[..4].copy_from_slice(&packing.pack(rgb));
    } else {
        let width = pixel.sample_type().byte_width();
        for (v, chunk) in channels.iter().zip(out.chunks_exact_mut(width)) {
            v.write_ne(chunk);
        }
    }
}

#[inline]
fn map_channels<S: Sample, D: Sample>(ch: &[S; 4], from: Format, to: Format) -> [D; 4] {
    let c = |v: S| convert::<S, D>(v);
    let luma = || D::from_f32(luminance_rec709([ch[0].to_f32(), ch[1].to_f32(), ch[2].to_f32()]));
    let one = D::one();
    let zero = D::zero();

    match (from, to) {
        (a, b) if a == b => [c(ch[0]), c(ch[1]), c(ch[2]), c(ch[3])],
        (Format::L, Format::La) => [c(ch[0]), one, zero, zero],
        (Format::L, Format::Rgb) => {
            let l = c(ch[0]);
            [l, l, l, zero]
        }
        (Format::L, Format::Rgba) => {
            let l = c(ch[0]);
            [l, l, l, one]
        }
        (Format::La, Format::L) => [c(ch[0]), zero, zero, zero],
        (Format::La, Format::Rgb) => {
            let l = c(ch[0]);
            [l, l, l, zero]
        }
        (Format::La, Format::Rgba) => {
            let l = c(ch[0]);
            [l, l, l, c(ch[1])]
        }
        (Format::Rgb, Format::L) | (Format::Rgba, Format::L) => [luma(), zero, zero, zero],
        (Format::Rgb, Format::La) => [luma(), one, zero, zero],
        (Format::Rgba, Format::La) => [luma(), c(ch[3]), zero, zero],
        (Format::Rgb, Format::Rgba) => [c(ch[0]), c(ch[1]), c(ch[2]), one],
        (Format::Rgba, Format::Rgb) => [c(ch[0]), c(ch[1]), c(ch[2]), zero],
        _ => unreachable!("identical formats handled above"),
    }
}
