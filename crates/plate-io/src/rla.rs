//! Wavefront RLA scanline decoding.
//!
//! Every channel of an RLA scanline is stored as a block prefixed by a
//! big-endian `i16` byte length. Integer channels are run-length encoded one
//! byte plane at a time, most significant plane first; float channels are
//! raw big-endian IEEE-754 values.
//!
//! # Run tokens
//!
//! ```text
//! count >= 0: one byte follows, repeated count + 1 times
//! count <  0: -count literal bytes follow
//! ```
//!
//! # Example
//!
//! ```rust
//! use plate_io::rla::RleDecoder;
//!
//! let block = [0x00, 0x05, 0x01, 0x42, 0xFE, 0x10, 0x20];
//! let mut out = [0u8; 4];
//! RleDecoder::new().read_rle(&mut &block[..], &mut out, 4, 1, 1)?;
//! assert_eq!(out, [0x42, 0x42, 0x10, 0x20]);
//! # Ok::<(), plate_io::IoError>(())
//! ```

use crate::{Endian, IoError, IoResult};
use byteorder::{BigEndian, ReadBytesExt};
use plate_core::{Format, Pixel, SampleType};
use std::io::{self, Read};

/// A group of channels stored together in a scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlaChannels {
    /// Number of channels.
    pub count: usize,
    /// Bytes per sample.
    pub bytes: usize,
    /// Samples are raw 32-bit floats.
    pub float: bool,
}

impl RlaChannels {
    /// Run-length encoded integer channels.
    pub const fn int(count: usize, bytes: usize) -> Self {
        Self {
            count,
            bytes,
            float: false,
        }
    }

    /// Raw float channels.
    pub const fn float(count: usize) -> Self {
        Self {
            count,
            bytes: 4,
            float: true,
        }
    }

    /// Bytes per interleaved pixel.
    #[inline]
    pub const fn pixel_bytes(&self) -> usize {
        self.count * self.bytes
    }

    /// Pixel type of a decoded scanline of this group.
    ///
    /// Fails for groups with no matching [`Pixel`], such as more than four
    /// channels.
    pub fn pixel(&self) -> IoResult<Pixel> {
        let format = Format::from_channels(self.count)
            .ok_or_else(|| IoError::InvalidFile(format!("{} channels in one group", self.count)))?;
        let sample_type = match (self.float, self.bytes) {
            (true, _) => SampleType::F32,
            (false, 1) => SampleType::U8,
            (false, 2) => SampleType::U16,
            (false, bytes) => {
                return Err(IoError::InvalidFile(format!("{bytes}-byte integer samples")));
            }
        };
        Ok(Pixel::from_parts(format, sample_type)?)
    }

    /// Channel group for RLA bit depth, where 32 bits means float.
    pub fn from_bit_depth(count: usize, bits: u32) -> IoResult<Self> {
        match bits {
            1..=8 => Ok(Self::int(count, 1)),
            9..=16 => Ok(Self::int(count, 2)),
            32 => Ok(Self::float(count)),
            _ => Err(IoError::InvalidFile(format!("unsupported RLA bit depth {bits}"))),
        }
    }
}

/// RLA channel decoder.
///
/// Holds the byte order that decoded samples are written in, native by
/// default. Decoded integer and float samples can be read back with the
/// matching `from_*_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RleDecoder {
    endian: Endian,
}

impl RleDecoder {
    /// Decoder writing native-endian samples.
    pub fn new() -> Self {
        Self::with_endian(Endian::native())
    }

    /// Decoder writing samples in the given byte order.
    pub fn with_endian(endian: Endian) -> Self {
        Self { endian }
    }

    /// Output byte order.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Decodes one run-length encoded channel.
    ///
    /// Writes `size` samples of `bytes` bytes each, starting at the front of
    /// `out` and `channels * bytes` apart. The whole length-prefixed block is
    /// consumed from `reader`; bytes past the last run are ignored.
    ///
    /// # Errors
    ///
    /// - [`IoError::Io`] if the stream ends inside the block
    /// - [`IoError::InvalidFile`] for a negative block length
    /// - [`IoError::DecodeError`] if a run overruns `size` samples or the block
    ///   ends before `size` samples are decoded
    /// - [`IoError::BufferTooSmall`] if `out` cannot hold the samples
    pub fn read_rle<R: Read>(
        &self,
        reader: &mut R,
        out: &mut [u8],
        size: usize,
        channels: usize,
        bytes: usize,
    ) -> IoResult<()> {
        if channels == 0 {
            return Err(IoError::DecodeError("channel count must be > 0".into()));
        }
        let stride = channels * bytes;
        check_output(out, size, stride, bytes)?;

        let block = read_block(reader)?;
        tracing::trace!(length = block.len(), size, channels, bytes, "RLE block");

        let mut data = block.as_slice();
        for plane in 0..bytes {
            let offset = match self.endian {
                Endian::Little => bytes - 1 - plane,
                Endian::Big => plane,
            };
            let mut i = 0;
            while i < size {
                let count = take_1(&mut data)? as i8;
                let run = if count >= 0 {
                    count as usize + 1
                } else {
                    usize::from(count.unsigned_abs())
                };
                if i + run > size {
                    return Err(IoError::DecodeError(format!(
                        "run of {run} at sample {i} overruns {size} samples in plane {plane}"
                    )));
                }
                if count >= 0 {
                    let value = take_1(&mut data)?;
                    for j in i..i + run {
                        out[offset + j * stride] = value;
                    }
                } else {
                    let values = take_n(&mut data, run)?;
                    for (j, &value) in (i..).zip(values) {
                        out[offset + j * stride] = value;
                    }
                }
                i += run;
            }
        }

        if !data.is_empty() {
            tracing::trace!(remaining = data.len(), "ignoring trailing run data");
        }
        Ok(())
    }

    /// Decodes one raw float channel.
    ///
    /// Writes `size` 4-byte samples `channels * 4` apart.
    ///
    /// # Errors
    ///
    /// As [`read_rle`](Self::read_rle); a block shorter than `size * 4` bytes
    /// is a [`IoError::DecodeError`].
    pub fn read_float<R: Read>(
        &self,
        reader: &mut R,
        out: &mut [u8],
        size: usize,
        channels: usize,
    ) -> IoResult<()> {
        if channels == 0 {
            return Err(IoError::DecodeError("channel count must be > 0".into()));
        }
        let stride = channels * 4;
        check_output(out, size, stride, 4)?;

        let block = read_block(reader)?;
        tracing::trace!(length = block.len(), size, channels, "float block");
        if block.len() < size * 4 {
            return Err(IoError::DecodeError(format!(
                "float block holds {} bytes, need {}",
                block.len(),
                size * 4
            )));
        }

        for (i, value) in block.chunks_exact(4).take(size).enumerate() {
            let mut word = [value[0], value[1], value[2], value[3]];
            if self.endian == Endian::Little {
                word.reverse();
            }
            out[i * stride..i * stride + 4].copy_from_slice(&word);
        }
        Ok(())
    }

    /// Skips one length-prefixed channel block, returning its length.
    pub fn skip<R: Read>(&self, reader: &mut R) -> IoResult<usize> {
        let length = read_length(reader)?;
        let skipped = io::copy(&mut reader.by_ref().take(length as u64), &mut io::sink())?;
        if skipped < length as u64 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("block of {length} bytes ended after {skipped}"),
            )
            .into());
        }
        Ok(length)
    }

    /// Decodes a channel group into an interleaved scanline.
    ///
    /// Each of the `group.count` channels is a separate block in the stream;
    /// channel `c` lands at byte `c * group.bytes` of every pixel.
    pub fn read_scanline<R: Read>(
        &self,
        reader: &mut R,
        out: &mut [u8],
        width: usize,
        group: RlaChannels,
    ) -> IoResult<()> {
        if group.float && group.bytes != 4 {
            return Err(IoError::InvalidFile(format!(
                "float channels must be 4 bytes, got {}",
                group.bytes
            )));
        }
        let required = width * group.pixel_bytes();
        if out.len() < required {
            return Err(IoError::BufferTooSmall {
                required,
                actual: out.len(),
            });
        }

        for c in 0..group.count {
            // an empty scanline still consumes one block per channel
            let start = (c * group.bytes).min(required);
            let channel = &mut out[start..required];
            if group.float {
                self.read_float(reader, channel, width, group.count)?;
            } else {
                self.read_rle(reader, channel, width, group.count, group.bytes)?;
            }
        }
        Ok(())
    }
}

/// Decodes one run-length encoded channel into native-endian samples.
pub fn read_rle<R: Read>(
    reader: &mut R,
    out: &mut [u8],
    size: usize,
    channels: usize,
    bytes: usize,
) -> IoResult<()> {
    RleDecoder::new().read_rle(reader, out, size, channels, bytes)
}

/// Decodes one raw float channel into native-endian samples.
pub fn read_float<R: Read>(reader: &mut R, out: &mut [u8], size: usize, channels: usize) -> IoResult<()> {
    RleDecoder::new().read_float(reader, out, size, channels)
}

/// Skips one length-prefixed channel block.
pub fn skip<R: Read>(reader: &mut R) -> IoResult<usize> {
    RleDecoder::new().skip(reader)
}

fn read_length<R: Read>(reader: &mut R) -> IoResult<usize> {
    let length = reader.read_i16::<BigEndian>()?;
    if length < 0 {
        return Err(IoError::InvalidFile(format!("negative block length {length}")));
    }
    Ok(length as usize)
}

fn read_block<R: Read>(reader: &mut R) -> IoResult<Vec<u8>> {
    let length = read_length(reader)?;
    let mut block = vec![0; length];
    reader.read_exact(&mut block)?;
    Ok(block)
}

fn check_output(out: &[u8], size: usize, stride: usize, width: usize) -> IoResult<()> {
    let required = if size == 0 { 0 } else { (size - 1) * stride + width };
    if out.len() < required {
        return Err(IoError::BufferTooSmall {
            required,
            actual: out.len(),
        });
    }
    Ok(())
}

#[inline]
fn take_1(slice: &mut &[u8]) -> IoResult<u8> {
    let (&first, rest) = slice
        .split_first()
        .ok_or_else(|| IoError::DecodeError("run data ended early".into()))?;
    *slice = rest;
    Ok(first)
}

#[inline]
fn take_n<'s>(slice: &mut &'s [u8], n: usize) -> IoResult<&'s [u8]> {
    if n <= slice.len() {
        let (front, back) = slice.split_at(n);
        *slice = back;
        Ok(front)
    } else {
        Err(IoError::DecodeError("run data ended early".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(payload: &[u8]) -> Vec<u8> {
        let mut data = (payload.len() as i16).to_be_bytes().to_vec();
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_repeat_and_literal() {
        let data = block(&[0x01, 0x42, 0xFE, 0x10, 0x20]);
        let mut out = [0u8; 4];
        read_rle(&mut data.as_slice(), &mut out, 4, 1, 1).unwrap();
        assert_eq!(out, [0x42, 0x42, 0x10, 0x20]);
    }

    #[test]
    fn test_trailing_bytes_consumed() {
        let mut data = block(&[0x00, 0x07, 0xAA, 0xBB]);
        data.extend_from_slice(&[0x99]);
        let mut reader = data.as_slice();
        let mut out = [0u8; 1];
        read_rle(&mut reader, &mut out, 1, 1, 1).unwrap();
        assert_eq!(out, [0x07]);
        assert_eq!(reader, &[0x99]);
    }

    #[test]
    fn test_interleaved_stride() {
        let data = block(&[0x02, 0x05]);
        let mut out = [0u8; 9];
        read_rle(&mut data.as_slice(), &mut out[1..], 3, 3, 1).unwrap();
        assert_eq!(out, [0, 5, 0, 0, 5, 0, 0, 5, 0]);
    }

    #[test]
    fn test_planes_by_endian() {
        // MSB plane: 0x12 0x34, LSB plane: 0x56 0x78
        let data = block(&[0xFE, 0x12, 0x34, 0xFE, 0x56, 0x78]);

        let mut out = [0u8; 4];
        RleDecoder::with_endian(Endian::Big)
            .read_rle(&mut data.as_slice(), &mut out, 2, 1, 2)
            .unwrap();
        assert_eq!(out, [0x12, 0x56, 0x34, 0x78]);

        let mut out = [0u8; 4];
        RleDecoder::with_endian(Endian::Little)
            .read_rle(&mut data.as_slice(), &mut out, 2, 1, 2)
            .unwrap();
        assert_eq!(out, [0x56, 0x12, 0x78, 0x34]);
    }

    #[test]
    fn test_overrun_is_error() {
        let data = block(&[0x03, 0x01]);
        let mut out = [0u8; 2];
        let err = read_rle(&mut data.as_slice(), &mut out, 2, 1, 1).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_exhausted_run_data() {
        let data = block(&[0xFD, 0x01]);
        let mut out = [0u8; 3];
        let err = read_rle(&mut data.as_slice(), &mut out, 3, 1, 1).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_small_output() {
        let data = block(&[0x03, 0x01]);
        let mut out = [0u8; 3];
        let err = read_rle(&mut data.as_slice(), &mut out, 4, 1, 1).unwrap_err();
        assert!(matches!(err, IoError::BufferTooSmall { required: 4, actual: 3 }));
    }

    #[test]
    fn test_negative_length() {
        let data = [0xFF, 0xFF, 0x00];
        let mut out = [0u8; 1];
        let err = read_rle(&mut &data[..], &mut out, 1, 1, 1).unwrap_err();
        assert!(matches!(err, IoError::InvalidFile(_)));
    }

    #[test]
    fn test_truncated_block() {
        let data = [0x00, 0x08, 0x01];
        let mut out = [0u8; 1];
        let err = read_rle(&mut &data[..], &mut out, 1, 1, 1).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_float_byte_order() {
        let bits = 1.5f32.to_bits().to_be_bytes();
        let data = block(&bits);

        let mut out = [0u8; 4];
        RleDecoder::with_endian(Endian::Little)
            .read_float(&mut data.as_slice(), &mut out, 1, 1)
            .unwrap();
        assert_eq!(f32::from_le_bytes(out), 1.5);

        let mut out = [0u8; 4];
        RleDecoder::with_endian(Endian::Big)
            .read_float(&mut data.as_slice(), &mut out, 1, 1)
            .unwrap();
        assert_eq!(out, bits);
    }

    #[test]
    fn test_skip() {
        let mut data = block(&[1, 2, 3]);
        data.push(0xEE);
        let mut reader = data.as_slice();
        assert_eq!(skip(&mut reader).unwrap(), 3);
        assert_eq!(reader, &[0xEE]);

        let short = [0x00, 0x04, 0x01];
        assert!(skip(&mut &short[..]).unwrap_err().is_truncated());
    }

    #[test]
    fn test_bit_depth_groups() {
        assert_eq!(RlaChannels::from_bit_depth(3, 8).unwrap(), RlaChannels::int(3, 1));
        assert_eq!(RlaChannels::from_bit_depth(1, 10).unwrap().bytes, 2);
        assert!(RlaChannels::from_bit_depth(4, 32).unwrap().float);
        assert!(RlaChannels::from_bit_depth(4, 24).is_err());
    }

    #[test]
    fn test_group_pixel() {
        assert_eq!(RlaChannels::int(3, 1).pixel().unwrap(), Pixel::RgbU8);
        assert_eq!(RlaChannels::int(1, 2).pixel().unwrap(), Pixel::LU16);
        assert_eq!(RlaChannels::float(4).pixel().unwrap(), Pixel::RgbaF32);
        assert!(RlaChannels::int(5, 1).pixel().is_err());
    }
}
