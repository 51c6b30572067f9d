//! Raw pixel buffer conversion

use crate::ConvertArgs;
use anyhow::{Context, Result, bail};
use plate_core::{ConvertOptions, Pixel, PixelData, PixelDataInfo, U10Packing, convert_buffer};
use tracing::{debug, warn};

pub fn run(args: ConvertArgs, verbose: bool) -> Result<()> {
    let mut bytes = super::read_input(&args.input)?;
    let info = PixelDataInfo::new(args.width, args.height, args.from)
        .with_bgr(args.bgr)
        .with_packing(args.src_packing.into());

    let expected = info.data_bytes();
    if bytes.len() < expected {
        bail!(
            "{} holds {} bytes, {}x{} {} needs {}",
            args.input.display(),
            bytes.len(),
            args.width,
            args.height,
            args.from,
            expected
        );
    }
    if bytes.len() > expected {
        warn!(extra = bytes.len() - expected, "ignoring trailing input bytes");
        bytes.truncate(expected);
    }

    let mut source = PixelData::from_vec(info, bytes)?;
    if let Some(mask) = args.mask {
        debug!(%mask, "masking source channels");
        source.apply_mask(mask);
    }

    let dst_packing: U10Packing = args.dst_packing.into();
    let out = if args.stride <= 1 && dst_packing == U10Packing::native() {
        source.convert(args.to)?.into_vec()
    } else {
        convert_rows(&source, args.to, args.stride, dst_packing)?
    };
    super::write_output(&args.output, &out)?;

    if verbose {
        println!(
            "{} ({}) -> {} ({}), {}",
            args.input.display(),
            args.from,
            args.output.display(),
            args.to,
            super::format_size(out.len() as u64)
        );
    }
    Ok(())
}

/// Converts row by row, keeping every `stride`th pixel.
fn convert_rows(source: &PixelData, to: Pixel, stride: usize, packing: U10Packing) -> Result<Vec<u8>> {
    let stride = stride.max(1);
    let width = source.width().div_ceil(stride);
    let row_bytes = width * to.byte_count();
    let mut out = vec![0u8; row_bytes * source.height()];
    if row_bytes == 0 {
        return Ok(out);
    }

    let options = ConvertOptions::new(width)
        .with_stride(stride)
        .with_bgr(source.info().bgr)
        .with_packing(source.info().packing, packing);
    for (y, dst) in out.chunks_exact_mut(row_bytes).enumerate() {
        convert_buffer(source.row(y), source.pixel(), dst, to, &options)
            .with_context(|| format!("Failed to convert row {y}"))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_rows_with_stride() {
        let info = PixelDataInfo::new(5, 2, Pixel::LU8);
        let source = PixelData::from_vec(info, vec![0, 1, 2, 3, 4, 10, 11, 12, 13, 14]).unwrap();
        let out = convert_rows(&source, Pixel::LU8, 2, U10Packing::native()).unwrap();
        assert_eq!(out, vec![0, 2, 4, 10, 12, 14]);
    }

    #[test]
    fn test_convert_rows_packing() {
        let info = PixelDataInfo::new(1, 1, Pixel::RgbU16);
        let bytes: Vec<u8> = [65535u16, 0, 65535].iter().flat_map(|v| v.to_ne_bytes()).collect();
        let source = PixelData::from_vec(info, bytes).unwrap();
        let out = convert_rows(&source, Pixel::RgbU10, 1, U10Packing::Msb).unwrap();
        assert_eq!(U10Packing::Msb.unpack([out[0], out[1], out[2], out[3]]), [1023, 0, 1023]);
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.raw");
        let output = dir.path().join("out.raw");
        std::fs::write(&input, [255u8, 0, 128, 0, 255, 64]).unwrap();

        let args = ConvertArgs {
            input,
            output: output.clone(),
            width: 2,
            height: 1,
            from: Pixel::RgbU8,
            to: Pixel::RgbaU16,
            bgr: true,
            stride: 1,
            src_packing: crate::Packing::Native,
            dst_packing: crate::Packing::Native,
            mask: None,
        };
        run(args, false).unwrap();

        let out: Vec<u16> = std::fs::read(&output)
            .unwrap()
            .chunks_exact(2)
            .map(|c| u16::from_ne_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(out, vec![32896, 0, 65535, 65535, 16448, 65535, 0, 65535]);
    }
}
