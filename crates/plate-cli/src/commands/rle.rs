//! RLA channel block decoding

use crate::RleArgs;
use anyhow::{Context, Result};
use plate_io::{RlaChannels, RleDecoder};
use tracing::debug;

pub fn run(args: RleArgs, verbose: bool) -> Result<()> {
    let data = super::read_input(&args.input)?;
    let group = if args.float {
        RlaChannels::float(args.channels)
    } else {
        RlaChannels::int(args.channels, args.bytes)
    };
    let out = decode(&data, args.skip, args.samples, group)?;
    super::write_output(&args.output, &out)?;

    if verbose {
        let pixel = group
            .pixel()
            .map(|p| p.to_string())
            .unwrap_or_else(|_| format!("{} x {} bytes", group.count, group.bytes));
        println!(
            "Decoded {} samples ({}) to {}, {}",
            args.samples,
            pixel,
            args.output.display(),
            super::format_size(out.len() as u64)
        );
    }
    Ok(())
}

/// Skips `skip` blocks, then decodes one channel group.
fn decode(data: &[u8], skip: usize, samples: usize, group: RlaChannels) -> Result<Vec<u8>> {
    let decoder = RleDecoder::new();
    let mut reader = data;
    for i in 0..skip {
        let length = decoder
            .skip(&mut reader)
            .with_context(|| format!("Failed to skip block {i}"))?;
        debug!(block = i, length, "skipped block");
    }

    let mut out = vec![0u8; samples * group.pixel_bytes()];
    decoder
        .read_scanline(&mut reader, &mut out, samples, group)
        .context("Failed to decode RLA channels")?;
    if !reader.is_empty() {
        debug!(remaining = reader.len(), "unread input after decoded blocks");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_after_skip() {
        let data = [
            0x00, 0x02, 0x01, 0x99, // skipped block
            0x00, 0x02, 0x02, 0x07, // channel 0: 3 x 7
            0x00, 0x04, 0xFD, 0x01, 0x02, 0x03, // channel 1: literals
        ];
        let out = decode(&data, 1, 3, RlaChannels::int(2, 1)).unwrap();
        assert_eq!(out, vec![7, 1, 7, 2, 7, 3]);
    }

    #[test]
    fn test_decode_zero_samples() {
        let data = [0x00, 0x00, 0x00, 0x00];
        let out = decode(&data, 0, 0, RlaChannels::int(2, 1)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_decode_error_has_context() {
        let data = [0x00, 0x01, 0x05];
        let err = decode(&data, 0, 2, RlaChannels::int(1, 1)).unwrap_err();
        assert!(err.to_string().contains("Failed to decode RLA channels"));
    }
}
