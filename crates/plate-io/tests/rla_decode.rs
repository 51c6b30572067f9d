//! RLA scanline decoding against hand-built streams.

use approx::assert_relative_eq;
use plate_core::{ConvertOptions, Pixel, convert_buffer};
use plate_io::rla::{self, RlaChannels, RleDecoder};
use plate_io::{Endian, IoError};

/// Length-prefixed block.
fn block(payload: &[u8]) -> Vec<u8> {
    let mut data = (payload.len() as i16).to_be_bytes().to_vec();
    data.extend_from_slice(payload);
    data
}

/// Literal run tokens for `bytes`, at most 128 per token.
fn literal_runs(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in bytes.chunks(128) {
        out.push((-(chunk.len() as i16)) as i8 as u8);
        out.extend_from_slice(chunk);
    }
    out
}

/// RLE block storing 16-bit values, MSB plane first.
fn u16_block(values: &[u16]) -> Vec<u8> {
    let msb: Vec<u8> = values.iter().map(|v| (v >> 8) as u8).collect();
    let lsb: Vec<u8> = values.iter().map(|v| *v as u8).collect();
    let mut payload = literal_runs(&msb);
    payload.extend(literal_runs(&lsb));
    block(&payload)
}

#[test]
fn documented_example() {
    let data = block(&[0x01, 0x42, 0xFE, 0x10, 0x20]);
    let mut out = [0u8; 4];
    rla::read_rle(&mut data.as_slice(), &mut out, 4, 1, 1).unwrap();
    assert_eq!(out, [0x42, 0x42, 0x10, 0x20]);
}

#[test]
fn rgb_scanline_is_interleaved() {
    let mut stream = Vec::new();
    stream.extend(block(&[0x02, 0xFF])); // red: 3 x 255
    stream.extend(block(&[0xFD, 0x00, 0x80, 0xFF])); // green: literals
    stream.extend(block(&[0x02, 0x10])); // blue: 3 x 16
    stream.extend(block(&[0x02, 0x01])); // next group, untouched

    let mut reader = stream.as_slice();
    let mut row = [0u8; 9];
    RleDecoder::new()
        .read_scanline(&mut reader, &mut row, 3, RlaChannels::int(3, 1))
        .unwrap();
    assert_eq!(row, [255, 0, 16, 255, 128, 16, 255, 255, 16]);
    assert_eq!(reader.len(), 4);

    assert_eq!(rla::skip(&mut reader).unwrap(), 2);
    assert!(reader.is_empty());
}

#[test]
fn sixteen_bit_channels_decode_native() {
    let values = [0x0102u16, 0xFFFF, 0x8000, 0x0000];
    let data = u16_block(&values);
    let mut out = [0u8; 8];
    rla::read_rle(&mut data.as_slice(), &mut out, 4, 1, 2).unwrap();
    let decoded: Vec<u16> = out
        .chunks_exact(2)
        .map(|c| u16::from_ne_bytes([c[0], c[1]]))
        .collect();
    assert_eq!(decoded, values);
}

#[test]
fn explicit_endian_decoders() {
    let data = u16_block(&[0xABCD]);
    let mut big = [0u8; 2];
    RleDecoder::with_endian(Endian::Big)
        .read_rle(&mut data.as_slice(), &mut big, 1, 1, 2)
        .unwrap();
    assert_eq!(big, [0xAB, 0xCD]);

    let mut little = [0u8; 2];
    RleDecoder::with_endian(Endian::Little)
        .read_rle(&mut data.as_slice(), &mut little, 1, 1, 2)
        .unwrap();
    assert_eq!(little, [0xCD, 0xAB]);
}

#[test]
fn float_scanline_then_convert() {
    let values = [0.0f32, 0.25, 1.0];
    let payload: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
    let data = block(&payload);

    let mut row = [0u8; 12];
    RleDecoder::new()
        .read_scanline(&mut data.as_slice(), &mut row, 3, RlaChannels::float(1))
        .unwrap();

    let group = RlaChannels::float(1);
    let mut bytes = [0u8; 3];
    convert_buffer(&row, group.pixel().unwrap(), &mut bytes, Pixel::LU8, &ConvertOptions::new(3)).unwrap();
    assert_eq!(bytes, [0, 64, 255]);

    let decoded: Vec<f32> = row
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    for (a, b) in decoded.iter().zip(values) {
        assert_relative_eq!(*a, b);
    }
}

#[test]
fn float_round_trip_both_orders() {
    let pattern = [0x3F, 0x80, 0x00, 0x00]; // 1.0 big-endian
    let data = block(&pattern);

    let mut le = [0u8; 4];
    RleDecoder::with_endian(Endian::Little)
        .read_float(&mut data.as_slice(), &mut le, 1, 1)
        .unwrap();
    assert_eq!(le, [0x00, 0x00, 0x80, 0x3F]);

    let mut be = [0u8; 4];
    RleDecoder::with_endian(Endian::Big)
        .read_float(&mut data.as_slice(), &mut be, 1, 1)
        .unwrap();
    assert_eq!(be, pattern);
}

#[test]
fn corrupt_streams_fail() {
    let mut out = [0u8; 4];

    // run longer than the scanline
    let overrun = block(&[0x7F, 0x00]);
    assert!(matches!(
        rla::read_rle(&mut overrun.as_slice(), &mut out, 4, 1, 1),
        Err(IoError::DecodeError(_))
    ));

    // block ends before the scanline is complete
    let short = block(&[0x00, 0x01]);
    assert!(matches!(
        rla::read_rle(&mut short.as_slice(), &mut out, 4, 1, 1),
        Err(IoError::DecodeError(_))
    ));

    // stream ends inside the block
    let truncated = [0x00, 0x10, 0x01];
    assert!(rla::read_rle(&mut &truncated[..], &mut out, 4, 1, 1).unwrap_err().is_truncated());

    // float block too short
    let float = block(&[0, 0, 0]);
    assert!(matches!(
        rla::read_float(&mut float.as_slice(), &mut out, 1, 1),
        Err(IoError::DecodeError(_))
    ));

    // scanline buffer too small
    let fine = block(&[0x03, 0x00]);
    let mut row = [0u8; 3];
    assert!(matches!(
        RleDecoder::new().read_scanline(&mut fine.as_slice(), &mut row, 4, RlaChannels::int(1, 1)),
        Err(IoError::BufferTooSmall { .. })
    ));
}

#[test]
fn empty_scanline_consumes_blocks() {
    let mut stream = Vec::new();
    for _ in 0..3 {
        stream.extend(block(&[]));
    }
    stream.extend(block(&[0x00, 0x01]));

    let mut reader = stream.as_slice();
    RleDecoder::new()
        .read_scanline(&mut reader, &mut [], 0, RlaChannels::int(3, 1))
        .unwrap();
    assert_eq!(reader.len(), 4);

    let mut reader = stream.as_slice();
    RleDecoder::new()
        .read_scanline(&mut reader, &mut [], 0, RlaChannels::float(2))
        .unwrap();
    assert_eq!(reader.len(), 6);
}
