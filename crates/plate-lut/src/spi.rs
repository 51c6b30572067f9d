//! Sony Pictures Imageworks 1D LUT format (SPI1D).
//!
//! The OpenColorIO text form of a 1D table:
//!
//! ```text
//! Version 1
//! From 0.0 1.0
//! Length 1024
//! Components 1
//! {
//!   0.000000
//!   0.001000
//!   ...
//! }
//! ```
//!
//! Only single-component tables are read; multi-component files keep the
//! first column.
//!
//! # Example
//!
//! ```rust,no_run
//! use plate_lut::spi::read_spi1d;
//! use std::path::Path;
//!
//! let lut = read_spi1d(Path::new("filmprint.spi1d")).unwrap();
//! let output = lut.apply(0.5);
//! ```
//!
//! # References
//!
//! - [OpenColorIO SPI1D](https://opencolorio.readthedocs.io/en/latest/guides/authoring/luts.html)

use crate::{Lut1D, LutError, LutResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Reads an SPI1D file from disk.
///
/// # Errors
///
/// Returns error if the file cannot be read or has invalid format.
pub fn read_spi1d(path: &Path) -> LutResult<Lut1D> {
    let file = File::open(path)?;
    parse_spi1d(BufReader::new(file))
}

fn parse_header<T: std::str::FromStr>(parts: &[&str], index: usize, key: &str) -> LutResult<T> {
    parts
        .get(index)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| LutError::ParseError(format!("invalid {key} line")))
}

/// Parses SPI1D from a reader.
pub fn parse_spi1d<R: BufRead>(reader: R) -> LutResult<Lut1D> {
    let mut from_min = 0.0f32;
    let mut from_max = 1.0f32;
    let mut length = None;
    let mut components = 1usize;
    let mut in_data = false;
    let mut data: Vec<f32> = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line == "{" {
            in_data = true;
            continue;
        }
        if line == "}" {
            in_data = false;
            continue;
        }

        if in_data {
            let values: Vec<&str> = line.split_whitespace().collect();
            if values.len() < components {
                return Err(LutError::ParseError(format!(
                    "line {}: expected {components} values",
                    number + 1
                )));
            }
            let v = values[0]
                .parse()
                .map_err(|_| LutError::ParseError(format!("line {}: bad value '{}'", number + 1, values[0])))?;
            data.push(v);
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0].to_ascii_lowercase().as_str() {
            "version" => {}
            "from" => {
                from_min = parse_header(&parts, 1, "From")?;
                from_max = parse_header(&parts, 2, "From")?;
            }
            "length" => length = Some(parse_header::<usize>(&parts, 1, "Length")?),
            "components" => {
                components = parse_header(&parts, 1, "Components")?;
                if components == 0 {
                    return Err(LutError::ParseError("Components must be > 0".into()));
                }
                if components > 1 {
                    tracing::warn!(components, "SPI1D has several components, keeping the first");
                }
            }
            other => tracing::debug!(key = other, "ignoring SPI1D header line"),
        }
    }

    if data.is_empty() {
        return Err(LutError::ParseError("no LUT data found".into()));
    }
    if let Some(length) = length {
        if length != data.len() {
            return Err(LutError::InvalidSize(format!(
                "Length {length} but {} entries",
                data.len()
            )));
        }
    }

    Lut1D::from_data(data, from_min, from_max)
}

/// Writes an SPI1D file to disk.
///
/// # Example
///
/// ```rust,no_run
/// use plate_lut::{cineon, spi::write_spi1d};
/// use std::path::Path;
///
/// let lut = cineon::film_print_to_linear_lut(&Default::default());
/// write_spi1d(Path::new("filmprint.spi1d"), &lut).unwrap();
/// ```
pub fn write_spi1d(path: &Path, lut: &Lut1D) -> LutResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_spi1d_to(&mut writer, lut)?;
    writer.flush()?;
    Ok(())
}

/// Writes SPI1D to any writer.
pub fn write_spi1d_to<W: Write>(mut writer: W, lut: &Lut1D) -> LutResult<()> {
    writeln!(writer, "Version 1")?;
    writeln!(writer, "From {} {}", lut.domain_min, lut.domain_max)?;
    writeln!(writer, "Length {}", lut.size())?;
    writeln!(writer, "Components 1")?;
    writeln!(writer, "{{")?;
    for v in &lut.data {
        writeln!(writer, "  {:.6}", v)?;
    }
    writeln!(writer, "}}")?;
    Ok(())
}
