//! Cineon film print transfer curves.
//!
//! Film print density is stored as 10-bit code values. Two tables convert
//! between that log encoding and linear light:
//!
//! - [`linear_to_film_print_lut`] - normalized linear in, code / 1023 out
//! - [`film_print_to_linear_lut`] - code / 1023 in, linear out
//!
//! Both are 1024 entries, indexed by `i / 1023`.
//!
//! # Formulas
//!
//! With `gain = 1 / (1 - (10^((black - white) * 0.002 / 0.6))^(gamma / 1.7))`
//! and `offset = gain - 1`:
//!
//! ```text
//! to film print: white / 1023 + log10(((x + offset) / gain)^(1.7 / gamma)) / (2.048 / 0.6)
//! to linear:     (10^((code - white) * 0.002 / 0.6))^(gamma / 1.7) * gain - offset
//! ```
//!
//! Codes below `black` map to 0. Codes above `white - soft_clip` follow a
//! power knee that rolls highlights off instead of clipping.
//!
//! # Example
//!
//! ```rust
//! use plate_lut::cineon::{film_print_to_linear_lut, FilmPrintToLinear};
//!
//! let lut = film_print_to_linear_lut(&FilmPrintToLinear::default());
//! assert_eq!(lut.apply_code(0), 0.0);
//! assert!((lut.apply_code(685) - 1.0).abs() < 1e-5);
//! ```

use crate::Lut1D;
use std::fmt;
use std::str::FromStr;

/// Number of entries in a film print table.
pub const LUT_SIZE: usize = 1024;

/// Largest 10-bit code value.
const CODE_MAX: f32 = 1023.0;

/// Density change per code value.
const DENSITY_PER_CODE: f32 = 0.002;

/// Negative film gamma.
const NEGATIVE_GAMMA: f32 = 0.6;

/// Reference display gamma.
const REFERENCE_GAMMA: f32 = 1.7;

/// Density range of the full code scale.
const DENSITY_RANGE: f32 = 2.048;

/// Parameters for encoding linear light as film print.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct LinearToFilmPrint {
    /// Code value of reference black.
    pub black: i32,
    /// Code value of reference white.
    pub white: i32,
    /// Display gamma.
    pub gamma: f32,
}

impl Default for LinearToFilmPrint {
    fn default() -> Self {
        Self {
            black: 95,
            white: 685,
            gamma: 1.7,
        }
    }
}

/// Parameters for decoding film print to linear light.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct FilmPrintToLinear {
    /// Code value of reference black.
    pub black: i32,
    /// Code value of reference white.
    pub white: i32,
    /// Display gamma.
    pub gamma: f32,
    /// Width in code values of the highlight knee below white.
    pub soft_clip: i32,
}

impl Default for FilmPrintToLinear {
    fn default() -> Self {
        Self {
            black: 95,
            white: 685,
            gamma: 1.7,
            soft_clip: 0,
        }
    }
}

/// Linear value of a code relative to white, before gain and offset.
#[inline]
fn code_to_exposure(code: f32, white: f32, gamma: f32) -> f32 {
    10f32
        .powf((code - white) * DENSITY_PER_CODE / NEGATIVE_GAMMA)
        .powf(gamma / REFERENCE_GAMMA)
}

#[inline]
fn gain_offset(black: i32, white: i32, gamma: f32) -> (f32, f32) {
    let gain = 1.0 / (1.0 - code_to_exposure(black as f32, white as f32, gamma));
    (gain, gain - 1.0)
}

/// Builds the linear to film print table.
///
/// Entry `i` holds the code value (divided by 1023) for linear input
/// `i / 1023`. Degenerate parameters (`gamma <= 0`, `black >= white`)
/// produce non-finite entries rather than an error.
pub fn linear_to_film_print_lut(params: &LinearToFilmPrint) -> Lut1D {
    let (gain, offset) = gain_offset(params.black, params.white, params.gamma);
    let white = params.white as f32 / CODE_MAX;
    tracing::debug!(
        black = params.black,
        white = params.white,
        gamma = params.gamma,
        gain,
        offset,
        "building linear to film print LUT"
    );

    let data = (0..LUT_SIZE)
        .map(|i| {
            let x = i as f32 / CODE_MAX;
            white
                + ((x + offset) / gain).powf(REFERENCE_GAMMA / params.gamma).log10()
                    / (DENSITY_RANGE / NEGATIVE_GAMMA)
        })
        .collect();
    Lut1D {
        data,
        domain_min: 0.0,
        domain_max: 1.0,
    }
}

/// Builds the film print to linear table.
///
/// Entry `i` holds the linear value of code `i`. Codes below black are
/// exactly 0; codes above `white - soft_clip` follow the knee and may
/// exceed 1.
pub fn film_print_to_linear_lut(params: &FilmPrintToLinear) -> Lut1D {
    let (gain, offset) = gain_offset(params.black, params.white, params.gamma);
    let white = params.white as f32;
    let soft_clip = params.soft_clip as f32;
    let break_point = params.white - params.soft_clip;
    let knee_offset = code_to_exposure(break_point as f32, white, params.gamma) * gain - offset;
    let knee_gain =
        ((255.0 - knee_offset * 255.0) / (5.0 * soft_clip).powf(soft_clip / 100.0)) / 255.0;
    tracing::debug!(
        black = params.black,
        white = params.white,
        gamma = params.gamma,
        soft_clip = params.soft_clip,
        break_point,
        knee_offset,
        knee_gain,
        "building film print to linear LUT"
    );

    let data = (0..LUT_SIZE)
        .map(|i| {
            let x = i as f32 / CODE_MAX;
            let code = (x * CODE_MAX).round() as i32;
            if code < params.black {
                0.0
            } else if code > break_point {
                (((code - break_point) as f32).powf(soft_clip / 100.0) * knee_gain * 255.0
                    + knee_offset * 255.0)
                    / 255.0
            } else {
                code_to_exposure(code as f32, white, params.gamma) * gain - offset
            }
        })
        .collect();
    Lut1D {
        data,
        domain_min: 0.0,
        domain_max: 1.0,
    }
}

/// How a Cineon file's pixel values relate to linear light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "kebab-case"))]
pub enum ColorProfile {
    /// Film print for 10-bit data, raw otherwise.
    #[default]
    Auto,
    /// Raw code values.
    None,
    /// Film print density.
    FilmPrint,
}

impl ColorProfile {
    /// All profiles.
    pub const ALL: [ColorProfile; 3] = [ColorProfile::Auto, ColorProfile::None, ColorProfile::FilmPrint];

    /// Replaces `Auto` with the concrete profile for data of `bit_depth`.
    pub fn resolve(self, bit_depth: u32) -> Self {
        match self {
            Self::Auto if bit_depth == 10 => Self::FilmPrint,
            Self::Auto => Self::None,
            other => other,
        }
    }

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::None => "None",
            Self::FilmPrint => "Film Print",
        }
    }
}

impl fmt::Display for ColorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ColorProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "auto" => Ok(Self::Auto),
            "none" => Ok(Self::None),
            "filmprint" => Ok(Self::FilmPrint),
            _ => Err(format!("unknown color profile '{s}'")),
        }
    }
}

/// Load and save settings for Cineon data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct CineonOptions {
    /// Profile applied when reading.
    pub input_profile: ColorProfile,
    /// Film print parameters for reading.
    pub input_film_print: FilmPrintToLinear,
    /// Profile applied when writing.
    pub output_profile: ColorProfile,
    /// Film print parameters for writing.
    pub output_film_print: LinearToFilmPrint,
}

impl CineonOptions {
    /// Table to apply when reading data of `bit_depth`, if any.
    pub fn input_lut(&self, bit_depth: u32) -> Option<Lut1D> {
        match self.input_profile.resolve(bit_depth) {
            ColorProfile::FilmPrint => Some(film_print_to_linear_lut(&self.input_film_print)),
            _ => None,
        }
    }

    /// Table to apply when writing data of `bit_depth`, if any.
    pub fn output_lut(&self, bit_depth: u32) -> Option<Lut1D> {
        match self.output_profile.resolve(bit_depth) {
            ColorProfile::FilmPrint => Some(linear_to_film_print_lut(&self.output_film_print)),
            _ => None,
        }
    }
}
