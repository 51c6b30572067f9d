//! Cineon film print LUT generation

use crate::CineonArgs;
use anyhow::{Context, Result};
use plate_lut::{CineonOptions, Lut1D, spi};
use std::path::Path;
use tracing::{debug, warn};

/// Bit depth of Cineon film print data.
const CINEON_BITS: u32 = 10;

pub fn run(args: CineonArgs, verbose: bool) -> Result<()> {
    let options = match &args.config {
        Some(path) => load_config(path)?,
        None => CineonOptions::default(),
    };
    let lut = build_lut(&args, options)?;

    match &args.output {
        Some(path) => {
            spi::write_spi1d(path, &lut).with_context(|| format!("Failed to write {}", path.display()))?;
            if verbose {
                println!("Wrote {} entries to {}", lut.size(), path.display());
            }
        }
        None => spi::write_spi1d_to(std::io::stdout().lock(), &lut).context("Failed to write LUT")?,
    }
    Ok(())
}

/// Loads Cineon options from YAML.
pub fn load_config(path: &Path) -> Result<CineonOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let options: CineonOptions = serde_yaml::from_str(&text)
        .with_context(|| format!("Invalid Cineon config {}", path.display()))?;
    debug!(?options, "loaded Cineon config");
    Ok(options)
}

fn build_lut(args: &CineonArgs, mut options: CineonOptions) -> Result<Lut1D> {
    let lut = if args.to_linear {
        let params = &mut options.input_film_print;
        params.black = args.black.unwrap_or(params.black);
        params.white = args.white.unwrap_or(params.white);
        params.gamma = args.gamma.unwrap_or(params.gamma);
        params.soft_clip = args.soft_clip.unwrap_or(params.soft_clip);
        options.input_lut(CINEON_BITS)
    } else {
        if args.soft_clip.is_some() {
            warn!("--soft-clip only applies with --to-linear");
        }
        let params = &mut options.output_film_print;
        params.black = args.black.unwrap_or(params.black);
        params.white = args.white.unwrap_or(params.white);
        params.gamma = args.gamma.unwrap_or(params.gamma);
        options.output_lut(CINEON_BITS)
    };
    lut.context("Color profile is None, no film print table to build")
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_lut::{ColorProfile, FilmPrintToLinear};

    fn args(to_linear: bool) -> CineonArgs {
        CineonArgs {
            config: None,
            to_linear,
            black: None,
            white: None,
            gamma: None,
            soft_clip: None,
            output: None,
        }
    }

    #[test]
    fn test_config_yaml() {
        let yaml = "
input_profile: film-print
input_film_print:
  black: 100
  soft_clip: 20
output_profile: none
";
        let options: CineonOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(options.input_profile, ColorProfile::FilmPrint);
        assert_eq!(options.output_profile, ColorProfile::None);
        assert_eq!(
            options.input_film_print,
            FilmPrintToLinear {
                black: 100,
                soft_clip: 20,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_overrides() {
        let mut a = args(true);
        a.black = Some(120);
        let lut = build_lut(&a, CineonOptions::default()).unwrap();
        assert_eq!(lut.apply_code(110), 0.0);
        assert!(lut.apply_code(121) > 0.0);
    }

    #[test]
    fn test_none_profile_fails() {
        let options = CineonOptions {
            output_profile: ColorProfile::None,
            ..Default::default()
        };
        assert!(build_lut(&args(false), options).is_err());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cineon.yaml");
        std::fs::write(&path, "output_film_print:\n  gamma: 1.0\n").unwrap();
        let options = load_config(&path).unwrap();
        assert_eq!(options.output_film_print.gamma, 1.0);
        assert_eq!(options.output_film_print.white, 685);
        assert!(load_config(&dir.path().join("missing.yaml")).is_err());
    }
}
