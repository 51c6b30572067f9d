//! Cineon film print curve validation.
//!
//! Reference values computed in double precision from the Kodak film print
//! formulas with black = 95, white = 685, gamma = 1.7:
//!
//! ```text
//! gain   = 1 / (1 - 10^((95 - 685) * 0.002 / 0.6)) = 1.0109156
//! offset = gain - 1                                 = 0.0109156
//! ```

use approx::assert_relative_eq;
use plate_lut::cineon::{
    CineonOptions, ColorProfile, FilmPrintToLinear, LinearToFilmPrint, film_print_to_linear_lut,
    linear_to_film_print_lut,
};
use plate_lut::{Lut1D, read_spi1d, write_spi1d};

/// (linear, code / 1023)
const TO_FILM_PRINT_REFERENCE: &[(f32, f32)] = &[
    (0.0, 0.093427),
    (0.18, 0.457527),
    (0.5, 0.582773),
    (1.0, 0.669599),
];

/// (code, linear)
const TO_LINEAR_REFERENCE: &[(u16, f32)] = &[
    (200, 0.013521),
    (445, 0.149304),
    (600, 0.515564),
    (685, 1.0),
];

#[test]
fn linear_to_film_print_reference() {
    let lut = linear_to_film_print_lut(&LinearToFilmPrint::default());
    assert_eq!(lut.size(), 1024);
    for &(x, expected) in TO_FILM_PRINT_REFERENCE {
        assert_relative_eq!(lut.apply(x), expected, epsilon = 1e-4);
    }
}

#[test]
fn film_print_to_linear_reference() {
    let lut = film_print_to_linear_lut(&FilmPrintToLinear::default());
    for &(code, expected) in TO_LINEAR_REFERENCE {
        assert_relative_eq!(lut.apply_code(code), expected, epsilon = 1e-4);
    }
}

#[test]
fn curves_are_approximate_inverses() {
    let to_film_print = linear_to_film_print_lut(&LinearToFilmPrint::default());
    let to_linear = film_print_to_linear_lut(&FilmPrintToLinear::default());
    for i in 0..=90 {
        let x = 0.05 + i as f32 * 0.01;
        let back = to_linear.apply(to_film_print.apply(x));
        assert!((back - x).abs() < 1e-3, "x = {x}, back = {back}");
    }
}

#[test]
fn shadows_below_black_are_exactly_zero() {
    let params = FilmPrintToLinear {
        black: 180,
        ..Default::default()
    };
    let lut = film_print_to_linear_lut(&params);
    assert!(lut.data[..180].iter().all(|&v| v == 0.0));
    assert!(lut.data[181..].iter().all(|&v| v > 0.0));
}

#[test]
fn shadows_are_zero_for_every_black() {
    for black in 0..1023 {
        let lut = film_print_to_linear_lut(&FilmPrintToLinear {
            black,
            white: 1023,
            ..Default::default()
        });
        let black = black as usize;
        assert!(
            lut.data[..black].iter().all(|&v| v == 0.0),
            "non-zero shadow below black = {black}"
        );
    }
}

#[test]
fn gamma_changes_the_curve() {
    let flat = film_print_to_linear_lut(&FilmPrintToLinear {
        gamma: 1.0,
        ..Default::default()
    });
    let standard = film_print_to_linear_lut(&FilmPrintToLinear::default());
    // both pass through white
    assert_relative_eq!(flat.apply_code(685), 1.0, epsilon = 1e-5);
    assert!(flat.apply_code(400) > standard.apply_code(400));
}

#[test]
fn options_pick_tables_by_profile() {
    let options = CineonOptions {
        input_profile: ColorProfile::None,
        output_profile: ColorProfile::FilmPrint,
        ..Default::default()
    };
    assert!(options.input_lut(10).is_none());
    let out = options.output_lut(16).expect("film print output");
    assert_eq!(out, linear_to_film_print_lut(&LinearToFilmPrint::default()));
}

#[test]
fn spi1d_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filmprint.spi1d");
    let lut = film_print_to_linear_lut(&FilmPrintToLinear::default());
    write_spi1d(&path, &lut).unwrap();

    let read: Lut1D = read_spi1d(&path).unwrap();
    assert_eq!(read.size(), 1024);
    for (a, b) in read.data.iter().zip(&lut.data) {
        assert_relative_eq!(*a, *b, epsilon = 1e-6);
    }
}
