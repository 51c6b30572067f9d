//! Pixel type listing

use crate::InfoArgs;
use anyhow::Result;
use plate_core::Pixel;

pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let pixels: Vec<Pixel> = match args.pixel {
        Some(pixel) => vec![pixel],
        None => Pixel::ALL.to_vec(),
    };

    println!("{:<10} {:>8} {:>6} {:>5} {:>6}", "Pixel", "Channels", "Bytes", "Bits", "Max");
    for pixel in pixels {
        println!("{}", describe(pixel));
        if verbose && pixel.is_packed() {
            println!("{:<10} packed word: r << 22 | g << 12 | b << 2", "");
        }
    }
    Ok(())
}

fn describe(pixel: Pixel) -> String {
    format!(
        "{:<10} {:>8} {:>6} {:>5} {:>6}",
        pixel.to_string(),
        pixel.channels(),
        pixel.byte_count(),
        pixel.bit_depth(),
        pixel.max()
    )
}
