//! plate - pixel conversion and film print tool
//!
//! Converts raw pixel buffers, generates Cineon film print LUTs and decodes
//! RLA channel blocks.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use plate_core::{ChannelMask, Pixel, U10Packing};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "plate")]
#[command(author, version, about = "Pixel conversion and Cineon film print tool")]
#[command(long_about = "
Converts raw pixel buffers between pixel types, builds Cineon film print
lookup tables and decodes RLA run-length channel blocks.

Examples:
  plate info                                     # Supported pixel types
  plate convert in.raw out.raw --width 1920 --height 1080 --from rgb-u8 --to rgba-f32
  plate convert in.raw out.raw --width 64 --height 64 --from rgb-u10 --to rgb-u16 --src-packing msb
  plate cineon --to-linear -o filmprint.spi1d    # Film print to linear LUT
  plate cineon --config cineon.yaml              # Parameters from YAML
  plate rle block.bin out.raw --samples 512 --bytes 2
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported pixel types
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert a raw pixel buffer
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Generate a Cineon film print LUT
    Cineon(CineonArgs),

    /// Decode RLA run-length channel blocks
    Rle(RleArgs),
}

/// Arguments for the `info` command.
#[derive(Args)]
struct InfoArgs {
    /// Show a single pixel type
    pixel: Option<Pixel>,
}

/// Byte order of packed 10-bit words on the command line.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Packing {
    /// Host byte order
    #[default]
    Native,
    /// Most significant byte first
    Msb,
    /// Least significant byte first
    Lsb,
}

impl From<Packing> for U10Packing {
    fn from(value: Packing) -> Self {
        match value {
            Packing::Native => U10Packing::native(),
            Packing::Msb => U10Packing::Msb,
            Packing::Lsb => U10Packing::Lsb,
        }
    }
}

/// Arguments for the `convert` command.
#[derive(Args)]
struct ConvertArgs {
    /// Input raw file
    input: PathBuf,

    /// Output raw file
    output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    width: usize,

    /// Image height in pixels
    #[arg(long)]
    height: usize,

    /// Source pixel type (e.g. rgb-u8, rgba-f16, rgb-u10)
    #[arg(long)]
    from: Pixel,

    /// Destination pixel type
    #[arg(long)]
    to: Pixel,

    /// Source stores blue first
    #[arg(long)]
    bgr: bool,

    /// Keep every Nth source pixel
    #[arg(long, default_value = "1")]
    stride: usize,

    /// Byte order of packed 10-bit source words
    #[arg(long, value_enum, default_value_t = Packing::Native)]
    src_packing: Packing,

    /// Byte order of packed 10-bit destination words
    #[arg(long, value_enum, default_value_t = Packing::Native)]
    dst_packing: Packing,

    /// Zero source channels before converting (e.g. "1 1 1 0")
    #[arg(long)]
    mask: Option<ChannelMask>,
}

/// Arguments for the `cineon` command.
#[derive(Args)]
struct CineonArgs {
    /// YAML file with Cineon options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Build the film print to linear table instead of linear to film print
    #[arg(long)]
    to_linear: bool,

    /// Reference black code value
    #[arg(long)]
    black: Option<i32>,

    /// Reference white code value
    #[arg(long)]
    white: Option<i32>,

    /// Display gamma
    #[arg(long)]
    gamma: Option<f32>,

    /// Highlight soft clip (film print to linear only)
    #[arg(long)]
    soft_clip: Option<i32>,

    /// Output .spi1d file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Arguments for the `rle` command.
#[derive(Args)]
struct RleArgs {
    /// Input file of length-prefixed blocks
    input: PathBuf,

    /// Output raw file
    output: PathBuf,

    /// Samples per channel
    #[arg(long)]
    samples: usize,

    /// Channels in the group, one block each
    #[arg(long, default_value = "1")]
    channels: usize,

    /// Bytes per sample
    #[arg(long, default_value = "1")]
    bytes: usize,

    /// Blocks are raw 32-bit floats
    #[arg(long)]
    float: bool,

    /// Blocks to skip before decoding
    #[arg(long, default_value = "0")]
    skip: usize,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Cineon(args) => commands::cineon::run(args, cli.verbose),
        Commands::Rle(args) => commands::rle::run(args, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_pixel_arguments() {
        let cli = Cli::parse_from([
            "plate", "convert", "a.raw", "b.raw", "--width", "2", "--height", "1", "--from", "rgb-u10",
            "--to", "rgba-f16", "--src-packing", "msb", "--mask", "1 0 1 1",
        ]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.from, Pixel::RgbU10);
        assert_eq!(args.to, Pixel::RgbaF16);
        assert_eq!(U10Packing::from(args.src_packing), U10Packing::Msb);
        assert_eq!(args.mask, Some(ChannelMask::rgb(true, false, true, true)));
    }
}
