use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config;
use crate::report::OutputFormat;

fn parse_dpi(s: &str) -> Result<u32, String> {
    let v: u32 = s.parse().map_err(|e| format!("{e}"))?;
    config::validate_dpi(v)
}

#[derive(Parser)]
#[command(
    name = "pagediff",
    version,
    about = "Detect differences in images and PDFs"
)]
pub struct Cli {
    /// Config file (default: ./pagediff.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// How to report the result on stdout
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by both subcommands.
#[derive(Args)]
pub struct CompareArgs {
    /// Baseline file
    #[arg(long, short = 'p')]
    pub previous: PathBuf,
    /// Candidate file
    #[arg(long, short = 'n')]
    pub new: PathBuf,
    /// Path for storing diff output [default: diff.png]
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two raster images
    Image {
        #[command(flatten)]
        files: CompareArgs,
    },

    /// Compare the first pages of two PDFs
    Pdf {
        #[command(flatten)]
        files: CompareArgs,
        /// Rasterization resolution (1-2400)
        #[arg(long, value_parser = parse_dpi)]
        dpi: Option<u32>,
        /// Directory containing the pdfium shared library
        #[arg(long)]
        pdfium_lib: Option<PathBuf>,
        /// Keep page rasters in DIR instead of a temporary directory
        #[arg(long, value_name = "DIR")]
        raster_dir: Option<PathBuf>,
    },
}
