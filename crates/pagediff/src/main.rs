mod cli;
mod commands;
mod config;
mod report;

use std::process::ExitCode;

use clap::Parser;
use commands::{ImageRun, PdfRun};
use config::{CliOverrides, ResolvedRunConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pagediff=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let (summary, format) = match cli.command {
        cli::Command::Image { files } => {
            let overrides = CliOverrides {
                config: cli.config,
                output: files.output,
                format: cli.format,
                ..Default::default()
            };
            let config = ResolvedRunConfig::new(overrides)?;
            let format = config.format;
            let run = ImageRun {
                previous: files.previous,
                new: files.new,
                config,
            };
            (commands::image(&run)?, format)
        }
        cli::Command::Pdf {
            files,
            dpi,
            pdfium_lib,
            raster_dir,
        } => {
            let overrides = CliOverrides {
                config: cli.config,
                output: files.output,
                format: cli.format,
                dpi,
                pdfium_library: pdfium_lib,
            };
            let config = ResolvedRunConfig::new(overrides)?;
            let format = config.format;
            let run = PdfRun {
                previous: files.previous,
                new: files.new,
                raster_dir,
                config,
            };
            (commands::pdf(&run)?, format)
        }
    };

    report::print(&summary, format)
}
