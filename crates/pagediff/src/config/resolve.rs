use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{CONFIG_FILE, Config, DEFAULT_OUTPUT, load, validate_dpi};
use crate::report::OutputFormat;

/// Values extracted from the CLI that participate in the merge.
#[derive(Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub dpi: Option<u32>,
    pub pdfium_library: Option<PathBuf>,
}

/// `PAGEDIFF_*` environment variables.
#[derive(Default)]
pub struct EnvLayer {
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dpi: Option<u32>,
    pub pdfium_library: Option<PathBuf>,
}

impl EnvLayer {
    pub fn from_process() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let dpi = lookup("PAGEDIFF_DPI")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("PAGEDIFF_DPI must be a positive integer")?;
        Ok(Self {
            config: lookup("PAGEDIFF_CONFIG").map(PathBuf::from),
            output: lookup("PAGEDIFF_OUTPUT").map(PathBuf::from),
            dpi,
            pdfium_library: lookup("PAGEDIFF_PDFIUM_LIB").map(PathBuf::from),
        })
    }
}

/// Fully resolved config after CLI > env > file > defaults merge.
#[derive(Debug)]
pub struct ResolvedRunConfig {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub dpi: u32,
    pub pdfium_library: Option<PathBuf>,
}

impl ResolvedRunConfig {
    pub fn new(cli: CliOverrides) -> Result<Self> {
        let env = EnvLayer::from_process()?;

        // An explicitly named config file must exist; the default one may not.
        let (path, required) = match cli.config.as_ref().or(env.config.as_ref()) {
            Some(path) => (path.clone(), true),
            None => (Path::new(CONFIG_FILE).to_path_buf(), false),
        };
        let file = load(&path, required)?;

        Self::merge(cli, env, file)
    }

    fn merge(cli: CliOverrides, env: EnvLayer, file: Config) -> Result<Self> {
        let output = cli
            .output
            .or(env.output)
            .or(file.output.path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let format = cli.format.or(file.output.format).unwrap_or_default();

        let dpi = cli
            .dpi
            .or(env.dpi)
            .or(file.pdf.dpi)
            .unwrap_or(pagediff::rasterize::DEFAULT_DPI);
        validate_dpi(dpi).map_err(|e| anyhow::anyhow!("{e}"))?;

        let pdfium_library = cli
            .pdfium_library
            .or(env.pdfium_library)
            .or(file.pdf.pdfium_library);

        Ok(Self {
            output,
            format,
            dpi,
            pdfium_library,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputConfig, PdfConfig};

    fn file_layer() -> Config {
        Config {
            output: OutputConfig {
                path: Some(PathBuf::from("file.png")),
                format: Some(OutputFormat::Json),
            },
            pdf: PdfConfig {
                dpi: Some(150),
                pdfium_library: Some(PathBuf::from("/file/lib")),
            },
        }
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let r = ResolvedRunConfig::merge(
            CliOverrides::default(),
            EnvLayer::default(),
            Config::default(),
        )
        .unwrap();
        assert_eq!(r.output, PathBuf::from("diff.png"));
        assert_eq!(r.format, OutputFormat::Text);
        assert_eq!(r.dpi, 300);
        assert!(r.pdfium_library.is_none());
    }

    #[test]
    fn file_beats_defaults() {
        let r = ResolvedRunConfig::merge(CliOverrides::default(), EnvLayer::default(), file_layer())
            .unwrap();
        assert_eq!(r.output, PathBuf::from("file.png"));
        assert_eq!(r.format, OutputFormat::Json);
        assert_eq!(r.dpi, 150);
    }

    #[test]
    fn env_beats_file() {
        let env = EnvLayer::from_lookup(|key| match key {
            "PAGEDIFF_OUTPUT" => Some("env.png".into()),
            "PAGEDIFF_DPI" => Some("96".into()),
            _ => None,
        })
        .unwrap();
        let r = ResolvedRunConfig::merge(CliOverrides::default(), env, file_layer()).unwrap();
        assert_eq!(r.output, PathBuf::from("env.png"));
        assert_eq!(r.dpi, 96);
        assert_eq!(r.pdfium_library, Some(PathBuf::from("/file/lib")));
    }

    #[test]
    fn cli_beats_everything() {
        let cli = CliOverrides {
            output: Some(PathBuf::from("cli.png")),
            format: Some(OutputFormat::Text),
            dpi: Some(72),
            pdfium_library: Some(PathBuf::from("/cli/lib")),
            ..Default::default()
        };
        let env = EnvLayer {
            output: Some(PathBuf::from("env.png")),
            dpi: Some(96),
            ..Default::default()
        };
        let r = ResolvedRunConfig::merge(cli, env, file_layer()).unwrap();
        assert_eq!(r.output, PathBuf::from("cli.png"));
        assert_eq!(r.format, OutputFormat::Text);
        assert_eq!(r.dpi, 72);
        assert_eq!(r.pdfium_library, Some(PathBuf::from("/cli/lib")));
    }

    #[test]
    fn invalid_env_dpi_is_an_error() {
        let err = EnvLayer::from_lookup(|key| (key == "PAGEDIFF_DPI").then(|| "lots".into()))
            .err()
            .unwrap();
        assert!(err.to_string().contains("PAGEDIFF_DPI"));
    }

    #[test]
    fn out_of_range_env_dpi_is_rejected() {
        let env = EnvLayer {
            dpi: Some(10_000),
            ..Default::default()
        };
        assert!(ResolvedRunConfig::merge(CliOverrides::default(), env, Config::default()).is_err());
    }
}
