use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct CliArgs {
    /// Device metadata file
    #[arg(value_name = "device", value_hint = clap::ValueHint::FilePath)]
    pub device: PathBuf,

    /// Port pin mapping file
    #[arg(long, value_name = "file", value_hint = clap::ValueHint::FilePath)]
    pub ios: Option<PathBuf>,

    /// Write the resolved metadata to the file. Defaults to stdout
    #[arg(short, long, value_name = "file", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Skip checking mask references and register addresses
    #[arg(long)]
    pub no_validate: bool,

    /// Print colored output
    #[arg(long, value_name = "color", default_value_t = ColorOption::Auto)]
    pub color: ColorOption,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorOption {
    #[value(name = "never")]
    Never,

    #[value(name = "auto")]
    Auto,

    #[value(name = "always")]
    Always,

    #[value(name = "ansi")]
    AlwaysAnsi,
}

impl std::fmt::Display for ColorOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(v) = self.to_possible_value() {
            write!(f, "{}", v.get_name())?;
        }

        Ok(())
    }
}

impl From<ColorOption> for termcolor::ColorChoice {
    fn from(val: ColorOption) -> Self {
        match val {
            ColorOption::Never => termcolor::ColorChoice::Never,
            ColorOption::Auto => termcolor::ColorChoice::Auto,
            ColorOption::Always => termcolor::ColorChoice::Always,
            ColorOption::AlwaysAnsi => termcolor::ColorChoice::AlwaysAnsi,
        }
    }
}

/// Parses the command line arguments into the [`CliArgs`].
pub fn parse_arguments() -> anyhow::Result<CliArgs> {
    let args = CliArgs::parse_from(argfile::expand_args_from(
        std::env::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )?);

    crate::logging::setup_logger(&args)?;

    Ok(args)
}
