//! Command-line options.

use std::fmt;

use gridstar_search::{Metric, Mode, SearchConfig};

pub const USAGE: &str = "\
usage: gridstar-demo [options]

  --size N       cells per side (default 16)
  --density P    percentage of cells turned into barriers (default 25)
  --seed S       barrier layout seed (default 1)
  --step         stepped mode: Enter advances, q + Enter cancels
  --octile       octile distance instead of Euclidean
  --help         show this text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub size: i32,
    pub density: u32,
    pub seed: u64,
    pub config: SearchConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            size: 16,
            density: 25,
            seed: 1,
            config: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    Help,
    Unknown(String),
    MissingValue(&'static str),
    BadValue { flag: &'static str, value: String },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => f.write_str(USAGE),
            Self::Unknown(arg) => write!(f, "unknown argument \u{201c}{arg}\u{201d}\n\n{USAGE}"),
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::BadValue { flag, value } => write!(f, "bad value for {flag}: {value}"),
        }
    }
}

impl std::error::Error for OptionsError {}

impl Options {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, OptionsError> {
        let mut opts = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--size" => opts.size = value(&mut args, "--size")?,
                "--density" => opts.density = value(&mut args, "--density")?,
                "--seed" => opts.seed = value(&mut args, "--seed")?,
                "--step" => opts.config = opts.config.with_mode(Mode::Stepped),
                "--octile" => opts.config = opts.config.with_metric(Metric::Octile),
                "--help" | "-h" => return Err(OptionsError::Help),
                _ => return Err(OptionsError::Unknown(arg)),
            }
        }
        if opts.size < 2 {
            return Err(OptionsError::BadValue {
                flag: "--size",
                value: opts.size.to_string(),
            });
        }
        if opts.density > 100 {
            return Err(OptionsError::BadValue {
                flag: "--density",
                value: opts.density.to_string(),
            });
        }
        Ok(opts)
    }
}

fn value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, OptionsError> {
    let raw = args.next().ok_or(OptionsError::MissingValue(flag))?;
    raw.parse()
        .map_err(|_| OptionsError::BadValue { flag, value: raw })
}
