use std::str::FromStr;

use clap::ValueEnum;

/// Format of the log lines written to stderr. The batch entry printed on stdout is JSON either
/// way.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum LoggingFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Accepts the same names as the `--logging-format` option, ignoring case, so that the
/// environment variable and the flag agree.
impl FromStr for LoggingFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true)
    }
}
