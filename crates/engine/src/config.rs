//! Runtime configuration from the environment and command line.
//!
//! Environment variables (an optional `.env` is loaded first):
//! - `STATBLOCK_INPUT` - payload path, `-` for stdin
//! - `STATBLOCK_OUTPUT` - output path, `-` for stdout
//! - `STATBLOCK_FORMAT` - `json`, `pretty` or `summary`
//! - `STATBLOCK_VALIDATE` - run storage validation before writing
//!
//! Positional arguments `[INPUT] [OUTPUT]` override the first two.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};

/// Path value that selects the standard stream instead of a file.
pub const STDIO: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Compact single-line JSON
    Json,
    /// Indented JSON
    #[default]
    Pretty,
    /// Plain-text character summary
    Summary,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Pretty => "pretty",
            OutputFormat::Summary => "summary",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            "summary" | "text" => Ok(OutputFormat::Summary),
            other => bail!("Unknown output format '{}' (expected json, pretty or summary)", other),
        }
    }
}

/// Input or output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Stdio,
    File(PathBuf),
}

impl Location {
    fn parse(value: &str) -> Self {
        match value.trim() {
            "" | STDIO => Location::Stdio,
            path => Location::File(PathBuf::from(path)),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Stdio => f.write_str(STDIO),
            Location::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub input: Location,
    pub output: Location,
    pub format: OutputFormat,
    pub validate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input: Location::Stdio,
            output: Location::Stdio,
            format: OutputFormat::default(),
            validate: true,
        }
    }
}

impl EngineConfig {
    /// Build from the process environment and the given arguments (without the program name).
    pub fn from_env_and_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), args)
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        args: impl IntoIterator<Item = String>,
    ) -> anyhow::Result<Self> {
        let mut config = EngineConfig::default();

        if let Some(input) = lookup("STATBLOCK_INPUT") {
            config.input = Location::parse(&input);
        }
        if let Some(output) = lookup("STATBLOCK_OUTPUT") {
            config.output = Location::parse(&output);
        }
        if let Some(format) = lookup("STATBLOCK_FORMAT") {
            config.format = format.parse().context("Invalid STATBLOCK_FORMAT")?;
        }
        if let Some(validate) = lookup("STATBLOCK_VALIDATE") {
            config.validate = parse_flag(&validate).context("Invalid STATBLOCK_VALIDATE")?;
        }

        let mut positional = args.into_iter();
        if let Some(input) = positional.next() {
            config.input = Location::parse(&input);
        }
        if let Some(output) = positional.next() {
            config.output = Location::parse(&output);
        }
        if let Some(extra) = positional.next() {
            bail!("Unexpected argument '{}' (usage: statblock-engine [INPUT] [OUTPUT])", extra);
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("Expected true or false, got '{}'", other),
    }
}
