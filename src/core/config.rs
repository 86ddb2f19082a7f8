use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::core::error::{ReportError, Result};

pub const VERBOSITY_QUIET: u8 = 0;
pub const VERBOSITY_DOTS: u8 = 1;
pub const VERBOSITY_VERBOSE: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    pub verbosity: u8,
    pub show_descriptions: bool,
    pub color: ColorChoice,
    pub failfast: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// How much is printed per test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Dots,
    Verbose,
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        match level {
            VERBOSITY_QUIET => Verbosity::Quiet,
            VERBOSITY_DOTS => Verbosity::Dots,
            _ => Verbosity::Verbose,
        }
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            verbosity: VERBOSITY_DOTS,
            show_descriptions: true,
            color: ColorChoice::Auto,
            failfast: false,
        }
    }
}

impl ReporterConfig {
    pub fn quiet() -> Self {
        Self {
            verbosity: VERBOSITY_QUIET,
            ..Self::default()
        }
    }

    pub fn verbose() -> Self {
        Self {
            verbosity: VERBOSITY_VERBOSE,
            ..Self::default()
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from(self.verbosity)
    }

    /// Loads a config file; `.toml` files are parsed as TOML, anything else as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReportError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ReportError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        if path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
            Self::from_toml(&contents)
        } else {
            serde_json::from_str::<Self>(&contents)
                .map_err(|e| ReportError::ConfigError(format!("Failed to parse JSON config: {}", e)))
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str::<Self>(contents)
            .map_err(|e| ReportError::ConfigError(format!("Failed to parse TOML config: {}", e)))
    }
}
