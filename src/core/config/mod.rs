//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! An application built on clapr may ship its parser settings (option
//! syntax, help layout) in a TOML file instead of hard-coding them.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values (GNU syntax, indent 4, gap 4)
//! 2. Config file
//! 3. Explicit [`crate::RunnerBuilder`] calls (not handled here)
//!
//! # Config Locations
//!
//! [`Config::discover`] searches, in order:
//! 1. `$CLAPR_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/<app>/clapr.toml`
//! 3. `~/.<app>/clapr.toml`
//!
//! # Example
//!
//! ```
//! use clapr::{Config, Syntax};
//!
//! let config = Config::parse("syntax = \"posix\"").unwrap();
//! assert_eq!(config.syntax(), Syntax::Posix);
//! assert_eq!(config.help_gap(), 4);
//! ```

pub mod schema;

pub use schema::{ConfigFile, HelpConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::Syntax;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CLAPR_CONFIG";

/// File name searched for in per-application config directories.
pub const CONFIG_FILE_NAME: &str = "clapr.toml";

const DEFAULT_HELP_INDENT: usize = 4;
const DEFAULT_HELP_GAP: usize = 4;

/// Configuration errors. All of them are raised before parsing begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("root command not set")]
    NoRoot,

    #[error("unsupported argument parsing syntax: {0}")]
    UnknownSyntax(String),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config '{origin}': {message}")]
    ParseError { origin: String, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Validated parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    file: ConfigFile,
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let file = Self::parse_file(contents, "<string>")?;
        Ok(Self {
            file,
            loaded_from: None,
        })
    }

    /// Load configuration from a file.
    ///
    /// A missing file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file = Self::parse_file(&contents, &path.display().to_string())?;

        Ok(Self {
            file,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    /// Load configuration for `app` from the standard locations.
    pub fn discover(app: &str) -> Result<Self, ConfigError> {
        Self::discover_from(
            app,
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        )
    }

    fn discover_from(
        app: &str,
        explicit: Option<PathBuf>,
        xdg_home: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let candidates = [
            explicit,
            xdg_home.map(|xdg| xdg.join(app).join(CONFIG_FILE_NAME)),
            home.map(|home| home.join(format!(".{}", app)).join(CONFIG_FILE_NAME)),
        ];

        match candidates.into_iter().flatten().find(|path| path.exists()) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    fn parse_file(contents: &str, origin: &str) -> Result<ConfigFile, ConfigError> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        file.validate()?;
        Ok(file)
    }

    /// Configured syntax, GNU when unset.
    pub fn syntax(&self) -> Syntax {
        self.file
            .syntax
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn help_indent(&self) -> usize {
        self.file
            .help
            .as_ref()
            .and_then(|h| h.indent)
            .unwrap_or(DEFAULT_HELP_INDENT)
    }

    pub fn help_gap(&self) -> usize {
        self.file
            .help
            .as_ref()
            .and_then(|h| h.gap)
            .unwrap_or(DEFAULT_HELP_GAP)
    }

    /// Path of the file this configuration was read from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}
