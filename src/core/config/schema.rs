//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```toml
//! syntax = "posix"
//!
//! [help]
//! indent = 2
//! gap = 3
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing: `syntax` must name a supported
//! syntax and the help layout must leave a visible gap between columns.

use serde::Deserialize;

use super::ConfigError;
use crate::core::types::Syntax;

/// Upper bound for help layout widths.
pub const MAX_HELP_WIDTH: usize = 32;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Option syntax ("gnu" or "posix")
    pub syntax: Option<String>,

    /// Help layout settings
    pub help: Option<HelpConfig>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownSyntax` for an unsupported syntax name
    /// and `ConfigError::InvalidValue` for an out-of-range help layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(syntax) = &self.syntax {
            syntax.parse::<Syntax>()?;
        }
        if let Some(help) = &self.help {
            help.validate()?;
        }
        Ok(())
    }
}

/// Help text layout.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HelpConfig {
    /// Spaces before each listed command or option
    pub indent: Option<usize>,

    /// Spaces between the option label column and the usage column
    pub gap: Option<usize>,
}

impl HelpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(indent) = self.indent {
            if indent > MAX_HELP_WIDTH {
                return Err(ConfigError::InvalidValue(format!(
                    "help.indent must be at most {}, got {}",
                    MAX_HELP_WIDTH, indent
                )));
            }
        }
        if let Some(gap) = self.gap {
            if gap == 0 || gap > MAX_HELP_WIDTH {
                return Err(ConfigError::InvalidValue(format!(
                    "help.gap must be between 1 and {}, got {}",
                    MAX_HELP_WIDTH, gap
                )));
            }
        }
        Ok(())
    }
}
