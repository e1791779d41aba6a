//! core::types
//!
//! Strong types for core parsing concepts.
//!
//! # Types
//!
//! - [`Syntax`] - Option syntax convention used by a runner
//! - [`Token`] - One raw argument together with its position in argv
//!
//! # Examples
//!
//! ```
//! use clapr::core::types::Syntax;
//!
//! assert_eq!("gnu".parse::<Syntax>().unwrap(), Syntax::Gnu);
//! assert_eq!("POSIX".parse::<Syntax>().unwrap(), Syntax::Posix);
//! assert!("dos".parse::<Syntax>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use super::config::ConfigError;

/// Command line option syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Syntax {
    /// GNU long options (`--name`, `--name=value`) plus POSIX short clusters.
    #[default]
    Gnu,
    /// POSIX utility argument syntax (`-a`, `-abc`, `-xVALUE`, `-x VALUE`).
    Posix,
}

impl Syntax {
    /// All supported syntaxes.
    pub const ALL: [Syntax; 2] = [Syntax::Gnu, Syntax::Posix];

    /// Lowercase name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Syntax::Gnu => "gnu",
            Syntax::Posix => "posix",
        }
    }
}

impl FromStr for Syntax {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Syntax::ALL
            .into_iter()
            .find(|syntax| syntax.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownSyntax(s.to_string()))
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw argument string and its absolute index in the argument vector.
///
/// Index 0 is the first argument after the program name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub index: usize,
    pub text: String,
}

impl Token {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// `--`, the end-of-options marker.
    pub fn is_terminator(&self) -> bool {
        self.text == "--"
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_parses_case_insensitively() {
        assert_eq!("Gnu".parse::<Syntax>().unwrap(), Syntax::Gnu);
        assert_eq!(" posix ".parse::<Syntax>().unwrap(), Syntax::Posix);
    }

    #[test]
    fn syntax_rejects_unknown_names() {
        let err = "windows".parse::<Syntax>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSyntax(ref name) if name == "windows"));
    }

    #[test]
    fn syntax_display_matches_config_name() {
        for syntax in Syntax::ALL {
            assert_eq!(syntax.to_string().parse::<Syntax>().unwrap(), syntax);
        }
    }

    #[test]
    fn token_detects_terminator() {
        assert!(Token::new(0, "--").is_terminator());
        assert!(!Token::new(0, "---").is_terminator());
        assert!(!Token::new(0, "--foo").is_terminator());
    }
}
