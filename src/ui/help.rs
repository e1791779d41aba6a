//! ui::help
//!
//! Help text rendering.
//!
//! # Layout
//!
//! ```text
//! Usage:
//!     tool sub [command] <options>
//!
//! Commands:
//!     [name]  usage
//!
//! Options:
//!     -n, --name    usage
//! ```
//!
//! Option labels are column-aligned to the longest label. The help option
//! itself is never listed.

use crate::core::arg::Arg;
use crate::core::command::CommandRef;
use crate::core::config::Config;
use crate::core::types::Syntax;

/// Renders the help text of a command.
///
/// Implemented for any `Fn(CommandRef<'_>, Syntax) -> String`, so a
/// closure can be attached with [`Command::helper`](crate::Command::helper).
pub trait Helper {
    fn help(&self, command: CommandRef<'_>, syntax: Syntax) -> String;
}

impl<F> Helper for F
where
    F: Fn(CommandRef<'_>, Syntax) -> String,
{
    fn help(&self, command: CommandRef<'_>, syntax: Syntax) -> String {
        self(command, syntax)
    }
}

/// The built-in help layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultHelper {
    indent: usize,
    gap: usize,
}

impl Default for DefaultHelper {
    fn default() -> Self {
        Self { indent: 4, gap: 4 }
    }
}

impl DefaultHelper {
    /// `indent` prefixes every entry line; `gap` is the minimum space
    /// between an option label and its usage.
    pub fn new(indent: usize, gap: usize) -> Self {
        Self { indent, gap }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.help_indent(), config.help_gap())
    }

    /// How `arg` is spelled in the options section, if it can be spelled
    /// at all under `syntax`.
    pub fn option_label(arg: &Arg, syntax: Syntax) -> Option<String> {
        let long = arg.long();
        match (syntax, arg.short_name()) {
            (Syntax::Gnu, Some(short)) if long.is_empty() => Some(format!("-{}", short)),
            (Syntax::Gnu, Some(short)) => Some(format!("-{}, --{}", short, long)),
            (Syntax::Gnu, None) if long.is_empty() => None,
            (Syntax::Gnu, None) => Some(format!("--{}", long)),
            (Syntax::Posix, Some(short)) => Some(format!("-{}", short)),
            (Syntax::Posix, None) if long.chars().count() == 1 => Some(format!("-{}", long)),
            (Syntax::Posix, None) => None,
        }
    }

    fn render(&self, command: CommandRef<'_>, syntax: Syntax) -> String {
        let pad = " ".repeat(self.indent);

        let mut path: Vec<&str> = command
            .ancestor_names()
            .into_iter()
            .filter(|name| !name.is_empty())
            .collect();
        path.push(command.name());

        let options: Vec<(String, &str)> = command
            .args()
            .iter()
            .filter(|arg| !arg.is_help())
            .filter_map(|arg| Self::option_label(arg, syntax).map(|l| (l, arg.usage_text())))
            .collect();
        let has_subcommands = command.subcommands().next().is_some();

        let mut out = format!("Usage:\n{}{}", pad, path.join(" "));
        if has_subcommands {
            out.push_str(" [command] <options>");
        } else if !options.is_empty() {
            out.push_str(" <options>");
        }
        out.push('\n');

        if has_subcommands {
            out.push_str("\nCommands:\n");
            for sub in command.subcommands() {
                let line = format!("{}[{}]  {}", pad, sub.name(), sub.usage());
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }

        if !options.is_empty() {
            let width = options.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
            out.push_str("\nOptions:\n");
            for (label, usage) in &options {
                let spacing = " ".repeat(width - label.len() + self.gap);
                let line = format!("{}{}{}{}", pad, label, spacing, usage);
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }

        out
    }
}

impl Helper for DefaultHelper {
    fn help(&self, command: CommandRef<'_>, syntax: Syntax) -> String {
        self.render(command, syntax)
    }
}
