//! core::arg
//!
//! Argument (option) definitions.
//!
//! An [`Arg`] is static: it describes how an option may be written and
//! where its value goes, never whether it was seen. Parse state lives in
//! [`crate::engine::ParsedArg`].

use std::fmt;

use super::binder::{self, Binder, Bound};

/// Long name of the help option injected into every command.
pub const HELP_LONG: &str = "help";

/// Short name of the help option injected into every command.
pub const HELP_SHORT: char = 'h';

/// A single option definition for a command.
///
/// # Example
///
/// ```
/// use clapr::{binder, Arg, Bound};
///
/// let name = Bound::new(String::new());
/// let arg = Arg::new("name")
///     .short('n')
///     .required(true)
///     .usage("who to greet")
///     .binder(binder::value(&name));
///
/// assert_eq!(arg.long(), "name");
/// assert_eq!(arg.short_name(), Some('n'));
/// assert!(!arg.is_flag());
/// ```
pub struct Arg {
    long: String,
    short: Option<char>,
    required: bool,
    repeatable: bool,
    is_help: bool,
    usage: String,
    binder: Option<Box<dyn Binder>>,
}

impl Arg {
    /// Create a definition with the given long name.
    ///
    /// The long name may be empty for short-only options.
    pub fn new(long: impl Into<String>) -> Self {
        Self {
            long: long.into(),
            short: None,
            required: false,
            repeatable: false,
            is_help: false,
            usage: String::new(),
            binder: None,
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// A required non-flag option fails binding when it gets no value.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    /// Mark this option as the command's help option.
    pub fn help(mut self, is_help: bool) -> Self {
        self.is_help = is_help;
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn binder(mut self, binder: impl Binder + 'static) -> Self {
        self.binder = Some(Box::new(binder));
        self
    }

    /// The definition injected into commands that declare no help option.
    pub(crate) fn help_option() -> Self {
        // The injected flag's target is private; only its presence matters.
        Arg::new(HELP_LONG)
            .short(HELP_SHORT)
            .repeatable(true)
            .help(true)
            .usage("display usage information for this command")
            .binder(binder::flag(&Bound::new(false)))
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub fn is_help(&self) -> bool {
        self.is_help
    }

    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    pub fn get_binder(&self) -> Option<&dyn Binder> {
        self.binder.as_deref()
    }

    /// Boolean-valued options are set by presence and never take a value.
    pub fn is_flag(&self) -> bool {
        self.binder.as_ref().is_some_and(|b| b.is_flag())
    }

    /// Whether a single cluster character `c` names this option.
    pub fn matches_char(&self, c: char) -> bool {
        if self.short == Some(c) {
            return true;
        }
        let mut chars = self.long.chars();
        chars.next() == Some(c) && chars.next().is_none()
    }

    /// Whether this definition already covers the help option's names.
    pub(crate) fn claims_help(&self) -> bool {
        self.is_help
            || self.long == HELP_LONG
            || self.long == HELP_SHORT.to_string()
            || self.short == Some(HELP_SHORT)
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg")
            .field("long", &self.long)
            .field("short", &self.short)
            .field("required", &self.required)
            .field("repeatable", &self.repeatable)
            .field("is_help", &self.is_help)
            .field("flag", &self.is_flag())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_short_and_single_char_long() {
        assert!(Arg::new("foo").short('f').matches_char('f'));
        assert!(Arg::new("x").matches_char('x'));
        assert!(!Arg::new("foo").matches_char('f'));
        assert!(!Arg::new("").matches_char('f'));
    }

    #[test]
    fn flag_detection_follows_binder() {
        let flag = Bound::new(false);
        let count = Bound::new(0_u32);
        assert!(Arg::new("v").binder(binder::flag(&flag)).is_flag());
        assert!(!Arg::new("n").binder(binder::value(&count)).is_flag());
        assert!(!Arg::new("n").is_flag());
    }

    #[test]
    fn help_option_shape() {
        let help = Arg::help_option();
        assert_eq!(help.long(), "help");
        assert_eq!(help.short_name(), Some('h'));
        assert!(help.is_help() && help.is_repeatable() && help.is_flag());
    }

    #[test]
    fn claims_help_by_any_name() {
        assert!(Arg::new("help").claims_help());
        assert!(Arg::new("h").claims_help());
        assert!(Arg::new("hint").short('h').claims_help());
        assert!(Arg::new("usage").help(true).claims_help());
        assert!(!Arg::new("hint").claims_help());
    }
}
