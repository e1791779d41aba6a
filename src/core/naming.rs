//! core::naming
//!
//! Option naming rules.
//!
//! POSIX restricts option names to the portable character set: letters and
//! digits. GNU long names additionally allow `-` between name components,
//! so `dry-run` is valid while `dry_run` and `-` alone are not.

/// Check a single character against the portable option name set.
pub fn is_portable_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Validate a GNU long option name.
///
/// Each hyphen-separated component must consist of portable characters.
///
/// # Example
///
/// ```
/// use clapr::core::naming::is_valid_long_name;
///
/// assert!(is_valid_long_name("dry-run"));
/// assert!(is_valid_long_name("v2"));
/// assert!(!is_valid_long_name("dry_run"));
/// ```
pub fn is_valid_long_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .split('-')
            .all(|component| component.chars().all(is_portable_char))
}

/// Validate a POSIX short option name.
///
/// The short character must be portable, or, when there is no usable short
/// character, the long name must be exactly one portable character.
pub fn is_valid_short_name(long: &str, short: Option<char>) -> bool {
    let short_valid = short.is_some_and(is_portable_char);
    let mut chars = long.chars();
    let long_valid = match (chars.next(), chars.next()) {
        (Some(c), None) => is_portable_char(c),
        _ => false,
    };

    short_valid || long_valid
}
