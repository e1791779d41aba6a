//! engine::bind
//!
//! Binder invoker: validates a command's matched options and hands their
//! values to the attached binders.
//!
//! # Order
//!
//! Options are visited in match order. The help option stops the visit
//! immediately. Required-value checks run before the binder of the same
//! option. Required options that never appeared are reported separately by
//! [`check_unseen`], once every command of the run was bound without a help
//! request.

use thiserror::Error;

use crate::core::arg::Arg;
use crate::core::binder::BindError;

use super::rules::ParsedArg;

/// Successful result of binding one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// Every option was bound.
    Bound,
    /// The help option was matched; nothing after it was bound.
    Help,
}

/// Errors from binding one command.
#[derive(Debug, Error)]
pub enum BindFailure {
    /// A required, non-flag option got no value.
    #[error("missing option-argument for required option: {0}")]
    Missing(String),

    /// A binder rejected its value.
    #[error(transparent)]
    Convert(#[from] BindError),
}

/// Bind `parsed` options against their definitions in `args`.
///
/// # Example
///
/// ```
/// use clapr::engine::{bind, BindOutcome, ParsedArg};
/// use clapr::{binder, Arg, Bound};
///
/// let port = Bound::new(80_u32);
/// let args = vec![Arg::new("port").short('p').binder(binder::value(&port))];
/// let parsed = vec![ParsedArg { arg: 0, raw: "-p".into(), value: "8080".into(), inline: false }];
///
/// assert_eq!(bind(&args, &parsed).unwrap(), BindOutcome::Bound);
/// assert_eq!(port.get(), 8080);
/// ```
pub fn bind(args: &[Arg], parsed: &[ParsedArg]) -> Result<BindOutcome, BindFailure> {
    for p in parsed {
        let def = &args[p.arg];
        if def.is_help() {
            return Ok(BindOutcome::Help);
        }
        if missing_value(def, &p.value) {
            return Err(BindFailure::Missing(def.long().to_string()));
        }
        if let Some(binder) = def.get_binder() {
            binder.bind(&p.raw, &p.value)?;
        }
    }

    Ok(BindOutcome::Bound)
}

/// Fail on the first required, non-flag definition in `args` that never
/// appeared in `parsed`.
pub fn check_unseen(args: &[Arg], parsed: &[ParsedArg]) -> Result<(), BindFailure> {
    let unseen = args
        .iter()
        .enumerate()
        .find(|(i, def)| missing_value(def, "") && !parsed.iter().any(|p| p.arg == *i));
    match unseen {
        Some((_, def)) => Err(BindFailure::Missing(def.long().to_string())),
        None => Ok(()),
    }
}

fn missing_value(def: &Arg, value: &str) -> bool {
    def.is_required() && !def.is_flag() && value.is_empty()
}
