//! engine::rules
//!
//! Syntax rule engine: classifies one command's tokens into options,
//! option-arguments and operands.
//!
//! # Architecture
//!
//! Each syntax is a fixed, ordered table of [`Rule`] functions. For every
//! token the rules run in table order; the first one that does not return
//! [`Flow::Next`] decides the token. A token no rule claims is an
//! unrecognized argument.
//!
//! ```text
//! GNU:   gnu_terminated, posix_terminated, leading_option, gnu_long,
//!        operand, gnu_separate_value, posix_cluster, posix_separate_value
//! POSIX: posix_terminated, leading_option, posix_cluster, operand,
//!        posix_separate_value
//! ```
//!
//! GNU is a superset of POSIX: long options use `--name=value` (or a
//! separate value when the option is required), single-dash clusters follow
//! the POSIX rules unchanged.
//!
//! # Invariants
//!
//! - A flag never takes the following token as its value
//! - A non-repeatable option matches at most once per command, whichever
//!   of its names is used
//! - `--` is either the value of the pending option or a terminator, never
//!   an operand

use thiserror::Error;

use crate::core::arg::Arg;
use crate::core::naming;
use crate::core::types::{Syntax, Token};

/// Errors from token classification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The first token of a command must be an option.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The matched option's name is outside the portable character set.
    #[error("invalid option name: {0}")]
    InvalidName(String),

    #[error("non-repeatable option: {0}")]
    NonRepeatable(String),

    /// An optional long option was given its value as a separate token.
    #[error(
        "optional option-argument '{value}' must be provided with option '--{option}' separated by '='"
    )]
    DetachedOptionalValue { value: String, option: String },

    #[error("unknown argument provided: {0}")]
    Unrecognized(String),
}

/// One option occurrence on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArg {
    /// Index of the definition in the command's argument list.
    pub arg: usize,
    /// Token the option was matched from.
    pub raw: String,
    /// Resolved option-argument, empty until set.
    pub value: String,
    /// Whether the value was attached with `=`.
    pub inline: bool,
}

/// What a rule did with a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Not this rule's token; try the next rule.
    Next,
    /// Token classified; move to the next token.
    Consumed,
    /// `--` ended option parsing; carries the token's argv index.
    Terminated { index: usize },
}

/// A classification rule: `(token, position within the command's tokens, state)`.
pub type Rule = fn(&Token, usize, &mut ParseContext<'_>) -> Result<Flow, SyntaxError>;

/// GNU long options on top of POSIX short clusters.
pub const GNU_RULES: &[Rule] = &[
    gnu_terminated,
    posix_terminated,
    leading_option,
    gnu_long,
    operand,
    gnu_separate_value,
    posix_cluster,
    posix_separate_value,
];

/// POSIX utility argument syntax.
pub const POSIX_RULES: &[Rule] = &[
    posix_terminated,
    leading_option,
    posix_cluster,
    operand,
    posix_separate_value,
];

/// The rule table for a syntax.
pub fn rules_for(syntax: Syntax) -> &'static [Rule] {
    match syntax {
        Syntax::Gnu => GNU_RULES,
        Syntax::Posix => POSIX_RULES,
    }
}

/// Per-command classification state.
#[derive(Debug)]
pub struct ParseContext<'a> {
    args: &'a [Arg],
    parsed: Vec<ParsedArg>,
    operands: Vec<String>,
}

impl<'a> ParseContext<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            args,
            parsed: Vec::new(),
            operands: Vec::new(),
        }
    }

    /// The most recently matched option.
    pub fn last(&self) -> Option<&ParsedArg> {
        self.parsed.last()
    }

    fn last_mut(&mut self) -> Option<&mut ParsedArg> {
        self.parsed.last_mut()
    }

    /// Definition of the most recently matched option.
    pub fn last_def(&self) -> Option<&'a Arg> {
        let args = self.args;
        self.last().map(|p| &args[p.arg])
    }

    pub fn parsed(&self) -> &[ParsedArg] {
        &self.parsed
    }

    pub fn operands(&self) -> &[String] {
        &self.operands
    }

    fn already_matched(&self, arg: usize) -> bool {
        self.parsed.iter().any(|p| p.arg == arg)
    }

    fn open(&mut self, arg: usize, raw: &str) {
        self.parsed.push(ParsedArg {
            arg,
            raw: raw.to_string(),
            value: String::new(),
            inline: false,
        });
    }

    fn set_value(&mut self, value: &str) {
        if let Some(last) = self.last_mut() {
            last.value = value.to_string();
        }
    }

    fn push_operand(&mut self, token: &Token) {
        self.operands.push(token.text.clone());
    }
}

/// Result of running a rule table over one command's tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub parsed: Vec<ParsedArg>,
    pub operands: Vec<String>,
    /// argv index of the terminating `--`, if one was seen.
    pub terminated_at: Option<usize>,
}

/// Classify `tokens` against `args` using `rules`.
///
/// Stops at the first terminating `--`; tokens after it are left for the
/// caller.
///
/// # Errors
///
/// The first [`SyntaxError`] raised by a rule, or
/// [`SyntaxError::Unrecognized`] for a token no rule claims.
pub fn apply(rules: &[Rule], args: &[Arg], tokens: &[Token]) -> Result<RuleOutcome, SyntaxError> {
    let mut ctx = ParseContext::new(args);
    let mut terminated_at = None;

    'tokens: for (pos, token) in tokens.iter().enumerate() {
        for rule in rules {
            match rule(token, pos, &mut ctx)? {
                Flow::Next => continue,
                Flow::Consumed => continue 'tokens,
                Flow::Terminated { index } => {
                    terminated_at = Some(index);
                    break 'tokens;
                }
            }
        }
        return Err(SyntaxError::Unrecognized(token.text.clone()));
    }

    Ok(RuleOutcome {
        parsed: ctx.parsed,
        operands: ctx.operands,
        terminated_at,
    })
}

/// `--` after an optional option that has no value yet.
fn gnu_terminated(token: &Token, _pos: usize, ctx: &mut ParseContext<'_>) -> Result<Flow, SyntaxError> {
    if !token.is_terminator() {
        return Ok(Flow::Next);
    }
    match (ctx.last(), ctx.last_def()) {
        (Some(last), Some(def)) if !def.is_required() && last.value.is_empty() => {
            Ok(Flow::Terminated { index: token.index })
        }
        _ => Ok(Flow::Next),
    }
}

/// `--` first, or after a flag or an option that already has its value.
fn posix_terminated(token: &Token, pos: usize, ctx: &mut ParseContext<'_>) -> Result<Flow, SyntaxError> {
    if !token.is_terminator() {
        return Ok(Flow::Next);
    }
    let settled = match (ctx.last(), ctx.last_def()) {
        (Some(last), Some(def)) => def.is_flag() || !last.value.is_empty(),
        _ => false,
    };
    if pos == 0 || settled {
        return Ok(Flow::Terminated { index: token.index });
    }
    Ok(Flow::Next)
}

/// A command's first token must be an option.
fn leading_option(token: &Token, pos: usize, _ctx: &mut ParseContext<'_>) -> Result<Flow, SyntaxError> {
    if pos == 0 && !token.text.starts_with('-') {
        return Err(SyntaxError::InvalidOption(token.text.clone()));
    }
    Ok(Flow::Next)
}

/// `--name` or `--name=value`.
fn gnu_long(token: &Token, _pos: usize, ctx: &mut ParseContext<'_>) -> Result<Flow, SyntaxError> {
    let Some(body) = token.text.strip_prefix("--") else {
        return Ok(Flow::Next);
    };
    if body.is_empty() {
        return Ok(Flow::Next);
    }

    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let Some(idx) = ctx
        .args
        .iter()
        .position(|a| !a.long().is_empty() && a.long() == name)
    else {
        return Ok(Flow::Next);
    };

    if !naming::is_valid_long_name(name) {
        return Err(SyntaxError::InvalidName(format!("--{}", name)));
    }
    if !ctx.args[idx].is_repeatable() && ctx.already_matched(idx) {
        return Err(SyntaxError::NonRepeatable(format!("--{}", name)));
    }

    ctx.open(idx, &token.text);
    if let (Some(value), Some(last)) = (inline, ctx.last_mut()) {
        last.value = value.to_string();
        last.inline = true;
    }
    Ok(Flow::Consumed)
}

/// Once the pending option has its value, plain tokens are operands.
fn operand(token: &Token, _pos: usize, ctx: &mut ParseContext<'_>) -> Result<Flow, SyntaxError> {
    match ctx.last() {
        Some(last) if !last.value.is_empty() => {
            ctx.push_operand(token);
            Ok(Flow::Consumed)
        }
        _ => Ok(Flow::Next),
    }
}

/// `--name value`, allowed only for required options or after `--name=`.
fn gnu_separate_value(
    token: &Token,
    _pos: usize,
    ctx: &mut ParseContext<'_>,
) -> Result<Flow, SyntaxError> {
    let (Some(last), Some(def)) = (ctx.last(), ctx.last_def()) else {
        return Ok(Flow::Next);
    };
    if !last.raw.starts_with("--") || !last.value.is_empty() || def.is_flag() {
        return Ok(Flow::Next);
    }
    if !def.is_required() && !last.inline {
        return Err(SyntaxError::DetachedOptionalValue {
            value: token.text.clone(),
            option: def.long().to_string(),
        });
    }

    ctx.set_value(&token.text);
    Ok(Flow::Consumed)
}

/// `-a`, `-abc`, `-xVALUE`.
fn posix_cluster(token: &Token, _pos: usize, ctx: &mut ParseContext<'_>) -> Result<Flow, SyntaxError> {
    let Some(body) = token.text.strip_prefix('-') else {
        return Ok(Flow::Next);
    };
    if body.is_empty() || token.is_terminator() {
        return Ok(Flow::Next);
    }

    let args = ctx.args;
    for (i, c) in body.char_indices() {
        let Some(idx) = args.iter().position(|a| a.matches_char(c)) else {
            if i == 0 {
                return Ok(Flow::Next);
            }
            // The rest of the cluster is the previous option's value.
            ctx.set_value(&body[i..]);
            return Ok(Flow::Consumed);
        };

        let def = &args[idx];
        if !naming::is_valid_short_name(def.long(), def.short_name()) {
            return Err(SyntaxError::InvalidName(token.text.clone()));
        }
        if !def.is_repeatable() && ctx.already_matched(idx) {
            return Err(SyntaxError::NonRepeatable(token.text.clone()));
        }

        ctx.open(idx, &token.text);

        let rest = &body[i + c.len_utf8()..];
        if !def.is_flag() && !rest.is_empty() {
            ctx.set_value(rest);
            return Ok(Flow::Consumed);
        }
    }

    Ok(Flow::Consumed)
}

/// `-x value`; after a flag a plain token is an operand instead, and an
/// option-like token is left unclaimed.
fn posix_separate_value(
    token: &Token,
    _pos: usize,
    ctx: &mut ParseContext<'_>,
) -> Result<Flow, SyntaxError> {
    let (Some(last), Some(def)) = (ctx.last(), ctx.last_def()) else {
        return Ok(Flow::Next);
    };
    if !last.value.is_empty() {
        return Ok(Flow::Next);
    }

    if def.is_flag() {
        if token.text.starts_with('-') {
            return Ok(Flow::Next);
        }
        ctx.push_operand(token);
    } else {
        ctx.set_value(&token.text);
    }
    Ok(Flow::Consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::binder::{self, Bound};

    fn tokens(raw: &[&str]) -> Vec<Token> {
        raw.iter()
            .enumerate()
            .map(|(i, t)| Token::new(i, *t))
            .collect()
    }

    /// `-a`/`--all` flag, `-o`/`--output` optional value, `-n`/`--name` required value.
    fn defs() -> Vec<Arg> {
        vec![
            Arg::new("all").short('a').binder(binder::flag(&Bound::new(false))),
            Arg::new("output")
                .short('o')
                .binder(binder::value(&Bound::new(String::new()))),
            Arg::new("name")
                .short('n')
                .required(true)
                .binder(binder::value(&Bound::new(String::new()))),
            Arg::new("b").binder(binder::flag(&Bound::new(false))),
        ]
    }

    fn run(syntax: Syntax, raw: &[&str]) -> Result<RuleOutcome, SyntaxError> {
        apply(rules_for(syntax), &defs(), &tokens(raw))
    }

    fn values(outcome: &RuleOutcome) -> Vec<(usize, &str)> {
        outcome
            .parsed
            .iter()
            .map(|p| (p.arg, p.value.as_str()))
            .collect()
    }

    #[test]
    fn empty_tokens_parse_to_nothing() {
        for syntax in Syntax::ALL {
            let outcome = run(syntax, &[]).unwrap();
            assert!(outcome.parsed.is_empty());
            assert!(outcome.operands.is_empty());
            assert_eq!(outcome.terminated_at, None);
        }
    }

    #[test]
    fn first_token_must_be_an_option() {
        for syntax in Syntax::ALL {
            assert_eq!(
                run(syntax, &["file"]),
                Err(SyntaxError::InvalidOption("file".into()))
            );
        }
    }

    #[test]
    fn leading_terminator_ends_parsing() {
        for syntax in Syntax::ALL {
            let outcome = run(syntax, &["--", "-a"]).unwrap();
            assert_eq!(outcome.terminated_at, Some(0));
            assert!(outcome.parsed.is_empty());
            assert!(outcome.operands.is_empty());
        }
    }

    #[test]
    fn gnu_inline_value() {
        let outcome = run(Syntax::Gnu, &["--output=out.txt"]).unwrap();
        assert_eq!(values(&outcome), vec![(1, "out.txt")]);
        assert!(outcome.parsed[0].inline);
    }

    #[test]
    fn gnu_inline_value_keeps_later_equals() {
        let outcome = run(Syntax::Gnu, &["--output=a=b"]).unwrap();
        assert_eq!(values(&outcome), vec![(1, "a=b")]);
    }

    #[test]
    fn gnu_required_takes_separate_value() {
        let outcome = run(Syntax::Gnu, &["--name", "alice"]).unwrap();
        assert_eq!(values(&outcome), vec![(2, "alice")]);
    }

    #[test]
    fn gnu_optional_rejects_separate_value() {
        assert_eq!(
            run(Syntax::Gnu, &["--output", "out.txt"]),
            Err(SyntaxError::DetachedOptionalValue {
                value: "out.txt".into(),
                option: "output".into()
            })
        );
    }

    #[test]
    fn gnu_empty_inline_allows_separate_value() {
        let outcome = run(Syntax::Gnu, &["--output=", "out.txt"]).unwrap();
        assert_eq!(values(&outcome), vec![(1, "out.txt")]);
    }

    #[test]
    fn gnu_operands_after_valued_option() {
        let outcome = run(Syntax::Gnu, &["--output=x", "one", "-a"]).unwrap();
        assert_eq!(outcome.operands, vec!["one", "-a"]);
    }

    #[test]
    fn gnu_terminator_after_optional_without_value() {
        let outcome = run(Syntax::Gnu, &["--output", "--"]).unwrap();
        assert_eq!(outcome.terminated_at, Some(1));
        assert_eq!(values(&outcome), vec![(1, "")]);
    }

    #[test]
    fn gnu_terminator_is_required_value() {
        let outcome = run(Syntax::Gnu, &["--name", "--"]).unwrap();
        assert_eq!(outcome.terminated_at, None);
        assert_eq!(values(&outcome), vec![(2, "--")]);
    }

    #[test]
    fn gnu_short_options_follow_posix_rules() {
        let outcome = run(Syntax::Gnu, &["-a", "-ofile"]).unwrap();
        assert_eq!(values(&outcome), vec![(0, ""), (1, "file")]);

        let outcome = run(Syntax::Gnu, &["-a", "-n", "bob"]).unwrap();
        assert_eq!(values(&outcome), vec![(0, ""), (2, "bob")]);
    }

    #[test]
    fn gnu_short_option_after_a_value_is_an_operand() {
        let outcome = run(Syntax::Gnu, &["-ofile", "-a"]).unwrap();
        assert_eq!(values(&outcome), vec![(1, "file")]);
        assert_eq!(outcome.operands, vec!["-a"]);

        let outcome = run(Syntax::Posix, &["-ofile", "-a"]).unwrap();
        assert_eq!(values(&outcome), vec![(1, "file"), (0, "")]);
        assert!(outcome.operands.is_empty());
    }

    #[test]
    fn gnu_unknown_long_option() {
        assert_eq!(
            run(Syntax::Gnu, &["--bogus"]),
            Err(SyntaxError::Unrecognized("--bogus".into()))
        );
    }

    #[test]
    fn gnu_flag_with_inline_value_is_kept_for_binding() {
        let outcome = run(Syntax::Gnu, &["--all=yes"]).unwrap();
        assert_eq!(values(&outcome), vec![(0, "yes")]);
    }

    #[test]
    fn posix_cluster_of_flags() {
        let outcome = run(Syntax::Posix, &["-ab"]).unwrap();
        assert_eq!(values(&outcome), vec![(0, ""), (3, "")]);
        assert!(outcome.parsed.iter().all(|p| p.raw == "-ab"));
    }

    #[test]
    fn posix_attached_value() {
        let outcome = run(Syntax::Posix, &["-ofile.txt"]).unwrap();
        assert_eq!(values(&outcome), vec![(1, "file.txt")]);
    }

    #[test]
    fn posix_flag_then_attached_value() {
        let outcome = run(Syntax::Posix, &["-aofile"]).unwrap();
        assert_eq!(values(&outcome), vec![(0, ""), (1, "file")]);
    }

    #[test]
    fn posix_unmatched_cluster_tail_becomes_value() {
        // `z` names nothing, so "zq" becomes the value of the flag `a`.
        let outcome = run(Syntax::Posix, &["-azq"]).unwrap();
        assert_eq!(values(&outcome), vec![(0, "zq")]);
    }

    #[test]
    fn posix_separate_value() {
        let outcome = run(Syntax::Posix, &["-o", "out", "extra"]).unwrap();
        assert_eq!(values(&outcome), vec![(1, "out")]);
        assert_eq!(outcome.operands, vec!["extra"]);
    }

    #[test]
    fn posix_terminator_can_be_a_value() {
        let outcome = run(Syntax::Posix, &["-o", "--", "x"]).unwrap();
        assert_eq!(values(&outcome), vec![(1, "--")]);
        assert_eq!(outcome.operands, vec!["x"]);
        assert_eq!(outcome.terminated_at, None);
    }

    #[test]
    fn posix_terminator_after_flag() {
        let outcome = run(Syntax::Posix, &["-a", "--", "-n"]).unwrap();
        assert_eq!(outcome.terminated_at, Some(1));
        assert!(outcome.operands.is_empty());
    }

    #[test]
    fn flag_never_takes_next_token() {
        for syntax in Syntax::ALL {
            let outcome = run(syntax, &["-a", "file"]).unwrap();
            assert_eq!(values(&outcome), vec![(0, "")]);
            assert_eq!(outcome.operands, vec!["file"]);
        }
        let outcome = run(Syntax::Gnu, &["--all", "file"]).unwrap();
        assert_eq!(values(&outcome), vec![(0, "")]);
        assert_eq!(outcome.operands, vec!["file"]);
    }

    #[test]
    fn unknown_option_after_flag_is_unrecognized() {
        for syntax in Syntax::ALL {
            for raw in ["--bogus", "-z"] {
                assert_eq!(
                    run(syntax, &["-a", raw]),
                    Err(SyntaxError::Unrecognized(raw.into())),
                    "{:?} {}",
                    syntax,
                    raw
                );
            }
        }
        assert_eq!(
            run(Syntax::Gnu, &["--all", "-z"]),
            Err(SyntaxError::Unrecognized("-z".into()))
        );
    }

    #[test]
    fn non_repeatable_by_any_name() {
        let cases: &[(Syntax, &[&str])] = &[
            (Syntax::Gnu, &["--all", "--all"]),
            (Syntax::Gnu, &["--all", "-a"]),
            (Syntax::Gnu, &["-a", "--all"]),
            (Syntax::Gnu, &["-aa"]),
            (Syntax::Posix, &["-a", "-a"]),
            (Syntax::Posix, &["-aa"]),
        ];
        for (syntax, raw) in cases {
            assert!(
                matches!(run(*syntax, raw), Err(SyntaxError::NonRepeatable(_))),
                "{:?} {:?}",
                syntax,
                raw
            );
        }
    }

    #[test]
    fn repeatable_options_match_again() {
        let defs = vec![Arg::new("verbose")
            .short('v')
            .repeatable(true)
            .binder(binder::flag(&Bound::new(false)))];
        let outcome = apply(GNU_RULES, &defs, &tokens(&["-vv", "--verbose"])).unwrap();
        assert_eq!(outcome.parsed.len(), 3);
    }

    #[test]
    fn invalid_names_rejected() {
        let defs = vec![
            Arg::new("dry_run").binder(binder::flag(&Bound::new(false))),
            Arg::new("").short('+').binder(binder::flag(&Bound::new(false))),
        ];
        assert_eq!(
            apply(GNU_RULES, &defs, &tokens(&["--dry_run"])),
            Err(SyntaxError::InvalidName("--dry_run".into()))
        );
        assert_eq!(
            apply(POSIX_RULES, &defs, &tokens(&["-+"])),
            Err(SyntaxError::InvalidName("-+".into()))
        );
    }

    #[test]
    fn posix_ignores_long_options() {
        assert_eq!(
            run(Syntax::Posix, &["--all"]),
            Err(SyntaxError::Unrecognized("--all".into()))
        );
    }

    #[test]
    fn unknown_short_option() {
        for syntax in Syntax::ALL {
            assert_eq!(
                run(syntax, &["-z"]),
                Err(SyntaxError::Unrecognized("-z".into()))
            );
        }
    }
}
