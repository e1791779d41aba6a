//! engine::runner
//!
//! Runner - the single entry point for parsing and executing a command line.
//!
//! # Architecture
//!
//! ```text
//! Walk -> for each command: Rules -> Bind -> [Help?] -> Execute
//! ```
//!
//! The argument vector is injected explicitly; [`Runner::run_env`] is the
//! only place that reads the process arguments.
//!
//! # Invariants
//!
//! - Configuration errors are raised by [`RunnerBuilder::build`], before
//!   any token is looked at
//! - Syntax and missing-value errors carry the failing command's help text
//! - Conversion errors are returned as the binder produced them
//! - Once help is requested nothing else is parsed, bound or executed
//!
//! # Example
//!
//! ```
//! use clapr::{binder, Arg, Bound, Command, ExecContext, Outcome, Runner, Syntax};
//!
//! let name = Bound::new(String::new());
//! let root = Command::new("greet")
//!     .arg(Arg::new("name").short('n').required(true).binder(binder::value(&name)));
//! let runner = Runner::new(root, Syntax::Posix);
//!
//! let outcome = runner.run(["-n", "world"], &ExecContext::default()).unwrap();
//! assert_eq!(outcome, Outcome::Completed);
//! assert_eq!(name.get(), "world");
//!
//! let outcome = runner.run(["-h"], &ExecContext::default()).unwrap();
//! assert!(matches!(outcome, Outcome::Help(text) if text.starts_with("Usage:")));
//! ```

use thiserror::Error;
use tracing::{debug, trace};

use super::bind::{bind, check_unseen, BindFailure, BindOutcome};
use super::exec::execute;
use super::rules::{self, rules_for, SyntaxError};
use super::walk::{walk, ParsedCommand, PathContext};
use super::ExecContext;
use crate::core::binder::BindError;
use crate::core::command::{Command, CommandId, CommandTree};
use crate::core::config::{Config, ConfigError};
use crate::core::types::Syntax;
use crate::ui::help::{DefaultHelper, Helper};

/// Errors from a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Parsing produced no command to execute.
    #[error("no commands parsed")]
    NoCommands,

    /// A token could not be classified.
    #[error("{source}\n{help}")]
    Syntax { source: SyntaxError, help: String },

    /// A required option got no value.
    #[error("missing option-argument for required option: {name}\n{help}")]
    Missing { name: String, help: String },

    /// A binder rejected a value.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The cancellation signal was raised between actions.
    #[error("execution cancelled: {cause}")]
    Cancelled { cause: String },
}

impl RunError {
    /// Help text of the command that failed, for syntax and missing-value errors.
    pub fn help(&self) -> Option<&str> {
        match self {
            RunError::Syntax { help, .. } | RunError::Missing { help, .. } => Some(help),
            _ => None,
        }
    }

    /// Check if this is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunError::Cancelled { .. })
    }
}

/// Successful result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All matched commands were parsed, bound and executed.
    Completed,
    /// Help was requested; carries the rendered help text.
    Help(String),
}

/// Result of parsing and binding without executing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Commands ready to execute, in discovery order.
    Commands(Vec<ParsedCommand>),
    /// Help was requested; carries the rendered help text.
    Help(String),
}

/// Parses and executes command lines against a command tree.
pub struct Runner {
    tree: CommandTree,
    syntax: Syntax,
    helper: DefaultHelper,
}

impl Runner {
    /// Create a runner with the default help layout.
    pub fn new(root: Command, syntax: Syntax) -> Self {
        Self {
            tree: CommandTree::new(root),
            syntax,
            helper: DefaultHelper::default(),
        }
    }

    pub fn builder() -> RunnerBuilder {
        RunnerBuilder::default()
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// Render help for a command, using its own helper if it has one.
    pub fn help(&self, id: CommandId) -> String {
        let command = self.tree.get(id);
        match self.tree.helper(id) {
            Some(helper) => helper.help(command, self.syntax),
            None => self.helper.help(command, self.syntax),
        }
    }

    /// Walk, classify and bind `args` without executing any action.
    ///
    /// `args` excludes the program name. Binders run as a side effect.
    pub fn parse<I, S>(&self, args: I) -> Result<ParseOutcome, RunError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut path = PathContext::new(&self.tree);
        let groups = walk(&self.tree, &argv, &mut path);
        debug!(
            syntax = %self.syntax,
            tokens = argv.len(),
            commands = groups.len(),
            "walked arguments"
        );

        let rules = rules_for(self.syntax);
        let mut parsed = Vec::with_capacity(groups.len());

        for mut group in groups {
            if path.terminated {
                break;
            }

            let id = group.command;
            let args = self.tree.args(id);
            let outcome = rules::apply(rules, args, &group.tokens).map_err(|source| {
                debug!(command = self.tree.name(id), error = %source, "syntax error");
                RunError::Syntax {
                    source,
                    help: self.help(id),
                }
            })?;

            group.args = outcome.parsed;
            group.operands = outcome.operands;
            if let Some(index) = outcome.terminated_at {
                trace!(index, "arguments terminated");
                path.terminated = true;
                group.operands.extend(argv.iter().skip(index + 1).cloned());
            }

            match bind(args, &group.args) {
                Ok(BindOutcome::Bound) => {}
                Ok(BindOutcome::Help) => {
                    debug!(command = self.tree.name(id), "help requested");
                    return Ok(ParseOutcome::Help(self.help(id)));
                }
                Err(failure) => return Err(self.bind_error(id, failure)),
            }

            parsed.push(group);
        }

        // A help request in a later command wins over an omitted option.
        for group in &parsed {
            check_unseen(self.tree.args(group.command), &group.args)
                .map_err(|failure| self.bind_error(group.command, failure))?;
        }

        if parsed.is_empty() {
            return Err(RunError::NoCommands);
        }
        Ok(ParseOutcome::Commands(parsed))
    }

    fn bind_error(&self, id: CommandId, failure: BindFailure) -> RunError {
        match failure {
            BindFailure::Missing(name) => RunError::Missing {
                name,
                help: self.help(id),
            },
            BindFailure::Convert(err) => RunError::Bind(err),
        }
    }

    /// Parse `args` (program name excluded) and execute the matched commands.
    pub fn run<I, S>(&self, args: I, ctx: &ExecContext) -> Result<Outcome, RunError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.parse(args)? {
            ParseOutcome::Help(text) => Ok(Outcome::Help(text)),
            ParseOutcome::Commands(commands) => {
                let ran = execute(&self.tree, &commands, ctx)?;
                debug!(ran, "run completed");
                Ok(Outcome::Completed)
            }
        }
    }

    /// Like [`Runner::run`], but `args` starts with the program name.
    pub fn run_from<I, S>(&self, args: I, ctx: &ExecContext) -> Result<Outcome, RunError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(args.into_iter().skip(1), ctx)
    }

    /// Run against the process arguments.
    pub fn run_env(&self, ctx: &ExecContext) -> Result<Outcome, RunError> {
        self.run_from(std::env::args(), ctx)
    }
}

/// Builder for a [`Runner`] with configuration.
///
/// Syntax precedence: [`RunnerBuilder::syntax`], then
/// [`RunnerBuilder::syntax_name`], then the config file, then GNU.
#[derive(Default)]
pub struct RunnerBuilder {
    root: Option<Command>,
    syntax: Option<Syntax>,
    syntax_name: Option<String>,
    config: Option<Config>,
}

impl RunnerBuilder {
    pub fn root(mut self, root: Command) -> Self {
        self.root = Some(root);
        self
    }

    pub fn syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = Some(syntax);
        self
    }

    /// Select the syntax by name (`"gnu"` or `"posix"`), validated by `build`.
    pub fn syntax_name(mut self, name: impl Into<String>) -> Self {
        self.syntax_name = Some(name.into());
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// # Errors
    ///
    /// `ConfigError::NoRoot` without a root command,
    /// `ConfigError::UnknownSyntax` for an unsupported syntax name.
    pub fn build(self) -> Result<Runner, ConfigError> {
        let root = self.root.ok_or(ConfigError::NoRoot)?;
        let config = self.config.unwrap_or_default();

        let syntax = match (self.syntax, self.syntax_name) {
            (Some(syntax), _) => syntax,
            (None, Some(name)) => name.parse()?,
            (None, None) => config.syntax(),
        };

        Ok(Runner {
            tree: CommandTree::new(root),
            syntax,
            helper: DefaultHelper::from_config(&config),
        })
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("syntax", &self.syntax)
            .field("tree", &self.tree)
            .finish()
    }
}
