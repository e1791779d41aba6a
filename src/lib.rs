//! clapr - command tree argument parsing and dispatch
//!
//! clapr takes a declared tree of commands and their argument definitions,
//! classifies a raw token sequence into matched commands, options, operands
//! and bound values, then runs the matched commands' actions in order.
//!
//! # Architecture
//!
//! - [`core`] - Argument definitions, binders, the command tree and configuration
//! - [`engine`] - Walk -> Rules -> Bind -> Execute pipeline
//! - [`ui`] - Help text rendering
//! - [`testing`] - Fakes for the pluggable capabilities
//!
//! # Syntaxes
//!
//! Two option syntaxes are supported, selected per runner:
//!
//! - [`Syntax::Gnu`] - GNU long options (`--name=value`) on top of POSIX
//!   short clusters
//! - [`Syntax::Posix`] - POSIX utility syntax (`-abc`, `-xVALUE`, `-x VALUE`)
//!
//! # Example
//!
//! ```
//! use clapr::{binder, Arg, Bound, Command, ExecContext, Outcome, Runner, Syntax};
//!
//! let verbose = Bound::new(false);
//! let seen = verbose.clone();
//!
//! let root = Command::new("foo")
//!     .usage("foo all the things")
//!     .arg(Arg::new("bar").short('b').binder(binder::flag(&verbose)))
//!     .action(move |_ctx, _operands| assert!(seen.get()))
//!     .subcommand(Command::new("baz").usage("baz a thing").action(|_, _| {}));
//!
//! let runner = Runner::new(root, Syntax::Gnu);
//! let outcome = runner.run(["-b", "baz"], &ExecContext::default()).unwrap();
//!
//! assert_eq!(outcome, Outcome::Completed);
//! assert!(verbose.get());
//! ```

pub mod core;
pub mod engine;
pub mod testing;
pub mod ui;

pub use crate::core::arg::Arg;
pub use crate::core::binder::{self, BindError, Binder, Bound};
pub use crate::core::command::{Command, CommandId, CommandRef, CommandTree};
pub use crate::core::config::{Config, ConfigError};
pub use crate::core::Syntax;
pub use crate::engine::{
    CancelToken, ExecContext, Outcome, RunError, Runner, RunnerBuilder, SyntaxError,
};
pub use crate::ui::help::{DefaultHelper, Helper};
