//! engine
//!
//! Orchestrates a run: Walk -> Rules -> Bind -> Execute.
//!
//! # Architecture
//!
//! 1. **Walk**: one left-to-right pass assigns every token to the command
//!    it belongs to ([`walk`])
//! 2. **Rules**: each command's tokens are classified by the syntax's
//!    ordered rule chain ([`rules`])
//! 3. **Bind**: required/help checks, then each option's binder ([`bind`])
//! 4. **Execute**: matched actions run in discovery order ([`exec`])
//!
//! [`runner::Runner`] is the single entry point that drives the lifecycle.
//!
//! # Invariants
//!
//! - Termination (`--`) never surfaces as an error; it ends option parsing
//!   for the whole run
//! - A help request stops the run before any action executes
//! - Any other error aborts the remaining pipeline; nothing is retried
//! - Cancellation is polled between actions only; finished actions are
//!   never undone

pub mod bind;
pub mod exec;
pub mod rules;
pub mod runner;
pub mod walk;

pub use bind::{bind, check_unseen, BindFailure, BindOutcome};
pub use exec::execute;
pub use rules::{ParseContext, ParsedArg, Rule, RuleOutcome, SyntaxError};
pub use runner::{Outcome, ParseOutcome, RunError, Runner, RunnerBuilder};
pub use walk::{walk, ParsedCommand, PathContext};

use std::sync::{Arc, OnceLock};

/// Cooperative cancellation signal shared between a caller and a run.
///
/// Clones share the same signal. The first cause recorded wins; it can be
/// raised from any thread.
///
/// # Example
///
/// ```
/// use clapr::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
///
/// assert!(handle.cancel("interrupted"));
/// assert!(!handle.cancel("again"));
/// assert_eq!(token.cause(), Some("interrupted"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cause: Arc<OnceLock<String>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal. Returns false if it was already raised.
    pub fn cancel(&self, cause: impl Into<String>) -> bool {
        self.cause.set(cause.into()).is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cause.get().is_some()
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.get().map(String::as_str)
    }
}

/// Execution context handed to every command action.
#[derive(Debug, Clone, Default)]
pub struct ExecContext {
    cancel: CancelToken,
}

impl ExecContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self { cancel }
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
