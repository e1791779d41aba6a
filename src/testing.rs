//! testing
//!
//! Recording fakes for the binder and helper seams.
//!
//! Both fakes are cheap handles: clone one, attach the clone to an
//! [`Arg`](crate::Arg) or [`Command`](crate::Command), and inspect the
//! handle you kept after the run.
//!
//! ```
//! use clapr::testing::FakeBinder;
//! use clapr::{Arg, Command, ExecContext, Runner, Syntax};
//!
//! let fake = FakeBinder::new();
//! let root = Command::new("tool").arg(Arg::new("level").short('l').binder(fake.clone()));
//! Runner::new(root, Syntax::Gnu)
//!     .run(["--level=3"], &ExecContext::default())
//!     .unwrap();
//!
//! assert_eq!(fake.calls(), vec![("--level=3".to_string(), "3".to_string())]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::binder::{BindError, Binder};
use crate::core::command::CommandRef;
use crate::core::types::Syntax;
use crate::ui::help::Helper;

/// A binder that records every `(raw, value)` pair it receives.
#[derive(Debug, Clone, Default)]
pub struct FakeBinder {
    calls: Rc<RefCell<Vec<(String, String)>>>,
    failure: Option<String>,
    flag: bool,
}

impl FakeBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A binder that records the call, then fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Report the option as boolean-valued.
    pub fn as_flag(mut self) -> Self {
        self.flag = true;
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }
}

impl Binder for FakeBinder {
    fn bind(&self, raw: &str, value: &str) -> Result<(), BindError> {
        self.calls
            .borrow_mut()
            .push((raw.to_string(), value.to_string()));
        match &self.failure {
            Some(message) => Err(BindError::Custom(anyhow::anyhow!("{}", message))),
            None => Ok(()),
        }
    }

    fn is_flag(&self) -> bool {
        self.flag
    }
}

/// A helper that returns fixed text and records who asked for it.
#[derive(Debug, Clone, Default)]
pub struct FakeHelper {
    text: String,
    requests: Rc<RefCell<Vec<(String, Syntax)>>>,
}

impl FakeHelper {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            requests: Rc::default(),
        }
    }

    /// `(command name, syntax)` for every rendering, in order.
    pub fn requests(&self) -> Vec<(String, Syntax)> {
        self.requests.borrow().clone()
    }
}

impl Helper for FakeHelper {
    fn help(&self, command: CommandRef<'_>, syntax: Syntax) -> String {
        self.requests
            .borrow_mut()
            .push((command.name().to_string(), syntax));
        self.text.clone()
    }
}
