//! engine::exec
//!
//! Executor: runs matched command actions in discovery order.
//!
//! # Invariants
//!
//! - Each matched command's action runs at most once
//! - Commands without an action are namespaces and are skipped
//! - The cancellation signal is polled before every action; once raised no
//!   further action runs, and actions that already ran are not undone

use tracing::debug;

use crate::core::command::CommandTree;

use super::runner::RunError;
use super::walk::ParsedCommand;
use super::ExecContext;

/// Run the actions of `commands`, root first.
///
/// Returns the number of actions invoked.
///
/// # Errors
///
/// [`RunError::Cancelled`] with the signal's cause if cancellation was
/// observed before an action.
pub fn execute(
    tree: &CommandTree,
    commands: &[ParsedCommand],
    ctx: &ExecContext,
) -> Result<usize, RunError> {
    let mut ran = 0;

    for parsed in commands {
        let Some(action) = tree.action(parsed.command) else {
            continue;
        };

        if let Some(cause) = ctx.cancel_token().cause() {
            debug!(cause, ran, "execution cancelled");
            return Err(RunError::Cancelled {
                cause: cause.to_string(),
            });
        }

        debug!(
            command = tree.name(parsed.command),
            operands = parsed.operands.len(),
            "running action"
        );
        action(ctx, parsed.operands.as_slice());
        ran += 1;
    }

    Ok(ran)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::command::{Command, CommandId};
    use crate::engine::CancelToken;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, name: &'static str) -> Command {
        let log = Rc::clone(log);
        Command::new(name).action(move |_, operands| {
            log.borrow_mut().push(format!("{}:{}", name, operands.join(",")));
        })
    }

    fn parsed(command: CommandId, operands: &[&str]) -> ParsedCommand {
        ParsedCommand {
            command,
            tokens: Vec::new(),
            index: 0,
            operands: operands.iter().map(|s| s.to_string()).collect(),
            args: Vec::new(),
        }
    }

    #[test]
    fn runs_in_order_and_skips_namespaces() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let tree = CommandTree::new(
            Command::new("ns")
                .subcommand(recorder(&log, "one"))
                .subcommand(recorder(&log, "two")),
        );
        let one = tree.children(CommandId::ROOT)[0];
        let two = tree.children(CommandId::ROOT)[1];

        let ran = execute(
            &tree,
            &[parsed(CommandId::ROOT, &[]), parsed(two, &["x"]), parsed(one, &["y", "z"])],
            &ExecContext::default(),
        )
        .unwrap();

        assert_eq!(ran, 2);
        assert_eq!(*log.borrow(), vec!["two:x", "one:y,z"]);
    }

    #[test]
    fn cancellation_stops_before_next_action() {
        let token = CancelToken::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let trigger = token.clone();
        let first_log = Rc::clone(&log);
        let tree = CommandTree::new(
            Command::new("root")
                .action(move |_, _| {
                    first_log.borrow_mut().push("root".to_string());
                    trigger.cancel("stop after root");
                })
                .subcommand(recorder(&log, "child")),
        );
        let child = tree.children(CommandId::ROOT)[0];

        let err = execute(
            &tree,
            &[parsed(CommandId::ROOT, &[]), parsed(child, &[])],
            &ExecContext::with_cancel(token),
        )
        .unwrap_err();

        assert!(matches!(err, RunError::Cancelled { ref cause } if cause == "stop after root"));
        assert_eq!(*log.borrow(), vec!["root"]);
    }
}
