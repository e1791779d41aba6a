//! engine::walk
//!
//! Token walker: assigns every raw token to the command it belongs to.
//!
//! # Algorithm
//!
//! Single pass, left to right. The root command always opens the first
//! group. A token equal to the name of a reachable command opens a new
//! group for that command and moves the reachable set to that command's
//! children plus the children of each of its ancestors; any other token is
//! appended to the currently open group.

use tracing::trace;

use crate::core::command::{CommandId, CommandTree};
use crate::core::types::Token;

use super::rules::ParsedArg;

/// A command matched during a run, with its share of the tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The matched command.
    pub command: CommandId,
    /// Residual tokens: everything up to the next matched command name.
    pub tokens: Vec<Token>,
    /// Argument index at which the command name was matched (0 for root).
    pub index: usize,
    /// Positional operands, filled by the rule engine.
    pub operands: Vec<String>,
    /// Options in match order, filled by the rule engine.
    pub args: Vec<ParsedArg>,
}

impl ParsedCommand {
    fn open(command: CommandId, index: usize) -> Self {
        Self {
            command,
            tokens: Vec::new(),
            index,
            operands: Vec::new(),
            args: Vec::new(),
        }
    }
}

/// Per-run command path state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    /// Commands whose name may match the next token.
    pub reachable: Vec<CommandId>,
    /// Set once a `--` terminated option parsing for the run.
    pub terminated: bool,
}

impl PathContext {
    pub fn new(tree: &CommandTree) -> Self {
        Self {
            reachable: tree.children(tree.root()).to_vec(),
            terminated: false,
        }
    }

    fn find(&self, tree: &CommandTree, token: &str) -> Option<CommandId> {
        self.reachable
            .iter()
            .copied()
            .find(|&id| tree.name(id) == token)
    }
}

/// Split `argv` into per-command token groups, in discovery order.
///
/// The first group always belongs to the root command.
///
/// # Example
///
/// ```
/// use clapr::engine::{walk, PathContext};
/// use clapr::{Command, CommandTree};
///
/// let tree = CommandTree::new(Command::new("tool").subcommand(Command::new("build")));
/// let argv: Vec<String> = ["-v", "build", "--release"].map(String::from).to_vec();
///
/// let mut path = PathContext::new(&tree);
/// let groups = walk(&tree, &argv, &mut path);
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].tokens[0].text, "-v");
/// assert_eq!(groups[1].index, 1);
/// assert_eq!(groups[1].tokens[0].text, "--release");
/// ```
pub fn walk(tree: &CommandTree, argv: &[String], path: &mut PathContext) -> Vec<ParsedCommand> {
    let mut groups = vec![ParsedCommand::open(tree.root(), 0)];

    for (index, arg) in argv.iter().enumerate() {
        if let Some(id) = path.find(tree, arg) {
            trace!(command = %arg, index, "matched command");
            path.reachable = tree.reachable_from(id);
            groups.push(ParsedCommand::open(id, index));
            continue;
        }

        if let Some(open) = groups.last_mut() {
            open.tokens.push(Token::new(index, arg.clone()));
        }
    }

    groups
}
