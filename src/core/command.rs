//! core::command
//!
//! Command definitions and the command tree.
//!
//! # Architecture
//!
//! Commands are declared with the owned, nested [`Command`] builder and then
//! frozen into a [`CommandTree`]: an arena of nodes addressed by
//! [`CommandId`], where each node stores its parent index and the indices
//! of its children.
//!
//! # Invariants
//!
//! - The tree is acyclic (built by depth-first insertion from a single root)
//! - Every non-root node has exactly one parent
//! - Every node carries a help option (injected unless already declared)
//! - The tree is immutable once built

use std::fmt;

use super::arg::Arg;
use crate::engine::ExecContext;
use crate::ui::help::Helper;

/// Action run when a command is matched: receives the execution context and
/// the command's operands in order.
pub type Action = Box<dyn Fn(&ExecContext, &[String])>;

/// Builder for a command and its subcommands.
///
/// A command without an action is a pure namespace for its subcommands.
pub struct Command {
    name: String,
    usage: String,
    args: Vec<Arg>,
    action: Option<Action>,
    helper: Option<Box<dyn Helper>>,
    subcommands: Vec<Command>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: String::new(),
            args: Vec::new(),
            action: None,
            helper: None,
            subcommands: Vec::new(),
        }
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = Arg>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&ExecContext, &[String]) + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Override help rendering for this command.
    pub fn helper(mut self, helper: impl Helper + 'static) -> Self {
        self.helper = Some(Box::new(helper));
        self
    }

    pub fn subcommand(mut self, command: Command) -> Self {
        self.subcommands.push(command);
        self
    }

    pub fn subcommands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.subcommands.extend(commands);
        self
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("action", &self.action.is_some())
            .field("subcommands", &self.subcommands)
            .finish_non_exhaustive()
    }
}

/// Index of a command in a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(usize);

impl CommandId {
    /// The root command is always the first node.
    pub const ROOT: CommandId = CommandId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

struct Node {
    name: String,
    usage: String,
    args: Vec<Arg>,
    action: Option<Action>,
    helper: Option<Box<dyn Helper>>,
    parent: Option<CommandId>,
    children: Vec<CommandId>,
}

/// The frozen command hierarchy.
pub struct CommandTree {
    nodes: Vec<Node>,
}

impl CommandTree {
    /// Freeze a root command and all of its subcommands.
    ///
    /// # Example
    ///
    /// ```
    /// use clapr::{Command, CommandId, CommandTree};
    ///
    /// let tree = CommandTree::new(
    ///     Command::new("git").subcommand(Command::new("remote").subcommand(Command::new("add"))),
    /// );
    ///
    /// let remote = tree.children(CommandId::ROOT)[0];
    /// let add = tree.children(remote)[0];
    /// assert_eq!(tree.path(add), vec!["git", "remote", "add"]);
    /// assert_eq!(tree.get(add).args()[0].long(), "help");
    /// ```
    pub fn new(root: Command) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.insert(root, None);
        tree
    }

    fn insert(&mut self, command: Command, parent: Option<CommandId>) -> CommandId {
        let Command {
            name,
            usage,
            mut args,
            action,
            helper,
            subcommands,
        } = command;

        if !args.iter().any(Arg::claims_help) {
            args.push(Arg::help_option());
        }

        let id = CommandId(self.nodes.len());
        self.nodes.push(Node {
            name,
            usage,
            args,
            action,
            helper,
            parent,
            children: Vec::new(),
        });

        for sub in subcommands {
            let child = self.insert(sub, Some(id));
            self.nodes[id.0].children.push(child);
        }
        id
    }

    pub fn root(&self) -> CommandId {
        CommandId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: CommandId) -> CommandRef<'_> {
        CommandRef { tree: self, id }
    }

    pub fn name(&self, id: CommandId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn args(&self, id: CommandId) -> &[Arg] {
        &self.nodes[id.0].args
    }

    pub fn parent(&self, id: CommandId) -> Option<CommandId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: CommandId) -> &[CommandId] {
        &self.nodes[id.0].children
    }

    pub(crate) fn action(&self, id: CommandId) -> Option<&Action> {
        self.nodes[id.0].action.as_ref()
    }

    pub(crate) fn helper(&self, id: CommandId) -> Option<&dyn Helper> {
        self.nodes[id.0].helper.as_deref()
    }

    /// Parent, grandparent, ... up to and including the root.
    pub fn ancestors(&self, id: CommandId) -> impl Iterator<Item = CommandId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Command names from the root down to `id`.
    pub fn path(&self, id: CommandId) -> Vec<&str> {
        let mut path: Vec<&str> = self.ancestors(id).map(|a| self.name(a)).collect();
        path.reverse();
        path.push(self.name(id));
        path
    }

    /// Commands that may be addressed by the token after `id` was matched.
    ///
    /// The children of `id` come first, then the children of each ancestor
    /// from the nearest to the root, so a nearer command shadows a farther
    /// one with the same name.
    pub fn reachable_from(&self, id: CommandId) -> Vec<CommandId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .flat_map(|c| self.children(c).iter().copied())
            .collect()
    }
}

impl fmt::Debug for CommandTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.nodes.len()).map(|i| self.get(CommandId(i))))
            .finish()
    }
}

/// Read-only view of one command in a tree.
#[derive(Clone, Copy)]
pub struct CommandRef<'a> {
    tree: &'a CommandTree,
    id: CommandId,
}

impl<'a> CommandRef<'a> {
    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn tree(&self) -> &'a CommandTree {
        self.tree
    }

    pub fn name(&self) -> &'a str {
        self.tree.name(self.id)
    }

    pub fn usage(&self) -> &'a str {
        &self.tree.nodes[self.id.0].usage
    }

    pub fn args(&self) -> &'a [Arg] {
        self.tree.args(self.id)
    }

    pub fn has_action(&self) -> bool {
        self.tree.action(self.id).is_some()
    }

    pub fn parent(&self) -> Option<CommandRef<'a>> {
        self.tree.parent(self.id).map(|id| self.tree.get(id))
    }

    pub fn subcommands(&self) -> impl Iterator<Item = CommandRef<'a>> + 'a {
        let tree = self.tree;
        tree.children(self.id).iter().map(move |&id| tree.get(id))
    }

    /// Names of the enclosing commands, root first.
    pub fn ancestor_names(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self
            .tree
            .ancestors(self.id)
            .map(|a| self.tree.name(a))
            .collect();
        names.reverse();
        names
    }
}

impl fmt::Debug for CommandRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("parent", &self.tree.parent(self.id))
            .field("children", &self.tree.children(self.id))
            .finish()
    }
}
