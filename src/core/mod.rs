//! core
//!
//! Declarative side of clapr: what a command line is allowed to look like.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Syntax, Token
//! - [`naming`] - Portable option name rules
//! - [`arg`] - Argument definitions
//! - [`binder`] - Value binders and the shared `Bound` cell
//! - [`command`] - Command builder and the arena-backed command tree
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - The command tree is built once and is immutable during a run
//! - Definitions never hold parse state; parse state lives in [`crate::engine`]

pub mod arg;
pub mod binder;
pub mod command;
pub mod config;
pub mod naming;
pub mod types;

pub use types::{Syntax, Token};
