//! ui
//!
//! Text presented to the user of a command line program.
//!
//! # Modules
//!
//! - [`help`] - Help rendering and the per-command helper seam
//!
//! # Design
//!
//! Nothing here prints. Rendered text is returned to the caller, which
//! owns output and exit codes.

pub mod help;
