//! Tooling Layer
//!
//! Command-line surface: one-shot commands, the interactive shell, and the
//! text rendering they share.

pub mod cli;
pub mod format;
pub mod shell;

pub use cli::{Cli, CliContext, Commands};
pub use shell::{split_args, ShellCommand, ShellLine};
