//! Shell command protocol
//!
//! Command parsing and dispatch for the interactive `rax-dir` shell.

pub mod commands;
pub mod handlers;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::handle_command;
