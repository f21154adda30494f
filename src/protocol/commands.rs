//! Module `commands`
//!
//! Parses shell input lines into commands and defines the result types
//! returned by the handlers.

/// Flag accepted after the `ZIP` path to remove the source once archived.
pub const DELETE_FLAG: &str = "--delete";

/// A command parsed from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pwd,
    /// Change working root; `None` selects the process current directory
    Cwd(Option<String>),
    Mkd(String),
    Rmd(String),
    Zip { path: String, delete_after: bool },
    Help,
    Quit,
    /// A known verb given without its required argument
    MissingArgument(String),
    Unknown(String),
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseSession,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: String,
}

/// Parses a raw input line. Verbs are case-insensitive.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "PWD" => Command::Pwd,
        "CWD" if arg.is_empty() => Command::Cwd(None),
        "CWD" => Command::Cwd(Some(arg.to_string())),
        "MKD" if !arg.is_empty() => Command::Mkd(arg.to_string()),
        "RMD" if !arg.is_empty() => Command::Rmd(arg.to_string()),
        "ZIP" => parse_zip(arg),
        "HELP" => Command::Help,
        "QUIT" | "Q" => Command::Quit,
        "MKD" | "RMD" => Command::MissingArgument(cmd.clone()),
        _ => Command::Unknown(trimmed.to_string()),
    }
}

fn parse_zip(arg: &str) -> Command {
    let (path, delete_after) = match arg.strip_suffix(DELETE_FLAG) {
        Some(rest) => (rest.trim_end(), true),
        None => (arg, false),
    };

    if path.is_empty() {
        Command::MissingArgument("ZIP".into())
    } else {
        Command::Zip {
            path: path.to_string(),
            delete_after,
        }
    }
}
