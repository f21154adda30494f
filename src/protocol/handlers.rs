//! Command handlers
//!
//! Executes parsed shell commands against a `DirectoryManager` and builds the
//! numeric-coded reply lines.

use log::info;
use std::path::{Path, PathBuf};

use crate::error::{DirectoryError, error_to_reply_code, handle_error};
use crate::manager::DirectoryManager;
use crate::protocol::commands::{Command, CommandResult, CommandStatus};

const HELP_TEXT: &str = "214 Commands: PWD, CWD [path], MKD <path>, RMD <path>, ZIP <path> [--delete], HELP, QUIT\r\n";

/// Dispatches a command to its handler.
pub fn handle_command(manager: &mut DirectoryManager, command: &Command) -> CommandResult {
    match command {
        Command::Pwd => handle_cmd_pwd(manager),
        Command::Cwd(path) => handle_cmd_cwd(manager, path.as_deref()),
        Command::Mkd(path) => handle_cmd_mkd(manager, path),
        Command::Rmd(path) => handle_cmd_rmd(manager, path),
        Command::Zip { path, delete_after } => handle_cmd_zip(manager, path, *delete_after),
        Command::Help => success(HELP_TEXT.to_string()),
        Command::Quit => CommandResult {
            status: CommandStatus::CloseSession,
            message: "221 Goodbye\r\n".into(),
        },
        Command::MissingArgument(verb) => CommandResult {
            status: CommandStatus::Failure(format!("{} requires an argument", verb)),
            message: "501 Syntax error in parameters or arguments\r\n".into(),
        },
        Command::Unknown(raw) => CommandResult {
            status: CommandStatus::Failure(format!("Unknown command: {}", raw)),
            message: "500 Unknown command\r\n".into(),
        },
    }
}

fn handle_cmd_pwd(manager: &DirectoryManager) -> CommandResult {
    success(format!("257 \"{}\"\r\n", manager.root().display()))
}

fn handle_cmd_cwd(manager: &mut DirectoryManager, path: Option<&str>) -> CommandResult {
    match manager.set_root(path.map(Path::new)) {
        Ok(root) => success(format!("250 Working directory is now \"{}\"\r\n", root.display())),
        Err(e) => failure(e),
    }
}

fn handle_cmd_mkd(manager: &DirectoryManager, path: &str) -> CommandResult {
    reply(manager.create_subdirectory(path), 257, "created")
}

fn handle_cmd_rmd(manager: &DirectoryManager, path: &str) -> CommandResult {
    reply(manager.delete_subdirectory(path), 250, "deleted")
}

fn handle_cmd_zip(manager: &DirectoryManager, path: &str, delete_after: bool) -> CommandResult {
    let verb = if delete_after {
        "archived and removed source"
    } else {
        "archived"
    };
    reply(manager.archive_directory(path, delete_after), 250, verb)
}

fn reply(result: Result<PathBuf, DirectoryError>, code: u16, verb: &str) -> CommandResult {
    match result {
        Ok(path) => {
            info!("Shell: {} {}", verb, path.display());
            success(format!("{} \"{}\" {}\r\n", code, path.display(), verb))
        }
        Err(e) => failure(e),
    }
}

fn success(message: String) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message,
    }
}

fn failure(err: DirectoryError) -> CommandResult {
    handle_error(&err);
    CommandResult {
        message: format!("{} {}\r\n", error_to_reply_code(&err), err),
        status: CommandStatus::Failure(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::commands::parse_command;

    fn manager() -> (tempfile::TempDir, DirectoryManager) {
        let dir = tempfile::tempdir().unwrap();
        let manager = DirectoryManager::new(Some(dir.path())).unwrap();
        (dir, manager)
    }

    #[test]
    fn test_mkd_then_duplicate() {
        let (_dir, mut manager) = manager();

        let result = handle_command(&mut manager, &parse_command("MKD a/b"));
        assert_eq!(result.status, CommandStatus::Success);
        assert!(result.message.starts_with("257 "));

        let result = handle_command(&mut manager, &parse_command("MKD a/b"));
        assert!(matches!(result.status, CommandStatus::Failure(_)));
        assert!(result.message.starts_with("550 "));
    }

    #[test]
    fn test_invalid_name_reply() {
        let (_dir, mut manager) = manager();
        let result = handle_command(&mut manager, &parse_command("MKD bad|name"));
        assert!(result.message.starts_with("553 "));
        assert!(result.message.contains("bad|name"));
    }

    #[test]
    fn test_zip_and_rmd() {
        let (_dir, mut manager) = manager();
        handle_command(&mut manager, &parse_command("MKD project/out"));

        let result = handle_command(&mut manager, &parse_command("ZIP project/out --delete"));
        assert_eq!(result.status, CommandStatus::Success);
        assert!(manager.root().join("project").join("out.zip").is_file());
        assert!(!manager.root().join("project").join("out").exists());

        let result = handle_command(&mut manager, &parse_command("RMD project"));
        assert_eq!(result.status, CommandStatus::Success);
        assert!(!manager.root().join("project").exists());
    }

    #[test]
    fn test_cwd_and_pwd() {
        let (_dir, mut manager) = manager();
        let other = tempfile::tempdir().unwrap();
        let other_root = other.path().canonicalize().unwrap();

        let result = handle_command(
            &mut manager,
            &Command::Cwd(Some(other.path().to_string_lossy().into_owned())),
        );
        assert_eq!(result.status, CommandStatus::Success);
        assert_eq!(manager.root(), other_root);

        let result = handle_command(&mut manager, &Command::Pwd);
        assert!(result.message.contains(&*other_root.to_string_lossy()));
    }

    #[test]
    fn test_quit_and_unknown() {
        let (_dir, mut manager) = manager();
        assert_eq!(
            handle_command(&mut manager, &Command::Quit).status,
            CommandStatus::CloseSession
        );
        assert!(
            handle_command(&mut manager, &parse_command("NOPE"))
                .message
                .starts_with("500 ")
        );
        assert!(
            handle_command(&mut manager, &parse_command("RMD"))
                .message
                .starts_with("501 ")
        );
    }
}
