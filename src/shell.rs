//! Interactive shell session
//!
//! Reads one command per line and writes one reply per command until `QUIT`
//! or end of input.

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{error_to_reply_code, handle_error};
use crate::protocol::{CommandStatus, parse_command};
use crate::shared::SharedDirectoryManager;

/// Runs a session over `input`/`output` against `manager`.
pub async fn run_session<R, W>(
    manager: SharedDirectoryManager,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(input);
    let mut line = String::new();

    let greeting = format!("220 rax-dir ready in \"{}\"\r\n", manager.root().await.display());
    output.write_all(greeting.as_bytes()).await?;
    output.flush().await?;

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            info!("Input closed, ending session");
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = parse_command(&line);
        let (message, close) = match manager.execute(command).await {
            Ok(result) => {
                if let CommandStatus::Failure(reason) = &result.status {
                    warn!("Command failed: {}", reason);
                }
                (result.message, result.status == CommandStatus::CloseSession)
            }
            Err(e) => {
                handle_error(&e);
                (format!("{} {}\r\n", error_to_reply_code(&e), e), false)
            }
        };

        output.write_all(message.as_bytes()).await?;
        output.flush().await?;

        if close {
            info!("Session closed by QUIT");
            return Ok(());
        }
    }
}
