//! Interactive producer loop.
//!
//! Every line typed is queued as a message. Lines starting with `/` are
//! commands. Enqueue failures are printed and the loop keeps going so the
//! user can retry.

use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::Result;
use crate::queue::{MessageQueue, QueueLock};

use super::clear::{clear, render_clear};
use super::send::send;
use super::status::{render_status, status};

const PROMPT: &str = "sidecar> ";

const HELP: &str = "Type feedback and press Enter to queue it for Claude.\n\
Commands:\n  \
/status  show queued messages\n  \
/clear   drop all queued messages\n  \
/help    show this help\n  \
/quit    exit (also /exit or Ctrl-D)";

/// One parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveInput {
    Empty,
    Message(String),
    Status,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> InteractiveInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InteractiveInput::Empty;
    }
    if !trimmed.starts_with('/') {
        return InteractiveInput::Message(trimmed.to_string());
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "/status" => InteractiveInput::Status,
        "/clear" => InteractiveInput::Clear,
        "/help" | "/?" => InteractiveInput::Help,
        "/quit" | "/exit" => InteractiveInput::Quit,
        _ => InteractiveInput::Unknown(trimmed.to_string()),
    }
}

/// Run the loop until `/quit` or end of input. Returns how many messages were queued.
pub async fn run_interactive<L, R, W>(
    queue: &MessageQueue<L>,
    log_dir: &Path,
    reader: R,
    out: &mut W,
) -> Result<usize>
where
    L: QueueLock,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(
        out,
        "Claude Sidecar: {} message(s) pending. /help for commands.",
        queue.size().await
    )?;

    let mut lines = reader.lines();
    let mut queued = 0usize;

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match parse_line(&line) {
            InteractiveInput::Empty => {}
            InteractiveInput::Message(text) => match send(queue, log_dir, &text).await {
                Ok(data) => {
                    queued += 1;
                    writeln!(out, "✓ Queued ({} pending)", data.pending)?;
                }
                Err(e) => writeln!(out, "✗ Failed to queue message: {}", e)?,
            },
            InteractiveInput::Status => match status(queue).await {
                Ok(data) => writeln!(out, "{}", render_status(&data))?,
                Err(e) => writeln!(out, "✗ {}", e)?,
            },
            InteractiveInput::Clear => match clear(queue, log_dir).await {
                Ok(data) => writeln!(out, "{}", render_clear(&data))?,
                Err(e) => writeln!(out, "✗ {}", e)?,
            },
            InteractiveInput::Help => writeln!(out, "{}", HELP)?,
            InteractiveInput::Quit => break,
            InteractiveInput::Unknown(cmd) => {
                writeln!(out, "Unknown command: {} (try /help)", cmd)?
            }
        }
    }

    Ok(queued)
}
