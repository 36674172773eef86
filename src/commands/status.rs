//! Status command: show queued messages without consuming them.

use crate::error::Result;
use crate::models::StatusData;
use crate::queue::{MessageQueue, QueueLock};

/// Peek at the queue.
pub async fn status<L: QueueLock>(queue: &MessageQueue<L>) -> Result<StatusData> {
    let messages = queue.peek().await?;
    Ok(StatusData {
        count: messages.len(),
        messages,
    })
}

/// Human-readable summary for the terminal.
pub fn render_status(data: &StatusData) -> String {
    if data.messages.is_empty() {
        return "Queue is empty".to_string();
    }

    let mut out = format!("{} message(s) queued:", data.count);
    for (i, message) in data.messages.iter().enumerate() {
        out.push_str(&format!(
            "\n  [{}] {} {}",
            i + 1,
            message.timestamp.format("%Y-%m-%d %H:%M:%S"),
            message.text
        ));
    }
    out
}
